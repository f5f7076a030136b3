//! Evaluates a boolean expression against a single record, the way a backend holding the records
//! would. Used by in-process transports and to check the two compilers against each other.

use crate::ast::{BoolExp, ComparisonOperator};
use crate::selection::filter::Filterable;
use crate::value::Value;

impl BoolExp {
    /// `_eq` compares stringified values exactly; case-insensitive equality arrives as `_ilike`.
    pub fn evaluate<R: Filterable + ?Sized>(&self, record: &R) -> bool {
        match self {
            BoolExp::And(children) => children.iter().all(|child| child.evaluate(record)),
            BoolExp::Or(children) => children.iter().any(|child| child.evaluate(record)),
            BoolExp::Compare { field, operator, value } => {
                let Some(actual) = record.value(field) else { return false };
                match operator {
                    ComparisonOperator::Equal => actual.to_string() == value.to_string(),
                    ComparisonOperator::GreaterThanOrEqual => ordered(&actual, value).is_some_and(|o| o.is_ge()),
                    ComparisonOperator::LessThanOrEqual => ordered(&actual, value).is_some_and(|o| o.is_le()),
                    ComparisonOperator::ILike => ilike(&actual.to_string(), &value.to_string()),
                }
            }
        }
    }
}

fn ordered(actual: &Value, literal: &Value) -> Option<std::cmp::Ordering> {
    match (actual, literal) {
        (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
        (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// Case-insensitive LIKE: `%` matches any run, `_` one character, `\` escapes the next character.
pub fn ilike(text: &str, pattern: &str) -> bool {
    let text: Vec<char> = text.to_lowercase().chars().collect();
    let pattern = tokenize(&pattern.to_lowercase());
    like_match(&text, &pattern)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Literal(char),
    AnyOne,
    AnyRun,
}

fn tokenize(pattern: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        tokens.push(match c {
            '\\' => Token::Literal(chars.next().unwrap_or('\\')),
            '%' => Token::AnyRun,
            '_' => Token::AnyOne,
            c => Token::Literal(c),
        });
    }
    tokens
}

fn like_match(text: &[char], pattern: &[Token]) -> bool {
    // Greedy matcher with backtracking to the most recent `%`
    let (mut t, mut p) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;
    while t < text.len() {
        match pattern.get(p) {
            Some(Token::AnyRun) => {
                backtrack = Some((p, t));
                p += 1;
            }
            Some(Token::AnyOne) => {
                t += 1;
                p += 1;
            }
            Some(Token::Literal(c)) if *c == text[t] => {
                t += 1;
                p += 1;
            }
            _ => match backtrack {
                Some((star, from)) => {
                    p = star + 1;
                    t = from + 1;
                    backtrack = Some((star, from + 1));
                }
                None => return false,
            },
        }
    }
    pattern[p..].iter().all(|token| *token == Token::AnyRun)
}
