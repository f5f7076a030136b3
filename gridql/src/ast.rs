use serde::{Serialize, Serializer};

use crate::value::Value;

/// Boolean filter expression for a declarative query backend.
///
/// Renders to the `{ "_and": [...] }` / `{ "field": { "_eq": v } }` JSON shape.
#[derive(Debug, Clone, PartialEq)]
pub enum BoolExp {
    And(Vec<BoolExp>),
    Or(Vec<BoolExp>),
    Compare { field: String, operator: ComparisonOperator, value: Value },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOperator {
    Equal,              // _eq
    GreaterThanOrEqual, // _gte
    LessThanOrEqual,    // _lte
    ILike,              // _ilike
}

impl ComparisonOperator {
    pub fn key(&self) -> &'static str {
        match self {
            ComparisonOperator::Equal => "_eq",
            ComparisonOperator::GreaterThanOrEqual => "_gte",
            ComparisonOperator::LessThanOrEqual => "_lte",
            ComparisonOperator::ILike => "_ilike",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Some(match key {
            "_eq" => ComparisonOperator::Equal,
            "_gte" => ComparisonOperator::GreaterThanOrEqual,
            "_lte" => ComparisonOperator::LessThanOrEqual,
            "_ilike" => ComparisonOperator::ILike,
            _ => return None,
        })
    }
}

impl BoolExp {
    pub fn compare(field: impl Into<String>, operator: ComparisonOperator, value: impl Into<Value>) -> Self {
        BoolExp::Compare { field: field.into(), operator, value: value.into() }
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self { Self::compare(field, ComparisonOperator::Equal, value) }

    pub fn gte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, ComparisonOperator::GreaterThanOrEqual, value)
    }

    pub fn lte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, ComparisonOperator::LessThanOrEqual, value)
    }

    /// The expression that constrains nothing.
    pub fn unconstrained() -> Self { BoolExp::And(Vec::new()) }

    pub fn is_unconstrained(&self) -> bool { matches!(self, BoolExp::And(children) if children.is_empty()) }

    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::{json, Map};
        match self {
            BoolExp::And(children) if children.is_empty() => serde_json::Value::Object(Map::new()),
            BoolExp::And(children) => json!({ "_and": children.iter().map(BoolExp::to_json).collect::<Vec<_>>() }),
            BoolExp::Or(children) => json!({ "_or": children.iter().map(BoolExp::to_json).collect::<Vec<_>>() }),
            BoolExp::Compare { field, operator, value } => {
                let mut comparison = Map::new();
                comparison.insert(operator.key().to_string(), value.clone().into());
                let mut leaf = Map::new();
                leaf.insert(field.clone(), serde_json::Value::Object(comparison));
                serde_json::Value::Object(leaf)
            }
        }
    }
}

impl Serialize for BoolExp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> { self.to_json().serialize(serializer) }
}

impl std::fmt::Display for BoolExp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.to_json()) }
}
