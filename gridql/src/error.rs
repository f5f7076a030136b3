use crate::criteria::MatchMode;
use thiserror::Error;

/// Problems found while normalizing a single criterion. None of these fail a compilation: the
/// offending criterion is degraded (or dropped) and the condition is reported alongside the output.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CriterionError {
    #[error("malformed range '{raw}' on {field}: missing or non-numeric bound treated as unbounded")]
    MalformedRange { field: String, raw: String },
    #[error("unknown filter field: {0}")]
    UnknownField(String),
    #[error("{field} does not support {mode:?} matching, falling back to equality")]
    UnsupportedMatchMode { field: String, mode: MatchMode },
    #[error("global search '{0}' has no searchable fields")]
    NoSearchableFields(String),
}

/// Errors reading a boolean expression back from its JSON form
#[derive(Debug, Error, PartialEq)]
pub enum ExpressionError {
    #[error("Invalid expression: {0}")]
    InvalidExpression(String),
    #[error("Unsupported operator: {0}")]
    UnsupportedOperator(String),
    #[error("Unsupported literal for {field}: {literal}")]
    UnsupportedLiteral { field: String, literal: String },
}
