use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A single field value of a record. Absent or null fields are represented by `None` at the
/// `Filterable` boundary rather than by a variant here.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Text(String),
}

impl Value {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            Value::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            Value::Integer(_) => None,
        }
    }

    /// Mirrors the raw `>` used by the table comparator: integers compare numerically, text
    /// compares by code point, and mixed kinds are never greater than one another.
    pub fn raw_gt(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a > b,
            (Value::Text(a), Value::Text(b)) => a > b,
            _ => false,
        }
    }

    pub fn from_json(json: &serde_json::Value) -> Option<Value> {
        match json {
            serde_json::Value::Number(n) => n.as_i64().map(Value::Integer).or_else(|| Some(Value::Text(n.to_string()))),
            serde_json::Value::String(s) => Some(Value::Text(s.clone())),
            serde_json::Value::Bool(b) => Some(Value::Text(b.to_string())),
            serde_json::Value::Null => None,
            // Nested structures are not filterable
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self { Value::Integer(value) }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self { Value::Integer(value.into()) }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self { Value::Text(value.to_string()) }
}

impl From<String> for Value {
    fn from(value: String) -> Self { Value::Text(value) }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Integer(n) => serde_json::Value::from(n),
            Value::Text(s) => serde_json::Value::String(s),
        }
    }
}

/// Parses `raw` as an integer only when it is the canonical decimal rendering of that integer.
///
/// `"5"` and `"-3"` are numbers; `"05"`, `" 5"`, `"5.0"` and `"1e3"` are not. Both compilers gate
/// numeric comparisons on this, which keeps typed equality and stringified equality in agreement.
pub fn canonical_integer(raw: &str) -> Option<i64> { raw.parse::<i64>().ok().filter(|n| n.to_string() == raw) }
