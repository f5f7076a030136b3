use crate::ast::{BoolExp, ComparisonOperator};
use crate::error::ExpressionError;
use crate::value::Value;
use std::convert::TryFrom;

impl<'a> TryFrom<&'a serde_json::Value> for BoolExp {
    type Error = ExpressionError;

    fn try_from(value: &'a serde_json::Value) -> Result<Self, Self::Error> { from_json(value) }
}
impl TryFrom<serde_json::Value> for BoolExp {
    type Error = ExpressionError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> { from_json(&value) }
}
impl<'a> TryFrom<&'a str> for BoolExp {
    type Error = ExpressionError;

    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        let json: serde_json::Value = serde_json::from_str(value).map_err(|e| ExpressionError::InvalidExpression(e.to_string()))?;
        from_json(&json)
    }
}

impl<'de> serde::Deserialize<'de> for BoolExp {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = serde_json::Value::deserialize(deserializer)?;
        from_json(&json).map_err(serde::de::Error::custom)
    }
}

/// Reads the `{ "_and": [...] }` JSON shape. An object with several keys is their conjunction,
/// and `{}` is the unconstrained expression.
fn from_json(json: &serde_json::Value) -> Result<BoolExp, ExpressionError> {
    let object = json.as_object().ok_or_else(|| ExpressionError::InvalidExpression(format!("expected an object, got {}", json)))?;

    let mut children = Vec::with_capacity(object.len());
    for (key, value) in object {
        children.push(match key.as_str() {
            "_and" => BoolExp::And(from_json_list(value)?),
            "_or" => BoolExp::Or(from_json_list(value)?),
            k if k.starts_with('_') => return Err(ExpressionError::UnsupportedOperator(k.to_string())),
            field => comparison(field, value)?,
        });
    }

    if children.len() == 1 {
        Ok(children.remove(0))
    } else {
        Ok(BoolExp::And(children))
    }
}

fn from_json_list(json: &serde_json::Value) -> Result<Vec<BoolExp>, ExpressionError> {
    json.as_array()
        .ok_or_else(|| ExpressionError::InvalidExpression(format!("expected a list, got {}", json)))?
        .iter()
        .map(from_json)
        .collect()
}

fn comparison(field: &str, json: &serde_json::Value) -> Result<BoolExp, ExpressionError> {
    let object = json.as_object().ok_or_else(|| ExpressionError::InvalidExpression(format!("expected comparison for {}", field)))?;

    let mut leaves = Vec::with_capacity(object.len());
    for (key, literal) in object {
        let operator = ComparisonOperator::from_key(key).ok_or_else(|| ExpressionError::UnsupportedOperator(key.clone()))?;
        let value = match literal {
            serde_json::Value::Number(n) => n.as_i64().map(Value::Integer),
            serde_json::Value::String(s) => Some(Value::Text(s.clone())),
            _ => None,
        }
        .ok_or_else(|| ExpressionError::UnsupportedLiteral { field: field.to_string(), literal: literal.to_string() })?;
        leaves.push(BoolExp::Compare { field: field.to_string(), operator, value });
    }

    match leaves.len() {
        0 => Err(ExpressionError::InvalidExpression(format!("empty comparison for {}", field))),
        1 => Ok(leaves.remove(0)),
        _ => Ok(BoolExp::And(leaves)),
    }
}
