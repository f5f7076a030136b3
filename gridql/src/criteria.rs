//! The input contract: raw filter values as the table UI hands them over.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    #[default]
    #[serde(alias = "equals")]
    Eq,
    #[serde(alias = "between")]
    Range,
    Contains,
}

/// A raw filter value: whatever the input widget produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(serde_json::Number),
    Text(String),
}

impl RawValue {
    /// The value as the compilers see it. Numbers are rendered the way they would be stringified.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            RawValue::Number(n) => Cow::Owned(n.to_string()),
            RawValue::Text(s) => Cow::Borrowed(s),
        }
    }

    pub fn is_empty(&self) -> bool { matches!(self, RawValue::Text(s) if s.is_empty()) }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self { RawValue::Text(value.to_string()) }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self { RawValue::Text(value) }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self { RawValue::Number(value.into()) }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self { RawValue::Number(value.into()) }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriterion {
    #[serde(default)]
    pub value: Option<RawValue>,
    #[serde(default)]
    pub match_mode: MatchMode,
}

impl FilterCriterion {
    pub fn new(value: impl Into<RawValue>, match_mode: MatchMode) -> Self { Self { value: Some(value.into()), match_mode } }

    pub fn eq(value: impl Into<RawValue>) -> Self { Self::new(value, MatchMode::Eq) }

    pub fn range(value: impl Into<RawValue>) -> Self { Self::new(value, MatchMode::Range) }

    pub fn contains(value: impl Into<RawValue>) -> Self { Self::new(value, MatchMode::Contains) }

    /// A criterion that constrains nothing, as an untouched filter widget reports it.
    pub fn unset() -> Self { Self::default() }

    /// The raw value, or `None` when this criterion contributes no constraint.
    pub fn raw(&self) -> Option<Cow<'_, str>> {
        match &self.value {
            Some(value) if !value.is_empty() => Some(value.as_text()),
            _ => None,
        }
    }
}

/// All field constraints of one query, keyed by field name (declared fields and global aliases).
///
/// A FilterSet is replaced wholesale on every interaction; compilers only ever read it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet(BTreeMap<String, FilterCriterion>);

impl FilterSet {
    pub fn new() -> Self { Self::default() }

    pub fn with(mut self, field: impl Into<String>, criterion: FilterCriterion) -> Self {
        self.insert(field, criterion);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, criterion: FilterCriterion) -> Option<FilterCriterion> {
        self.0.insert(field.into(), criterion)
    }

    pub fn get(&self, field: &str) -> Option<&FilterCriterion> { self.0.get(field) }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterCriterion)> { self.0.iter().map(|(k, v)| (k.as_str(), v)) }

    /// True when no criterion would contribute a constraint.
    pub fn is_unconstrained(&self) -> bool { self.0.values().all(|c| c.raw().is_none()) }
}

impl<K: Into<String>> FromIterator<(K, FilterCriterion)> for FilterSet {
    fn from_iter<T: IntoIterator<Item = (K, FilterCriterion)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn multiplier(&self) -> i32 {
        match self {
            SortDirection::Ascending => 1,
            SortDirection::Descending => -1,
        }
    }

    /// Reads a table-style sort order: positive is ascending, negative descending, zero is unsorted.
    pub fn from_order(order: i64) -> Option<Self> {
        match order {
            0 => None,
            o if o > 0 => Some(SortDirection::Ascending),
            _ => Some(SortDirection::Descending),
        }
    }
}

/// A sort request. "No sort" is expressed as `Option::<SortSpec>::None`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(field: impl Into<String>) -> Self { Self { field: field.into(), direction: SortDirection::Ascending } }

    pub fn descending(field: impl Into<String>) -> Self { Self { field: field.into(), direction: SortDirection::Descending } }
}
