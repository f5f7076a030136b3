//! Normalization of a FilterSet against a Schema.
//!
//! Both compilers lower the same `Plan`, so they agree on which criteria contribute, how ranges
//! split, and when numeric branches of a global search apply.

use tracing::debug;

use crate::criteria::{FilterCriterion, FilterSet, MatchMode};
use crate::error::CriterionError;
use crate::schema::{FieldDef, FieldType, Schema, SearchParticipation};
use crate::value::canonical_integer;

/// Inclusive integer bounds parsed from a dash-delimited raw value. A missing side is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeSpec {
    pub lower: Option<i64>,
    pub upper: Option<i64>,
}

impl RangeSpec {
    pub const SEPARATOR: char = '-';

    /// Splits at the first separator. Returns `None` when there is no separator at all, in which
    /// case the raw value is an equality constraint.
    pub fn parse(raw: &str) -> Option<RangeSpec> {
        let (lower, upper) = raw.split_once(Self::SEPARATOR)?;
        Some(RangeSpec { lower: lower.trim().parse().ok(), upper: upper.trim().parse().ok() })
    }

    pub fn is_well_formed(&self) -> bool { self.lower.is_some() && self.upper.is_some() }

    pub fn is_unbounded(&self) -> bool { self.lower.is_none() && self.upper.is_none() }

    pub fn contains(&self, n: i64) -> bool { self.lower.map_or(true, |lo| n >= lo) && self.upper.map_or(true, |hi| n <= hi) }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Constraint<'s> {
    /// Equality. For integer fields the raw value is compared as a number only if canonical.
    Exact { field: &'s FieldDef, raw: String },
    Range { field: &'s FieldDef, range: RangeSpec },
    /// Case-insensitive substring match.
    Contains { field: &'s FieldDef, needle: String },
    /// Disjunction produced by a global search criterion. Empty when no field can match the term,
    /// in which case nothing passes.
    AnyOf(Vec<Constraint<'s>>),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Plan<'s> {
    /// Conjunction of everything the FilterSet constrains, in schema order then alias order.
    pub constraints: Vec<Constraint<'s>>,
    pub diagnostics: Vec<CriterionError>,
}

impl<'s> Plan<'s> {
    pub fn new(schema: &'s Schema, filters: &FilterSet) -> Self {
        let mut plan = Plan::default();

        for (name, _) in filters.iter() {
            if schema.field(name).is_none() && !schema.is_global(name) {
                plan.diagnose(CriterionError::UnknownField(name.to_string()));
            }
        }

        for field in schema.fields() {
            if let Some(criterion) = filters.get(field.name()) {
                plan.field_criterion(field, criterion);
            }
        }

        for alias in schema.global_aliases() {
            if let Some(criterion) = filters.get(alias) {
                plan.global_criterion(schema, alias, criterion);
            }
        }

        plan
    }

    fn diagnose(&mut self, error: CriterionError) {
        debug!("filter criterion: {}", error);
        self.diagnostics.push(error);
    }

    fn effective_mode(&mut self, field: &FieldDef, mode: MatchMode) -> MatchMode {
        if field.supports(mode) {
            mode
        } else {
            self.diagnose(CriterionError::UnsupportedMatchMode { field: field.name().to_string(), mode });
            MatchMode::Eq
        }
    }

    fn field_criterion(&mut self, field: &'s FieldDef, criterion: &FilterCriterion) {
        let Some(raw) = criterion.raw() else { return };
        let raw = raw.into_owned();

        match self.effective_mode(field, criterion.match_mode) {
            MatchMode::Contains => self.constraints.push(Constraint::Contains { field, needle: raw }),
            // A range-capable field reads any separator as a range, whatever mode the widget sent
            MatchMode::Eq | MatchMode::Range if field.supports(MatchMode::Range) => match RangeSpec::parse(&raw) {
                Some(range) => self.range(field, range, raw),
                None => self.constraints.push(Constraint::Exact { field, raw }),
            },
            MatchMode::Eq | MatchMode::Range => self.constraints.push(Constraint::Exact { field, raw }),
        }
    }

    fn range(&mut self, field: &'s FieldDef, range: RangeSpec, raw: String) {
        if !range.is_well_formed() {
            self.diagnose(CriterionError::MalformedRange { field: field.name().to_string(), raw });
        }
        if !range.is_unbounded() {
            self.constraints.push(Constraint::Range { field, range });
        }
    }

    fn global_criterion(&mut self, schema: &'s Schema, alias: &str, criterion: &FilterCriterion) {
        let Some(raw) = criterion.raw() else { return };
        let raw = raw.into_owned();

        let contains = match criterion.match_mode {
            MatchMode::Contains => true,
            MatchMode::Eq => false,
            MatchMode::Range => {
                self.diagnose(CriterionError::UnsupportedMatchMode { field: alias.to_string(), mode: MatchMode::Range });
                false
            }
        };
        let numeric = canonical_integer(&raw).is_some();

        let mut branches = Vec::new();
        for field in schema.fields() {
            if field.numeric_gated() {
                if numeric {
                    branches.push(Constraint::Exact { field, raw: raw.clone() });
                }
            } else if field.search() == SearchParticipation::Always && field.ty() == FieldType::Text {
                if contains {
                    branches.push(Constraint::Contains { field, needle: raw.clone() });
                } else {
                    branches.push(Constraint::Exact { field, raw: raw.clone() });
                }
            }
        }

        if branches.is_empty() {
            self.diagnose(CriterionError::NoSearchableFields(raw));
        }
        self.constraints.push(Constraint::AnyOf(branches));
    }
}
