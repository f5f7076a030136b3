//! Filter already-fetched records in memory. The predicate compiled here selects exactly what the
//! expression compiler's output selects when evaluated against the same records.

use crate::collation::{text_eq, Comparator, SortMode};
use crate::criteria::{FilterSet, SortSpec};
use crate::error::CriterionError;
use crate::plan::{Constraint, Plan, RangeSpec};
use crate::schema::{Schema, TextCollation};
use crate::value::Value;

/// A record whose fields can be read by name. `None` means absent or null.
pub trait Filterable {
    fn value(&self, name: &str) -> Option<Value>;
}

impl Filterable for serde_json::Map<String, serde_json::Value> {
    fn value(&self, name: &str) -> Option<Value> { self.get(name).and_then(Value::from_json) }
}

impl<R: Filterable + ?Sized> Filterable for &R {
    fn value(&self, name: &str) -> Option<Value> { (**self).value(name) }
}

#[derive(Debug, Clone, PartialEq)]
enum Check {
    /// Stringified equality under the field's collation
    Exact { field: String, raw: String, collation: TextCollation },
    Range { field: String, range: RangeSpec },
    /// Lowercased substring
    Contains { field: String, needle: String },
    AnyOf(Vec<Check>),
}

impl Check {
    fn lower(constraint: &Constraint) -> Self {
        match constraint {
            Constraint::Exact { field, raw } => {
                Check::Exact { field: field.name().to_string(), raw: raw.clone(), collation: field.collation() }
            }
            Constraint::Range { field, range } => Check::Range { field: field.name().to_string(), range: *range },
            Constraint::Contains { field, needle } => Check::Contains { field: field.name().to_string(), needle: needle.to_lowercase() },
            Constraint::AnyOf(branches) => Check::AnyOf(branches.iter().map(Check::lower).collect()),
        }
    }

    fn matches<R: Filterable + ?Sized>(&self, record: &R) -> bool {
        match self {
            Check::Exact { field, raw, collation } => match record.value(field) {
                Some(value) => text_eq(*collation, &value.to_string(), raw),
                None => false,
            },
            Check::Range { field, range } => match record.value(field) {
                Some(Value::Integer(n)) => range.contains(n),
                _ => false,
            },
            Check::Contains { field, needle } => match record.value(field) {
                Some(value) => value.to_string().to_lowercase().contains(needle.as_str()),
                None => false,
            },
            Check::AnyOf(branches) => branches.iter().any(|branch| branch.matches(record)),
        }
    }
}

/// The compiled in-memory form of a FilterSet: a conjunction of field checks.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Predicate {
    checks: Vec<Check>,
}

impl Predicate {
    /// A predicate that every record passes.
    pub fn pass_all() -> Self { Self::default() }

    pub fn is_pass_all(&self) -> bool { self.checks.is_empty() }

    pub fn matches<R: Filterable + ?Sized>(&self, record: &R) -> bool { self.checks.iter().all(|check| check.matches(record)) }

    /// Lazily keeps the records that pass, in input order.
    pub fn filter<'a, I, R>(&'a self, records: I) -> impl Iterator<Item = R> + 'a
    where
        I: IntoIterator<Item = R> + 'a,
        I::IntoIter: 'a,
        R: Filterable + 'a,
    {
        records.into_iter().filter(move |record| self.matches(record))
    }
}

pub struct PredicateCompiler<'s> {
    schema: &'s Schema,
}

impl<'s> PredicateCompiler<'s> {
    pub fn new(schema: &'s Schema) -> Self { Self { schema } }

    pub fn compile(&self, filters: &FilterSet) -> Predicate { self.compile_with_diagnostics(filters).0 }

    pub fn compile_with_diagnostics(&self, filters: &FilterSet) -> (Predicate, Vec<CriterionError>) {
        let plan = Plan::new(self.schema, filters);
        let checks = plan.constraints.iter().map(Check::lower).collect();
        (Predicate { checks }, plan.diagnostics)
    }

    /// The table comparator for `sort`. See [`SortMode::Raw`] for its tie behavior.
    pub fn compile_comparator(&self, sort: Option<&SortSpec>) -> Comparator { Comparator::new(sort.cloned(), SortMode::Raw) }
}
