//! Compiles the filter state of a data table into query form.
//!
//! A [`FilterSet`] is normalized against a [`Schema`] once, then lowered either into a [`BoolExp`]
//! for a declarative backend ([`ExpressionCompiler`]) or into an in-memory [`Predicate`]
//! ([`PredicateCompiler`]). Both lower the same plan, so they select the same records.

pub mod ast;
pub mod collation;
pub mod conversion;
pub mod criteria;
pub mod error;
pub mod plan;
pub mod schema;
pub mod selection;
pub mod value;

pub use ast::{BoolExp, ComparisonOperator};
pub use collation::{Comparator, SortMode};
pub use criteria::{FilterCriterion, FilterSet, MatchMode, RawValue, SortDirection, SortSpec};
pub use error::{CriterionError, ExpressionError};
pub use plan::RangeSpec;
pub use schema::{FieldDef, FieldType, Schema, SearchParticipation, TextCollation};
pub use selection::expression::ExpressionCompiler;
pub use selection::filter::{Filterable, Predicate, PredicateCompiler};
pub use value::Value;
