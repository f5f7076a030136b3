use crate::ast::{BoolExp, ComparisonOperator};
use crate::collation::fold;
use crate::criteria::FilterSet;
use crate::error::CriterionError;
use crate::plan::{Constraint, Plan, RangeSpec};
use crate::schema::{FieldDef, FieldType, Schema, TextCollation};
use crate::value::{canonical_integer, Value};

/// Compiles a FilterSet into a boolean expression for a declarative query backend.
pub struct ExpressionCompiler<'s> {
    schema: &'s Schema,
}

impl<'s> ExpressionCompiler<'s> {
    pub fn new(schema: &'s Schema) -> Self { Self { schema } }

    /// Always a top-level `And`; an empty one when nothing is constrained.
    pub fn compile(&self, filters: &FilterSet) -> BoolExp { self.compile_with_diagnostics(filters).0 }

    pub fn compile_with_diagnostics(&self, filters: &FilterSet) -> (BoolExp, Vec<CriterionError>) {
        let plan = Plan::new(self.schema, filters);
        let children = plan.constraints.iter().map(lower).collect();
        (BoolExp::And(children), plan.diagnostics)
    }
}

fn lower(constraint: &Constraint) -> BoolExp {
    match constraint {
        Constraint::Exact { field, raw } => match field.collation() {
            TextCollation::Exact => BoolExp::eq(field.name(), literal(field, raw)),
            // A wildcard-free pattern is case-insensitive equality
            TextCollation::Folded => BoolExp::compare(field.name(), ComparisonOperator::ILike, escape_like(&fold(raw))),
        },
        Constraint::Range { field, range } => lower_range(field, range),
        Constraint::Contains { field, needle } => {
            BoolExp::compare(field.name(), ComparisonOperator::ILike, format!("%{}%", escape_like(needle)))
        }
        Constraint::AnyOf(branches) => BoolExp::Or(branches.iter().map(lower).collect()),
    }
}

/// Integer fields get a numeric literal only when the raw value is a canonical integer. Anything
/// else stays text, which a typed backend never finds equal to an integer column.
fn literal(field: &FieldDef, raw: &str) -> Value {
    match (field.ty(), canonical_integer(raw)) {
        (FieldType::Integer, Some(n)) => Value::Integer(n),
        _ => Value::Text(raw.to_string()),
    }
}

fn lower_range(field: &FieldDef, range: &RangeSpec) -> BoolExp {
    let name = field.name();
    match (range.lower, range.upper) {
        (Some(lower), Some(upper)) => BoolExp::And(vec![BoolExp::gte(name, lower), BoolExp::lte(name, upper)]),
        (Some(lower), None) => BoolExp::gte(name, lower),
        (None, Some(upper)) => BoolExp::lte(name, upper),
        // Plan never emits a fully unbounded range
        (None, None) => BoolExp::unconstrained(),
    }
}

/// Escapes LIKE metacharacters so the needle matches literally.
pub fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
