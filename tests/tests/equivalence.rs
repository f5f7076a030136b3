mod common;

use anyhow::Result;
use common::*;
use gridql::{ExpressionCompiler, FieldDef, FilterCriterion, FilterSet, MatchMode, PredicateCompiler, RawValue, Schema};

const FIELDS: [&str; 6] = ["Task_Id", "Task_No", "Task_Name", "Task_Description", "global", "searchValue"];

const RAW_VALUES: [&str; 24] = [
    "", " ", "42", "042", "-3", "3-7", "7-3", "2-", "-", "x-y", "1-2-3", "6", "T-001", "abc", "ABC", "fix roof", "FIX ROOF ",
    "Paint hallway", "paint", "50%", "s_a", "\\", "roof", "0",
];

fn filter_sets() -> Vec<FilterSet> {
    let mut sets = vec![FilterSet::new()];
    for field in FIELDS {
        for raw in RAW_VALUES {
            for mode in [MatchMode::Eq, MatchMode::Range, MatchMode::Contains] {
                sets.push(FilterSet::new().with(field, FilterCriterion::new(raw, mode)));
            }
        }
        sets.push(FilterSet::new().with(field, FilterCriterion::new(42i64, MatchMode::Eq)));
        sets.push(FilterSet::new().with(field, FilterCriterion::unset()));
    }
    // A few conjunctions
    sets.push(FilterSet::new().with("Task_Id", FilterCriterion::eq("1-10")).with("global", FilterCriterion::contains("paint")));
    sets.push(FilterSet::new().with("Task_Name", FilterCriterion::contains("hall")).with("Task_Description", FilterCriterion::eq("")));
    sets.push(
        FilterSet::new()
            .with("global", FilterCriterion::eq("42"))
            .with("searchValue", FilterCriterion::eq("fix roof"))
            .with("Unknown", FilterCriterion::eq("x")),
    );
    sets
}

/// Folded fields are compared trimmed by the predicate; a backend sees `_ilike`, which does not
/// trim the stored value. The two agree when folded values are stored trimmed.
fn stored_trimmed(tasks: Vec<Task>) -> Vec<Task> {
    tasks.into_iter().map(|task| Task { description: task.description.map(|d| d.trim().to_string()), ..task }).collect()
}

/// Every FilterSet selects the same records through the predicate as through the expression
/// evaluated in memory.
#[test]
fn predicate_and_expression_select_the_same_records() -> Result<()> {
    let schema = task_schema();
    let tasks = stored_trimmed(tasks());
    let expressions = ExpressionCompiler::new(&schema);
    let predicates = PredicateCompiler::new(&schema);

    for filters in filter_sets() {
        let predicate = predicates.compile(&filters);
        let expression = expressions.compile(&filters);

        let by_predicate = ids(tasks.iter().filter(|t| predicate.matches(*t)));
        let by_expression = ids(tasks.iter().filter(|t| expression.evaluate(*t)));
        assert_eq!(by_predicate, by_expression, "filters {:?} compiled to {}", filters, expression);
    }
    Ok(())
}

#[test]
fn empty_values_are_no_ops() -> Result<()> {
    let schema = task_schema();
    let all = ids(&tasks());
    for field in FIELDS {
        for value in [None, Some(RawValue::from(""))] {
            let filters = FilterSet::new().with(field, FilterCriterion { value, match_mode: MatchMode::Eq });
            assert!(ExpressionCompiler::new(&schema).compile(&filters).is_unconstrained());
            let predicate = PredicateCompiler::new(&schema).compile(&filters);
            assert!(predicate.is_pass_all());
            assert_eq!(ids(tasks().iter().filter(|t| predicate.matches(*t))), all);
        }
    }

    // All of them at once
    let mut filters = FilterSet::new();
    for (i, field) in FIELDS.iter().enumerate() {
        let value = if i % 2 == 0 { None } else { Some(RawValue::from("")) };
        filters = filters.with(*field, FilterCriterion { value, match_mode: MatchMode::Eq });
    }
    let (expression, diagnostics) = ExpressionCompiler::new(&schema).compile_with_diagnostics(&filters);
    assert!(expression.is_unconstrained());
    assert!(diagnostics.is_empty());
    let predicate = PredicateCompiler::new(&schema).compile(&filters);
    assert!(predicate.is_pass_all());
    assert_eq!(ids(tasks().iter().filter(|t| predicate.matches(*t))), all);
    Ok(())
}

#[test]
fn folded_equality_reaches_the_wire_case_insensitively() -> Result<()> {
    let schema = task_schema();
    let filters = FilterSet::new().with("Task_Description", FilterCriterion::eq("FIX ROOF "));
    let expression = ExpressionCompiler::new(&schema).compile(&filters);
    assert_eq!(expression.to_json(), serde_json::json!({ "_and": [ { "Task_Description": { "_ilike": "fix roof" } } ] }));

    let tasks = stored_trimmed(tasks());
    let predicate = PredicateCompiler::new(&schema).compile(&filters);
    assert_eq!(ids(tasks.iter().filter(|t| predicate.matches(*t))), vec![3, 4, 7]);
    assert_eq!(ids(tasks.iter().filter(|t| expression.evaluate(*t))), vec![3, 4, 7]);
    Ok(())
}

#[test]
fn text_term_with_only_numeric_fields_selects_nothing() -> Result<()> {
    let schema = Schema::builder().field(FieldDef::integer("Task_Id").searchable_when_numeric()).build();
    let filters = FilterSet::new().with("global", FilterCriterion::eq("abc"));

    let expression = ExpressionCompiler::new(&schema).compile(&filters);
    assert!(!expression.is_unconstrained());
    let predicate = PredicateCompiler::new(&schema).compile(&filters);
    assert!(!predicate.is_pass_all());

    let tasks = tasks();
    assert!(tasks.iter().all(|t| !predicate.matches(t) && !expression.evaluate(t)));
    Ok(())
}

#[test]
fn zero_and_whitespace_constrain() -> Result<()> {
    let schema = task_schema();
    let predicate = PredicateCompiler::new(&schema).compile(&FilterSet::new().with("Task_Id", FilterCriterion::eq(0i64)));
    assert!(!predicate.is_pass_all());
    assert!(tasks().iter().all(|t| !predicate.matches(t)));

    let predicate = PredicateCompiler::new(&schema).compile(&FilterSet::new().with("Task_Name", FilterCriterion::eq(" ")));
    assert!(!predicate.is_pass_all());
    Ok(())
}
