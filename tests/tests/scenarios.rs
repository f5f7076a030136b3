mod common;

use anyhow::Result;
use common::*;
use gridql::{Comparator, ExpressionCompiler, FilterCriterion, FilterSet, PredicateCompiler, SortSpec};
use gridql_core::{DataSource, LocalSource, MemoryTransport, PageWindow, QueryRequest, RemoteSource};
use serde_json::json;

fn numbered(n: i64) -> Vec<Task> { (1..=n).map(|id| Task::new(id, &format!("T-{:03}", id), &format!("Task {}", id), None)).collect() }

#[test]
fn range_criterion_compiles_and_filters() -> Result<()> {
    let schema = task_schema();
    let filters = FilterSet::new().with("Task_Id", FilterCriterion::eq("3-7"));

    assert_eq!(
        ExpressionCompiler::new(&schema).compile(&filters).to_json(),
        json!({ "_and": [ { "_and": [ { "Task_Id": { "_gte": 3 } }, { "Task_Id": { "_lte": 7 } } ] } ] })
    );

    let predicate = PredicateCompiler::new(&schema).compile(&filters);
    let records = numbered(10);
    assert_eq!(ids(records.iter().filter(|t| predicate.matches(*t))), vec![3, 4, 5, 6, 7]);
    Ok(())
}

#[test]
fn inverted_range_selects_nothing() -> Result<()> {
    let schema = task_schema();
    let filters = FilterSet::new().with("Task_Id", FilterCriterion::eq("7-3"));
    let predicate = PredicateCompiler::new(&schema).compile(&filters);
    assert!(numbered(10).iter().all(|t| !predicate.matches(t)));
    Ok(())
}

#[test]
fn global_numeric_term_adds_numeric_branches() -> Result<()> {
    let schema = task_schema();
    let expression = ExpressionCompiler::new(&schema).compile(&FilterSet::new().with("global", FilterCriterion::eq("42")));
    assert_eq!(
        expression.to_json(),
        json!({ "_and": [ { "_or": [
            { "Task_Id": { "_eq": 42 } },
            { "Task_No": { "_eq": "42" } },
            { "Task_Name": { "_eq": "42" } },
            { "Task_Description": { "_ilike": "42" } }
        ] } ] })
    );

    let expression = ExpressionCompiler::new(&schema).compile(&FilterSet::new().with("global", FilterCriterion::eq("abc")));
    assert_eq!(
        expression.to_json(),
        json!({ "_and": [ { "_or": [
            { "Task_Name": { "_eq": "abc" } },
            { "Task_Description": { "_ilike": "abc" } }
        ] } ] })
    );
    Ok(())
}

#[test]
fn window_over_23_records() -> Result<()> {
    let source = LocalSource::new(task_schema(), numbered(23));
    let page = source.query(&QueryRequest::new(FilterSet::new(), None, PageWindow::new(10, 20)?));
    assert_eq!(page.records.len(), 3);
    assert_eq!(page.total_count, 23);
    Ok(())
}

#[test]
fn no_sort_preserves_input_order() -> Result<()> {
    let mut records = vec![Task::new(9, "a", "x", None), Task::new(2, "b", "y", None), Task::new(5, "c", "z", None)];
    PredicateCompiler::new(&task_schema()).compile_comparator(None).sort(&mut records);
    assert_eq!(ids(&records), vec![9, 2, 5]);

    Comparator::default().sort(&mut records);
    assert_eq!(ids(&records), vec![9, 2, 5]);
    Ok(())
}

#[tokio::test]
async fn task_id_range_through_remote_source() -> Result<()> {
    let schema = task_schema();
    let source = RemoteSource::new(schema, MemoryTransport::new(numbered(10)));
    let request = QueryRequest::new(FilterSet::new().with("Task_Id", FilterCriterion::eq("2-3")), None, PageWindow::new(10, 0)?);

    assert_eq!(
        serde_json::to_value(&source.build_query(&request))?,
        json!({
            "limit": 10,
            "offset": 0,
            "where": { "_and": [ { "_and": [ { "Task_Id": { "_gte": 2 } }, { "Task_Id": { "_lte": 3 } } ] } ] }
        })
    );

    let page = source.fetch(&request).await?;
    assert_eq!(ids(&page.records), vec![2, 3]);
    assert_eq!(page.total_count, 2);
    Ok(())
}

#[tokio::test]
async fn remote_sort_spans_the_filtered_set() -> Result<()> {
    let schema = task_schema();
    let source = RemoteSource::new(schema, MemoryTransport::new(numbered(30)));
    let request = QueryRequest::new(
        FilterSet::new().with("Task_Id", FilterCriterion::eq("1-20")),
        Some(SortSpec::descending("Task_Id")),
        PageWindow::from_page(1, 5)?,
    );
    let page = source.fetch(&request).await?;
    assert_eq!(ids(&page.records), vec![20, 19, 18, 17, 16]);
    assert_eq!(page.total_count, 20);
    Ok(())
}
