mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use common::*;
use gridql::{FilterCriterion, FilterSet, SortSpec};
use gridql_core::{
    DataSource, FailureKind, LocalSource, MemoryTransport, Page, PageWindow, QueryError, QueryRequest, QueryService, QueryStatus,
    RemoteSource, TransportError,
};

fn numbered(n: i64) -> Vec<Task> { (1..=n).map(|id| Task::new(id, &format!("T-{:03}", id), &format!("Task {:02}", id), None)).collect() }

/// Wraps a source and delays each fetch by a scripted amount.
struct Scripted<S> {
    inner: S,
    delays_ms: Vec<u64>,
    calls: AtomicUsize,
}

impl<S> Scripted<S> {
    fn new(inner: S, delays_ms: Vec<u64>) -> Self { Self { inner, delays_ms, calls: AtomicUsize::new(0) } }
}

#[async_trait]
impl<S: DataSource> DataSource for Scripted<S> {
    type Record = S::Record;

    fn supports_sort(&self) -> bool { self.inner.supports_sort() }

    async fn fetch(&self, request: &QueryRequest) -> Result<Page<Self::Record>, QueryError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = self.delays_ms.get(call).copied().unwrap_or(0);
        tokio::time::sleep(Duration::from_millis(delay)).await;
        self.inner.fetch(request).await
    }
}

struct Unreachable;

#[async_trait]
impl DataSource for Unreachable {
    type Record = Task;

    fn supports_sort(&self) -> bool { true }

    async fn fetch(&self, _request: &QueryRequest) -> Result<Page<Task>, QueryError> {
        Err(TransportError::Backend("upstream returned 503".into()).into())
    }
}

#[tokio::test(start_paused = true)]
async fn slow_older_request_never_overwrites_newer() -> Result<()> {
    let source = Scripted::new(LocalSource::new(task_schema(), numbered(30)), vec![200, 10]);
    let service = QueryService::new(source, PageWindow::new(5, 0)?);
    let mut updates = service.subscribe();

    let first = service.set_filters(FilterSet::new().with("Task_Id", FilterCriterion::eq("1-3")));
    let second = service.set_filters(FilterSet::new().with("Task_Id", FilterCriterion::eq("10-12")));
    assert!(updates.borrow_and_update().is_loading);

    let settled = service.settled().await;
    assert_eq!(settled.sequence, second);
    assert_eq!(ids(&settled.records), vec![10, 11, 12]);

    tokio::time::sleep(Duration::from_millis(500)).await;
    let result = service.snapshot();
    assert_eq!(result.sequence, second);
    assert_ne!(result.sequence, first);
    assert_eq!(ids(&result.records), vec![10, 11, 12]);
    assert_eq!(result.status, QueryStatus::Success);
    Ok(())
}

#[tokio::test]
async fn failure_is_published_not_raised() -> Result<()> {
    let service = QueryService::new(Unreachable, PageWindow::default());
    service.refresh_wait().await;

    let result = service.snapshot();
    assert_eq!(result.status, QueryStatus::Failed);
    assert!(!result.is_loading);
    let failure = result.error.expect("failure recorded");
    assert_eq!(failure.kind, FailureKind::Backend);
    assert!(failure.message.contains("503"));
    Ok(())
}

#[tokio::test]
async fn filter_change_resets_offset_but_window_change_does_not() -> Result<()> {
    let service = QueryService::new(LocalSource::new(task_schema(), numbered(23)), PageWindow::new(10, 0)?);

    service.set_window_wait(PageWindow::new(10, 20)?).await;
    assert_eq!(ids(&service.snapshot().records), vec![21, 22, 23]);
    assert_eq!(service.request().window.offset(), 20);

    service.set_filters_wait(FilterSet::new().with("global", FilterCriterion::contains("task 1"))).await;
    assert_eq!(service.request().window.offset(), 0);
    let result = service.snapshot();
    assert_eq!(ids(&result.records), vec![10, 11, 12, 13, 14, 15, 16, 17, 18, 19]);
    assert_eq!(result.total_count, 10);
    Ok(())
}

#[tokio::test]
async fn sorting_source_refetches_the_full_set() -> Result<()> {
    let schema = task_schema();
    let service = QueryService::new(RemoteSource::new(schema, MemoryTransport::new(numbered(23))), PageWindow::new(5, 0)?);
    service.refresh_wait().await;
    assert_eq!(ids(&service.snapshot().records), vec![1, 2, 3, 4, 5]);

    service.set_sort_wait(Some(SortSpec::descending("Task_Id"))).await;
    assert_eq!(ids(&service.snapshot().records), vec![23, 22, 21, 20, 19]);
    Ok(())
}

#[tokio::test]
async fn non_sorting_source_resorts_only_the_current_page() -> Result<()> {
    let schema = task_schema();
    let transport = MemoryTransport::new(numbered(23)).without_sort();
    let service = QueryService::new(RemoteSource::new(schema, transport), PageWindow::new(5, 0)?);
    service.refresh_wait().await;
    let sequence = service.snapshot().sequence;

    assert_eq!(service.set_sort(Some(SortSpec::descending("Task_Id"))), None);
    let result = service.snapshot();
    assert_eq!(ids(&result.records), vec![5, 4, 3, 2, 1]);
    assert_eq!(result.sequence, sequence);

    // The next page comes back in transport order and is sorted on arrival
    service.set_window_wait(PageWindow::new(5, 5)?).await;
    assert_eq!(ids(&service.snapshot().records), vec![10, 9, 8, 7, 6]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn sort_change_during_fetch_applies_to_the_pending_page() -> Result<()> {
    let schema = task_schema();
    let transport = MemoryTransport::new(numbered(23)).without_sort();
    let source = Scripted::new(RemoteSource::new(schema, transport), vec![50]);
    let service = QueryService::new(source, PageWindow::new(3, 0)?);

    service.refresh();
    assert_eq!(service.set_sort(Some(SortSpec::descending("Task_Id"))), None);
    let result = service.settled().await;
    assert_eq!(ids(&result.records), vec![3, 2, 1]);
    Ok(())
}
