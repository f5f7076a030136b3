use std::sync::{Arc, Mutex, MutexGuard};

use gridql::{Comparator, FilterSet, SortMode, SortSpec};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::QueryFailure;
use crate::paginator::{Page, PageWindow};
use crate::result::{QueryResult, QueryStatus};
use crate::source::{DataSource, QueryRequest};

/// Drives one table's queries: holds the current filters, sort and window, issues fetches against a
/// `DataSource` and publishes results. Only the most recently issued fetch may commit; anything it
/// supersedes is discarded when it completes.
///
/// The non-`_wait` methods spawn the fetch onto the tokio runtime and return its sequence number.
pub struct QueryService<S: DataSource>(Arc<Inner<S>>);

struct Inner<S: DataSource> {
    source: S,
    state: Mutex<State>,
    result: watch::Sender<QueryResult<S::Record>>,
}

struct State {
    request: QueryRequest,
    /// Highest sequence number handed out so far
    issued: u64,
}

impl<S: DataSource> Clone for QueryService<S> {
    fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<S: DataSource + 'static> QueryService<S> {
    pub fn new(source: S, window: PageWindow) -> Self {
        let (result, _) = watch::channel(QueryResult::idle());
        Self(Arc::new(Inner {
            source,
            state: Mutex::new(State { request: QueryRequest { window, ..Default::default() }, issued: 0 }),
            result,
        }))
    }

    pub fn source(&self) -> &S { &self.0.source }

    /// The parameters the next fetch would use.
    pub fn request(&self) -> QueryRequest { self.state().request.clone() }

    pub fn snapshot(&self) -> QueryResult<S::Record> { self.0.result.borrow().clone() }

    pub fn subscribe(&self) -> watch::Receiver<QueryResult<S::Record>> { self.0.result.subscribe() }

    /// Replaces the filters and starts over at the first page.
    pub fn set_filters(&self, filters: FilterSet) -> u64 {
        let (sequence, request) = self.issue(|request| {
            request.filters = filters;
            request.window = request.window.first_page();
        });
        self.spawn(sequence, request);
        sequence
    }

    pub async fn set_filters_wait(&self, filters: FilterSet) {
        let (sequence, request) = self.issue(|request| {
            request.filters = filters;
            request.window = request.window.first_page();
        });
        self.activate(sequence, request).await;
    }

    /// Sources that sort refetch. Otherwise the sort is applied to the page currently shown, or
    /// to the page of a fetch still in flight, and `None` is returned.
    pub fn set_sort(&self, sort: Option<SortSpec>) -> Option<u64> {
        if self.0.source.supports_sort() {
            let (sequence, request) = self.issue(|request| request.sort = sort);
            self.spawn(sequence, request);
            Some(sequence)
        } else {
            self.resort_page(sort);
            None
        }
    }

    pub async fn set_sort_wait(&self, sort: Option<SortSpec>) {
        if self.0.source.supports_sort() {
            let (sequence, request) = self.issue(|request| request.sort = sort);
            self.activate(sequence, request).await;
        } else {
            self.resort_page(sort);
        }
    }

    /// Replaces the window as given; the offset is not reset.
    pub fn set_window(&self, window: PageWindow) -> u64 {
        let (sequence, request) = self.issue(|request| request.window = window);
        self.spawn(sequence, request);
        sequence
    }

    pub async fn set_window_wait(&self, window: PageWindow) {
        let (sequence, request) = self.issue(|request| request.window = window);
        self.activate(sequence, request).await;
    }

    pub fn refresh(&self) -> u64 {
        let (sequence, request) = self.issue(|_| {});
        self.spawn(sequence, request);
        sequence
    }

    pub async fn refresh_wait(&self) {
        let (sequence, request) = self.issue(|_| {});
        self.activate(sequence, request).await;
    }

    /// Waits until no fetch is outstanding.
    pub async fn settled(&self) -> QueryResult<S::Record> {
        let mut receiver = self.subscribe();
        let settled = match receiver.wait_for(|result| !result.is_loading).await {
            Ok(result) => (*result).clone(),
            // The sender lives as long as self
            Err(_) => self.snapshot(),
        };
        settled
    }

    fn state(&self) -> MutexGuard<'_, State> {
        // State is only ever replaced whole, so a poisoned lock still holds a usable value
        self.0.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Applies `change`, takes the next sequence number, snapshots the request and publishes
    /// `Loading`, all under the lock.
    fn issue(&self, change: impl FnOnce(&mut QueryRequest)) -> (u64, QueryRequest) {
        let mut state = self.state();
        change(&mut state.request);
        state.issued += 1;
        let sequence = state.issued;
        let request = state.request.clone();

        self.0.result.send_modify(|result| {
            result.is_loading = true;
            result.status = QueryStatus::Loading;
        });
        drop(state);
        debug!("QueryService issued request {}", sequence);
        (sequence, request)
    }

    fn spawn(&self, sequence: u64, request: QueryRequest) {
        let me = self.clone();
        tokio::spawn(async move { me.activate(sequence, request).await });
    }

    async fn activate(&self, sequence: u64, request: QueryRequest) {
        let outcome = self.0.source.fetch(&request).await;

        let state = self.state();
        if sequence != state.issued {
            debug!("QueryService discarding superseded request {} (latest is {})", sequence, state.issued);
            return;
        }

        // Publish under the lock so a request issued meanwhile cannot be overtaken
        match outcome {
            Ok(mut page) => {
                if !self.0.source.supports_sort() {
                    // The sort may have changed while this fetch was in flight
                    page_sort(state.request.sort.as_ref()).sort(&mut page.records);
                }
                info!("QueryService request {} returned {} of {} records", sequence, page.records.len(), page.total_count);
                self.commit(sequence, page);
            }
            Err(err) => {
                warn!("QueryService request {} failed: {}", sequence, err);
                let failure = QueryFailure::from(&err);
                self.0.result.send_modify(|result| {
                    result.is_loading = false;
                    result.status = QueryStatus::Failed;
                    result.error = Some(failure);
                    result.sequence = sequence;
                });
            }
        }
        drop(state);
    }

    fn commit(&self, sequence: u64, page: Page<S::Record>) {
        self.0.result.send_replace(QueryResult {
            records: page.records,
            total_count: page.total_count,
            is_loading: false,
            status: QueryStatus::Success,
            error: None,
            sequence,
        });
    }

    fn resort_page(&self, sort: Option<SortSpec>) {
        let mut state = self.state();
        state.request.sort = sort;
        let comparator = page_sort(state.request.sort.as_ref());
        let in_flight = self.0.result.borrow().is_loading;
        if in_flight {
            // The pending fetch picks the new sort up when it commits
            debug!("QueryService sort change deferred to pending request {}", state.issued);
            return;
        }
        warn!("QueryService: source cannot sort, only the current page is re-sorted");
        self.0.result.send_modify(|result| comparator.sort(&mut result.records));
    }
}

fn page_sort(sort: Option<&SortSpec>) -> Comparator { Comparator::new(sort.cloned(), SortMode::Raw) }
