use serde::Serialize;

use crate::error::QueryFailure;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum QueryStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Failed,
}

/// What observers of a `QueryService` see. Replaced wholesale on every transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult<R> {
    pub records: Vec<R>,
    /// Size of the full filtered set, independent of the page window
    pub total_count: usize,
    pub is_loading: bool,
    pub status: QueryStatus,
    pub error: Option<QueryFailure>,
    /// Sequence number of the request these records came from; 0 before the first commit
    pub sequence: u64,
}

impl<R> QueryResult<R> {
    pub fn idle() -> Self {
        Self { records: Vec::new(), total_count: 0, is_loading: false, status: QueryStatus::Idle, error: None, sequence: 0 }
    }

    pub fn is_success(&self) -> bool { self.status == QueryStatus::Success }
    pub fn is_failed(&self) -> bool { self.status == QueryStatus::Failed }
}

impl<R> Default for QueryResult<R> {
    fn default() -> Self { Self::idle() }
}
