use async_trait::async_trait;
use gridql::{FilterSet, Filterable, SortSpec};
use serde::{Deserialize, Serialize};

use crate::error::QueryError;
use crate::paginator::{Page, PageWindow};

/// Parameters of one fetch, snapshotted when the fetch is issued.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryRequest {
    pub filters: FilterSet,
    pub sort: Option<SortSpec>,
    pub window: PageWindow,
}

impl QueryRequest {
    pub fn new(filters: FilterSet, sort: Option<SortSpec>, window: PageWindow) -> Self { Self { filters, sort, window } }
}

/// Where a `QueryService` gets its records from.
#[async_trait]
pub trait DataSource: Send + Sync {
    type Record: Filterable + Clone + Send + Sync + 'static;

    /// Whether `fetch` honors `QueryRequest::sort` across the whole filtered set. When it does
    /// not, only the returned page can be sorted.
    fn supports_sort(&self) -> bool;

    async fn fetch(&self, request: &QueryRequest) -> Result<Page<Self::Record>, QueryError>;
}

#[async_trait]
impl<D: DataSource + ?Sized> DataSource for std::sync::Arc<D> {
    type Record = D::Record;

    fn supports_sort(&self) -> bool { (**self).supports_sort() }

    async fn fetch(&self, request: &QueryRequest) -> Result<Page<Self::Record>, QueryError> { (**self).fetch(request).await }
}
