use std::sync::Arc;

use async_trait::async_trait;
use gridql::{Comparator, Filterable, SortMode};

use crate::error::TransportError;
use crate::remote::{RemoteQuery, RemoteResponse, Transport};

/// A transport that answers remote queries from an in-process dataset by evaluating the
/// expression tree, the way a declarative engine would. Sort support can be switched off to behave
/// like an engine that ignores ordering.
#[derive(Clone)]
pub struct MemoryTransport<R> {
    records: Arc<Vec<R>>,
    sort: bool,
}

impl<R> MemoryTransport<R> {
    pub fn new(records: impl Into<Arc<Vec<R>>>) -> Self { Self { records: records.into(), sort: true } }

    pub fn without_sort(mut self) -> Self {
        self.sort = false;
        self
    }
}

#[async_trait]
impl<R: Filterable + Clone + Send + Sync + 'static> Transport for MemoryTransport<R> {
    type Record = R;

    fn supports_sort(&self) -> bool { self.sort }

    async fn query(&self, query: RemoteQuery) -> Result<RemoteResponse<R>, TransportError> {
        let mut matched: Vec<R> = self.records.iter().filter(|record| query.filter.evaluate(*record)).cloned().collect();
        if self.sort {
            Comparator::new(query.order_by.clone(), SortMode::Collated).sort(&mut matched);
        }
        let aggregate_count = matched.len();
        let records = matched.into_iter().skip(query.offset).take(query.limit).collect();
        Ok(RemoteResponse { records, aggregate_count })
    }
}
