//! Fetching through a declarative query engine.

use async_trait::async_trait;
use gridql::{BoolExp, ExpressionCompiler, Filterable, Schema, SortSpec};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{QueryError, TransportError};
use crate::paginator::Page;
use crate::source::{DataSource, QueryRequest};

/// What is sent to the engine: `{limit, offset, where}` plus an ordering when the engine takes one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteQuery {
    pub limit: usize,
    pub offset: usize,
    #[serde(rename = "where")]
    pub filter: BoolExp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<SortSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteResponse<R> {
    pub records: Vec<R>,
    /// Count of everything `where` matches, ignoring limit and offset
    pub aggregate_count: usize,
}

#[async_trait]
pub trait Transport: Send + Sync {
    type Record: Filterable + Clone + Send + Sync + 'static;

    /// Whether `order_by` is honored.
    fn supports_sort(&self) -> bool;

    async fn query(&self, query: RemoteQuery) -> Result<RemoteResponse<Self::Record>, TransportError>;
}

pub struct RemoteSource<T> {
    schema: Schema,
    transport: T,
}

impl<T: Transport> RemoteSource<T> {
    pub fn new(schema: Schema, transport: T) -> Self { Self { schema, transport } }

    pub fn transport(&self) -> &T { &self.transport }

    pub fn build_query(&self, request: &QueryRequest) -> RemoteQuery {
        let (filter, diagnostics) = ExpressionCompiler::new(&self.schema).compile_with_diagnostics(&request.filters);
        if !diagnostics.is_empty() {
            debug!("RemoteSource: {} filter diagnostics", diagnostics.len());
        }
        let window = request.window.remote_params();
        let order_by = if self.transport.supports_sort() { request.sort.clone() } else { None };
        RemoteQuery { limit: window.limit, offset: window.offset, filter, order_by }
    }
}

#[async_trait]
impl<T: Transport> DataSource for RemoteSource<T> {
    type Record = T::Record;

    fn supports_sort(&self) -> bool { self.transport.supports_sort() }

    async fn fetch(&self, request: &QueryRequest) -> Result<Page<Self::Record>, QueryError> {
        let query = self.build_query(request);
        debug!("RemoteSource.fetch limit={} offset={} where={}", query.limit, query.offset, query.filter);
        let response = self.transport.query(query).await?;
        Ok(Page { records: response.records, total_count: response.aggregate_count })
    }
}
