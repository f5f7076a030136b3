use std::sync::Arc;

use async_trait::async_trait;
use gridql::{Comparator, Filterable, PredicateCompiler, Schema, SortMode};
use tracing::debug;

use crate::error::QueryError;
use crate::paginator::Page;
use crate::source::{DataSource, QueryRequest};

/// An in-memory collection. Filters, sorts the full filtered set, then windows it.
pub struct LocalSource<R> {
    schema: Schema,
    records: Arc<Vec<R>>,
    sort_mode: SortMode,
}

impl<R> LocalSource<R> {
    pub fn new(schema: Schema, records: impl Into<Arc<Vec<R>>>) -> Self {
        Self { schema, records: records.into(), sort_mode: SortMode::Raw }
    }

    pub fn with_sort_mode(mut self, sort_mode: SortMode) -> Self {
        self.sort_mode = sort_mode;
        self
    }

    pub fn schema(&self) -> &Schema { &self.schema }
    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }
}

impl<R: Filterable + Clone> LocalSource<R> {
    /// Runs a request synchronously.
    pub fn query(&self, request: &QueryRequest) -> Page<R> {
        let (predicate, diagnostics) = PredicateCompiler::new(&self.schema).compile_with_diagnostics(&request.filters);
        if !diagnostics.is_empty() {
            debug!("LocalSource: {} filter diagnostics", diagnostics.len());
        }

        let mut matched: Vec<R> = predicate.filter(self.records.iter()).cloned().collect();
        Comparator::new(request.sort.clone(), self.sort_mode).sort(&mut matched);
        request.window.apply(matched)
    }
}

#[async_trait]
impl<R: Filterable + Clone + Send + Sync + 'static> DataSource for LocalSource<R> {
    type Record = R;

    fn supports_sort(&self) -> bool { true }

    async fn fetch(&self, request: &QueryRequest) -> Result<Page<R>, QueryError> { Ok(self.query(request)) }
}
