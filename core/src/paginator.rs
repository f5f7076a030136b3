//! Offset/limit windows over a filtered collection.

use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// A page window: `limit` records starting at `offset`. `limit` is always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageWindow {
    limit: usize,
    offset: usize,
}

impl PageWindow {
    pub fn new(limit: usize, offset: usize) -> Result<Self, QueryError> {
        if limit == 0 {
            return Err(QueryError::InvalidWindow("limit must be greater than zero".into()));
        }
        Ok(Self { limit, offset })
    }

    /// From a 1-based page number, as table UIs and the demo backend count pages.
    pub fn from_page(page: usize, limit: usize) -> Result<Self, QueryError> {
        if page == 0 {
            return Err(QueryError::InvalidWindow("page numbers start at 1".into()));
        }
        let offset = (page - 1).checked_mul(limit).ok_or_else(|| QueryError::InvalidWindow(format!("page {} is out of range", page)))?;
        Self::new(limit, offset)
    }

    pub fn limit(&self) -> usize { self.limit }
    pub fn offset(&self) -> usize { self.offset }

    /// The same limit starting over at the first record.
    pub fn first_page(&self) -> Self { Self { limit: self.limit, offset: 0 } }

    /// Parameters for a remote query.
    pub fn remote_params(&self) -> RemoteWindow { RemoteWindow { limit: self.limit, offset: self.offset } }

    /// Slices the window out of an already filtered and sorted collection. `total_count` is the
    /// size of the whole collection, not of the window.
    pub fn apply<R>(&self, records: Vec<R>) -> Page<R> {
        let total_count = records.len();
        let records = records.into_iter().skip(self.offset).take(self.limit).collect();
        Page { records, total_count }
    }
}

impl Default for PageWindow {
    fn default() -> Self { Self { limit: 10, offset: 0 } }
}

/// Free-function form of [`PageWindow::apply`].
pub fn apply_window<R>(records: Vec<R>, window: PageWindow) -> Page<R> { window.apply(records) }

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteWindow {
    pub limit: usize,
    pub offset: usize,
}

/// One window of a result plus the size of the full filtered set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<R> {
    pub records: Vec<R>,
    pub total_count: usize,
}

impl<R> Page<R> {
    pub fn empty() -> Self { Self { records: Vec::new(), total_count: 0 } }
}

impl<R> Default for Page<R> {
    fn default() -> Self { Self::empty() }
}
