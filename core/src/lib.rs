//! Query orchestration for data tables: pagination, data sources and the `QueryService` state
//! machine that keeps only the newest request's result.

pub mod error;
pub mod local;
pub mod memory;
pub mod paginator;
pub mod remote;
pub mod result;
pub mod service;
pub mod source;

pub use error::{FailureKind, QueryError, QueryFailure, TransportError};
pub use local::LocalSource;
pub use memory::MemoryTransport;
pub use paginator::{apply_window, Page, PageWindow, RemoteWindow};
pub use remote::{RemoteQuery, RemoteResponse, RemoteSource, Transport};
pub use result::{QueryResult, QueryStatus};
pub use service::QueryService;
pub use source::{DataSource, QueryRequest};

// Re-export the compiler crate
pub use gridql;
