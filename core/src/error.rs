use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures of the link to a remote query engine.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Connection closed")]
    ConnectionClosed,
    #[error("Request timeout")]
    Timeout,
    #[error("Backend error: {0}")]
    Backend(String),
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("transport: {0}")]
    Transport(#[from] TransportError),
    #[error("invalid page window: {0}")]
    InvalidWindow(String),
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for QueryError {
    fn from(err: serde_json::Error) -> Self { QueryError::Decode(err.to_string()) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FailureKind {
    ConnectionClosed,
    Timeout,
    Backend,
    InvalidWindow,
    Decode,
    Other,
}

/// What a failed fetch leaves behind in a `QueryResult`. Unlike `QueryError` this can be cloned
/// into every observer and serialized across a boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl From<&QueryError> for QueryFailure {
    fn from(err: &QueryError) -> Self {
        let kind = match err {
            QueryError::Transport(TransportError::ConnectionClosed) => FailureKind::ConnectionClosed,
            QueryError::Transport(TransportError::Timeout) => FailureKind::Timeout,
            QueryError::Transport(TransportError::Backend(_)) => FailureKind::Backend,
            QueryError::Transport(TransportError::Other(_)) => FailureKind::Other,
            QueryError::InvalidWindow(_) => FailureKind::InvalidWindow,
            QueryError::Decode(_) => FailureKind::Decode,
        };
        QueryFailure { kind, message: err.to_string() }
    }
}

impl std::fmt::Display for QueryFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{:?}: {}", self.kind, self.message) }
}
