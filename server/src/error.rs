use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gridql_core::QueryError;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid pagination: {0}")]
    InvalidPagination(String),
    #[error("Error fetching data")]
    Fetch(#[from] QueryError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidPagination(_) | ApiError::Fetch(QueryError::InvalidWindow(_)) => StatusCode::BAD_REQUEST,
            ApiError::Fetch(err) => {
                warn!("posts query failed: {}", err);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
