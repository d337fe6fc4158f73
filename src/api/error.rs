//! API error types and conversions

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;

/// API error types
#[derive(Debug)]
pub enum ApiError {
    /// Encoding the exposition failed
    Encoding(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::Encoding(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("failed to encode metrics: {msg}"),
            ),
        };

        error!("{error_message}");

        (status, error_message).into_response()
    }
}

impl From<prometheus::Error> for ApiError {
    fn from(err: prometheus::Error) -> Self {
        ApiError::Encoding(err.to_string())
    }
}
