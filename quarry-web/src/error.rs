//! Error types for quarry-web
//!
//! Every failure ends the current request only. Status mapping:
//! - backend non-2xx → the backend's own status
//! - backend 2xx other than 200 → 502
//! - backend unreachable → 502
//! - backend body malformed → 500

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use tracing::warn;

use crate::backend::BackendError;
use crate::render::escape_html;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Backend answered with an error status (propagated)
    #[error("Search backend returned status {0}")]
    Upstream(StatusCode),

    /// Backend could not be reached (502)
    #[error("Search backend unavailable: {0}")]
    BadGateway(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<BackendError> for ApiError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Status(code) => match StatusCode::from_u16(code) {
                // A success status without a search body is still a failed search
                Ok(status) if status.is_success() => {
                    ApiError::BadGateway(format!("unexpected status {}", code))
                }
                Ok(status) => ApiError::Upstream(status),
                Err(_) => ApiError::BadGateway(format!("invalid status {}", code)),
            },
            BackendError::Network(msg) => ApiError::BadGateway(msg),
            BackendError::Parse(msg) => ApiError::Internal(msg),
        }
    }
}

impl ApiError {
    /// HTTP status sent to the client
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Upstream(status) => *status,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!(status = status.as_u16(), error = %self, "Search request failed");

        // Details stay in the log; the page only shows the status line
        let reason = status.canonical_reason().unwrap_or("Error");
        let body = Html(format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"UTF-8\"><title>{code} {reason}</title></head>\n<body><h1>{code} {reason}</h1></body>\n</html>\n",
            code = status.as_u16(),
            reason = escape_html(reason),
        ));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
