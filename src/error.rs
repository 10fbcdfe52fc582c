//! Error types for the dashboard service

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

/// Errors raised by dashboard operations
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// No task with the given id
    #[error("task not found: {0}")]
    TaskNotFound(u64),

    /// Mode name outside focus/shortBreak/longBreak
    #[error("unknown session mode: {0}")]
    InvalidMode(String),

    /// Calendar month outside 1..=12 or unrepresentable year
    #[error("invalid calendar month: {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },

    /// Request body, path or query could not be extracted
    #[error("invalid request: {message}")]
    InvalidRequest { status: StatusCode, message: String },

    /// A shared state mutex was poisoned by a panicking holder
    #[error("failed to lock {0} state")]
    LockPoisoned(&'static str),
}

impl DashboardError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::TaskNotFound(_) => StatusCode::NOT_FOUND,
            DashboardError::InvalidMode(_) | DashboardError::InvalidMonth { .. } => {
                StatusCode::BAD_REQUEST
            }
            DashboardError::InvalidRequest { status, .. } => *status,
            DashboardError::LockPoisoned(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for DashboardError {
    fn from(rejection: JsonRejection) -> Self {
        DashboardError::InvalidRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for DashboardError {
    fn from(rejection: PathRejection) -> Self {
        DashboardError::InvalidRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for DashboardError {
    fn from(rejection: QueryRejection) -> Self {
        DashboardError::InvalidRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::debug!("Rejecting request: {}", self);
        }
        let body = json!({
            "status": "error",
            "message": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
