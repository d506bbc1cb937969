use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::ServiceError;
use thiserror::Error;
use tracing::error;

/// Failed invocation rendered as `{"error": ...}` with a status matching the failure.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        let status = match &e {
            ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
            ServiceError::InvalidArgument(_) | ServiceError::UnknownFunction(_) => StatusCode::BAD_REQUEST,
            ServiceError::Model(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self { status, message: e.to_string() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, error = %self.message, "invocation failed");
        }
        (self.status, Json(serde_json::json!({"error": self.message}))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("contract error: {0}")]
    Contract(#[from] ServiceError),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
