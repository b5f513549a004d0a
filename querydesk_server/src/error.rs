use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use querydesk_knowledge::KnowledgeError;
use querydesk_router::RouterError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Failures while building state or running the listener.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("routing table error: {0}")]
    Router(#[from] RouterError),

    #[error("knowledge base error: {0}")]
    Knowledge(#[from] KnowledgeError),

    #[error("LLM provider error: {0}")]
    Provider(anyhow::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Per-request failure rendered as `{"error": ...}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<RouterError> for ApiError {
    fn from(err: RouterError) -> Self {
        if err.is_query_error() {
            Self::bad_request(err.to_string())
        } else {
            error!("Routing failed: {err}");
            Self::internal(err.to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
