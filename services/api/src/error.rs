use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::{error, warn};

use shared::ai::AiError;
use shared::db::error::DatabaseError;
use shared::models::ErrorResponse;

/// Request-level failures, each with a fixed status mapping. The kind is
/// the tag; no message inspection happens anywhere.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("transcript exceeds the input token budget")]
    TokenBudgetExceeded,

    #[error(transparent)]
    Ai(#[from] AiError),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("analysis not found")]
    NotFound,
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ApiError::Validation(message) => (StatusCode::BAD_REQUEST, message.clone()),
            ApiError::TokenBudgetExceeded => (
                StatusCode::BAD_REQUEST,
                "Transcript is too long. Please split it into smaller sections or reduce the content."
                    .to_string(),
            ),
            // Malformed model output is reported to the caller; the
            // message says what was wrong with the response.
            ApiError::Ai(err @ (AiError::ResponseFormat(_) | AiError::ResponseSchema(_))) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            // Provider outages and storage failures stay generic; detail
            // goes to the log only.
            ApiError::Ai(AiError::Service(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to analyze transcript. Please try again.".to_string(),
            ),
            ApiError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Analysis not found".to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            warn!(error = %self, "request rejected");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
