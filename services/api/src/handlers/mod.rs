pub mod analyses;
pub mod health;
pub mod transcripts;

use axum::http::StatusCode;
use axum::Json;

use shared::models::ErrorResponse;

pub async fn not_found() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Route not found".to_string(),
        }),
    )
}
