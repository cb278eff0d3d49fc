use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

use shared::models::format_timestamp;

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": format_timestamp(&Utc::now()),
    }))
}
