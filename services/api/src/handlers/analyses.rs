use axum::extract::{Path, State};
use axum::Json;

use shared::models::{AnalysisResponse, ListAnalysesResponse};

use crate::error::ApiError;
use crate::AppState;

const LIST_LIMIT: i64 = 50;

pub async fn get_analysis(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let analysis = state
        .repository
        .find_by_id(&id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(AnalysisResponse::from(analysis)))
}

pub async fn list_analyses(
    State(state): State<AppState>,
) -> Result<Json<ListAnalysesResponse>, ApiError> {
    let analyses = state.repository.list_recent(LIST_LIMIT).await?;

    Ok(Json(ListAnalysesResponse { analyses }))
}
