use axum::extract::State;
use axum::Json;
use tracing::info;

use shared::ai::is_within_budget;
use shared::models::{AnalysisResponse, AnalyzeTranscriptRequest};

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::AppState;

/// Analyze pipeline: validate length, check the token budget, call the
/// model, persist, shape the response. Both checks run before any
/// external call is made.
pub async fn analyze_transcript(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AnalyzeTranscriptRequest>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    request.validate().map_err(ApiError::Validation)?;

    if !is_within_budget(&request.transcript, state.config.max_input_tokens) {
        return Err(ApiError::TokenBudgetExceeded);
    }

    let analysis = state.analyzer.analyze(&request.transcript).await?;

    let stored = state
        .repository
        .save(&request.transcript, &analysis)
        .await?;

    info!(
        analysis_id = %stored.id,
        action_items = stored.action_items.len(),
        decisions = stored.decisions.len(),
        "transcript analyzed"
    );

    Ok(Json(AnalysisResponse::from(stored)))
}
