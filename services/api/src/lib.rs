use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;

use shared::ai::TranscriptAnalyzer;
use shared::db::repositories::AnalysisRepository;

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;

pub use config::ApiConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub repository: AnalysisRepository,
    pub analyzer: Arc<dyn TranscriptAnalyzer>,
}

pub fn create_app(state: AppState) -> Router {
    let cors = middleware::cors_layer(state.config.frontend_origin.clone());

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route(
            "/api/transcripts/analyze",
            post(handlers::transcripts::analyze_transcript),
        )
        .route("/api/analyses/:id", get(handlers::analyses::get_analysis))
        .route("/api/analyses", get(handlers::analyses::list_analyses))
        .fallback(handlers::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::trace_layer())
                .layer(cors),
        )
        .with_state(state)
}
