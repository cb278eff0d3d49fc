use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use recap_api::{create_app, ApiConfig, AppState};
use shared::ai::{OpenAiClient, OpenAiConfig};
use shared::db::repositories::AnalysisRepository;
use shared::DatabasePool;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ApiConfig::from_env()?;

    let db_pool = DatabasePool::new(&config.database_url).await?;
    sqlx::migrate!("./migrations").run(db_pool.pool()).await?;

    let analyzer = OpenAiClient::new(OpenAiConfig::new(
        config.openai_api_key.clone(),
        config.openai_model.clone(),
    ));

    let port = config.port;
    let state = AppState {
        repository: AnalysisRepository::new(db_pool.pool()),
        analyzer: Arc::new(analyzer),
        config,
    };

    let app = create_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Recap API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
