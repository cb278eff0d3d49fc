#![allow(dead_code)]

use std::env;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use axum::http::HeaderValue;
use sqlx::PgPool;
use uuid::Uuid;

use recap_api::{create_app, ApiConfig, AppState};
use shared::ai::{AiError, TranscriptAnalyzer, DEFAULT_MAX_INPUT_TOKENS};
use shared::db::repositories::AnalysisRepository;
use shared::models::{DecisionType, LlmActionItem, LlmAnalysis, LlmDecision, Priority};
use shared::DatabasePool;

/// Scripted analyzer behavior for a test.
pub enum MockBehavior {
    Succeed(LlmAnalysis),
    FormatError,
    SchemaError,
    ServiceError,
}

/// Stand-in for the OpenAI client; records how often it was called so
/// tests can assert fail-fast paths never reach the model.
pub struct MockAnalyzer {
    behavior: MockBehavior,
    calls: AtomicUsize,
}

impl MockAnalyzer {
    pub fn new(behavior: MockBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranscriptAnalyzer for MockAnalyzer {
    async fn analyze(&self, _transcript: &str) -> Result<LlmAnalysis, AiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            MockBehavior::Succeed(analysis) => Ok(analysis.clone()),
            MockBehavior::FormatError => Err(AiError::ResponseFormat(
                "expected value at line 1 column 1".to_string(),
            )),
            MockBehavior::SchemaError => Err(AiError::ResponseSchema(
                "missing field `sentiment`".to_string(),
            )),
            MockBehavior::ServiceError => {
                Err(AiError::Service("rate limited by OpenAI".to_string()))
            }
        }
    }
}

pub fn sample_analysis() -> LlmAnalysis {
    LlmAnalysis {
        sentiment: "productive".to_string(),
        sentiment_summary: "Focused and decisive.".to_string(),
        action_items: vec![LlmActionItem {
            description: "Finish API doc".to_string(),
            owner: Some("Sarah".to_string()),
            deadline: Some("Monday".to_string()),
            priority: Some(Priority::High),
        }],
        decisions: vec![LlmDecision {
            description: "Use Postgres".to_string(),
            decision_type: DecisionType::Made,
            context: None,
        }],
    }
}

pub fn test_config() -> ApiConfig {
    ApiConfig {
        port: 3001,
        database_url: String::new(),
        openai_api_key: "test-key".to_string(),
        openai_model: "gpt-4o-mini".to_string(),
        frontend_origin: HeaderValue::from_static("http://localhost:5173"),
        max_input_tokens: DEFAULT_MAX_INPUT_TOKENS,
    }
}

pub fn build_app(pool: &DatabasePool, analyzer: Arc<dyn TranscriptAnalyzer>) -> axum::Router {
    let state = AppState {
        config: test_config(),
        repository: AnalysisRepository::new(pool.pool()),
        analyzer,
    };
    create_app(state)
}

/// App wired to a pool that never connects, for tests whose requests must
/// be rejected before any database access.
pub fn build_offline_app(analyzer: Arc<dyn TranscriptAnalyzer>) -> axum::Router {
    let pool = DatabasePool::connect_lazy("postgresql://postgres@127.0.0.1:9/recap_offline")
        .expect("lazy pool options");
    build_app(&pool, analyzer)
}

pub struct TestDb {
    pub pool: DatabasePool,
    db_name: String,
    admin_url: String,
}

/// Creates a throwaway database from DATABASE_URL and runs migrations.
/// Returns `None` (so the caller can skip) when DATABASE_URL is unset.
pub async fn setup_test_database() -> Result<Option<TestDb>> {
    dotenvy::dotenv().ok();

    let Ok(base_url) = env::var("DATABASE_URL") else {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(None);
    };

    let (base_url_without_db, _) = base_url
        .rsplit_once('/')
        .context("DATABASE_URL has no database segment")?;
    let admin_url = format!("{}/postgres", base_url_without_db);

    let db_name = format!("recap_test_{}", Uuid::new_v4().simple());

    let admin_pool = PgPool::connect(&admin_url).await?;
    sqlx::query(&format!("CREATE DATABASE {}", db_name))
        .execute(&admin_pool)
        .await?;

    let pool = DatabasePool::new(&format!("{}/{}", base_url_without_db, db_name)).await?;
    sqlx::migrate!("./migrations").run(pool.pool()).await?;

    Ok(Some(TestDb {
        pool,
        db_name,
        admin_url,
    }))
}

pub async fn cleanup_test_database(db: TestDb) -> Result<()> {
    db.pool.pool().close().await;

    let admin_pool = PgPool::connect(&db.admin_url).await?;
    sqlx::query(&format!("DROP DATABASE IF EXISTS {} WITH (FORCE)", db.db_name))
        .execute(&admin_pool)
        .await?;

    Ok(())
}
