pub mod ai;
pub mod db;
pub mod models;
pub mod utils;

pub use ai::{AiError, OpenAiClient, OpenAiConfig, TranscriptAnalyzer};
pub use db::pool::DatabasePool;
