use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::db::error::DatabaseError;
use crate::models::{
    format_timestamp, ActionItem, AnalysisSummary, Decision, DecisionType, LlmAnalysis, Priority,
    StoredAnalysis,
};
use crate::utils::generate_ulid;

#[derive(Debug, FromRow)]
struct AnalysisRow {
    id: String,
    transcript_id: String,
    sentiment: String,
    sentiment_summary: Option<String>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct ActionItemRow {
    id: String,
    description: String,
    owner: Option<String>,
    deadline: Option<String>,
    priority: Option<String>,
}

#[derive(Debug, FromRow)]
struct DecisionRow {
    id: String,
    description: String,
    decision_type: String,
    context: Option<String>,
}

#[derive(Debug, FromRow)]
struct SummaryRow {
    id: String,
    transcript_id: String,
    sentiment: String,
    created_at: DateTime<Utc>,
    action_items_count: i64,
    decisions_count: i64,
}

#[derive(Clone)]
pub struct AnalysisRepository {
    pool: PgPool,
}

impl AnalysisRepository {
    pub fn new(pool: &PgPool) -> Self {
        Self { pool: pool.clone() }
    }

    /// Persists a transcript together with its analysis and all child rows
    /// in one transaction. Either everything commits or nothing is visible
    /// to readers.
    pub async fn save(
        &self,
        transcript: &str,
        analysis: &LlmAnalysis,
    ) -> Result<StoredAnalysis, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let transcript_id = generate_ulid();
        sqlx::query("INSERT INTO transcripts (id, content) VALUES ($1, $2)")
            .bind(&transcript_id)
            .bind(transcript)
            .execute(&mut *tx)
            .await?;

        let analysis_id = generate_ulid();
        let created_at: DateTime<Utc> = sqlx::query_scalar(
            r#"
            INSERT INTO analyses (id, transcript_id, sentiment, sentiment_summary)
            VALUES ($1, $2, $3, $4)
            RETURNING created_at
            "#,
        )
        .bind(&analysis_id)
        .bind(&transcript_id)
        .bind(&analysis.sentiment)
        .bind(&analysis.sentiment_summary)
        .fetch_one(&mut *tx)
        .await?;

        // `ordinal` records insertion order; child rows created in one
        // transaction share a timestamp, so the timestamp alone cannot
        // give a stable listing order.
        let mut action_items = Vec::with_capacity(analysis.action_items.len());
        for (ordinal, item) in analysis.action_items.iter().enumerate() {
            let id = generate_ulid();
            sqlx::query(
                r#"
                INSERT INTO action_items (id, analysis_id, description, owner, deadline, priority, ordinal)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(&id)
            .bind(&analysis_id)
            .bind(&item.description)
            .bind(&item.owner)
            .bind(&item.deadline)
            .bind(item.priority.map(|p| p.as_str()))
            .bind(ordinal as i32)
            .execute(&mut *tx)
            .await?;

            action_items.push(ActionItem {
                id,
                description: item.description.clone(),
                owner: item.owner.clone(),
                deadline: item.deadline.clone(),
                priority: item.priority,
            });
        }

        let mut decisions = Vec::with_capacity(analysis.decisions.len());
        for (ordinal, decision) in analysis.decisions.iter().enumerate() {
            let id = generate_ulid();
            sqlx::query(
                r#"
                INSERT INTO decisions (id, analysis_id, description, decision_type, context, ordinal)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(&id)
            .bind(&analysis_id)
            .bind(&decision.description)
            .bind(decision.decision_type.as_str())
            .bind(&decision.context)
            .bind(ordinal as i32)
            .execute(&mut *tx)
            .await?;

            decisions.push(Decision {
                id,
                description: decision.description.clone(),
                decision_type: decision.decision_type,
                context: decision.context.clone(),
            });
        }

        tx.commit().await?;

        Ok(StoredAnalysis {
            id: analysis_id,
            transcript_id,
            sentiment: analysis.sentiment.clone(),
            sentiment_summary: Some(analysis.sentiment_summary.clone()),
            action_items,
            decisions,
            created_at,
        })
    }

    /// Fetches one analysis with its children in creation order, or `None`
    /// when the id does not resolve.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<StoredAnalysis>, DatabaseError> {
        let row = sqlx::query_as::<_, AnalysisRow>(
            r#"
            SELECT id, transcript_id, sentiment, sentiment_summary, created_at
            FROM analyses
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let item_rows = sqlx::query_as::<_, ActionItemRow>(
            r#"
            SELECT id, description, owner, deadline, priority
            FROM action_items
            WHERE analysis_id = $1
            ORDER BY ordinal ASC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let decision_rows = sqlx::query_as::<_, DecisionRow>(
            r#"
            SELECT id, description, decision_type, context
            FROM decisions
            WHERE analysis_id = $1
            ORDER BY ordinal ASC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let action_items = item_rows
            .into_iter()
            .map(|item| {
                let priority = item
                    .priority
                    .map(|p| {
                        Priority::parse(&p).ok_or_else(|| {
                            DatabaseError::Decode(format!("unknown priority '{}'", p))
                        })
                    })
                    .transpose()?;
                Ok(ActionItem {
                    id: item.id,
                    description: item.description,
                    owner: item.owner,
                    deadline: item.deadline,
                    priority,
                })
            })
            .collect::<Result<Vec<_>, DatabaseError>>()?;

        let decisions = decision_rows
            .into_iter()
            .map(|decision| {
                let decision_type =
                    DecisionType::parse(&decision.decision_type).ok_or_else(|| {
                        DatabaseError::Decode(format!(
                            "unknown decision type '{}'",
                            decision.decision_type
                        ))
                    })?;
                Ok(Decision {
                    id: decision.id,
                    description: decision.description,
                    decision_type,
                    context: decision.context,
                })
            })
            .collect::<Result<Vec<_>, DatabaseError>>()?;

        Ok(Some(StoredAnalysis {
            id: row.id,
            transcript_id: row.transcript_id,
            sentiment: row.sentiment,
            sentiment_summary: row.sentiment_summary,
            action_items,
            decisions,
            created_at: row.created_at,
        }))
    }

    /// Returns the most recent analyses, newest first, with child counts
    /// instead of full child lists.
    pub async fn list_recent(&self, limit: i64) -> Result<Vec<AnalysisSummary>, DatabaseError> {
        let rows = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT a.id, a.transcript_id, a.sentiment, a.created_at,
                   (SELECT COUNT(*) FROM action_items i WHERE i.analysis_id = a.id) AS action_items_count,
                   (SELECT COUNT(*) FROM decisions d WHERE d.analysis_id = a.id) AS decisions_count
            FROM analyses a
            ORDER BY a.created_at DESC, a.id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| AnalysisSummary {
                id: row.id,
                transcript_id: row.transcript_id,
                sentiment: row.sentiment,
                created_at: format_timestamp(&row.created_at),
                action_items_count: row.action_items_count,
                decisions_count: row.decisions_count,
            })
            .collect())
    }
}
