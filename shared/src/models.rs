use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub const TRANSCRIPT_MIN_CHARS: usize = 10;
pub const TRANSCRIPT_MAX_CHARS: usize = 50_000;

/// Request body for the analyze endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeTranscriptRequest {
    pub transcript: String,
}

impl AnalyzeTranscriptRequest {
    /// Checks the transcript length bounds. Counts characters, not bytes,
    /// so multi-byte input is not penalized.
    pub fn validate(&self) -> Result<(), String> {
        let chars = self.transcript.chars().count();
        if chars < TRANSCRIPT_MIN_CHARS {
            return Err(format!(
                "Transcript must be at least {} characters",
                TRANSCRIPT_MIN_CHARS
            ));
        }
        if chars > TRANSCRIPT_MAX_CHARS {
            return Err(format!(
                "Transcript is too long. Please limit to {} characters",
                TRANSCRIPT_MAX_CHARS
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "high" => Some(Priority::High),
            "medium" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionType {
    Made,
    Pending,
}

impl DecisionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionType::Made => "made",
            DecisionType::Pending => "pending",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "made" => Some(DecisionType::Made),
            "pending" => Some(DecisionType::Pending),
            _ => None,
        }
    }
}

/// The structured output the model must return. Field names and enum
/// values match the JSON schema embedded in the user prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmAnalysis {
    pub sentiment: String,
    pub sentiment_summary: String,
    pub action_items: Vec<LlmActionItem>,
    pub decisions: Vec<LlmDecision>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmActionItem {
    pub description: String,
    pub owner: Option<String>,
    pub deadline: Option<String>,
    pub priority: Option<Priority>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmDecision {
    pub description: String,
    #[serde(rename = "type")]
    pub decision_type: DecisionType,
    pub context: Option<String>,
}

/// A fully loaded analysis as read back from the database.
#[derive(Debug, Clone)]
pub struct StoredAnalysis {
    pub id: String,
    pub transcript_id: String,
    pub sentiment: String,
    pub sentiment_summary: Option<String>,
    pub action_items: Vec<ActionItem>,
    pub decisions: Vec<Decision>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ActionItem {
    pub id: String,
    pub description: String,
    pub owner: Option<String>,
    pub deadline: Option<String>,
    pub priority: Option<Priority>,
}

#[derive(Debug, Clone)]
pub struct Decision {
    pub id: String,
    pub description: String,
    pub decision_type: DecisionType,
    pub context: Option<String>,
}

/// Timestamps cross the wire as RFC 3339 with millisecond precision.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

// --- Wire DTOs ---

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub id: String,
    pub transcript_id: String,
    pub sentiment: String,
    pub sentiment_summary: Option<String>,
    pub action_items: Vec<ActionItemResponse>,
    pub decisions: Vec<DecisionResponse>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItemResponse {
    pub id: String,
    pub description: String,
    pub owner: Option<String>,
    pub deadline: Option<String>,
    pub priority: Option<Priority>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionResponse {
    pub id: String,
    pub description: String,
    #[serde(rename = "type")]
    pub decision_type: DecisionType,
    pub context: Option<String>,
}

impl From<StoredAnalysis> for AnalysisResponse {
    fn from(analysis: StoredAnalysis) -> Self {
        Self {
            id: analysis.id,
            transcript_id: analysis.transcript_id,
            sentiment: analysis.sentiment,
            sentiment_summary: analysis.sentiment_summary,
            action_items: analysis
                .action_items
                .into_iter()
                .map(|item| ActionItemResponse {
                    id: item.id,
                    description: item.description,
                    owner: item.owner,
                    deadline: item.deadline,
                    priority: item.priority,
                })
                .collect(),
            decisions: analysis
                .decisions
                .into_iter()
                .map(|decision| DecisionResponse {
                    id: decision.id,
                    description: decision.description,
                    decision_type: decision.decision_type,
                    context: decision.context,
                })
                .collect(),
            created_at: format_timestamp(&analysis.created_at),
        }
    }
}

/// Index-view entry: child counts instead of full child lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub id: String,
    pub transcript_id: String,
    pub sentiment: String,
    pub created_at: String,
    pub action_items_count: i64,
    pub decisions_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListAnalysesResponse {
    pub analyses: Vec<AnalysisSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn request_with_len(len: usize) -> AnalyzeTranscriptRequest {
        AnalyzeTranscriptRequest {
            transcript: "a".repeat(len),
        }
    }

    #[test]
    fn test_validate_accepts_bounds() {
        assert!(request_with_len(TRANSCRIPT_MIN_CHARS).validate().is_ok());
        assert!(request_with_len(TRANSCRIPT_MAX_CHARS).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_short_transcript() {
        let err = request_with_len(TRANSCRIPT_MIN_CHARS - 1)
            .validate()
            .unwrap_err();
        assert!(err.contains("at least 10"));
    }

    #[test]
    fn test_validate_rejects_long_transcript() {
        let err = request_with_len(TRANSCRIPT_MAX_CHARS + 1)
            .validate()
            .unwrap_err();
        assert!(err.contains("50000"));
    }

    #[test]
    fn test_validate_counts_chars_not_bytes() {
        // Ten two-byte characters are within bounds even though the byte
        // length of nine of them would not be.
        let request = AnalyzeTranscriptRequest {
            transcript: "é".repeat(TRANSCRIPT_MIN_CHARS),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_priority_round_trips_through_strings() {
        for priority in [Priority::High, Priority::Medium, Priority::Low] {
            assert_eq!(Priority::parse(priority.as_str()), Some(priority));
        }
        assert_eq!(Priority::parse("urgent"), None);
    }

    #[test]
    fn test_decision_type_round_trips_through_strings() {
        for decision_type in [DecisionType::Made, DecisionType::Pending] {
            assert_eq!(
                DecisionType::parse(decision_type.as_str()),
                Some(decision_type)
            );
        }
        assert_eq!(DecisionType::parse("maybe"), None);
    }

    #[test]
    fn test_llm_analysis_deserializes_wire_names() {
        let json = r#"{
            "sentiment": "productive",
            "sentimentSummary": "Focused and decisive.",
            "actionItems": [
                {"description": "Finish API doc", "owner": "Sarah", "deadline": "Monday", "priority": "high"}
            ],
            "decisions": [
                {"description": "Use Postgres", "type": "made", "context": null}
            ]
        }"#;

        let analysis: LlmAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.sentiment, "productive");
        assert_eq!(analysis.action_items[0].priority, Some(Priority::High));
        assert_eq!(analysis.decisions[0].decision_type, DecisionType::Made);
        assert_eq!(analysis.decisions[0].context, None);
    }

    #[test]
    fn test_analysis_response_preserves_child_order() {
        let created_at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let stored = StoredAnalysis {
            id: "a1".to_string(),
            transcript_id: "t1".to_string(),
            sentiment: "neutral".to_string(),
            sentiment_summary: None,
            action_items: vec![
                ActionItem {
                    id: "i1".to_string(),
                    description: "first".to_string(),
                    owner: None,
                    deadline: None,
                    priority: Some(Priority::Low),
                },
                ActionItem {
                    id: "i2".to_string(),
                    description: "second".to_string(),
                    owner: Some("Ana".to_string()),
                    deadline: None,
                    priority: None,
                },
            ],
            decisions: vec![Decision {
                id: "d1".to_string(),
                description: "ship it".to_string(),
                decision_type: DecisionType::Pending,
                context: Some("next sprint".to_string()),
            }],
            created_at,
        };

        let response = AnalysisResponse::from(stored);
        assert_eq!(response.action_items.len(), 2);
        assert_eq!(response.action_items[0].id, "i1");
        assert_eq!(response.action_items[1].id, "i2");
        assert_eq!(response.decisions[0].decision_type, DecisionType::Pending);
        assert_eq!(response.created_at, "2025-06-01T12:00:00.000Z");
    }

    #[test]
    fn test_decision_response_serializes_type_field() {
        let response = DecisionResponse {
            id: "d1".to_string(),
            description: "Use Postgres".to_string(),
            decision_type: DecisionType::Made,
            context: None,
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["type"], "made");
        assert_eq!(value["context"], serde_json::Value::Null);
    }
}
