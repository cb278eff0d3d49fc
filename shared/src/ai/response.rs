use crate::ai::AiError;
use crate::models::LlmAnalysis;

/// Parses the raw completion text into the structured result.
///
/// Two distinct failure modes: text that is not JSON at all
/// ([`AiError::ResponseFormat`]) and JSON that does not match the output
/// contract ([`AiError::ResponseSchema`]).
pub fn parse_analysis(content: &str) -> Result<LlmAnalysis, AiError> {
    let value: serde_json::Value =
        serde_json::from_str(content).map_err(|e| AiError::ResponseFormat(e.to_string()))?;

    serde_json::from_value(value).map_err(|e| AiError::ResponseSchema(e.to_string()))
}
