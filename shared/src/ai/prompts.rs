/// System instruction establishing the extraction task and output contract.
pub const SYSTEM_PROMPT: &str = "You are an expert meeting minutes specialist and executive assistant. Your role is to analyze meeting transcripts and extract actionable insights in a clear, concise manner.

Guidelines:
- Remove filler words and redundant content
- Focus on concrete outcomes and decisions
- Identify specific action items with clear ownership
- Note when decisions are pending or require follow-up
- Assess the overall tone professionally
- Be concise and avoid corporate jargon

Return your analysis in structured JSON format.";

/// Builds the user instruction embedding the transcript verbatim plus the
/// expected JSON schema.
pub fn build_user_prompt(transcript: &str) -> String {
    format!(
        r#"Analyze this meeting transcript and extract:

1. **Action Items**: Specific tasks with:
   - Clear description (concise, actionable)
   - Assigned owner (if mentioned, otherwise null)
   - Deadline (if mentioned, otherwise null)
   - Priority level: "high", "medium", "low", or null (infer from context - urgent language, explicit priority mentions, or deadlines suggest high priority)

2. **Decisions**: Both made and pending:
   - What was decided or needs deciding
   - Type: "made" or "pending"
   - Brief context if relevant (otherwise null)

3. **Sentiment/Tone**: Overall meeting atmosphere:
   - One word: positive, negative, neutral, constructive, tense, productive, etc.
   - Brief 1-2 sentence summary of the tone

Be specific and actionable. Avoid vague statements.

Transcript:
{transcript}

Return ONLY valid JSON matching this exact structure (no markdown, no code blocks):
{{
  "sentiment": "string",
  "sentimentSummary": "string",
  "actionItems": [{{"description": "string", "owner": "string or null", "deadline": "string or null", "priority": "high or medium or low or null"}}],
  "decisions": [{{"description": "string", "type": "made or pending", "context": "string or null"}}]
}}"#
    )
}
