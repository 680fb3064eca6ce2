//! Prompt templates for the three stage agents.
//!
//! Each template carries the task description, a worked example of the exact
//! JSON shape the stage must emit, and an explicit directive to output only
//! that JSON. The response parser performs no free-text tolerance beyond
//! fence stripping, so the directive is load-bearing.

/// Instruction block for the Summarization stage.
pub const SUMMARIZATION_INSTRUCTION: &str = r#"You are a summarization agent. Analyze the following product text (reviews, descriptions, feedback) and provide a concise summary.

Output ONLY valid JSON in this format:
{
    "key_features": ["list of key features"],
    "main_positives": ["list of main positives"],
    "main_negatives": ["list of main negatives"],
    "customer_sentiment_overview": "overall sentiment summary"
}

Remove noise and repetition."#;

/// Instruction block for the Insight Extraction stage.
pub const INSIGHT_EXTRACTION_INSTRUCTION: &str = r#"You are an insight extraction agent. Based on the summarized data, extract insights.

Detect recurring pain points, identify trends and anomalies, strength vs weakness analysis.

Output ONLY valid JSON array in this format:
[
    {
        "insight": "description",
        "type": "pain_point|trend|anomaly|strength|weakness",
        "confidence": 0.8
    }
]"#;

/// Instruction block for the Decision Support stage.
pub const DECISION_SUPPORT_INSTRUCTION: &str = r#"You are a decision support agent. Based on extracted insights, provide recommendations for product improvement.

Each decision must include recommendation, reasoning, triggering insights.

Output ONLY valid JSON array in this format:
[
    {
        "recommendation": "specific suggestion",
        "reasoning": "why this recommendation",
        "triggering_insights": ["insight1", "insight2"]
    }
]"#;

pub fn summarization_prompt(text: &str) -> String {
    format!("{SUMMARIZATION_INSTRUCTION}\n\nProduct text: {text}")
}

pub fn insight_extraction_prompt(summary_json: &str) -> String {
    format!("{INSIGHT_EXTRACTION_INSTRUCTION}\n\nSummary: {summary_json}")
}

pub fn decision_support_prompt(insights_json: &str) -> String {
    format!("{DECISION_SUPPORT_INSTRUCTION}\n\nInsights: {insights_json}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompts_embed_payload() {
        let prompt = summarization_prompt("Great battery life");
        assert!(prompt.contains("Output ONLY valid JSON"));
        assert!(prompt.ends_with("Product text: Great battery life"));
    }

    #[test]
    fn test_each_stage_states_its_shape() {
        assert!(summarization_prompt("x").contains("customer_sentiment_overview"));
        assert!(insight_extraction_prompt("{}").contains("pain_point|trend|anomaly"));
        assert!(decision_support_prompt("[]").contains("triggering_insights"));
    }
}
