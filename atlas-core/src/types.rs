use serde::{Deserialize, Serialize};

/// Stage-1 output: condensed view of the raw product text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub key_features: Vec<String>,
    pub main_positives: Vec<String>,
    pub main_negatives: Vec<String>,
    pub customer_sentiment_overview: String,
}

/// Category a single insight falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    PainPoint,
    Trend,
    Anomaly,
    Strength,
    Weakness,
}

/// Stage-2 output element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub insight: String,
    #[serde(rename = "type")]
    pub kind: InsightKind,
    /// Model-reported confidence in [0, 1].
    pub confidence: f64,
}

/// Stage-3 output element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub recommendation: String,
    pub reasoning: String,
    /// Descriptions of the insights that triggered this recommendation.
    pub triggering_insights: Vec<String>,
}

/// Terminal artifact of one end-to-end pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    pub summary: Summary,
    pub insights: Vec<Insight>,
    pub decisions: Vec<Decision>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insight_kind_snake_case() {
        let json = serde_json::to_string(&InsightKind::PainPoint).unwrap();
        assert_eq!(json, "\"pain_point\"");

        let kind: InsightKind = serde_json::from_str("\"weakness\"").unwrap();
        assert_eq!(kind, InsightKind::Weakness);
    }

    #[test]
    fn test_insight_kind_rejects_unknown() {
        let result = serde_json::from_str::<InsightKind>("\"opportunity\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_insight_type_field_name() {
        let insight = Insight {
            insight: "battery drains fast".to_string(),
            kind: InsightKind::PainPoint,
            confidence: 0.9,
        };
        let value = serde_json::to_value(&insight).unwrap();
        assert_eq!(value["type"], "pain_point");
        assert_eq!(value["confidence"], 0.9);
    }

    #[test]
    fn test_pipeline_result_shape() {
        let result = PipelineResult {
            summary: Summary {
                key_features: vec!["battery".to_string()],
                main_positives: vec!["battery life".to_string()],
                main_negatives: vec!["screen durability".to_string()],
                customer_sentiment_overview: "mixed".to_string(),
            },
            insights: vec![],
            decisions: vec![],
        };
        let value = serde_json::to_value(&result).unwrap();
        assert!(value["summary"]["key_features"].is_array());
        assert!(value["insights"].as_array().unwrap().is_empty());
        assert!(value["decisions"].as_array().unwrap().is_empty());
    }
}
