//! Fixed-order pipeline execution.

use crate::stage::{
    DecisionSupportAgent, DecisionSupporter, InsightExtractionAgent, InsightExtractor,
    SummarizationAgent, Summarizer,
};
use atlas_core::{Llm, PipelineResult, Result};
use std::sync::Arc;
use tracing::info;

/// Runs the three stages strictly in order, threading each stage's output
/// into the next stage's input. The chain is a strict linear sequence: there
/// is no branching, no fan-out, and no partial result on failure.
pub struct Orchestrator {
    summarizer: Arc<dyn Summarizer>,
    insight_extractor: Arc<dyn InsightExtractor>,
    decision_supporter: Arc<dyn DecisionSupporter>,
}

impl Orchestrator {
    pub fn new(
        summarizer: Arc<dyn Summarizer>,
        insight_extractor: Arc<dyn InsightExtractor>,
        decision_supporter: Arc<dyn DecisionSupporter>,
    ) -> Self {
        Self {
            summarizer,
            insight_extractor,
            decision_supporter,
        }
    }

    /// Wire all three stages to the same model.
    pub fn from_model(model: Arc<dyn Llm>) -> Self {
        Self::new(
            Arc::new(SummarizationAgent::new(model.clone())),
            Arc::new(InsightExtractionAgent::new(model.clone())),
            Arc::new(DecisionSupportAgent::new(model)),
        )
    }

    pub async fn run_pipeline(&self, text: &str) -> Result<PipelineResult> {
        let summary = self.summarizer.run(text).await?;
        let insights = self.insight_extractor.run(&summary).await?;
        let decisions = self.decision_supporter.run(&insights).await?;

        info!(
            insights = insights.len(),
            decisions = decisions.len(),
            "pipeline complete"
        );

        Ok(PipelineResult {
            summary,
            insights,
            decisions,
        })
    }
}
