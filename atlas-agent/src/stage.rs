//! The three stage agents.
//!
//! Each agent is one typed transformation: format prompt, call the model,
//! parse the response strictly. They differ only in template, output shape,
//! and the model identifier they pass along.

use crate::parse::parse_json_block;
use crate::prompts;
use atlas_core::{Decision, Insight, Llm, LlmRequest, Result, Summary};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Stage 1: raw product text into a [`Summary`].
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn run(&self, text: &str) -> Result<Summary>;
}

/// Stage 2: a [`Summary`] into an ordered list of [`Insight`]s.
#[async_trait]
pub trait InsightExtractor: Send + Sync {
    async fn run(&self, summary: &Summary) -> Result<Vec<Insight>>;
}

/// Stage 3: insights into an ordered list of [`Decision`]s.
#[async_trait]
pub trait DecisionSupporter: Send + Sync {
    async fn run(&self, insights: &[Insight]) -> Result<Vec<Decision>>;
}

pub struct SummarizationAgent {
    model: Arc<dyn Llm>,
    model_name: String,
}

impl SummarizationAgent {
    pub fn new(model: Arc<dyn Llm>) -> Self {
        let model_name = model.name().to_string();
        Self { model, model_name }
    }

    pub fn with_model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self
    }
}

#[async_trait]
impl Summarizer for SummarizationAgent {
    async fn run(&self, text: &str) -> Result<Summary> {
        let prompt = prompts::summarization_prompt(text);
        debug!(model = %self.model_name, "summarization stage");
        let response = self
            .model
            .generate(LlmRequest::new(&self.model_name, prompt))
            .await?;
        parse_json_block(&response.text)
    }
}

pub struct InsightExtractionAgent {
    model: Arc<dyn Llm>,
    model_name: String,
}

impl InsightExtractionAgent {
    pub fn new(model: Arc<dyn Llm>) -> Self {
        let model_name = model.name().to_string();
        Self { model, model_name }
    }

    pub fn with_model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self
    }
}

#[async_trait]
impl InsightExtractor for InsightExtractionAgent {
    async fn run(&self, summary: &Summary) -> Result<Vec<Insight>> {
        let summary_json = serde_json::to_string(summary)?;
        let prompt = prompts::insight_extraction_prompt(&summary_json);
        debug!(model = %self.model_name, "insight extraction stage");
        let response = self
            .model
            .generate(LlmRequest::new(&self.model_name, prompt))
            .await?;
        parse_json_block(&response.text)
    }
}

pub struct DecisionSupportAgent {
    model: Arc<dyn Llm>,
    model_name: String,
}

impl DecisionSupportAgent {
    pub fn new(model: Arc<dyn Llm>) -> Self {
        let model_name = model.name().to_string();
        Self { model, model_name }
    }

    pub fn with_model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self
    }
}

#[async_trait]
impl DecisionSupporter for DecisionSupportAgent {
    async fn run(&self, insights: &[Insight]) -> Result<Vec<Decision>> {
        let insights_json = serde_json::to_string(insights)?;
        let prompt = prompts::decision_support_prompt(&insights_json);
        debug!(model = %self.model_name, "decision support stage");
        let response = self
            .model
            .generate(LlmRequest::new(&self.model_name, prompt))
            .await?;
        parse_json_block(&response.text)
    }
}
