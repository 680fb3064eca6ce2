//! # atlas-agent
//!
//! Stage agents and pipeline orchestration for the Atlas
//! product-intelligence pipeline.
//!
//! Three agents run in fixed sequence, each one a typed transformation
//! backed by the same model:
//!
//! 1. [`SummarizationAgent`] - product text into a [`atlas_core::Summary`]
//! 2. [`InsightExtractionAgent`] - summary into insights
//! 3. [`DecisionSupportAgent`] - insights into decisions
//!
//! [`Orchestrator::run_pipeline`] threads the outputs together and fails
//! fast on the first stage error.

mod orchestrator;
mod parse;
pub mod prompts;
mod stage;

pub use orchestrator::Orchestrator;
pub use parse::parse_json_block;
pub use stage::{
    DecisionSupportAgent, DecisionSupporter, InsightExtractionAgent, InsightExtractor,
    SummarizationAgent, Summarizer,
};
