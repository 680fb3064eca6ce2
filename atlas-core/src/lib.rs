//! # atlas-core
//!
//! Core traits and types for the Atlas product-intelligence pipeline.
//!
//! ## Overview
//!
//! This crate provides the foundational abstractions shared by the rest of
//! the workspace:
//!
//! - [`Llm`] - The model-caller trait (one instruction in, one text out)
//! - [`Summary`] / [`Insight`] / [`Decision`] - The three stage output shapes
//! - [`PipelineResult`] - The aggregate of one end-to-end run
//! - [`AtlasError`] / [`Result`] - Unified error handling

mod error;
mod model;
mod types;

pub use error::{AtlasError, Result};
pub use model::{GenerateContentConfig, Llm, LlmRequest, LlmResponse, UsageMetadata};
pub use types::{Decision, Insight, InsightKind, PipelineResult, Summary};
