//! # atlas-model
//!
//! LLM model integration for the Atlas pipeline.
//!
//! - [`GeminiModel`] - Google's Gemini models over the generativelanguage REST API
//! - [`MockLlm`] - Scripted model for testing

mod gemini;
mod mock;

pub use gemini::{DEFAULT_MODEL, GeminiModel};
pub use mock::MockLlm;
