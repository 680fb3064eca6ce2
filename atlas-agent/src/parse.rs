//! Strict parsing of model output into stage types.
//!
//! Models wrap JSON blocks in Markdown code fences inconsistently. The
//! accepted shapes are exactly three: bare JSON, a ```json fence, or a bare
//! ``` fence. Everything else is a malformed-output error; there is no
//! partial recovery, and unparsed text never reaches a downstream stage.

use atlas_core::{AtlasError, Result};
use serde::de::DeserializeOwned;

const FENCE_JSON: &str = "```json";
const FENCE: &str = "```";

/// Strip a surrounding code fence by exact token match, if present.
fn strip_fences(raw: &str) -> Result<&str> {
    let trimmed = raw.trim();

    let inner = if let Some(rest) = trimmed.strip_prefix(FENCE_JSON) {
        rest.strip_suffix(FENCE).ok_or_else(|| {
            AtlasError::MalformedOutput("unterminated ```json fence".to_string())
        })?
    } else if let Some(rest) = trimmed.strip_prefix(FENCE) {
        rest.strip_suffix(FENCE)
            .ok_or_else(|| AtlasError::MalformedOutput("unterminated ``` fence".to_string()))?
    } else {
        trimmed
    };

    Ok(inner.trim())
}

/// Parse a model response into `T`, stripping a surrounding code fence first.
pub fn parse_json_block<T: DeserializeOwned>(raw: &str) -> Result<T> {
    let inner = strip_fences(raw)?;
    serde_json::from_str(inner).map_err(|e| AtlasError::MalformedOutput(e.to_string()))
}
