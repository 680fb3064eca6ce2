use atlas_core::{AtlasError, Llm, LlmRequest, LlmResponse, Result};
use async_trait::async_trait;
use std::sync::Mutex;

/// Scripted model for tests: returns queued responses in order and records
/// every prompt it receives.
pub struct MockLlm {
    name: String,
    responses: Mutex<Vec<Result<LlmResponse>>>,
    requests: Mutex<Vec<LlmRequest>>,
}

impl MockLlm {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            responses: Mutex::new(vec![]),
            requests: Mutex::new(vec![]),
        }
    }

    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push(Ok(LlmResponse::new(text)));
        self
    }

    pub fn with_error(self, message: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push(Err(AtlasError::Model(message.into())));
        self
    }

    /// Prompts received so far, in call order.
    pub fn recorded_prompts(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.prompt.clone())
            .collect()
    }

    /// Model identifiers received so far, in call order.
    pub fn recorded_models(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.model.clone())
            .collect()
    }
}

#[async_trait]
impl Llm for MockLlm {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, req: LlmRequest) -> Result<LlmResponse> {
        self.requests.lock().unwrap().push(req);
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(AtlasError::Model("MockLlm: no responses queued".to_string()));
        }
        responses.remove(0)
    }
}
