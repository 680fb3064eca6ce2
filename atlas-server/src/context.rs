use atlas_agent::Orchestrator;
use atlas_store::AnalysisStore;
use std::sync::Arc;

/// Process-wide resources, constructed once at startup and shared by
/// handlers through axum state. Connection handles live here rather than in
/// globals; dropping the context on shutdown releases them.
#[derive(Clone)]
pub struct AppContext {
    pub orchestrator: Arc<Orchestrator>,
    pub store: Arc<AnalysisStore>,
}

impl AppContext {
    pub fn new(orchestrator: Arc<Orchestrator>, store: Arc<AnalysisStore>) -> Self {
        Self {
            orchestrator,
            store,
        }
    }
}
