use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::InferenceBackend;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no per-request data; cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Inference backend. Default: `OllamaClient`; tests inject a fake.
    pub llm: Arc<dyn InferenceBackend>,
    pub config: Config,
}

impl AppState {
    pub fn new(llm: Arc<dyn InferenceBackend>, config: Config) -> Self {
        Self { llm, config }
    }
}
