// src/state.rs

use std::sync::Arc;

use crate::llm::StructuredProvider;
use crate::services::SentimentAnalyzer;

/// Shared application state. Built once at startup and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<SentimentAnalyzer>,
    pub model: String,
}

impl AppState {
    pub fn new(provider: Arc<dyn StructuredProvider>) -> Self {
        let model = provider.model().to_string();
        Self {
            analyzer: Arc::new(SentimentAnalyzer::new(provider)),
            model,
        }
    }
}
