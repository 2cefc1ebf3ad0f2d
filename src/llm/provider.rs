use std::sync::Arc;

use async_trait::async_trait;

use crate::config::GeminiConfig;
use crate::types::AppResult;

/// The generation capability behind the request pipeline. Production code
/// talks to Gemini; tests inject a canned implementation.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send the full document text and a single prompt segment, returning
    /// the model's text response verbatim.
    async fn generate(&self, document: &str, prompt: &str) -> AppResult<String>;
}

/// Build the production generator from the loaded configuration.
pub fn from_config(config: &GeminiConfig) -> Arc<dyn TextGenerator> {
    Arc::new(crate::llm::gemini::GeminiClient::new(config.clone()))
}
