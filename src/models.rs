use std::sync::Arc;

use crate::config::Config;
use crate::llm::provider::TextGenerator;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub generator: Arc<dyn TextGenerator>,
}

/// One uploaded multipart part, held in memory for the duration of the request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub data: bytes::Bytes,
}

/// One answered prompt. The response array preserves prompt order.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PromptAnswer {
    pub prompt: String,
    pub response: String,
}

#[derive(Debug, serde::Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}
