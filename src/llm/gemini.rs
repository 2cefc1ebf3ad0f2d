// Gemini (Google Generative Language API) client
// API Reference: https://ai.google.dev/api/generate-content
//
// One generateContent call per prompt: the request carries the full document
// text and the prompt segment as two parts of a single content entry. No
// retry and no caller-side deadline; a failed call fails the whole request.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::GeminiConfig;
use crate::llm::provider::TextGenerator;
use crate::types::{AppError, AppResult};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";

pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
    base_url: String,
}

// Request types for the generateContent endpoint

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
    temperature: f64,
}

// Response types

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct GeminiErrorResponse {
    error: GeminiError,
}

#[derive(Deserialize)]
struct GeminiError {
    message: String,
    #[serde(default)]
    status: Option<String>,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
            base_url: GEMINI_API_BASE.to_string(),
        }
    }

    /// Point the client at a different endpoint. Used by tests to target a
    /// local mock server.
    pub fn with_base_url(config: GeminiConfig, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            config,
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.config.model, self.config.api_key
        )
    }

    fn build_request(&self, document: &str, prompt: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part { text: document.to_string() },
                    Part { text: prompt.to_string() },
                ],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: self.config.max_output_tokens,
                temperature: self.config.temperature,
            },
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, document: &str, prompt: &str) -> AppResult<String> {
        let request = self.build_request(document, prompt);

        let response = self
            .client
            .post(self.endpoint())
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::LlmApi(format!("Gemini request failed: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            // Surface the structured service message when the body parses
            if let Ok(error_response) = serde_json::from_str::<GeminiErrorResponse>(&error_text) {
                return Err(AppError::LlmApi(format!(
                    "Gemini API error ({}): {} (status: {:?})",
                    status, error_response.error.message, error_response.error.status
                )));
            }

            return Err(AppError::LlmApi(format!(
                "Gemini API error ({}): {}",
                status, error_text
            )));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AppError::LlmApi(format!("Failed to parse Gemini response: {}", e)))?;

        let candidate = body
            .candidates
            .first()
            .ok_or_else(|| AppError::LlmApi("Gemini returned no candidates".to_string()))?;

        let content = candidate
            .content
            .as_ref()
            .ok_or_else(|| AppError::LlmApi("Gemini candidate has no content".to_string()))?;

        let text = content
            .parts
            .iter()
            .map(|p| p.text.as_str())
            .collect::<String>();

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> GeminiConfig {
        GeminiConfig {
            api_key: "test-key".to_string(),
            model: "gemini-1.5-flash".to_string(),
            max_output_tokens: 100,
            temperature: 0.1,
        }
    }

    #[test]
    fn test_request_body_uses_camel_case_and_two_parts() {
        let client = GeminiClient::new(test_config());
        let request = client.build_request("document text", "prompt text");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "contents": [{
                    "parts": [
                        { "text": "document text" },
                        { "text": "prompt text" }
                    ]
                }],
                "generationConfig": {
                    "maxOutputTokens": 100,
                    "temperature": 0.1
                }
            })
        );
    }

    #[test]
    fn test_endpoint_carries_model_and_key() {
        let client = GeminiClient::new(test_config());
        assert_eq!(
            client.endpoint(),
            format!(
                "{}/v1beta/models/gemini-1.5-flash:generateContent?key=test-key",
                GEMINI_API_BASE
            )
        );
    }

    #[tokio::test]
    async fn test_generate_returns_candidate_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-1.5-flash:generateContent")
            .match_query(mockito::Matcher::UrlEncoded("key".into(), "test-key".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                serde_json::json!({
                    "candidates": [{
                        "content": {
                            "parts": [{ "text": "The document is a quarterly report." }],
                            "role": "model"
                        },
                        "finishReason": "STOP"
                    }]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = GeminiClient::with_base_url(test_config(), server.url());
        let text = client.generate("doc", "what is this").await.unwrap();

        assert_eq!(text, "The document is a quarterly report.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_surfaces_service_error_message() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1beta/models/gemini-1.5-flash:generateContent")
            .match_query(mockito::Matcher::UrlEncoded("key".into(), "test-key".into()))
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(
                serde_json::json!({
                    "error": {
                        "code": 400,
                        "message": "API key not valid. Please pass a valid API key.",
                        "status": "INVALID_ARGUMENT"
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = GeminiClient::with_base_url(test_config(), server.url());
        let err = client.generate("doc", "prompt").await.unwrap_err();

        assert!(matches!(err, AppError::LlmApi(_)));
        assert!(err.to_string().contains("API key not valid"));
    }

    #[tokio::test]
    async fn test_generate_rejects_empty_candidates() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1beta/models/gemini-1.5-flash:generateContent")
            .match_query(mockito::Matcher::UrlEncoded("key".into(), "test-key".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(serde_json::json!({ "candidates": [] }).to_string())
            .create_async()
            .await;

        let client = GeminiClient::with_base_url(test_config(), server.url());
        let err = client.generate("doc", "prompt").await.unwrap_err();

        assert!(err.to_string().contains("no candidates"));
    }
}
