//! POST /process
//!
//! Accepts a multipart body with two file parts:
//! - `file`: the source document (.pdf, .doc, or .docx)
//! - `prompt`: a text or .docx file of period-separated prompt segments
//!
//! The document's text is extracted once, then every prompt segment is sent
//! to the generation client together with the full document text, strictly
//! in order. The response is a JSON array of `{prompt, response}` objects
//! matching the input order.

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::post,
    Json, Router,
};
use tracing::{info, warn};

use crate::extract;
use crate::llm::provider::TextGenerator;
use crate::models::{AppState, PromptAnswer, UploadedFile};
use crate::types::{AppError, AppResult};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/process", post(process))
        // Documents routinely exceed axum's 2 MB default body limit.
        .layer(DefaultBodyLimit::max(50 * 1024 * 1024))
        .with_state(state)
}

async fn process(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<Vec<PromptAnswer>>> {
    let (document, prompt_file) = read_upload(multipart).await?;

    info!(
        "Processing document '{}' with prompts from '{}'",
        document.filename, prompt_file.filename
    );

    let document_text = extract::extract_document(&document)?;
    let prompts = extract::prompts::split_prompts(&prompt_file)?;

    info!("Extracted {} chars, {} prompt segments", document_text.len(), prompts.len());

    let answers = answer_prompts(state.generator.as_ref(), &document_text, prompts).await?;

    Ok(Json(answers))
}

/// Collect the two expected file parts from the multipart body. Unknown
/// parts are ignored.
async fn read_upload(mut multipart: Multipart) -> AppResult<(UploadedFile, UploadedFile)> {
    let mut document: Option<UploadedFile> = None;
    let mut prompt: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidRequest(format!("Malformed multipart body: {}", e)))?
    {
        let part_name = field.name().unwrap_or_default().to_string();
        match part_name.as_str() {
            "file" | "prompt" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await.map_err(|e| {
                    AppError::InvalidRequest(format!("Malformed multipart body: {}", e))
                })?;
                let upload = UploadedFile { filename, data };
                if part_name == "file" {
                    document = Some(upload);
                } else {
                    prompt = Some(upload);
                }
            }
            other => {
                warn!("Ignoring unexpected multipart part '{}'", other);
            }
        }
    }

    let (document, prompt) = match (document, prompt) {
        (Some(d), Some(p)) => (d, p),
        _ => {
            return Err(AppError::InvalidRequest(
                "No file or prompt provided".to_string(),
            ))
        }
    };

    if document.filename.is_empty() || prompt.filename.is_empty() {
        return Err(AppError::InvalidRequest("No selected file".to_string()));
    }

    Ok((document, prompt))
}

/// Run the generation loop: one call per prompt segment, sequentially, in
/// input order. Any failed call aborts the request; no partial results are
/// returned.
async fn answer_prompts(
    generator: &dyn TextGenerator,
    document_text: &str,
    prompts: Vec<String>,
) -> AppResult<Vec<PromptAnswer>> {
    let mut answers = Vec::with_capacity(prompts.len());

    for prompt in prompts {
        let response = generator.generate(document_text, &prompt).await?;
        answers.push(PromptAnswer { prompt, response });
    }

    Ok(answers)
}
