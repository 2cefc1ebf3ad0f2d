//! Document text extraction
//!
//! Turns an uploaded PDF or Word document into a single plain-text string:
//! - PDF: per-page text in page order, concatenated with no separator
//! - DOC/DOCX: per-paragraph text in document order, each followed by a newline

pub mod docx;
pub mod pdf;
pub mod prompts;

use crate::models::UploadedFile;
use crate::types::{AppError, AppResult};

/// Strip any directory components from an uploaded filename before the
/// extension is inspected. Both separator styles are handled since the
/// client controls the multipart filename.
pub fn sanitize_filename(name: &str) -> String {
    name.rsplit(['/', '\\']).next().unwrap_or("").to_string()
}

/// Extract the plain-text content of an uploaded document, dispatching on
/// the (sanitized, lowercased) filename extension.
///
/// `.doc` is routed through the DOCX reader as well; a legacy binary `.doc`
/// file will surface as an extraction failure rather than as unsupported.
pub fn extract_document(file: &UploadedFile) -> AppResult<String> {
    let name = sanitize_filename(&file.filename).to_lowercase();

    if name.ends_with(".pdf") {
        pdf::extract_text(&file.data)
    } else if name.ends_with(".doc") || name.ends_with(".docx") {
        docx::extract_text(&file.data)
    } else {
        Err(AppError::UnsupportedFormat)
    }
}
