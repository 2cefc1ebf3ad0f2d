use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};

use crate::types::{AppError, AppResult};

/// Extract document text: every paragraph in document order, each followed
/// by a newline. Empty paragraphs (blank lines, section breaks) are kept so
/// the output mirrors the document layout.
pub fn extract_text(data: &[u8]) -> AppResult<String> {
    let mut text = String::new();
    for para in paragraphs(data)? {
        text.push_str(&para);
        text.push('\n');
    }
    Ok(text)
}

/// Collect the text of every paragraph, in document order.
///
/// A .docx file is a ZIP of XML; docx-rs exposes the parsed tree as
/// Document → Paragraph → Run → Text. Runs within a paragraph are
/// concatenated with no separator since they are fragments of the same
/// sentence.
pub fn paragraphs(data: &[u8]) -> AppResult<Vec<String>> {
    let docx = read_docx(data)
        .map_err(|e| AppError::Extraction(format!("failed to read DOCX: {:?}", e)))?;

    let mut paragraphs = Vec::new();
    for child in &docx.document.children {
        if let DocumentChild::Paragraph(para) = child {
            paragraphs.push(paragraph_text(para));
        }
    }
    Ok(paragraphs)
}

fn paragraph_text(para: &docx_rs::Paragraph) -> String {
    let mut parts = Vec::new();
    for child in &para.children {
        if let ParagraphChild::Run(run) = child {
            for rc in &run.children {
                if let RunChild::Text(t) = rc {
                    parts.push(t.text.clone());
                }
            }
        }
    }
    parts.join("")
}
