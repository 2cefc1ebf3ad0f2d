use lopdf::Document;

use crate::types::{AppError, AppResult};

/// Extract the text of every page, in page order, concatenated with no
/// separator between pages.
pub fn extract_text(data: &[u8]) -> AppResult<String> {
    let doc = Document::load_mem(data)
        .map_err(|e| AppError::Extraction(format!("failed to load PDF: {}", e)))?;

    let mut text = String::new();
    // get_pages returns a BTreeMap keyed by page number, so iteration
    // follows page order.
    for (page_num, _object_id) in doc.get_pages() {
        let page_text = doc
            .extract_text(&[page_num])
            .map_err(|e| AppError::Extraction(format!("failed to extract page {}: {}", page_num, e)))?;
        text.push_str(&page_text);
    }

    Ok(text)
}
