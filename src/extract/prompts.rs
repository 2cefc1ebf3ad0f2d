//! Prompt file splitting
//!
//! The prompt file holds period-separated prompt segments. A .docx prompt
//! file goes through the DOCX paragraph reader; anything else is treated as
//! text, decoded as UTF-8 with a Latin-1 fallback.

use crate::extract::{docx, sanitize_filename};
use crate::models::UploadedFile;
use crate::types::AppResult;

/// Split an uploaded prompt file into an ordered list of prompt segments.
///
/// Segments are produced by splitting on the literal `.` character and
/// trimming surrounding whitespace. Every segment is kept, including empty
/// ones: a trailing period yields a trailing empty segment. Response order
/// downstream matches this order.
pub fn split_prompts(file: &UploadedFile) -> AppResult<Vec<String>> {
    let name = sanitize_filename(&file.filename).to_lowercase();

    let text = if name.ends_with(".docx") {
        docx::paragraphs(&file.data)?.join("\n")
    } else {
        decode_text(&file.data)
    };

    Ok(text.split('.').map(|s| s.trim().to_string()).collect())
}

/// Decode raw bytes as UTF-8, falling back to Latin-1. The fallback cannot
/// fail: every byte value maps directly to the code point of the same value.
fn decode_text(data: &[u8]) -> String {
    match std::str::from_utf8(data) {
        Ok(s) => s.to_string(),
        Err(_) => data.iter().map(|&b| b as char).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn upload(filename: &str, data: &'static [u8]) -> UploadedFile {
        UploadedFile {
            filename: filename.to_string(),
            data: Bytes::from_static(data),
        }
    }

    #[test]
    fn test_split_preserves_trailing_empty_segment() {
        let prompts = split_prompts(&upload("prompts.txt", b"A.B.C.")).unwrap();
        assert_eq!(prompts, vec!["A", "B", "C", ""]);
    }

    #[test]
    fn test_segments_are_trimmed() {
        let prompts =
            split_prompts(&upload("prompts.txt", b"  Summarize the document . List key points ")).unwrap();
        assert_eq!(prompts, vec!["Summarize the document", "List key points"]);
    }

    #[test]
    fn test_file_without_periods_yields_one_segment() {
        let prompts = split_prompts(&upload("prompts.txt", b"Summarize the document")).unwrap();
        assert_eq!(prompts, vec!["Summarize the document"]);
    }

    #[test]
    fn test_latin1_fallback_does_not_fail() {
        // 0xE9 is 'é' in Latin-1 but invalid as a standalone UTF-8 byte.
        let prompts = split_prompts(&upload("prompts.txt", b"r\xE9sum\xE9 summary.")).unwrap();
        assert_eq!(prompts, vec!["r\u{e9}sum\u{e9} summary", ""]);
    }

    #[test]
    fn test_empty_file_yields_single_empty_segment() {
        let prompts = split_prompts(&upload("prompts.txt", b"")).unwrap();
        assert_eq!(prompts, vec![""]);
    }

    #[test]
    fn test_docx_prompt_with_bad_content_is_an_error() {
        let err = split_prompts(&upload("prompts.docx", b"not a zip")).unwrap_err();
        assert!(matches!(err, crate::types::AppError::Extraction(_)));
    }
}
