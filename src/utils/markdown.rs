// Markdown emphasis extraction
//
// Model responses mark key phrases with **double asterisks**. The handler
// does not currently include these in its payload; the extractor is kept
// available for re-enabling.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref EMPHASIS: Regex =
        Regex::new(r"\*\*(.*?)\*\*").expect("EMPHASIS regex is valid");
}

/// Return every `**…**`-delimited substring, non-greedy, in order of
/// appearance.
pub fn extract_emphasized(text: &str) -> Vec<String> {
    EMPHASIS
        .captures_iter(text)
        .map(|cap| cap[1].to_string())
        .collect()
}
