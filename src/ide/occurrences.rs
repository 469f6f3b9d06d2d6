//! Locating qualified keys in a document.

use regex::Regex;

use crate::types::MatchSpan;

/// Finds every whole-word occurrence of each key in `text`.
///
/// Keys are matched literally (`.` only matches `.`). Spans are grouped by key
/// in the order the keys are given, left to right within a key.
#[must_use]
pub fn find_occurrences<S: AsRef<str>>(text: &str, qualified_keys: &[S]) -> Vec<MatchSpan> {
    let mut spans = Vec::new();

    for key in qualified_keys {
        let key = key.as_ref();
        if key.is_empty() {
            continue;
        }

        let pattern = match Regex::new(&format!(r"\b{}\b", regex::escape(key))) {
            Ok(pattern) => pattern,
            Err(err) => {
                tracing::warn!(key, %err, "Failed to build occurrence pattern");
                continue;
            }
        };

        spans.extend(pattern.find_iter(text).map(|m| MatchSpan { start: m.start(), end: m.end() }));
    }

    spans
}
