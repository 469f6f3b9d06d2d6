//! Reverse lookup from a source-language phrase to qualified locale keys.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::input::translation::file_base_name;

/// One `"key": "value"` pair on a line. Escaped quotes are not handled.
#[allow(clippy::unwrap_used)] // Literal pattern
static KEY_VALUE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]+)": "([^"]+)""#).unwrap());

/// Finds the qualified keys (`<file>.<key>`) whose value equals `phrase`.
///
/// Each file contributes at most one key: scanning a file stops at its first
/// matching line. Returns `None` for an empty phrase without touching any file.
/// Files that cannot be read are skipped.
pub fn find_keys<P: AsRef<Path>>(phrase: &str, candidate_files: &[P]) -> Option<Vec<String>> {
    if phrase.is_empty() {
        return None;
    }

    let mut keys = Vec::new();
    for file_path in candidate_files {
        let file_path = file_path.as_ref();
        let Some(file_name) = file_base_name(file_path) else {
            continue;
        };

        let content = match std::fs::read_to_string(file_path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(file = %file_path.display(), %err, "Failed to read locale file");
                continue;
            }
        };

        if let Some(key) = find_key_in_text(phrase, &content) {
            keys.push(format!("{file_name}.{key}"));
        }
    }

    tracing::debug!(phrase, ?keys, "Phrase lookup finished");
    Some(keys)
}

/// Returns the key of the first line whose value equals `phrase`.
fn find_key_in_text<'a>(phrase: &str, content: &'a str) -> Option<&'a str> {
    content.split('\n').find_map(|line| {
        let captures = KEY_VALUE_REGEX.captures(line)?;
        let key = captures.get(1)?.as_str();
        let value = captures.get(2)?.as_str();
        (value == phrase).then_some(key)
    })
}
