//! Completion implementation

use regex::Regex;
use tower_lsp::lsp_types::{
    CompletionItem,
    CompletionItemKind,
};

use crate::indexer::LocaleIndex;

/// Language ids of documents that receive completion.
pub const SUPPORTED_LANGUAGE_IDS: [&str; 3] = ["vue", "javascript", "typescript"];

/// What the cursor is positioned to complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionContext {
    /// Right after the opening quote, e.g. `t('|`.
    FileName,

    /// After a file name and a dot, e.g. `t('basicSet.|` or `t('basicSet.he|`.
    Key { file_name: String, partial_key: String },
}

/// Detects the completion context at the end of `line_prefix`.
///
/// Both patterns are anchored at the cursor, and `translation_function` is
/// matched literally.
#[must_use]
pub fn extract_completion_context(
    line_prefix: &str,
    translation_function: &str,
) -> Option<CompletionContext> {
    let function = regex::escape(translation_function);

    let file_name_pattern = Regex::new(&format!(r#"{function}\(['"]$"#)).ok()?;
    if file_name_pattern.is_match(line_prefix) {
        return Some(CompletionContext::FileName);
    }

    let key_pattern = Regex::new(&format!(r#"{function}\(['"]([^'"]+)\.([^'".]*)$"#)).ok()?;
    let captures = key_pattern.captures(line_prefix)?;
    let file_name = captures.get(1)?.as_str().to_string();
    let partial_key = captures.get(2).map_or_else(String::new, |m| m.as_str().to_string());

    Some(CompletionContext::Key { file_name, partial_key })
}

/// Generates completion items for the given context.
#[must_use]
pub fn generate_completions(index: &LocaleIndex, context: &CompletionContext) -> Vec<CompletionItem> {
    match context {
        CompletionContext::FileName => index
            .file_names()
            .into_iter()
            .map(|file_name| CompletionItem {
                label: file_name.to_string(),
                kind: Some(CompletionItemKind::FILE),
                detail: Some(format!("Localization file: {file_name}.json")),
                ..Default::default()
            })
            .collect(),
        CompletionContext::Key { file_name, partial_key } => {
            let mut items = Vec::new();
            for (language, keys) in index.entries_for_file(file_name) {
                for (key, value) in keys {
                    if !key.starts_with(partial_key.as_str()) {
                        continue;
                    }
                    items.push(CompletionItem {
                        label: key.clone(),
                        kind: Some(CompletionItemKind::TEXT),
                        detail: Some(format!("{language}: {value}")),
                        ..Default::default()
                    });
                }
            }
            items
        }
    }
}

/// Completion for a line prefix, using the index's current translation function.
#[must_use]
pub fn complete(index: &LocaleIndex, line_prefix: &str) -> Vec<CompletionItem> {
    let Some(context) = extract_completion_context(line_prefix, index.translation_function_name())
    else {
        return Vec::new();
    };

    tracing::debug!(?context, "Extracted completion context");
    generate_completions(index, &context)
}
