//! Execute Command handler
//!
//! Handles `workspace/executeCommand` requests for the server's custom commands.

use serde::Deserialize;
use serde_json::Value;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::{
    ExecuteCommandParams,
    MessageType,
    Range,
    ShowDocumentParams,
    Url,
};

use super::super::backend::Backend;
use crate::ide::occurrences::find_occurrences;
use crate::ide::search::find_keys;
use crate::indexer::workspace::{
    SOURCE_LANGUAGE,
    find_locale_files,
    locale_root,
};

/// Reveals every use of a source-language phrase's keys in a document.
pub const SEARCH_TRANSLATION_COMMAND: &str = "i18n.searchTranslation";

/// Handles a `workspace/executeCommand` request.
pub async fn handle_execute_command(
    backend: &Backend,
    params: ExecuteCommandParams,
) -> Result<Option<Value>> {
    tracing::debug!(command = %params.command, "Execute Command request");

    if params.command == SEARCH_TRANSLATION_COMMAND {
        handle_search_translation(backend, params.arguments).await
    } else {
        tracing::warn!("Unknown command: {}", params.command);
        Ok(None)
    }
}

/// Arguments of `i18n.searchTranslation`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchTranslationArgs {
    /// URI of the document to search
    uri: String,
    /// Source-language phrase (usually the editor selection)
    #[serde(default)]
    phrase: Option<String>,
}

/// Result for a search that found nothing.
fn empty_result() -> Option<Value> {
    Some(serde_json::json!([]))
}

/// Runs `i18n.searchTranslation`.
///
/// Maps the phrase to qualified keys through the source-language locale files
/// of the document's workspace folder, then returns the ranges of every key
/// occurrence in the open document. The client is asked to reveal the first.
///
/// # Arguments
/// * `arguments[0]` - `SearchTranslationArgs` object
///
/// # Returns
/// A JSON array of LSP ranges, empty when nothing was found.
async fn handle_search_translation(backend: &Backend, args: Vec<Value>) -> Result<Option<Value>> {
    let Some(first_arg) = args.into_iter().next() else {
        tracing::warn!("Missing arguments for {}", SEARCH_TRANSLATION_COMMAND);
        return Ok(empty_result());
    };

    let args: SearchTranslationArgs = match serde_json::from_value(first_arg) {
        Ok(args) => args,
        Err(e) => {
            tracing::warn!("Invalid arguments for {}: {}", SEARCH_TRANSLATION_COMMAND, e);
            return Ok(empty_result());
        }
    };

    let Some((uri, file_path)) =
        Url::parse(&args.uri).ok().and_then(|uri| Backend::uri_to_path(&uri).map(|path| (uri, path)))
    else {
        backend.client.show_message(MessageType::ERROR, "No active file").await;
        return Ok(empty_result());
    };

    let Some(document) = backend.state.document(&uri).await else {
        backend.client.show_message(MessageType::INFO, "No active editor.").await;
        return Ok(empty_result());
    };

    let Some(workspace_root) = backend.workspace_folder_for(&file_path).await else {
        backend.client.show_message(MessageType::ERROR, "No workspace folder found.").await;
        return Ok(empty_result());
    };

    let phrase = args.phrase.unwrap_or_default();
    let candidate_files = find_locale_files(&locale_root(&workspace_root).join(SOURCE_LANGUAGE));

    let Some(keys) = find_keys(&phrase, &candidate_files).filter(|keys| !keys.is_empty()) else {
        backend
            .client
            .show_message(MessageType::INFO, format!("No translation key found for '{phrase}'."))
            .await;
        return Ok(empty_result());
    };

    tracing::debug!(phrase = %phrase, ?keys, "Resolved translation keys");

    let ranges: Vec<Range> = find_occurrences(&document.text, &keys)
        .into_iter()
        .map(|span| span.to_range(&document.text).into())
        .collect();

    let Some(first) = ranges.first().copied() else {
        backend.client.show_message(MessageType::INFO, "No matches found.").await;
        return Ok(empty_result());
    };

    let show_result = backend
        .client
        .show_document(ShowDocumentParams {
            uri,
            external: Some(false),
            take_focus: Some(true),
            selection: Some(first),
        })
        .await;

    if let Err(e) = show_result {
        tracing::error!("Failed to show document: {}", e);
    }

    Ok(Some(serde_json::json!(ranges)))
}
