//! LSP feature handlers
//!
//! Handles `textDocument/completion`.

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::{
    CompletionParams,
    CompletionResponse,
};

use super::super::backend::Backend;
use crate::ide::completion::{
    SUPPORTED_LANGUAGE_IDS,
    complete,
};
use crate::types::{
    SourcePosition,
    line_prefix,
};

/// Handles a `textDocument/completion` request.
pub async fn handle_completion(
    backend: &Backend,
    params: CompletionParams,
) -> Result<Option<CompletionResponse>> {
    let uri = params.text_document_position.text_document.uri;
    let position = params.text_document_position.position;

    tracing::debug!(uri = %uri, line = position.line, character = position.character, "Completion request");

    let (index, documents) = backend.state.lock_index_and_documents().await;

    let Some(document) = documents.get(&uri) else {
        tracing::debug!("Document not open: {}", uri);
        return Ok(None);
    };

    if !SUPPORTED_LANGUAGE_IDS.contains(&document.language_id.as_str()) {
        tracing::debug!(language_id = %document.language_id, "Completion not offered for language");
        return Ok(None);
    }

    let Some(prefix) = line_prefix(&document.text, SourcePosition::from(position)) else {
        return Ok(None);
    };

    let items = complete(&index, prefix);
    drop(documents);
    drop(index);

    tracing::debug!("Generated {} completion items", items.len());

    if items.is_empty() { Ok(None) } else { Ok(Some(CompletionResponse::Array(items))) }
}
