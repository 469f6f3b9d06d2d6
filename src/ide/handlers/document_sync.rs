//! Document synchronization handlers.

use tower_lsp::lsp_types::{
    DidChangeTextDocumentParams,
    DidCloseTextDocumentParams,
    DidOpenTextDocumentParams,
};

use super::super::backend::Backend;
use super::super::state::OpenDocument;

/// Starts tracking an opened document.
pub async fn handle_did_open(backend: &Backend, params: DidOpenTextDocumentParams) {
    let document = params.text_document;
    tracing::debug!(uri = %document.uri, language_id = %document.language_id, "file opened");

    backend.state.documents.lock().await.insert(
        document.uri,
        OpenDocument { language_id: document.language_id, text: document.text },
    );
}

/// Replaces a tracked document's text.
pub async fn handle_did_change(backend: &Backend, params: DidChangeTextDocumentParams) {
    let uri = params.text_document.uri;

    // FULL sync: the last change carries the whole text.
    let Some(change) = params.content_changes.into_iter().next_back() else {
        return;
    };

    let mut documents = backend.state.documents.lock().await;
    if let Some(document) = documents.get_mut(&uri) {
        document.text = change.text;
    } else {
        tracing::debug!(uri = %uri, "Change for a document that was never opened");
    }
}

/// Stops tracking a closed document.
pub async fn handle_did_close(backend: &Backend, params: DidCloseTextDocumentParams) {
    let uri = params.text_document.uri;
    tracing::debug!(uri = %uri, "file closed");

    backend.state.documents.lock().await.remove(&uri);
}
