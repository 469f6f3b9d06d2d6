//! Shared LSP server state

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{
    Mutex,
    MutexGuard,
};
use tower_lsp::lsp_types::Url;

use crate::indexer::LocaleIndex;

/// An open text document, synced in full on every change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenDocument {
    /// Client language id, e.g. `vue` or `typescript`.
    pub language_id: String,
    pub text: String,
}

/// LSP server shared state
///
/// Split out of `Backend` so handlers can share it.
///
/// # Lock order
///
/// When holding more than one lock, acquire them in this order:
/// 1. `index`
/// 2. `documents`
/// 3. `workspace_folders`
#[derive(Clone, Default)]
pub struct ServerState {
    /// Locale index of the first workspace folder
    pub index: Arc<Mutex<LocaleIndex>>,
    /// Open documents by URI
    pub documents: Arc<Mutex<HashMap<Url, OpenDocument>>>,
    /// Workspace folder paths, in client order
    pub workspace_folders: Arc<Mutex<Vec<PathBuf>>>,
}

impl ServerState {
    #[must_use]
    pub fn new(index: LocaleIndex) -> Self {
        Self {
            index: Arc::new(Mutex::new(index)),
            documents: Arc::new(Mutex::new(HashMap::new())),
            workspace_folders: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Locks `index` and `documents` together, in lock order.
    pub async fn lock_index_and_documents(
        &self,
    ) -> (MutexGuard<'_, LocaleIndex>, MutexGuard<'_, HashMap<Url, OpenDocument>>) {
        let index = self.index.lock().await;
        let documents = self.documents.lock().await;
        (index, documents)
    }

    /// Clone of an open document, if any.
    pub async fn document(&self, uri: &Url) -> Option<OpenDocument> {
        self.documents.lock().await.get(uri).cloned()
    }

    /// First workspace folder, the one whose locale files are indexed.
    pub async fn primary_workspace_folder(&self) -> Option<PathBuf> {
        self.workspace_folders.lock().await.first().cloned()
    }
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("index", &"<LocaleIndex>")
            .field("documents", &"<HashMap<Url, OpenDocument>>")
            .field("workspace_folders", &"<Vec<PathBuf>>")
            .finish()
    }
}
