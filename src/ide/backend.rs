//! LSP Backend implementation.

use std::path::{
    Path,
    PathBuf,
};
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::{
    CompletionParams,
    CompletionResponse,
    DidChangeConfigurationParams,
    DidChangeTextDocumentParams,
    DidChangeWorkspaceFoldersParams,
    DidCloseTextDocumentParams,
    DidOpenTextDocumentParams,
    ExecuteCommandParams,
    InitializeParams,
    InitializeResult,
    InitializedParams,
    MessageType,
    Url,
};
use tower_lsp::{
    Client,
    LanguageServer,
};

use super::handlers;
use super::state::ServerState;
use crate::config::ConfigManager;
use crate::indexer::LocaleIndex;
use crate::indexer::workspace::{
    LANGUAGE_CODES,
    locale_root,
};

/// LSP Backend
#[derive(Clone)]
pub struct Backend {
    /// LSP client
    pub client: Client,
    /// Configuration manager
    pub config_manager: Arc<Mutex<ConfigManager>>,
    /// Shared server state
    pub state: ServerState,
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backend")
            .field("config_manager", &"<ConfigManager>")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Backend {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self {
            client,
            config_manager: Arc::new(Mutex::new(ConfigManager::new())),
            state: ServerState::new(LocaleIndex::default()),
        }
    }

    /// Converts a `file://` URI to a path.
    pub(crate) fn uri_to_path(uri: &Url) -> Option<PathBuf> {
        let path = uri.to_file_path().ok();
        if path.is_none() {
            tracing::debug!("Failed to convert URI to file path: {}", uri);
        }
        path
    }

    /// Rebuilds the locale index from the first workspace folder.
    ///
    /// The translation function name is carried over from the current settings.
    pub(crate) async fn reload_index(&self) {
        let translation_function =
            self.config_manager.lock().await.get_settings().translation_function.clone();

        let Some(workspace_root) = self.state.primary_workspace_folder().await else {
            tracing::debug!("No workspace folder, skipping locale indexing");
            let mut index = self.state.index.lock().await;
            index.update_translation_function_name(translation_function);
            return;
        };

        let report = {
            let mut index = self.state.index.lock().await;
            index.update_translation_function_name(translation_function);
            index.load(&locale_root(&workspace_root), &LANGUAGE_CODES)
        };

        for diagnostic in &report.diagnostics {
            self.client
                .log_message(MessageType::WARNING, format!("Skipped locale file {diagnostic}"))
                .await;
        }

        tracing::info!(
            root = %workspace_root.display(),
            files = report.loaded_files,
            skipped = report.diagnostics.len(),
            "Locale index loaded"
        );
        self.client
            .log_message(
                MessageType::INFO,
                format!("Locale index loaded: {} file(s)", report.loaded_files),
            )
            .await;
    }

    /// Workspace folder containing `file_path`, first match wins.
    pub(crate) async fn workspace_folder_for(&self, file_path: &Path) -> Option<PathBuf> {
        let folders = self.state.workspace_folders.lock().await;
        crate::indexer::workspace::workspace_folder_for(file_path, &folders).cloned()
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        handlers::lifecycle::handle_initialize(self, params).await
    }

    async fn initialized(&self, params: InitializedParams) {
        handlers::lifecycle::handle_initialized(self, params).await;
    }

    async fn shutdown(&self) -> Result<()> {
        handlers::lifecycle::handle_shutdown().await
    }

    async fn did_change_workspace_folders(&self, params: DidChangeWorkspaceFoldersParams) {
        handlers::workspace::handle_did_change_workspace_folders(self, params).await;
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        handlers::workspace::handle_did_change_configuration(self, params).await;
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        handlers::document_sync::handle_did_open(self, params).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        handlers::document_sync::handle_did_change(self, params).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        handlers::document_sync::handle_did_close(self, params).await;
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        handlers::features::handle_completion(self, params).await
    }

    async fn execute_command(&self, params: ExecuteCommandParams) -> Result<Option<Value>> {
        handlers::execute_command::handle_execute_command(self, params).await
    }
}
