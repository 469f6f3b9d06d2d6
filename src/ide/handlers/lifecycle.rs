//! LSP lifecycle handlers: `initialize`, `initialized`, `shutdown`.

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::{
    CompletionOptions,
    ExecuteCommandOptions,
    InitializeParams,
    InitializeResult,
    InitializedParams,
    MessageType,
    OneOf,
    ServerCapabilities,
    ServerInfo,
    TextDocumentSyncCapability,
    TextDocumentSyncKind,
    WorkDoneProgressOptions,
    WorkspaceFoldersServerCapabilities,
    WorkspaceServerCapabilities,
};

use super::super::backend::Backend;
use super::execute_command::SEARCH_TRANSLATION_COMMAND;

/// Records the workspace folders, loads settings and advertises capabilities.
pub async fn handle_initialize(
    backend: &Backend,
    params: InitializeParams,
) -> Result<InitializeResult> {
    let mut workspace_folders: Vec<_> = params
        .workspace_folders
        .iter()
        .flatten()
        .filter_map(|folder| Backend::uri_to_path(&folder.uri))
        .collect();

    // Clients without workspace folder support only send `rootUri`.
    #[allow(deprecated)]
    if workspace_folders.is_empty()
        && let Some(root) = params.root_uri.as_ref().and_then(Backend::uri_to_path)
    {
        workspace_folders.push(root);
    }
    let workspace_root = workspace_folders.first().cloned();

    tracing::info!(?workspace_folders, "initialize");
    *backend.state.workspace_folders.lock().await = workspace_folders;

    let mut config_manager = backend.config_manager.lock().await;
    if let Some(root) = &workspace_root
        && let Err(error) = config_manager.load_workspace_file(root)
    {
        backend
            .client
            .log_message(MessageType::ERROR, format!("Configuration error: {error}"))
            .await;
        tracing::error!("Configuration error during initialize: {}", error);
    }
    let translation_function = config_manager.get_settings().translation_function.clone();
    drop(config_manager);

    backend.state.index.lock().await.update_translation_function_name(translation_function);

    Ok(InitializeResult {
        server_info: Some(ServerInfo {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: Some(env!("CARGO_PKG_VERSION").to_string()),
        }),
        capabilities: ServerCapabilities {
            text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL)),
            completion_provider: Some(CompletionOptions {
                resolve_provider: Some(false),
                trigger_characters: Some(vec![".".to_string()]),
                work_done_progress_options: WorkDoneProgressOptions::default(),
                all_commit_characters: None,
                completion_item: None,
            }),
            execute_command_provider: Some(ExecuteCommandOptions {
                commands: vec![SEARCH_TRANSLATION_COMMAND.to_string()],
                work_done_progress_options: WorkDoneProgressOptions::default(),
            }),
            workspace: Some(WorkspaceServerCapabilities {
                workspace_folders: Some(WorkspaceFoldersServerCapabilities {
                    supported: Some(true),
                    change_notifications: Some(OneOf::Left(true)),
                }),
                file_operations: None,
            }),
            ..ServerCapabilities::default()
        },
    })
}

/// Builds the locale index once the client is ready.
pub async fn handle_initialized(backend: &Backend, _: InitializedParams) {
    backend.client.log_message(MessageType::INFO, "initialized!").await;

    backend.reload_index().await;
}

/// Handles a `shutdown` request.
#[allow(clippy::unused_async)]
pub async fn handle_shutdown() -> Result<()> {
    Ok(())
}
