//! Workspace-related handlers.

use tower_lsp::lsp_types::{
    DidChangeConfigurationParams,
    DidChangeWorkspaceFoldersParams,
    MessageType,
};

use super::super::backend::Backend;
use crate::config::SettingsUpdate;

/// Applies client settings and rebuilds the locale index.
///
/// Payloads that carry no `translationFunction` (under `i18nHelper` or at the
/// top level) leave the settings and the index as they are.
pub async fn handle_did_change_configuration(
    backend: &Backend,
    params: DidChangeConfigurationParams,
) {
    tracing::info!(settings = %params.settings, "didChangeConfiguration received");

    let update = match SettingsUpdate::from_payload(&params.settings) {
        Ok(Some(update)) => update,
        Ok(None) => {
            tracing::debug!("No i18nHelper settings in payload, keeping current settings");
            return;
        }
        Err(error) => {
            tracing::warn!(%error, "Ignoring unparsable configuration");
            backend
                .client
                .log_message(MessageType::ERROR, format!("Configuration error: {error}"))
                .await;
            return;
        }
    };

    let result = backend.config_manager.lock().await.apply_update(&update);
    match result {
        Ok(true) => {
            tracing::info!("configuration updated successfully");
            backend.reload_index().await;
        }
        Ok(false) => tracing::debug!("configuration unchanged"),
        Err(error) => {
            tracing::error!(%error, "configuration validation error");
            backend
                .client
                .log_message(MessageType::ERROR, format!("Configuration error: {error}"))
                .await;
        }
    }
}

/// Updates the folder list; reindexes when the first folder changes.
pub async fn handle_did_change_workspace_folders(
    backend: &Backend,
    params: DidChangeWorkspaceFoldersParams,
) {
    let previous_primary = backend.state.primary_workspace_folder().await;

    {
        let mut folders = backend.state.workspace_folders.lock().await;
        for removed in &params.event.removed {
            if let Some(path) = Backend::uri_to_path(&removed.uri) {
                folders.retain(|folder| *folder != path);
            }
        }
        for added in &params.event.added {
            if let Some(path) = Backend::uri_to_path(&added.uri)
                && !folders.contains(&path)
            {
                folders.push(path);
            }
        }
        tracing::info!(folders = ?*folders, "workspace folders changed");
    }

    if backend.state.primary_workspace_folder().await != previous_primary {
        backend.reload_index().await;
    }
}
