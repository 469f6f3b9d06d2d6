//! End-to-end tests driving `Backend` through the `LanguageServer` trait.

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]
#![allow(missing_docs)]
#![allow(deprecated)]
#![allow(clippy::match_wildcard_for_single_variants)]

use std::fs;
use std::path::Path;

use i18n_helper_language_server::Backend;
use i18n_helper_language_server::config::CONFIG_FILE_NAME;
use i18n_helper_language_server::ide::SEARCH_TRANSLATION_COMMAND;
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;
use tower_lsp::lsp_types::*;
use tower_lsp::{
    LanguageServer,
    LspService,
};

fn create_test_backend() -> Backend {
    let (service, _socket) = LspService::new(Backend::new);
    service.inner().clone()
}

/// Workspace with `en` and `cn` locale folders.
fn create_workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    let locale = dir.path().join("src/locale");
    fs::create_dir_all(locale.join("en")).unwrap();
    fs::create_dir_all(locale.join("cn")).unwrap();

    fs::write(
        locale.join("en/basicSet.json"),
        "{\n  \"bye\": \"Goodbye\",\n  \"hello\": \"Hello\"\n}\n",
    )
    .unwrap();
    fs::write(locale.join("cn/basicSet.json"), "{\n  \"hello\": \"你好\"\n}\n").unwrap();
    fs::write(locale.join("en/common.json"), "{\n  \"ok\": \"OK\"\n}\n").unwrap();

    dir
}

fn init_params(root: &Path) -> InitializeParams {
    InitializeParams {
        workspace_folders: Some(vec![WorkspaceFolder {
            uri: Url::from_file_path(root).unwrap(),
            name: "test".to_string(),
        }]),
        ..InitializeParams::default()
    }
}

async fn start(root: &Path) -> Backend {
    let backend = create_test_backend();
    backend.initialize(init_params(root)).await.unwrap();
    backend.initialized(InitializedParams {}).await;
    backend
}

async fn open(backend: &Backend, uri: &Url, language_id: &str, text: &str) {
    backend
        .did_open(DidOpenTextDocumentParams {
            text_document: TextDocumentItem {
                uri: uri.clone(),
                language_id: language_id.to_string(),
                version: 1,
                text: text.to_string(),
            },
        })
        .await;
}

async fn complete_at(backend: &Backend, uri: &Url, line: u32, character: u32) -> Vec<String> {
    let result = backend
        .completion(CompletionParams {
            text_document_position: TextDocumentPositionParams {
                text_document: TextDocumentIdentifier { uri: uri.clone() },
                position: Position { line, character },
            },
            work_done_progress_params: WorkDoneProgressParams::default(),
            partial_result_params: PartialResultParams::default(),
            context: None,
        })
        .await
        .unwrap();

    match result {
        Some(CompletionResponse::Array(items)) => items.into_iter().map(|item| item.label).collect(),
        Some(_) => panic!("Expected an array response"),
        None => Vec::new(),
    }
}

async fn run_search(backend: &Backend, arguments: Vec<serde_json::Value>) -> Vec<Range> {
    let result = backend
        .execute_command(ExecuteCommandParams {
            command: SEARCH_TRANSLATION_COMMAND.to_string(),
            arguments,
            work_done_progress_params: WorkDoneProgressParams::default(),
        })
        .await
        .unwrap()
        .unwrap();

    serde_json::from_value(result).unwrap()
}

async fn search(backend: &Backend, uri: &Url, phrase: &str) -> Vec<Range> {
    run_search(backend, vec![json!({ "uri": uri.as_str(), "phrase": phrase })]).await
}

async fn change_configuration(backend: &Backend, settings: serde_json::Value) {
    backend.did_change_configuration(DidChangeConfigurationParams { settings }).await;
}

/// Translation function as seen by the settings and by the index.
async fn translation_function(backend: &Backend) -> (String, String) {
    let configured = backend.config_manager.lock().await.get_settings().translation_function.clone();
    let indexed = backend.state.index.lock().await.translation_function_name().to_string();
    (configured, indexed)
}

fn range(line: u32, start: u32, end: u32) -> Range {
    Range {
        start: Position { line, character: start },
        end: Position { line, character: end },
    }
}

#[tokio::test]
async fn test_initialize_advertises_capabilities() {
    let backend = create_test_backend();
    let result = backend.initialize(InitializeParams::default()).await.unwrap();
    let capabilities = result.capabilities;

    let completion = capabilities.completion_provider.unwrap();
    assert_eq!(completion.trigger_characters, Some(vec![".".to_string()]));

    let commands = capabilities.execute_command_provider.unwrap().commands;
    assert_eq!(commands, vec![SEARCH_TRANSLATION_COMMAND.to_string()]);

    match capabilities.text_document_sync.unwrap() {
        TextDocumentSyncCapability::Kind(kind) => assert_eq!(kind, TextDocumentSyncKind::FULL),
        _ => panic!("Expected kind-based text sync"),
    }
}

#[tokio::test]
async fn test_initialized_loads_locale_index() {
    let workspace = create_workspace();
    let backend = start(workspace.path()).await;

    let index = backend.state.index.lock().await;
    assert_eq!(index.file_names().into_iter().collect::<Vec<_>>(), vec!["basicSet", "common"]);
    assert_eq!(index.entries_for_file("basicSet").len(), 2);
}

#[tokio::test]
async fn test_completion_suggests_file_names_then_keys() {
    let workspace = create_workspace();
    let backend = start(workspace.path()).await;
    let uri = Url::from_file_path(workspace.path().join("src/App.vue")).unwrap();

    open(&backend, &uri, "vue", "t('").await;
    assert_eq!(complete_at(&backend, &uri, 0, 3).await, vec!["basicSet", "common"]);

    backend
        .did_change(DidChangeTextDocumentParams {
            text_document: VersionedTextDocumentIdentifier { uri: uri.clone(), version: 2 },
            content_changes: vec![TextDocumentContentChangeEvent {
                range: None,
                range_length: None,
                text: "t('basicSet.".to_string(),
            }],
        })
        .await;
    assert_eq!(complete_at(&backend, &uri, 0, 12).await, vec!["bye", "hello", "hello"]);
}

#[tokio::test]
async fn test_completion_skips_unsupported_languages() {
    let workspace = create_workspace();
    let backend = start(workspace.path()).await;
    let uri = Url::from_file_path(workspace.path().join("README.md")).unwrap();

    open(&backend, &uri, "markdown", "t('").await;

    assert_eq!(complete_at(&backend, &uri, 0, 3).await, Vec::<String>::new());
}

#[tokio::test]
async fn test_completion_follows_configured_function_name() {
    let workspace = create_workspace();
    let backend = start(workspace.path()).await;
    let uri = Url::from_file_path(workspace.path().join("src/App.vue")).unwrap();

    change_configuration(&backend, json!({ "i18nHelper": { "translationFunction": "$t" } })).await;

    open(&backend, &uri, "vue", "$t('").await;
    assert_eq!(complete_at(&backend, &uri, 0, 4).await, vec!["basicSet", "common"]);
}

#[tokio::test]
async fn test_search_translation_returns_occurrence_ranges() {
    let workspace = create_workspace();
    let backend = start(workspace.path()).await;
    let uri = Url::from_file_path(workspace.path().join("src/App.vue")).unwrap();

    open(
        &backend,
        &uri,
        "vue",
        "const a = t('basicSet.hello');\nconst b = t(\"basicSet.hello\");\nconst c = t('basicSet.helloWorld');",
    )
    .await;

    assert_eq!(search(&backend, &uri, "Hello").await, vec![range(0, 13, 27), range(1, 13, 27)]);
}

#[tokio::test]
async fn test_search_translation_without_match_returns_empty_array() {
    let workspace = create_workspace();
    let backend = start(workspace.path()).await;
    let uri = Url::from_file_path(workspace.path().join("src/App.vue")).unwrap();

    open(&backend, &uri, "vue", "const a = t('common.ok');").await;

    assert_eq!(search(&backend, &uri, "Nope").await, Vec::<Range>::new());
    assert_eq!(search(&backend, &uri, "Hello").await, Vec::<Range>::new());
    assert_eq!(search(&backend, &uri, "").await, Vec::<Range>::new());
}

#[tokio::test]
async fn test_search_translation_requires_open_document() {
    let workspace = create_workspace();
    let backend = start(workspace.path()).await;
    let uri = Url::from_file_path(workspace.path().join("src/Closed.vue")).unwrap();

    assert_eq!(search(&backend, &uri, "Hello").await, Vec::<Range>::new());
}

#[tokio::test]
async fn test_unknown_command_returns_none() {
    let backend = create_test_backend();

    let result = backend
        .execute_command(ExecuteCommandParams {
            command: "i18n.unknown".to_string(),
            arguments: vec![],
            work_done_progress_params: WorkDoneProgressParams::default(),
        })
        .await
        .unwrap();

    assert_eq!(result, None);
}

#[tokio::test]
async fn test_workspace_config_file_sets_function_name() {
    let workspace = create_workspace();
    fs::write(workspace.path().join(CONFIG_FILE_NAME), r#"{"translationFunction": "$t"}"#).unwrap();

    let backend = start(workspace.path()).await;

    assert_eq!(translation_function(&backend).await, ("$t".to_string(), "$t".to_string()));
}

#[tokio::test]
async fn test_unrelated_configuration_keeps_function_name() {
    let workspace = create_workspace();
    fs::write(workspace.path().join(CONFIG_FILE_NAME), r#"{"translationFunction": "$t"}"#).unwrap();
    let backend = start(workspace.path()).await;
    let uri = Url::from_file_path(workspace.path().join("src/App.vue")).unwrap();

    change_configuration(&backend, json!({ "editor": { "tabSize": 2 } })).await;
    change_configuration(&backend, json!({})).await;
    change_configuration(&backend, json!({ "i18nHelper": {} })).await;

    assert_eq!(translation_function(&backend).await, ("$t".to_string(), "$t".to_string()));
    open(&backend, &uri, "vue", "$t('").await;
    assert_eq!(complete_at(&backend, &uri, 0, 4).await, vec!["basicSet", "common"]);
}

#[tokio::test]
async fn test_invalid_configuration_keeps_function_name() {
    let workspace = create_workspace();
    let backend = start(workspace.path()).await;
    change_configuration(&backend, json!({ "translationFunction": "$t" })).await;

    change_configuration(&backend, json!({ "i18nHelper": { "translationFunction": "" } })).await;
    change_configuration(&backend, json!({ "i18nHelper": { "translationFunction": "t(" } })).await;
    change_configuration(&backend, json!({ "translationFunction": 5 })).await;
    change_configuration(&backend, json!({ "i18nHelper": "t" })).await;

    assert_eq!(translation_function(&backend).await, ("$t".to_string(), "$t".to_string()));
}

#[tokio::test]
async fn test_search_translation_outside_workspace_folders_returns_empty_array() {
    let workspace = create_workspace();
    let elsewhere = TempDir::new().unwrap();
    let backend = start(workspace.path()).await;
    let uri = Url::from_file_path(elsewhere.path().join("App.vue")).unwrap();

    open(&backend, &uri, "vue", "const a = t('basicSet.hello');").await;

    assert_eq!(search(&backend, &uri, "Hello").await, Vec::<Range>::new());
}

#[tokio::test]
async fn test_search_translation_with_unusable_uri_returns_empty_array() {
    let workspace = create_workspace();
    let backend = start(workspace.path()).await;

    for uri in ["not a uri", "untitled:Untitled-1"] {
        let ranges = run_search(&backend, vec![json!({ "uri": uri, "phrase": "Hello" })]).await;
        assert_eq!(ranges, Vec::<Range>::new());
    }
}

#[tokio::test]
async fn test_search_translation_with_missing_arguments_returns_empty_array() {
    let workspace = create_workspace();
    let backend = start(workspace.path()).await;

    assert_eq!(run_search(&backend, vec![]).await, Vec::<Range>::new());
    assert_eq!(run_search(&backend, vec![json!({ "phrase": "Hello" })]).await, Vec::<Range>::new());
}
