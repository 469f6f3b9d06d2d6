//! Settings lifecycle: workspace file at startup, client updates afterwards.

use std::io::ErrorKind;
use std::path::Path;

use serde_json::Value;

use super::{
    ConfigError,
    I18nSettings,
    SettingsUpdate,
};

/// Name of the optional per-workspace configuration file.
pub const CONFIG_FILE_NAME: &str = ".i18n-helper.json";

/// Holds the active settings.
///
/// Settings start from the defaults, are overlaid once with the workspace file
/// and then patched field by field by client updates. An update that fails
/// validation leaves the active settings untouched.
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    current_settings: I18nSettings,
}

impl ConfigManager {
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: I18nSettings::default() }
    }

    /// Resets to the defaults overlaid with `<workspace_root>/.i18n-helper.json`.
    ///
    /// A missing file yields the defaults. The file may hold the bare settings
    /// or wrap them in an `i18nHelper` section.
    ///
    /// # Errors
    /// - File read error
    /// - JSON parse error
    /// - Validation error
    pub fn load_workspace_file(&mut self, workspace_root: &Path) -> Result<(), ConfigError> {
        let config_path = workspace_root.join(CONFIG_FILE_NAME);

        let content = match std::fs::read_to_string(&config_path) {
            Ok(content) => content,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %config_path.display(), "Configuration file not found");
                self.current_settings = I18nSettings::default();
                return Ok(());
            }
            Err(error) => return Err(error.into()),
        };

        let payload: Value = serde_json::from_str(&content)?;
        let settings = SettingsUpdate::from_payload(&payload)?
            .map_or_else(I18nSettings::default, |update| I18nSettings::default().merged(&update));
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        tracing::debug!(path = %config_path.display(), ?settings, "Loaded workspace settings");
        self.current_settings = settings;

        Ok(())
    }

    /// Applies a client update (`didChangeConfiguration`).
    ///
    /// Returns whether the active settings changed.
    ///
    /// # Errors
    /// Validation error; the previous settings stay active.
    pub fn apply_update(&mut self, update: &SettingsUpdate) -> Result<bool, ConfigError> {
        let settings = self.current_settings.merged(update);
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        if settings == self.current_settings {
            return Ok(false);
        }

        tracing::debug!(?settings, "Settings updated");
        self.current_settings = settings;
        Ok(true)
    }

    #[must_use]
    pub const fn get_settings(&self) -> &I18nSettings {
        &self.current_settings
    }
}
