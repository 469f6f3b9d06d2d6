use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::indexer::locale::DEFAULT_TRANSLATION_FUNCTION;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "translationFunction")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Renders validation errors as a numbered list.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Section clients put this server's settings under.
const SETTINGS_SECTION: &str = "i18nHelper";

/// Active settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct I18nSettings {
    /// Name of the translation function whose calls get completion, e.g. `t` or `$t`.
    pub translation_function: String,
}

impl Default for I18nSettings {
    fn default() -> Self {
        Self { translation_function: DEFAULT_TRANSLATION_FUNCTION.to_string() }
    }
}

impl I18nSettings {
    /// Copy of `self` with every field present in `update` overwritten.
    #[must_use]
    pub fn merged(&self, update: &SettingsUpdate) -> Self {
        Self {
            translation_function: update
                .translation_function
                .clone()
                .unwrap_or_else(|| self.translation_function.clone()),
        }
    }

    /// # Errors
    /// - Translation function is empty
    /// - Translation function contains whitespace, quotes or parentheses
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.translation_function.is_empty() {
            errors.push(ValidationError::new(
                "translationFunction",
                "The function name cannot be empty. Example: \"t\" or \"$t\"",
            ));
        } else if let Some(bad) = self
            .translation_function
            .chars()
            .find(|c| c.is_whitespace() || matches!(c, '\'' | '"' | '`' | '(' | ')'))
        {
            errors.push(ValidationError::new(
                "translationFunction",
                format!(
                    "Invalid character {bad:?} in '{}'. Use the bare function name, e.g. \"$t\"",
                    self.translation_function
                ),
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// A partial settings change. Absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub translation_function: Option<String>,
}

impl SettingsUpdate {
    /// Extracts this server's settings from a configuration payload.
    ///
    /// Both `{"i18nHelper": {...}}` and the bare `{"translationFunction": ...}`
    /// are accepted. Returns `Ok(None)` when the payload sets none of them,
    /// e.g. a notification about another extension's settings.
    ///
    /// # Errors
    /// A known field has the wrong type, or the `i18nHelper` section is not an object.
    pub fn from_payload(payload: &Value) -> Result<Option<Self>, ConfigError> {
        let section = match payload.get(SETTINGS_SECTION) {
            Some(section) => section,
            None if payload.is_object() => payload,
            None => return Ok(None),
        };

        let update: Self = serde_json::from_value(section.clone())?;
        Ok((!update.is_empty()).then_some(update))
    }

    /// True when the update sets no field.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.translation_function.is_none()
    }
}
