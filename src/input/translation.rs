//! Locale file input definitions

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;

/// Errors raised while turning a locale file into a [`LocaleEntry`].
#[derive(Error, Debug)]
pub enum LocaleFileError {
    #[error("Failed to read locale file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Top-level JSON value must be an object")]
    NotAnObject,

    #[error("Cannot derive a file name from path")]
    InvalidFileName,
}

/// Contents of one locale file for one language.
///
/// Identified by `(language, file_name)`, e.g. `("en", "basicSet")` for
/// `src/locale/en/basicSet.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleEntry {
    pub language: String,

    /// File base name without extension.
    pub file_name: String,

    /// Top-level key -> translated value.
    pub keys: BTreeMap<String, String>,
}

impl LocaleEntry {
    /// Index key of this entry, `<language>.<file_name>`.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.language, self.file_name)
    }
}

/// Returns the last path segment with its final extension removed.
///
/// `src/locale/en/basicSet.json` gives `basicSet`.
#[must_use]
pub fn file_base_name(path: &Path) -> Option<String> {
    path.file_stem().map(|stem| stem.to_string_lossy().into_owned())
}

/// Reads the top level of a locale document as a flat key -> string map.
///
/// Strings are taken as-is and other scalars keep their JSON text. Nested
/// objects and arrays are not supported and are skipped.
pub fn flat_translations(json: &Value) -> Result<BTreeMap<String, String>, LocaleFileError> {
    let Value::Object(map) = json else {
        return Err(LocaleFileError::NotAnObject);
    };

    let mut result = BTreeMap::new();
    for (key, value) in map {
        match value {
            Value::String(s) => {
                result.insert(key.clone(), s.clone());
            }
            Value::Object(_) | Value::Array(_) => {
                tracing::warn!(key = %key, "Nested locale values are not supported, skipping");
            }
            _ => {
                result.insert(key.clone(), value.to_string());
            }
        }
    }

    Ok(result)
}

/// Load a locale file and create a [`LocaleEntry`] for `language`.
///
/// # Errors
/// Returns error if the file cannot be read, is not valid JSON, or its
/// top-level value is not an object.
pub fn load_locale_file(file_path: &Path, language: &str) -> Result<LocaleEntry, LocaleFileError> {
    let file_name = file_base_name(file_path).ok_or(LocaleFileError::InvalidFileName)?;
    let content = std::fs::read_to_string(file_path)?;
    let json: Value = serde_json::from_str(&content)?;
    let keys = flat_translations(&json)?;

    Ok(LocaleEntry {
        language: language.to_string(),
        file_name,
        keys,
    })
}
