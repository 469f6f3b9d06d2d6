//! In-memory locale index.

use std::collections::{
    BTreeMap,
    BTreeSet,
};
use std::path::Path;

use crate::indexer::types::{
    LoadDiagnostic,
    LoadReport,
};
use crate::input::translation::{
    LocaleEntry,
    load_locale_file,
};

/// Default translation function name.
pub const DEFAULT_TRANSLATION_FUNCTION: &str = "t";

/// Locale files of a workspace, keyed by `<language>.<file_name>`.
///
/// Rebuilt wholesale by [`LocaleIndex::load`]; entries are never patched in place.
/// Also carries the live translation function name, which completion reads at
/// call time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleIndex {
    /// Entries in load order (language order, then file name).
    entries: Vec<LocaleEntry>,
    /// Current translation function name, e.g. `t` or `$t`.
    translation_function: String,
}

impl Default for LocaleIndex {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSLATION_FUNCTION)
    }
}

impl LocaleIndex {
    #[must_use]
    pub fn new(translation_function: impl Into<String>) -> Self {
        Self { entries: Vec::new(), translation_function: translation_function.into() }
    }

    /// Loads `<root>/<code>/*.json` for every language code.
    ///
    /// Replaces all previously loaded entries. Missing language directories are
    /// skipped; unreadable or malformed files are left out and reported in the
    /// returned [`LoadReport`].
    pub fn load(&mut self, root: &Path, language_codes: &[&str]) -> LoadReport {
        tracing::debug!(root = %root.display(), ?language_codes, "Loading locale files");

        let mut entries = Vec::new();
        let mut report = LoadReport::default();

        for &language in language_codes {
            let language_dir = root.join(language);
            let dir = match std::fs::read_dir(&language_dir) {
                Ok(dir) => dir,
                Err(err) => {
                    tracing::debug!(dir = %language_dir.display(), %err, "Skipping language");
                    continue;
                }
            };

            let mut files: Vec<_> = dir
                .filter_map(Result::ok)
                .map(|entry| entry.path())
                .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
                .collect();
            files.sort();

            for file_path in files {
                match load_locale_file(&file_path, language) {
                    Ok(entry) => {
                        tracing::debug!(
                            entry = %entry.qualified_name(),
                            keys = entry.keys.len(),
                            "Loaded locale file"
                        );
                        entries.push(entry);
                    }
                    Err(error) => {
                        tracing::warn!(file = %file_path.display(), %error, "Skipping locale file");
                        report.diagnostics.push(LoadDiagnostic { file_path, error });
                    }
                }
            }
        }

        report.loaded_files = entries.len();
        self.entries = entries;
        report
    }

    /// All distinct file base names across loaded languages.
    #[must_use]
    pub fn file_names(&self) -> BTreeSet<&str> {
        self.entries.iter().map(|entry| entry.file_name.as_str()).collect()
    }

    /// Every loaded `(language, keys)` pair whose `<language>.<file_name>` key
    /// ends with `.<file_name>`, in language order.
    ///
    /// A dotted base name such as `user.profile` is therefore also found by
    /// `profile`.
    #[must_use]
    pub fn entries_for_file(&self, file_name: &str) -> Vec<(&str, &BTreeMap<String, String>)> {
        let suffix = format!(".{file_name}");
        self.entries
            .iter()
            .filter(|entry| entry.qualified_name().ends_with(&suffix))
            .map(|entry| (entry.language.as_str(), &entry.keys))
            .collect()
    }

    #[must_use]
    pub fn translation_function_name(&self) -> &str {
        &self.translation_function
    }

    /// Sets the translation function used by completion. Does not reload.
    pub fn update_translation_function_name(&mut self, name: impl Into<String>) {
        self.translation_function = name.into();
        tracing::debug!(name = %self.translation_function, "Translation function updated");
    }
}
