//! Indexer type definitions.

use std::path::PathBuf;

use crate::input::translation::LocaleFileError;

/// A locale file that was skipped during a load.
#[derive(Debug)]
pub struct LoadDiagnostic {
    pub file_path: PathBuf,
    pub error: LocaleFileError,
}

impl std::fmt::Display for LoadDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.file_path.display(), self.error)
    }
}

/// Outcome of [`LocaleIndex::load`](super::locale::LocaleIndex::load).
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Number of locale files stored in the index.
    pub loaded_files: usize,
    /// Files that were skipped, one per failure.
    pub diagnostics: Vec<LoadDiagnostic>,
}
