//! Workspace layout: where locale files live and how they are discovered.
use std::path::{
    Path,
    PathBuf,
};

use ignore::WalkBuilder;

/// Locale directory, relative to the workspace root.
pub const LOCALE_DIR: &str = "src/locale";

/// Languages loaded into the index, in lookup order.
pub const LANGUAGE_CODES: [&str; 2] = ["en", "cn"];

/// Language whose files are searched by `i18n.searchTranslation`.
pub const SOURCE_LANGUAGE: &str = "en";

/// `<workspace_root>/src/locale`.
#[must_use]
pub fn locale_root(workspace_root: &Path) -> PathBuf {
    workspace_root.join(LOCALE_DIR)
}

/// Returns every `.json` file below `language_dir`, recursively, sorted by path.
///
/// A missing directory yields an empty list.
#[must_use]
pub fn find_locale_files(language_dir: &Path) -> Vec<PathBuf> {
    if !language_dir.is_dir() {
        tracing::debug!(dir = %language_dir.display(), "Locale directory not found");
        return Vec::new();
    }

    let mut found_files = Vec::new();
    for result in WalkBuilder::new(language_dir).standard_filters(false).follow_links(false).build() {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(?err, "Failed to read directory entry");
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            found_files.push(path.to_path_buf());
        }
    }

    found_files.sort();
    found_files
}

/// Picks the first workspace folder that contains `file_path`.
#[must_use]
pub fn workspace_folder_for<'a>(file_path: &Path, folders: &'a [PathBuf]) -> Option<&'a PathBuf> {
    folders.iter().find(|folder| file_path.starts_with(folder))
}
