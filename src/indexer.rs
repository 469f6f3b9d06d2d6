//! Locale index and workspace layout.

pub mod locale;
pub mod types;
pub mod workspace;

pub use locale::LocaleIndex;
