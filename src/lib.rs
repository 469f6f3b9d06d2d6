//! i18n-helper-language-server
//!
//! Language server that completes `t('<file>.<key>')` calls from the locale
//! files under `src/locale/<lang>/` and locates every use of a translated phrase.

pub mod config;
pub mod ide;
pub mod indexer;
pub mod input;
pub mod types;

pub use ide::backend::Backend;
