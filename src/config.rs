//! Server configuration.
/// Configuration manager and workspace file
mod manager;
/// Configuration types and settings
mod types;

pub use manager::{
    CONFIG_FILE_NAME,
    ConfigManager,
};
pub use types::{
    ConfigError,
    I18nSettings,
    SettingsUpdate,
    ValidationError,
};
