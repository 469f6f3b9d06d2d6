//! IDE features module.

pub mod backend;
pub mod completion;
mod handlers;
pub mod occurrences;
pub mod search;
pub mod state;

pub use handlers::execute_command::SEARCH_TRANSLATION_COMMAND;
