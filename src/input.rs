//! Parsed inputs read from the workspace.

pub mod translation;
