//! Error types for agent data and config loading.

use thiserror::Error;

/// Errors that can occur when loading agent profiles or the AI config.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// File could not be found.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// Profile parsed but holds values the brain cannot run with.
    #[error("Invalid profile '{name}': {reason}")]
    InvalidProfile { name: String, reason: String },

    /// AI config parsed but holds values agents cannot run with.
    #[error("Invalid AI config '{path}': {reason}")]
    InvalidConfig { path: String, reason: String },
}
