//! Error types for the tabflow session engine.

use thiserror::Error;

use crate::TabId;

/// Main error type for tabflow operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Tab not found by identity
    #[error("Tab not found: {0}")]
    TabNotFound(TabId),

    /// Save requested on a tab with no bound file
    #[error("Tab has no bound file to save to")]
    NoFileBound,

    /// Reading file content failed
    #[error("Read failed for '{path}': {reason}")]
    ReadFailed {
        /// Path of the file that could not be read
        path: String,
        /// Collaborator-supplied failure description
        reason: String,
    },

    /// Writing file content failed
    #[error("Save failed for '{path}': {reason}")]
    SaveFailed {
        /// Path of the file that could not be saved
        path: String,
        /// Collaborator-supplied failure description
        reason: String,
    },

    /// Durable storage write failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with custom message
    #[error("{0}")]
    Other(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
