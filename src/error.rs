//! Error types for configx

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for configx operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for configx
#[derive(Error, Debug)]
pub enum Error {
    // -------------------------------------------------------------------------
    // Path / Tree Errors
    // -------------------------------------------------------------------------
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Strict mode forbids creating missing nodes for path '{0}'")]
    StrictModeViolation(String),

    #[error("Node structure error at '{path}': {reason}")]
    NodeStructure { path: String, reason: String },

    #[error("Invalid value for '{path}': {reason}")]
    InvalidValue { path: String, reason: String },

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory '{path}': {source}")]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Malformed config data: {0}")]
    Format(String),

    #[error("Failed to serialize data: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to parse value: {0}")]
    Parse(String),
}

impl Error {
    /// Check if this is a "not found" type error
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::PathNotFound(_))
    }

    /// Check if this error came from reading or writing persisted data
    #[must_use]
    pub fn is_codec_error(&self) -> bool {
        matches!(
            self,
            Error::Format(_)
                | Error::Io(_)
                | Error::FileRead { .. }
                | Error::FileWrite { .. }
                | Error::DirectoryCreate { .. }
                | Error::Serialize(_)
        )
    }

    pub(crate) fn invalid_path(path: &str, reason: impl Into<String>) -> Self {
        Error::InvalidPath {
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn structure(path: &str, reason: impl Into<String>) -> Self {
        Error::NodeStructure {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}
