use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in StorePass.
#[derive(Debug, Error)]
pub enum StorePassError {
    // --- Storage errors ---
    #[error("File error: {0}")]
    File(#[from] std::io::Error),

    #[error("Invalid database format: {0}")]
    Format(String),

    #[error("Unsupported format version: {0}")]
    Version(String),

    #[error("Decryption failed: wrong password or corrupted data")]
    Authentication,

    // --- Model errors ---
    #[error("Field '{field}' is not valid for entry type '{kind}'")]
    InvalidField { field: String, kind: String },

    #[error("Entry '{0}' not found")]
    EntryNotFound(String),

    #[error("Entry '{0}' already exists")]
    EntryExists(String),

    // --- CLI errors ---
    #[error("Database already exists at {0}")]
    DatabaseExists(PathBuf),

    #[error("User cancelled operation")]
    Cancelled,

    #[error("Command failed: {0}")]
    Command(String),
}

/// Convenience type alias for StorePass results.
pub type Result<T> = std::result::Result<T, StorePassError>;
