// File: src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for guide operations.
#[derive(Error, Debug)]
pub enum GuideError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A catalog file exists but cannot be used.
    #[error("Catalog error in '{}': {reason}", .path.display())]
    Catalog { path: PathBuf, reason: String },

    #[error("Unknown topic: {0}")]
    UnknownTopic(String),

    #[error("Unknown section '{section}' in topic '{topic}'")]
    UnknownSection { topic: String, section: String },

    /// Input line that does not map to an action.
    #[error("{0}")]
    Command(String),

    #[error("Section '{section}' has no item at index {index}")]
    UnknownItem { section: String, index: usize },
}

/// Result type alias for guide operations.
pub type Result<T> = std::result::Result<T, GuideError>;
