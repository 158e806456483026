//! Error types for theme handling.

use thiserror::Error;

/// Errors that can occur while reading or applying a theme.
#[derive(Debug, Error)]
pub enum ThemeError {
    /// Not one of the known theme tokens.
    #[error("unknown theme: {0:?}")]
    UnknownTheme(String),

    /// Storage IO failed.
    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data could not be parsed or written.
    #[error("storage format error: {0}")]
    Json(#[from] serde_json::Error),
}
