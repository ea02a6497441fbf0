//! Centralized error handling for preop.
//!
//! [`PreopError`] covers the application-level failures (settings, summary
//! export, evaluation). Evaluation failures that only need to be *shown* go
//! through [`crate::client::EvaluationOutcome`] instead and never surface here.
//!
//! ```no_run
//! use preop::error::{Result, ResultExt as _};
//!
//! fn read_notes(path: &str) -> Result<String> {
//!     std::fs::read_to_string(path).context("Failed to read notes")
//! }
//! ```

use crate::client::EvaluationError;
use std::fmt;

/// Main error type for preop operations.
#[derive(Debug)]
pub enum PreopError {
    /// I/O errors (file operations, etc.)
    Io(std::io::Error),

    /// Settings could not be read, written or validated
    Config(String),

    /// The evaluation service could not be reached or answered badly
    Evaluation(EvaluationError),

    /// Summary could not be exported
    Export(String),

    /// Generic error with context
    Other(String),
}

impl fmt::Display for PreopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::Evaluation(e) => write!(f, "Evaluation failed: {e}"),
            Self::Export(msg) => write!(f, "Export failed: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PreopError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Evaluation(e) => Some(e),
            Self::Config(_) | Self::Export(_) | Self::Other(_) => None,
        }
    }
}

impl From<std::io::Error> for PreopError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<anyhow::Error> for PreopError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

impl From<serde_json::Error> for PreopError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON error: {err}"))
    }
}

impl From<EvaluationError> for PreopError {
    fn from(err: EvaluationError) -> Self {
        Self::Evaluation(err)
    }
}

/// Result type alias for preop operations.
pub type Result<T> = std::result::Result<T, PreopError>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    ///
    /// # Errors
    ///
    /// Returns the original error wrapped with `msg`.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    ///
    /// # Errors
    ///
    /// Returns the original error wrapped with the closure's message.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<PreopError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err: PreopError = e.into();
            PreopError::Other(format!("{}: {}", msg.into(), err))
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err: PreopError = e.into();
            PreopError::Other(format!("{}: {}", f(), err))
        })
    }
}
