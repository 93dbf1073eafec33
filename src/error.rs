//! Error taxonomy for the production pipeline
//!
//! Every variant is fatal: a run either yields a complete, consistent
//! composition or nothing at all.

use std::path::PathBuf;

use thiserror::Error;

/// Production pipeline errors
#[derive(Error, Debug)]
pub enum ProducerError {
    /// Structurally invalid manifest or missing required field
    #[error("Manifest error in {path}: {message}")]
    Manifest { path: PathBuf, message: String },

    /// Neither the path as given nor the manifest-relative path exists
    #[error("Cannot resolve {field} '{given}': not found as given or relative to {base}")]
    PathResolution {
        field: &'static str,
        given: String,
        base: PathBuf,
    },

    /// Event timestamps decrease within one team's manifest
    #[error("Ordering violation in {path}: {message}")]
    OrderingViolation { path: PathBuf, message: String },

    /// `MM:SS` text failed to parse
    #[error("Timestamp format error: '{value}' is not MM:SS or whole seconds")]
    TimestampFormat { value: String },

    /// Input media or caption file vanished before the engine call
    #[error("Missing media: {0}")]
    MissingMedia(PathBuf),

    /// External compositing engine failed to start or exited non-zero
    #[error("Composition engine failed: {0}")]
    CompositionEngine(String),

    /// Event does not satisfy the scoring rules
    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(#[from] std::fmt::Error),
}

pub type Result<T> = std::result::Result<T, ProducerError>;

impl ProducerError {
    pub(crate) fn manifest(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Manifest {
            path: path.into(),
            message: message.into(),
        }
    }

    pub(crate) fn ordering(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::OrderingViolation {
            path: path.into(),
            message: message.into(),
        }
    }
}
