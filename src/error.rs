//! Error types
//!
//! `StripError` covers everything that can go wrong with a single job and is
//! always reported per file. `AppError` covers startup and configuration
//! failures, which are the only ones allowed to abort the program.

use std::path::PathBuf;
use thiserror::Error;

/// Failure of one metadata-stripping job
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StripError {
    /// Empty or whitespace-only entry in the drop payload
    #[error("Malformed path in drop payload: {0:?}")]
    MalformedPath(String),

    /// Input file does not exist
    #[error("{} not found", .0.display())]
    NotFound(PathBuf),

    /// Input could not be decoded as PNG
    #[error("Failed to decode PNG: {0}")]
    Decode(String),

    /// Re-encoding failed even without metadata
    #[error("Failed to encode PNG: {0}")]
    EncodeFailed(String),

    /// Reading or writing a file failed
    #[error("IO error: {0}")]
    Io(String),

    /// The stripper panicked inside the worker
    #[error("Worker crashed while processing: {0}")]
    WorkerPanic(String),

    /// Job submitted after the worker was shut down
    #[error("Worker is not running")]
    WorkerUnavailable,
}

impl From<std::io::Error> for StripError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<png::DecodingError> for StripError {
    fn from(err: png::DecodingError) -> Self {
        match err {
            png::DecodingError::IoError(e) => Self::Io(e.to_string()),
            other => Self::Decode(other.to_string()),
        }
    }
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse config: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to start worker thread: {0}")]
    WorkerSpawn(String),
}
