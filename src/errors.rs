// ABOUTME: Error types for the slidewire application
// ABOUTME: Provides structured error handling for each stage of the pipeline

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WireError {
    #[error("Failed to read file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Failed to fetch remote resource: {0}")]
    FetchError(#[from] reqwest::Error),

    #[error("Mount point not found: no element with id \"{0}\"")]
    MountPointMissing(String),

    #[error("Path not found: {0}")]
    PathNotFoundError(PathBuf),

    #[error("Presentation source error: {0}")]
    DeckError(String),

    #[error("Highlighting error: {0}")]
    HighlightError(String),

    #[error("Slide index out of range: {index} (deck has {count} slides)")]
    SlideOutOfRange { index: usize, count: usize },

    #[error("Notification channel error: {0}")]
    ChannelError(String),

    #[error("Input validation error: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unknown error: {0}")]
    UnknownError(String),
}

// Implement conversion from anyhow::Error to our WireError
impl From<anyhow::Error> for WireError {
    fn from(err: anyhow::Error) -> Self {
        WireError::UnknownError(err.to_string())
    }
}

// Implement conversion from syntect errors
impl From<syntect::Error> for WireError {
    fn from(err: syntect::Error) -> Self {
        WireError::HighlightError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, WireError>;
