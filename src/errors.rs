// ABOUTME: Error types for the script-deck application
// ABOUTME: Provides structured error handling for each stage of the generation pipeline

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("Failed to read file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Request to generation service failed: {0}")]
    FetchError(#[from] reqwest::Error),

    #[error("Please enter the presentation script before generating.")]
    EmptyScript,

    #[error("Today's generation limit of {limit} has been reached. Please try again tomorrow.")]
    QuotaExhausted { limit: u32 },

    #[error("Failed to read image {path:?}: {message}")]
    MediaReadError { path: PathBuf, message: String },

    #[error(
        "The generation service rate limit (requests per minute) was reached. Wait a little and try again."
    )]
    RateLimited,

    #[error("Generation service returned HTTP {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Slide plan could not be parsed: {0}")]
    PlanParseError(String),

    #[error("Image error: {0}")]
    ImageError(String),

    #[error("PPTX generation error: {0}")]
    PptxError(String),

    #[error("Preview generation error: {0}")]
    PreviewError(String),

    #[error("Quota state error: {0}")]
    QuotaStateError(String),

    #[error("Input validation error: {0}")]
    ValidationError(String),

    #[error("Path not found: {0}")]
    PathNotFoundError(PathBuf),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unknown error: {0}")]
    UnknownError(String),
}

impl DeckError {
    /// Errors raised before the pipeline issues any network request.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            DeckError::EmptyScript
                | DeckError::QuotaExhausted { .. }
                | DeckError::MediaReadError { .. }
        )
    }

    /// Map a non-success HTTP status from the generation service.
    pub fn from_status(status: u16, body: &str) -> Self {
        if status == 429 {
            return DeckError::RateLimited;
        }
        let message: String = body.trim().chars().take(500).collect();
        DeckError::ApiError { status, message }
    }
}

// Implement conversion from anyhow::Error to our DeckError
impl From<anyhow::Error> for DeckError {
    fn from(err: anyhow::Error) -> Self {
        DeckError::UnknownError(err.to_string())
    }
}

// Implement conversion from zip errors
impl From<zip::result::ZipError> for DeckError {
    fn from(err: zip::result::ZipError) -> Self {
        DeckError::PptxError(format!("ZIP operation failed: {}", err))
    }
}

impl From<serde_json::Error> for DeckError {
    fn from(err: serde_json::Error) -> Self {
        DeckError::PlanParseError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DeckError>;
