//! Error types for yoat

use crate::platform::cipher::ExtractError;
use thiserror::Error;

/// Main error type for yoat operations
#[derive(Debug, Error)]
pub enum YoatError {
    #[error("Invalid video id: {0}")]
    InvalidVideoId(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Timeout error: {0}")]
    Timeout(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("URL parsing error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Regex error: {0}")]
    RegexError(#[from] regex::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("No audio stream found")]
    NoAudioStream,

    #[error("Malformed cipher: {0}")]
    MalformedCipher(String),

    #[error("Player script not found in watch page")]
    PlayerScriptNotFound,

    #[error("Signature extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Generic error: {0}")]
    Generic(String),
}

impl YoatError {
    /// Check if error is retryable (timeouts only)
    pub fn is_retryable(&self) -> bool {
        match self {
            YoatError::Timeout(_) => true,
            YoatError::RequestFailed(e) => e.is_timeout(),
            _ => false,
        }
    }

    /// Check if error comes from locating or classifying the descrambler
    pub fn is_extraction_failure(&self) -> bool {
        matches!(
            self,
            YoatError::Extraction(_) | YoatError::PlayerScriptNotFound
        )
    }
}
