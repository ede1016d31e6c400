// src/error.rs
use thiserror::Error;

/// Message shown to the user for every upstream failure. Upload and generation
/// failures are deliberately not told apart here.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

pub const MISSING_INPUT_MESSAGE: &str = "Please upload an image and enter text.";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    /// Missing image or blank narration. Raised before any network call.
    #[error("Validation error: {0}")]
    Validation(String),
    /// Image host rejected the upload or answered `success: false`.
    #[error("Image upload failed: {0}")]
    Upload(String),
    /// Transport failure or non-2xx status on either outbound call.
    #[error("Network error: {0}")]
    Network(String),
    /// Video generation response carried none of the known URL fields.
    #[error("Unexpected response shape: {0}")]
    ResponseShape(String),
}

impl GenerationError {
    pub fn is_validation(&self) -> bool {
        matches!(self, GenerationError::Validation(_))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::Validation(_) => "validation",
            GenerationError::Upload(_) => "upload",
            GenerationError::Network(_) => "network",
            GenerationError::ResponseShape(_) => "response_shape",
        }
    }

    /// Text safe to put in front of the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            GenerationError::Validation(_) => MISSING_INPUT_MESSAGE,
            _ => GENERIC_FAILURE_MESSAGE,
        }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        GenerationError::Network(err.to_string())
    }
}

/// Startup configuration problems.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),
    #[error("Invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },
}
