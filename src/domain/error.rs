use std::io;

use thiserror::Error;

/// Library-wide error type for mailforge operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Required API credential is not set.
    #[error("ANTHROPIC_API_KEY environment variable not set")]
    MissingApiKey,

    /// Model service failure (network, auth, rate limit, server error).
    #[error("Model request failed: {0}")]
    Provider(String),

    /// Model returned text that does not parse as the requested JSON shape.
    #[error("Malformed model output: {0}")]
    MalformedOutput(String),

    /// Decision passed JSON parsing but violates the plan contract.
    #[error("Invalid plan from model: {0}")]
    InvalidPlan(String),

    /// Content URL could not be fetched.
    #[error("Failed to fetch {url}: {details}")]
    Fetch { url: String, details: String },

    /// Fetched markup contained no readable article body.
    #[error("No readable article content found: {0}")]
    Extraction(String),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }
}
