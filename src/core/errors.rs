//! Custom error types for translation operations

use thiserror::Error;

/// Translation-related errors
#[derive(Error, Debug)]
pub enum TranslationError {
    /// The translation service could not be reached
    #[error("Service unavailable: {message}")]
    ServiceUnavailable {
        message: String,
    },

    /// Language code is not present in the catalog
    #[error("Unsupported language: {code}")]
    UnsupportedLanguage {
        code: String,
    },

    /// The service answered with its "unusual traffic" block page
    #[error("Rate limited by translation service (ip: {ip_address}, time: {time}, url: {url})")]
    RateLimited {
        ip_address: String,
        time: String,
        url: String,
    },

    /// API request failed
    #[error("API error: {status} - {message}")]
    ApiError {
        status: u16,
        message: String,
    },

    /// Invalid response from API
    #[error("Invalid response: {message}")]
    InvalidResponse {
        message: String,
    },

    /// Dataset could not be interpreted as a text table
    #[error("Invalid dataset: {message}")]
    InvalidDataset {
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

impl From<reqwest::Error> for TranslationError {
    fn from(err: reqwest::Error) -> Self {
        TranslationError::ServiceUnavailable {
            message: err.to_string(),
        }
    }
}

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslationError>;
