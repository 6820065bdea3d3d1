//! Custom error types for translation operations

use serde::Serialize;
use thiserror::Error;

/// A single problem found while validating tool arguments
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Field path the issue refers to (empty for the payload itself)
    pub path: Vec<String>,
    /// Human readable description
    pub message: String,
}

impl ValidationIssue {
    /// Issue at `path`, e.g. `&["text", "0"]`
    pub fn new(path: &[&str], message: impl Into<String>) -> Self {
        Self {
            path: path.iter().map(|p| p.to_string()).collect(),
            message: message.into(),
        }
    }
}

/// Translation-related errors
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Tool arguments did not match the declared schema
    #[error("Input validation failed")]
    InvalidParams {
        /// Every problem found, not just the first
        issues: Vec<ValidationIssue>,
    },

    /// Upstream answered with a non-success status
    #[error("API error: {status} - {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Upstream message, or a generic one with the status
        message: String,
        /// Parsed error body when upstream sent one
        body: Option<serde_json::Value>,
    },

    /// Network error
    #[error("Network error: {message}")]
    NetworkError {
        /// Transport failure description
        message: String,
    },

    /// Invalid response from API
    #[error("Invalid response: {message}")]
    InvalidResponseError {
        /// What was wrong with the response
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// What was wrong with the configuration
        message: String,
    },

    /// Reqwest error
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslationError>;
