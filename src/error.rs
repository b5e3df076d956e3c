//! Error types for blobcursor
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for blobcursor
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    /// Settings file could not be read or understood
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// A required settings field is empty or absent
    #[error("Missing required setting: {field}")]
    MissingSetting {
        /// Name of the missing field
        field: String,
    },

    /// JSON deserialization failed
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    /// Credential handling failed outside the token exchange itself
    #[error("Authentication failed: {message}")]
    Auth {
        /// What went wrong
        message: String,
    },

    /// The token endpoint rejected the request
    #[error("OAuth2 error: {message}")]
    OAuth2 {
        /// What went wrong
        message: String,
    },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    /// Transport-level failure from the underlying client
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response from the service
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// Response status code
        status: u16,
        /// Response body, if one was read
        body: String,
    },

    /// 429 response after retries were exhausted
    #[error("Rate limited, retry after {retry_after_seconds}s")]
    RateLimited {
        /// Server-suggested wait before the next attempt
        retry_after_seconds: u64,
    },

    /// Request did not complete within the deadline
    #[error("Request timeout after {timeout_ms}ms")]
    Timeout {
        /// The deadline that was exceeded
        timeout_ms: u64,
    },

    /// Retry budget spent without a terminal response
    #[error("Max retries ({max_retries}) exceeded")]
    MaxRetriesExceeded {
        /// The configured retry limit
        max_retries: u32,
    },

    /// Endpoint string is not a valid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Listing Errors
    // ============================================================================
    /// A page fetch failed for a non-HTTP reason
    #[error("Fetch failed: {message}")]
    Fetch {
        /// What went wrong
        message: String,
    },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    /// Local filesystem failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A named local file does not exist
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path that was looked up
        path: String,
    },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    /// Catch-all for wrapped errors with added context
    #[error("{0}")]
    Other(String),

    /// Errors bubbled up from anyhow-based call sites
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing setting error
    pub fn missing_setting(field: impl Into<String>) -> Self {
        Self::MissingSetting {
            field: field.into(),
        }
    }

    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a fetch error
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch {
            message: message.into(),
        }
    }

    /// HTTP status carried by this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(_) | Error::RateLimited { .. } | Error::Timeout { .. } => true,
            Error::HttpStatus { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }
}

/// Check if an HTTP status code is retryable
fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Result type alias for blobcursor
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
