//! Error types for the bridge
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for bridge operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the bridge
#[derive(Error, Debug)]
pub enum Error {
    /// Presented credentials did not match the configured ones
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The update request was rejected before contacting the provider
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No managed zone matches the requested hostname
    #[error("no zone found for hostname: {0}")]
    ZoneNotFound(String),

    /// The provider answered with a non-2xx status
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code returned by the provider
        status: u16,
        /// Provider error code, when the body carried one
        code: Option<i64>,
        /// Provider error message, or the raw body text
        message: String,
    },

    /// Transport-level HTTP failure (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A provider step failed; wraps the underlying cause with context
    #[error("Provider error ({provider}): {message}")]
    Provider {
        /// Provider name
        provider: String,
        /// Error message
        message: String,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Reasons an update request fails validation.
///
/// The `Display` output is sent verbatim to the router as the response body.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing hostname parameter")]
    MissingHostname,

    #[error("Invalid IPv4 address")]
    InvalidIpv4,

    #[error("Invalid IPv6 address")]
    InvalidIpv6,

    #[error("No valid IP address provided or detected")]
    NoAddress,
}

impl Error {
    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a "zone not found" error for a hostname
    pub fn zone_not_found(hostname: impl Into<String>) -> Self {
        Self::ZoneNotFound(hostname.into())
    }

    /// Create an API error from a provider response
    pub fn api(status: u16, code: Option<i64>, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            code,
            message: message.into(),
        }
    }

    /// Create an HTTP error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Create a provider-specific error
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
