//! Error types for `guacman`
//!
//! Each concern has its own error enum with a matching `Result` alias.
//! `GuacmanError` wraps all of them for callers that do not care which
//! layer failed.

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by the remote administration API collaborators
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced an HTTP response (DNS, TLS, timeout, reset)
    #[error("Request failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status code
    #[error("Server returned HTTP {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Error message reported by the server, or the canonical reason
        message: String,
    },

    /// The response body could not be decoded
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// The configured base URL cannot be used to build request URLs
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// The collaborator is not able to serve the request at all
    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

impl ApiError {
    /// Returns true if the server rejected the credentials or permissions
    #[must_use]
    pub const fn is_permission_denied(&self) -> bool {
        matches!(self, Self::Status { status: 401 | 403, .. })
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors related to configuration loading and saving
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the configuration file failed
    #[error("Failed to access {path}: {source}")]
    Io {
        /// Path of the file that could not be accessed
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for the settings schema
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    /// Settings could not be serialized
    #[error("Failed to serialize configuration: {0}")]
    Serialize(String),

    /// No configuration directory could be determined for this user
    #[error("Could not determine configuration directory")]
    NoConfigDir,

    /// The server URL is not a valid absolute http(s) URL
    #[error("Invalid server URL '{0}'")]
    InvalidUrl(String),

    /// No server URL was configured
    #[error("No server URL configured (set [server] url or GUACMAN_URL)")]
    MissingServerUrl,
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised by the admin view coordinator itself
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ViewError {
    /// The view was shut down before a wait was satisfied
    #[error("Admin view was shut down")]
    Closed,
}

/// Result type for view operations
pub type ViewResult<T> = Result<T, ViewError>;

/// Top-level error type for `guacman`
#[derive(Debug, Error)]
pub enum GuacmanError {
    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Remote API error
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Admin view error
    #[error(transparent)]
    View(#[from] ViewError),
}

/// Result type for general `guacman` operations
pub type GuacmanResult<T> = Result<T, GuacmanError>;
