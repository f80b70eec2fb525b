//! CLI error types and exit codes.

use guacman_core::error::{ApiError, ConfigError, GuacmanError, ViewError};

/// Exit codes for CLI operations
pub mod exit_codes {
    /// General error - configuration, validation, or other local errors
    pub const GENERAL_ERROR: i32 = 1;
    /// API failure - the server could not be reached or rejected a request
    pub const API_FAILURE: i32 = 2;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Remote API error
    #[error("API error: {0}")]
    Api(String),

    /// One or more loads did not succeed
    #[error("Failed to load {0}")]
    LoadFailed(String),

    /// Requested object is not visible
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid command-line input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Async runtime or view failure
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// Output serialization error
    #[error("Output error: {0}")]
    Output(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        Self::Api(err.to_string())
    }
}

impl From<ViewError> for CliError {
    fn from(err: ViewError) -> Self {
        Self::Runtime(err.to_string())
    }
}

impl From<GuacmanError> for CliError {
    fn from(err: GuacmanError) -> Self {
        match err {
            GuacmanError::Config(e) => e.into(),
            GuacmanError::Api(e) => e.into(),
            GuacmanError::View(e) => e.into(),
        }
    }
}

impl CliError {
    /// Returns the appropriate exit code for this error type.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: General error (configuration, input, output, IO)
    /// - 2: API failure (request failed, load failed, object not visible)
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Api(_) | Self::LoadFailed(_) | Self::NotFound(_) => exit_codes::API_FAILURE,
            Self::Config(_)
            | Self::InvalidInput(_)
            | Self::Runtime(_)
            | Self::Output(_)
            | Self::Io(_) => exit_codes::GENERAL_ERROR,
        }
    }
}
