//! Settings stored in `config.toml`

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_TIMEOUT_SECS;
use crate::tracing::{TracingConfig, TracingLevel, TracingOutput};

/// Top-level settings file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSettings {
    /// Administration server
    #[serde(default)]
    pub server: ServerSettings,
    /// Logging
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Where and how to reach the administration API (`[server]`)
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Application root URL, e.g. `https://example.org/guacamole`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Auth token issued by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Request timeout in seconds (1-300, default: 30)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            url: None,
            token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for ServerSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerSettings")
            .field("url", &self.url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ServerSettings {
    /// Returns the timeout clamped to the valid range (1-300 seconds)
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.clamp(1, 300))
    }

    /// Returns the token wrapped so it cannot leak through `Debug`
    #[must_use]
    pub fn token(&self) -> Option<SecretString> {
        self.token
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(|t| SecretString::from(t.to_string()))
    }

    /// Applies command-line or environment overrides
    #[must_use]
    pub fn with_overrides(mut self, url: Option<String>, token: Option<String>) -> Self {
        if url.is_some() {
            self.url = url;
        }
        if token.is_some() {
            self.token = token;
        }
        self
    }
}

/// Logging settings (`[logging]`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level used when no `-v` flag is given
    #[serde(default)]
    pub level: TracingLevel,
    /// Raw `EnvFilter` directive, overrides `level`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// Write logs to this file instead of stderr
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl LoggingSettings {
    /// Builds a tracing configuration, letting `verbose` raise the level
    #[must_use]
    pub fn tracing_config(&self, verbose: u8) -> TracingConfig {
        let level = TracingLevel::from_verbosity(verbose).unwrap_or(self.level);
        let mut config = TracingConfig::new().with_level(level);
        if let Some(path) = &self.file {
            config = config.with_output(TracingOutput::File(path.clone()));
        }
        match (&self.filter, verbose) {
            (Some(filter), 0) => config.with_filter(filter.clone()),
            _ => config,
        }
    }
}
