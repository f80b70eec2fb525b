//! Configuration file loading and saving

use std::path::{Path, PathBuf};

use tracing::{debug, info_span};

use crate::error::{ConfigError, ConfigResult};
use crate::tracing::span_names;

use super::settings::AdminSettings;

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "GUACMAN_CONFIG_DIR";

/// Name of the settings file inside the configuration directory
pub const SETTINGS_FILE: &str = "config.toml";

/// Loads and saves `config.toml`
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Creates a manager for the default configuration directory
    ///
    /// Uses `$GUACMAN_CONFIG_DIR` if set, otherwise `guacman` under the
    /// user's configuration directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoConfigDir` if no directory can be determined.
    pub fn new() -> ConfigResult<Self> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
            return Ok(Self::with_config_dir(PathBuf::from(dir)));
        }
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(Self::with_config_dir(base.join("guacman")))
    }

    /// Creates a manager for a specific configuration directory
    #[must_use]
    pub const fn with_config_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    /// Returns the configuration directory
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Returns the path of the settings file
    #[must_use]
    pub fn settings_path(&self) -> PathBuf {
        self.config_dir.join(SETTINGS_FILE)
    }

    /// Loads settings, falling back to defaults if the file does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_settings(&self) -> ConfigResult<AdminSettings> {
        let _span = info_span!(span_names::CONFIG_LOAD).entered();
        let path = self.settings_path();

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No settings file, using defaults");
                return Ok(AdminSettings::default());
            }
            Err(source) => return Err(ConfigError::Io { path, source }),
        };

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("{}: {e}", path.display())))
    }

    /// Writes settings, creating the configuration directory if needed
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn save_settings(&self, settings: &AdminSettings) -> ConfigResult<()> {
        std::fs::create_dir_all(&self.config_dir).map_err(|source| ConfigError::Io {
            path: self.config_dir.clone(),
            source,
        })?;

        let content =
            toml::to_string_pretty(settings).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        let path = self.settings_path();
        std::fs::write(&path, content).map_err(|source| ConfigError::Io { path, source })
    }
}
