//! Configuration management for `guacman`
//!
//! This module provides the `ConfigManager` for loading and saving the
//! TOML settings file.

mod manager;
mod settings;

pub use manager::{CONFIG_DIR_ENV, ConfigManager, SETTINGS_FILE};
pub use settings::{AdminSettings, LoggingSettings, ServerSettings};
