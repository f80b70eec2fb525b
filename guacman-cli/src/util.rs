//! Shared utility functions used across command modules.

use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use guacman_core::config::ConfigManager;
use guacman_core::error::{ApiError, ConfigError};
use guacman_core::tracing::{TracingError, TracingLevel, init_tracing};
use guacman_core::{AdminServices, AdminSettings, AdminViewCoordinator, HttpAdminClient};
use tracing::debug;

use crate::cli::GlobalArgs;
use crate::error::CliError;
use crate::surface::PrintSurface;

/// Creates a `ConfigManager` using the optional custom config directory
/// from CLI args.
pub fn create_config_manager(config_path: Option<&Path>) -> Result<ConfigManager, CliError> {
    match config_path {
        Some(path) => Ok(ConfigManager::with_config_dir(path.to_path_buf())),
        None => ConfigManager::new()
            .map_err(|e| CliError::Config(format!("Failed to initialize config: {e}"))),
    }
}

/// Loads settings and applies `--url` / `--token` overrides
pub fn load_settings(global: &GlobalArgs) -> Result<AdminSettings, CliError> {
    let config_manager = create_config_manager(global.config.as_deref())?;
    let mut settings = config_manager.load_settings()?;
    settings.server = settings
        .server
        .with_overrides(global.url.clone(), global.token.clone());
    Ok(settings)
}

/// Installs the tracing subscriber for this process
///
/// `-v` flags raise the configured level, `-q` lowers it to errors only.
pub fn init_logging(settings: &AdminSettings, global: &GlobalArgs) {
    let mut config = settings.logging.tracing_config(global.verbose);
    if global.quiet {
        config = config.with_level(TracingLevel::Error);
        config.filter = None;
    }
    match init_tracing(&config) {
        Ok(()) | Err(TracingError::AlreadyInitialized) => {}
        Err(e) => {
            if !global.quiet {
                eprintln!("Warning: {e}");
            }
        }
    }
}

/// Builds the HTTP client from the `[server]` settings
pub fn create_client(settings: &AdminSettings) -> Result<HttpAdminClient, CliError> {
    let url = settings
        .server
        .url
        .as_deref()
        .filter(|u| !u.trim().is_empty())
        .ok_or(ConfigError::MissingServerUrl)?;

    HttpAdminClient::new(url, settings.server.token(), settings.server.timeout()).map_err(
        |e| match e {
            ApiError::InvalidUrl(_) => CliError::from(ConfigError::InvalidUrl(url.to_string())),
            other => CliError::from(other),
        },
    )
}

/// An admin view bound to the configured server
///
/// The view is dropped before the runtime so in-flight fetches are aborted
/// while the runtime is still alive.
pub struct AdminContext {
    pub view: AdminViewCoordinator,
    runtime: tokio::runtime::Runtime,
}

impl AdminContext {
    /// Loads settings, installs logging and builds the view
    pub fn open(global: &GlobalArgs) -> Result<Self, CliError> {
        let settings = load_settings(global)?;
        init_logging(&settings, global);

        let client = create_client(&settings)?;
        debug!(base_url = %client.base_url(), "Using administration API");

        let runtime = tokio::runtime::Runtime::new()
            .map_err(|e| CliError::Runtime(format!("Failed to create async runtime: {e}")))?;
        let view = AdminViewCoordinator::new(
            AdminServices::from_client(Arc::new(client)),
            Arc::new(PrintSurface),
        );

        Ok(Self { view, runtime })
    }

    /// Runs a future to completion on the context's runtime
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    /// Activates the view
    ///
    /// The command line has no separate permission source, so the basic
    /// permission signal resolves immediately.
    pub fn activate(&self) {
        let _guard = self.runtime.enter();
        self.view.initialize(std::future::ready(()));
    }
}
