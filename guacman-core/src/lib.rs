//! `guacman` Core Library
//!
//! This crate provides the core of `guacman`, an administration client for
//! Guacamole connection groups, users and protocols.
//!
//! # Crate Structure
//!
//! - [`models`] - Data structures (Connection, ConnectionGroup, User, ProtocolDescriptor)
//! - [`api`] - Service traits for the remote API and their HTTP implementation
//! - [`view`] - Admin view coordinator, view state and edit surfaces
//! - [`config`] - Settings file handling
//! - [`tracing`] - Structured logging setup
//! - [`error`] - Error types

// Enable missing_docs warning for public API documentation
#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod tracing;
pub mod view;

pub use api::{
    AdminServices, ConnectionGroupService, HttpAdminClient, ProtocolService, UserService,
};
pub use config::{AdminSettings, ConfigManager, ServerSettings};
pub use error::{
    ApiError, ApiResult, ConfigError, ConfigResult, GuacmanError, GuacmanResult, ViewError,
    ViewResult,
};
pub use models::{
    Connection, ConnectionGroup, ConnectionGroupType, ObjectPermissionType, ProtocolDescriptor,
    ProtocolMap, ROOT_IDENTIFIER, User,
};
pub use view::{
    AdminViewCoordinator, ConnectionEditRequest, ConnectionGroupEditRequest, EditOutcome,
    EditSurface, LoadState, UserEditRequest, ViewState,
};
