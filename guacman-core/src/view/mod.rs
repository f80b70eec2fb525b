//! Administration view
//!
//! This module provides the `AdminViewCoordinator`, which loads connection
//! groups, users and protocols into a typed `ViewState`, and the
//! `EditSurface` trait through which edit dialogs report their outcome.

mod coordinator;
mod state;
mod surface;
mod users;

pub use coordinator::AdminViewCoordinator;
pub use state::{LoadState, ViewState};
pub use surface::{
    ConnectionEditRequest, ConnectionGroupEditRequest, EditOutcome, EditSurface, UserEditRequest,
};
pub use users::{remove_first_by_username, replace_by_username};
