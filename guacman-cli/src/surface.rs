//! Edit surface for the command line.
//!
//! The CLI cannot host an interactive form. It prints the request the form
//! would be opened with as JSON and reports the edit as cancelled.

use async_trait::async_trait;
use guacman_core::view::{
    ConnectionEditRequest, ConnectionGroupEditRequest, EditOutcome, EditSurface, UserEditRequest,
};
use guacman_core::{Connection, ConnectionGroup, User};
use serde::Serialize;
use tracing::warn;

/// Prints edit requests to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct PrintSurface;

impl PrintSurface {
    fn print<T: Serialize>(request: &T) {
        match serde_json::to_string_pretty(request) {
            Ok(json) => println!("{json}"),
            Err(e) => warn!(error = %e, "Failed to serialize edit request"),
        }
    }
}

#[async_trait]
impl EditSurface for PrintSurface {
    async fn edit_connection(&self, request: ConnectionEditRequest) -> EditOutcome<Connection> {
        Self::print(&request);
        EditOutcome::Cancelled
    }

    async fn edit_connection_group(
        &self,
        request: ConnectionGroupEditRequest,
    ) -> EditOutcome<ConnectionGroup> {
        Self::print(&request);
        EditOutcome::Cancelled
    }

    async fn edit_user(&self, request: UserEditRequest) -> EditOutcome<User> {
        Self::print(&request);
        EditOutcome::Cancelled
    }
}
