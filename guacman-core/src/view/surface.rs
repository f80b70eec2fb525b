//! Edit surface collaborators
//!
//! An edit surface presents a form for one object and reports back what the
//! user did with it. The coordinator consumes the returned [`EditOutcome`]
//! instead of handing mutator callbacks to the surface.

use async_trait::async_trait;
use serde::Serialize;

use crate::models::{Connection, ConnectionGroup, ProtocolMap, User};

/// What the user did with an edit surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome<T> {
    /// Closed without changes
    Cancelled,
    /// Changes were committed to the server
    Saved(T),
    /// The object was deleted on the server
    Deleted(T),
}

impl<T> EditOutcome<T> {
    /// Returns true if the server-side object changed
    #[must_use]
    pub const fn is_committed(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}

/// Data handed to the connection edit surface
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionEditRequest {
    /// Connection to edit, or `Connection::default()` for a new one
    pub connection: Connection,
    /// Protocols available for the connection
    pub protocols: ProtocolMap,
    /// Tree used to choose the parent group
    pub root_group: Option<ConnectionGroup>,
}

/// Data handed to the connection group edit surface
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionGroupEditRequest {
    /// Group to edit, or `ConnectionGroup::default()` for a new one
    pub connection_group: ConnectionGroup,
    /// Tree used to choose the parent group
    pub root_group: Option<ConnectionGroup>,
}

/// Data handed to the user edit surface
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEditRequest {
    /// User to edit
    pub user: User,
    /// Tree used to grant connection permissions
    pub root_group: Option<ConnectionGroup>,
}

/// External edit surfaces (modal dialogs, forms, prompts)
///
/// Presentation and commit/cancel semantics belong to the implementor.
#[async_trait]
pub trait EditSurface: Send + Sync {
    /// Presents the connection editor
    async fn edit_connection(&self, request: ConnectionEditRequest) -> EditOutcome<Connection>;

    /// Presents the connection group editor
    async fn edit_connection_group(
        &self,
        request: ConnectionGroupEditRequest,
    ) -> EditOutcome<ConnectionGroup>;

    /// Presents the user editor
    async fn edit_user(&self, request: UserEditRequest) -> EditOutcome<User>;
}
