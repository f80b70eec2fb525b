//! View state owned by the admin view coordinator

use crate::models::{ConnectionGroup, ProtocolMap, User};

/// Load state of one independently fetched piece of the view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    /// Fetch not yet issued or still in flight
    #[default]
    Loading,
    /// Fetch completed and its data is in the view
    Loaded,
    /// Fetch failed; a retry may be requested
    Failed(String),
}

impl LoadState {
    /// Returns true while the fetch is pending
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns true once data has been loaded
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded)
    }

    /// Returns true if the fetch failed
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Returns the failure message, if any
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

impl std::fmt::Display for LoadState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loading => write!(f, "loading"),
            Self::Loaded => write!(f, "loaded"),
            Self::Failed(message) => write!(f, "failed: {message}"),
        }
    }
}

/// Everything the admin view displays
///
/// A snapshot is handed out by value; only the coordinator mutates the
/// live copy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    connections: LoadState,
    users_state: LoadState,
    protocols_state: LoadState,
    root_group: Option<ConnectionGroup>,
    users: Vec<User>,
    protocols: ProtocolMap,
    new_username: String,
}

impl ViewState {
    /// Creates the state of a freshly activated view
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true until the connection group tree has been fetched
    #[must_use]
    pub const fn is_loading_connections(&self) -> bool {
        self.connections.is_loading()
    }

    /// Returns true until the user list has been fetched
    #[must_use]
    pub const fn is_loading_users(&self) -> bool {
        self.users_state.is_loading()
    }

    /// Load state of the connection group tree
    #[must_use]
    pub const fn connections_state(&self) -> &LoadState {
        &self.connections
    }

    /// Load state of the user list
    #[must_use]
    pub const fn users_state(&self) -> &LoadState {
        &self.users_state
    }

    /// Load state of the protocol metadata
    #[must_use]
    pub const fn protocols_state(&self) -> &LoadState {
        &self.protocols_state
    }

    /// Current connection group tree, if loaded
    #[must_use]
    pub const fn root_group(&self) -> Option<&ConnectionGroup> {
        self.root_group.as_ref()
    }

    /// Users in server response order, followed by locally created users
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Protocol descriptors keyed by name
    #[must_use]
    pub const fn protocols(&self) -> &ProtocolMap {
        &self.protocols
    }

    /// Contents of the "new username" input
    #[must_use]
    pub fn new_username(&self) -> &str {
        &self.new_username
    }

    /// Returns true once neither the tree nor the user list is loading
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        !self.connections.is_loading() && !self.users_state.is_loading()
    }

    /// Returns true once nothing is loading, protocols included
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        self.is_loaded() && !self.protocols_state.is_loading()
    }

    pub(crate) fn set_root_group(&mut self, root_group: ConnectionGroup) {
        self.root_group = Some(root_group);
        self.connections = LoadState::Loaded;
    }

    pub(crate) fn set_connections_state(&mut self, state: LoadState) {
        self.connections = state;
    }

    pub(crate) fn set_users(&mut self, users: Vec<User>) {
        self.users = users;
        self.users_state = LoadState::Loaded;
    }

    pub(crate) fn set_users_state(&mut self, state: LoadState) {
        self.users_state = state;
    }

    pub(crate) fn set_protocols(&mut self, protocols: ProtocolMap) {
        self.protocols = protocols;
        self.protocols_state = LoadState::Loaded;
    }

    pub(crate) fn set_protocols_state(&mut self, state: LoadState) {
        self.protocols_state = state;
    }

    pub(crate) fn users_mut(&mut self) -> &mut Vec<User> {
        &mut self.users
    }

    pub(crate) fn set_new_username(&mut self, username: String) {
        self.new_username = username;
    }

    /// Empties the input and returns what it contained
    pub(crate) fn take_new_username(&mut self) -> String {
        std::mem::take(&mut self.new_username)
    }
}
