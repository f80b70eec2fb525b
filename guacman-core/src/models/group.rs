//! Connection group tree model

use serde::{Deserialize, Serialize};

use super::Connection;

/// Identifier of the root connection group
pub const ROOT_IDENTIFIER: &str = "ROOT";

/// Kind of connection group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConnectionGroupType {
    /// Plain folder of connections
    #[default]
    Organizational,
    /// Group whose connections are load-balanced as one target
    Balancing,
}

impl std::fmt::Display for ConnectionGroupType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Organizational => write!(f, "organizational"),
            Self::Balancing => write!(f, "balancing"),
        }
    }
}

/// A connection group together with its children
///
/// The tree is owned by the remote service. The coordinator only ever
/// replaces it as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionGroup {
    /// Server-assigned identifier, absent for groups not yet created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// Identifier of the parent group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_identifier: Option<String>,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Group kind
    #[serde(default, rename = "type")]
    pub group_type: ConnectionGroupType,
    /// Connections directly inside this group
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub child_connections: Vec<Connection>,
    /// Groups directly inside this group
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub child_connection_groups: Vec<ConnectionGroup>,
}

/// One node visited by [`ConnectionGroup::walk`]
#[derive(Debug, Clone, Copy)]
pub enum TreeEntry<'a> {
    /// A group and its depth below the walk start
    Group(&'a ConnectionGroup, usize),
    /// A connection and its depth below the walk start
    Connection(&'a Connection, usize),
}

impl ConnectionGroup {
    /// Creates a named organizational group
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Creates an empty root group
    #[must_use]
    pub fn root() -> Self {
        Self {
            identifier: Some(ROOT_IDENTIFIER.to_string()),
            name: ROOT_IDENTIFIER.to_string(),
            ..Self::default()
        }
    }

    /// Sets the server identifier
    #[must_use]
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Adds a child connection, setting its parent identifier
    #[must_use]
    pub fn with_connection(mut self, mut connection: Connection) -> Self {
        connection.parent_identifier = self.identifier.clone();
        self.child_connections.push(connection);
        self
    }

    /// Adds a child group, setting its parent identifier
    #[must_use]
    pub fn with_group(mut self, mut group: Self) -> Self {
        group.parent_identifier = self.identifier.clone();
        self.child_connection_groups.push(group);
        self
    }

    /// Returns true if this is the root group
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.identifier.as_deref() == Some(ROOT_IDENTIFIER)
    }

    /// Visits this group and everything below it depth-first
    ///
    /// Within a group, child groups come before child connections, matching
    /// the order an admin tree view shows them.
    pub fn walk(&self) -> Vec<TreeEntry<'_>> {
        let mut entries = Vec::new();
        self.walk_into(0, &mut entries);
        entries
    }

    fn walk_into<'a>(&'a self, depth: usize, entries: &mut Vec<TreeEntry<'a>>) {
        entries.push(TreeEntry::Group(self, depth));
        for group in &self.child_connection_groups {
            group.walk_into(depth + 1, entries);
        }
        for connection in &self.child_connections {
            entries.push(TreeEntry::Connection(connection, depth + 1));
        }
    }

    /// Finds a connection anywhere below this group
    #[must_use]
    pub fn find_connection(&self, identifier: &str) -> Option<&Connection> {
        self.child_connections
            .iter()
            .find(|c| c.identifier.as_deref() == Some(identifier))
            .or_else(|| {
                self.child_connection_groups
                    .iter()
                    .find_map(|g| g.find_connection(identifier))
            })
    }

    /// Finds a group by identifier, including this group itself
    #[must_use]
    pub fn find_group(&self, identifier: &str) -> Option<&Self> {
        if self.identifier.as_deref() == Some(identifier) {
            return Some(self);
        }
        self.child_connection_groups
            .iter()
            .find_map(|g| g.find_group(identifier))
    }

    /// Counts all connections below this group
    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.child_connections.len()
            + self
                .child_connection_groups
                .iter()
                .map(Self::connection_count)
                .sum::<usize>()
    }

    /// Counts all groups below this group, excluding itself
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.child_connection_groups
            .iter()
            .map(|g| 1 + g.group_count())
            .sum()
    }
}
