//! Connection model

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A remote-access connection as reported by the administration API
///
/// `Connection::default()` is the empty record handed to the edit surface
/// when creating a new connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    /// Server-assigned identifier, absent for connections not yet created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// Identifier of the owning connection group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_identifier: Option<String>,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Protocol name (key into the protocol map)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    /// Protocol parameters, only populated when the server sends them
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, String>,
}

impl Connection {
    /// Creates a named connection using the given protocol
    #[must_use]
    pub fn new(name: impl Into<String>, protocol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            protocol: Some(protocol.into()),
            ..Self::default()
        }
    }

    /// Sets the server identifier
    #[must_use]
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Sets the parent group identifier
    #[must_use]
    pub fn with_parent(mut self, parent_identifier: impl Into<String>) -> Self {
        self.parent_identifier = Some(parent_identifier.into());
        self
    }

    /// Returns true if this record has not been created on the server yet
    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.identifier.is_none()
    }
}
