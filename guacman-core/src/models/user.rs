//! User model

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A user account visible to the current administrator
///
/// Only `username` is interpreted locally. Everything else the server sends
/// is kept in `extra` so records round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Login name, unique within the visible user set
    pub username: String,
    /// Server-populated fields
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl User {
    /// Creates the minimal record used when creating a user
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            extra: BTreeMap::new(),
        }
    }

    /// Returns true if both records refer to the same account
    #[must_use]
    pub fn same_account(&self, other: &Self) -> bool {
        self.username == other.username
    }
}
