//! Object permission types used to filter API listings

use serde::{Deserialize, Serialize};

/// Permission a user may hold on a single object
///
/// Listings filtered by a permission type only contain objects the current
/// user holds that permission on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ObjectPermissionType {
    /// May see the object
    Read,
    /// May modify the object
    Update,
    /// May delete the object
    Delete,
    /// May grant permissions on the object to others
    Administer,
}

impl ObjectPermissionType {
    /// Returns the value used in the `permission` query parameter
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "READ",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Administer => "ADMINISTER",
        }
    }
}

impl std::fmt::Display for ObjectPermissionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
