//! Remote administration API collaborators
//!
//! The coordinator only sees these traits. [`HttpAdminClient`] implements
//! all of them against the Guacamole REST API; tests substitute in-memory
//! fakes.

mod http;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ApiResult;
use crate::models::{ConnectionGroup, ObjectPermissionType, ProtocolMap, User};

pub use http::{DEFAULT_TIMEOUT_SECS, HttpAdminClient};

/// Fetches permission-filtered connection group trees
#[async_trait]
pub trait ConnectionGroupService: Send + Sync {
    /// Returns the tree rooted at `root_id`, containing only objects the
    /// current user holds `permission` on
    async fn connection_group_tree(
        &self,
        root_id: &str,
        permission: ObjectPermissionType,
    ) -> ApiResult<ConnectionGroup>;
}

/// Lists and creates user accounts
#[async_trait]
pub trait UserService: Send + Sync {
    /// Returns users the current user holds `permission` on, in server order
    async fn users(&self, permission: ObjectPermissionType) -> ApiResult<Vec<User>>;

    /// Creates a user account
    async fn create_user(&self, user: &User) -> ApiResult<()>;
}

/// Fetches protocol metadata
#[async_trait]
pub trait ProtocolService: Send + Sync {
    /// Returns every protocol the server supports
    async fn protocols(&self) -> ApiResult<ProtocolMap>;
}

/// The set of service collaborators an admin view talks to
#[derive(Clone)]
pub struct AdminServices {
    /// Connection group tree fetcher
    pub groups: Arc<dyn ConnectionGroupService>,
    /// User listing and creation
    pub users: Arc<dyn UserService>,
    /// Protocol metadata fetcher
    pub protocols: Arc<dyn ProtocolService>,
}

impl AdminServices {
    /// Uses one client for every service
    #[must_use]
    pub fn from_client<C>(client: Arc<C>) -> Self
    where
        C: ConnectionGroupService + UserService + ProtocolService + 'static,
    {
        Self {
            groups: client.clone(),
            users: client.clone(),
            protocols: client,
        }
    }
}

impl std::fmt::Debug for AdminServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminServices").finish_non_exhaustive()
    }
}
