//! Data models exchanged with the administration API
//!
//! Field names follow the Guacamole REST JSON representation (camelCase).

mod connection;
mod group;
mod permission;
mod protocol;
mod user;

pub use connection::Connection;
pub use group::{ConnectionGroup, ConnectionGroupType, ROOT_IDENTIFIER, TreeEntry};
pub use permission::ObjectPermissionType;
pub use protocol::{ParameterOption, ParameterType, ProtocolDescriptor, ProtocolMap, ProtocolParameter};
pub use user::User;
