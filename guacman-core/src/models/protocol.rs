//! Protocol metadata reported by the server.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Protocol descriptors keyed by protocol name
pub type ProtocolMap = BTreeMap<String, ProtocolDescriptor>;

/// Input type of a protocol parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParameterType {
    /// Free text
    #[default]
    Text,
    /// Username field
    Username,
    /// Password field (masked)
    Password,
    /// Numeric field
    Numeric,
    /// Checkbox
    Boolean,
    /// One of a fixed list of options
    Enum,
    /// Multi-line text
    Multiline,
    /// Any type this client does not know about
    #[serde(other)]
    Unknown,
}

/// Selectable option of an enum parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterOption {
    /// Value sent to the server
    pub value: String,
    /// Human readable label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// A single parameter accepted by a protocol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolParameter {
    /// Parameter name as used in connection configurations
    pub name: String,
    /// Human readable label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Input type
    #[serde(default, rename = "type")]
    pub kind: ParameterType,
    /// Default or checked value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Options for enum parameters
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ParameterOption>,
}

/// Metadata describing one supported remote-access protocol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolDescriptor {
    /// Protocol name (e.g. `ssh`, `rdp`, `vnc`)
    pub name: String,
    /// Human readable title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Parameters this protocol accepts
    #[serde(default)]
    pub parameters: Vec<ProtocolParameter>,
}

impl ProtocolDescriptor {
    /// Creates a descriptor without parameters
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            parameters: Vec::new(),
        }
    }

    /// Returns the title, falling back to the protocol name
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }

    /// Looks up a parameter by name
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&ProtocolParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}
