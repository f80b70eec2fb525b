//! Connection group tree command.

use std::fmt::Write as _;

use guacman_core::ConnectionGroup;
use guacman_core::models::TreeEntry;

use crate::cli::{DocumentFormat, GlobalArgs};
use crate::error::CliError;
use crate::format::to_json;
use crate::util::AdminContext;

/// Tree command handler
pub fn cmd_tree(global: &GlobalArgs, format: DocumentFormat) -> Result<(), CliError> {
    let admin = AdminContext::open(global)?;
    admin.activate();
    let state = admin.block_on(admin.view.wait_for(|s| !s.is_loading_connections()))?;

    if let Some(error) = state.connections_state().error() {
        return Err(CliError::LoadFailed(format!("connection groups: {error}")));
    }
    let Some(root) = state.root_group() else {
        return Err(CliError::LoadFailed("connection groups".to_string()));
    };

    match format {
        DocumentFormat::Table => println!("{}", format_tree(root)),
        DocumentFormat::Json => println!("{}", to_json(root)?),
    }
    Ok(())
}

/// Formats the tree with two spaces of indentation per level
#[must_use]
pub fn format_tree(root: &ConnectionGroup) -> String {
    let mut output = String::new();
    for entry in root.walk() {
        match entry {
            TreeEntry::Group(group, depth) => {
                let id = group.identifier.as_deref().unwrap_or("-");
                let _ = writeln!(output, "{:indent$}[{}] {id}", "", group.name, indent = depth * 2);
            }
            TreeEntry::Connection(connection, depth) => {
                let id = connection.identifier.as_deref().unwrap_or("-");
                let protocol = connection.protocol.as_deref().unwrap_or("?");
                let _ = writeln!(
                    output,
                    "{:indent$}{} ({protocol}) {id}",
                    "",
                    connection.name,
                    indent = depth * 2
                );
            }
        }
    }
    output.trim_end().to_string()
}
