//! Edit form commands.
//!
//! Each command opens the matching edit surface, which on the command line
//! prints the prefilled request as JSON.

use guacman_core::{ConnectionGroup, ViewState};
use tracing::debug;

use crate::cli::{FormCommands, GlobalArgs};
use crate::error::CliError;
use crate::util::AdminContext;

/// Form command handler
pub fn cmd_form(global: &GlobalArgs, subcmd: FormCommands) -> Result<(), CliError> {
    let admin = AdminContext::open(global)?;
    admin.activate();
    let state = admin.block_on(admin.view.wait_until_settled())?;

    let committed = match subcmd {
        FormCommands::Connection { id } => {
            let outcome = match id {
                Some(id) => {
                    let connection = require_tree(&state)?
                        .find_connection(&id)
                        .cloned()
                        .ok_or_else(|| CliError::NotFound(format!("connection '{id}'")))?;
                    admin.block_on(admin.view.edit_connection(connection))
                }
                None => admin.block_on(admin.view.new_connection()),
            };
            outcome.is_committed()
        }
        FormCommands::Group { id } => {
            let outcome = match id {
                Some(id) => {
                    let group = require_tree(&state)?
                        .find_group(&id)
                        .cloned()
                        .ok_or_else(|| CliError::NotFound(format!("connection group '{id}'")))?;
                    admin.block_on(admin.view.edit_connection_group(group))
                }
                None => admin.block_on(admin.view.new_connection_group()),
            };
            outcome.is_committed()
        }
        FormCommands::User { username } => {
            if let Some(error) = state.users_state().error() {
                return Err(CliError::LoadFailed(format!("users: {error}")));
            }
            let user = state
                .users()
                .iter()
                .find(|u| u.username == username)
                .cloned()
                .ok_or_else(|| CliError::NotFound(format!("user '{username}'")))?;
            admin.block_on(admin.view.edit_user(user)).is_committed()
        }
    };

    debug!(committed, "Edit form closed");
    Ok(())
}

/// Returns the loaded tree or the reason it is missing
fn require_tree(state: &ViewState) -> Result<&ConnectionGroup, CliError> {
    if let Some(error) = state.connections_state().error() {
        return Err(CliError::LoadFailed(format!("connection groups: {error}")));
    }
    state
        .root_group()
        .ok_or_else(|| CliError::LoadFailed("connection groups".to_string()))
}
