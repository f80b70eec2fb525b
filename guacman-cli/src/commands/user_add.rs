//! Create user command.

use tracing::info;

use crate::cli::GlobalArgs;
use crate::error::CliError;
use crate::util::AdminContext;

/// User add command handler
pub fn cmd_user_add(global: &GlobalArgs, username: &str) -> Result<(), CliError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(CliError::InvalidInput("username must not be empty".to_string()));
    }

    let admin = AdminContext::open(global)?;
    admin.activate();
    let created = admin.block_on(async {
        admin.view.wait_until_loaded().await?;
        admin.view.set_new_username(username);
        let created = admin.view.new_user().await?;
        Ok::<_, CliError>(created)
    })?;
    if created.is_none() {
        return Err(CliError::InvalidInput("username must not be empty".to_string()));
    }

    let state = admin.view.snapshot();
    info!(users = state.users().len(), "User list updated");
    if !global.quiet {
        println!("Created user '{username}'");
    }
    Ok(())
}
