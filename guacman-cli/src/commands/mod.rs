//! Command handler modules for the CLI.

mod completions;
mod form;
mod manpage;
mod overview;
mod protocols;
mod tree;
mod user_add;
mod users;

use crate::cli::{Commands, GlobalArgs};
use crate::error::CliError;

/// Dispatch a CLI command to the appropriate handler.
pub fn dispatch(global: &GlobalArgs, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Overview => overview::cmd_overview(global),
        Commands::Tree { format } => tree::cmd_tree(global, format),
        Commands::Users { format } => users::cmd_users(global, format),
        Commands::Protocols { format } => protocols::cmd_protocols(global, format),
        Commands::UserAdd { username } => user_add::cmd_user_add(global, &username),
        Commands::Form(subcmd) => form::cmd_form(global, subcmd),
        Commands::Completions { shell } => completions::cmd_completions(shell),
        Commands::Manpage => manpage::cmd_manpage(),
    }
}
