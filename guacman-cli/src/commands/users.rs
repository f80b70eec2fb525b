//! List users command.

use std::fmt::Write as _;

use guacman_core::User;

use crate::cli::{GlobalArgs, OutputFormat};
use crate::error::CliError;
use crate::format::{escape_csv_field, render_table, to_json};
use crate::util::AdminContext;

/// Users command handler
pub fn cmd_users(global: &GlobalArgs, format: OutputFormat) -> Result<(), CliError> {
    let admin = AdminContext::open(global)?;
    admin.activate();
    let state = admin.block_on(admin.view.wait_for(|s| !s.is_loading_users()))?;

    if let Some(error) = state.users_state().error() {
        return Err(CliError::LoadFailed(format!("users: {error}")));
    }

    let users = state.users();
    match format {
        OutputFormat::Table => println!("{}", format_table(users)),
        OutputFormat::Json => println!("{}", to_json(users)?),
        OutputFormat::Csv => println!("{}", format_csv(users)),
    }
    Ok(())
}

/// Format users as a table string
#[must_use]
pub fn format_table(users: &[User]) -> String {
    if users.is_empty() {
        return "No users found.".to_string();
    }
    let rows: Vec<Vec<String>> = users
        .iter()
        .map(|u| vec![u.username.clone(), last_active(u)])
        .collect();
    render_table(&["USERNAME", "LAST ACTIVE"], &rows)
}

/// Format users as CSV string
#[must_use]
pub fn format_csv(users: &[User]) -> String {
    let mut output = String::from("username,last_active\n");
    for user in users {
        let _ = writeln!(
            output,
            "{},{}",
            escape_csv_field(&user.username),
            last_active(user)
        );
    }
    output.trim_end().to_string()
}

/// Raw `lastActive` value reported by the server, if any
fn last_active(user: &User) -> String {
    user.extra
        .get("lastActive")
        .filter(|v| !v.is_null())
        .map(ToString::to_string)
        .unwrap_or_default()
}
