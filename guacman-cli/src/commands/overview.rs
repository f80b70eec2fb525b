//! Admin view overview command.

use guacman_core::{LoadState, ViewState};

use crate::cli::GlobalArgs;
use crate::error::CliError;
use crate::format::render_table;
use crate::util::AdminContext;

/// Overview command handler
pub fn cmd_overview(global: &GlobalArgs) -> Result<(), CliError> {
    let admin = AdminContext::open(global)?;
    admin.activate();
    let state = admin.block_on(admin.view.wait_until_settled())?;

    println!("{}", format_overview(&state));

    let failed = failed_loads(&state);
    if failed.is_empty() {
        Ok(())
    } else {
        Err(CliError::LoadFailed(failed.join(", ")))
    }
}

/// Names of the loads that ended in failure
fn failed_loads(state: &ViewState) -> Vec<&'static str> {
    [
        ("connections", state.connections_state()),
        ("users", state.users_state()),
        ("protocols", state.protocols_state()),
    ]
    .into_iter()
    .filter(|(_, s)| s.is_failed())
    .map(|(name, _)| name)
    .collect()
}

/// Formats one row per load with its state and item count
#[must_use]
pub fn format_overview(state: &ViewState) -> String {
    let tree = state.root_group().map_or_else(String::new, |root| {
        format!(
            "{} connections in {} groups",
            root.connection_count(),
            root.group_count()
        )
    });
    let rows = vec![
        row("Connections", state.connections_state(), tree),
        row(
            "Users",
            state.users_state(),
            count(state.users_state(), state.users().len(), "users"),
        ),
        row(
            "Protocols",
            state.protocols_state(),
            count(state.protocols_state(), state.protocols().len(), "protocols"),
        ),
    ];
    render_table(&["VIEW", "STATE", "ITEMS"], &rows)
}

fn row(name: &str, state: &LoadState, items: String) -> Vec<String> {
    vec![name.to_string(), state.to_string(), items]
}

fn count(state: &LoadState, n: usize, noun: &str) -> String {
    if state.is_loaded() {
        format!("{n} {noun}")
    } else {
        String::new()
    }
}
