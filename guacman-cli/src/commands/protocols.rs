//! List protocols command.

use guacman_core::ProtocolMap;

use crate::cli::{DocumentFormat, GlobalArgs};
use crate::error::CliError;
use crate::format::{render_table, to_json};
use crate::util::AdminContext;

/// Protocols command handler
///
/// Protocol metadata does not depend on permissions, so this loads it
/// directly without activating the rest of the view.
pub fn cmd_protocols(global: &GlobalArgs, format: DocumentFormat) -> Result<(), CliError> {
    let admin = AdminContext::open(global)?;
    admin.block_on(admin.view.load_protocols())?;
    let state = admin.view.snapshot();

    match format {
        DocumentFormat::Table => println!("{}", format_table(state.protocols())),
        DocumentFormat::Json => println!("{}", to_json(state.protocols())?),
    }
    Ok(())
}

/// Format protocols as a table string
#[must_use]
pub fn format_table(protocols: &ProtocolMap) -> String {
    if protocols.is_empty() {
        return "No protocols found.".to_string();
    }
    let rows: Vec<Vec<String>> = protocols
        .iter()
        .map(|(name, descriptor)| {
            vec![
                name.clone(),
                descriptor.display_name().to_string(),
                descriptor.parameters.len().to_string(),
            ]
        })
        .collect();
    render_table(&["NAME", "TITLE", "PARAMETERS"], &rows)
}
