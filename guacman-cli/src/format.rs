//! Output formatting helpers shared by the list commands.

use serde::Serialize;

use crate::error::CliError;

/// Quotes a CSV field if it contains a separator, quote or line break
#[must_use]
pub fn escape_csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Serializes a value as pretty-printed JSON
///
/// # Errors
///
/// Returns `CliError::Output` if serialization fails.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| CliError::Output(format!("Failed to serialize to JSON: {e}")))
}

/// Renders rows as a left-aligned table with a dashed rule under the header
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .filter_map(|r| r.get(i))
                .map(|c| c.chars().count())
                .max()
                .unwrap_or(0)
                .max(h.len())
        })
        .collect();

    let mut output = Vec::with_capacity(rows.len() + 2);
    output.push(format_row(headers.iter().copied(), &widths));
    output.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in rows {
        output.push(format_row(row.iter().map(String::as_str), &widths));
    }
    output.join("\n")
}

fn format_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}
