//! Terminal rendering of result tables.

use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use foodshare_db::{QueryError, ResultTable, display_value};

use crate::CliError;

/// Widest a single cell may render before it is truncated.
const MAX_CELL_WIDTH: usize = 40;

/// Truncate a string to at most `max` characters, appending "..." if needed.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let head: String = s.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max).collect()
    }
}

/// Lay out `table` as aligned text: header line, rule, then one line per row.
pub(crate) fn format_table(table: &ResultTable) -> Vec<String> {
    let cells: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|v| truncate_str(&display_value(v), MAX_CELL_WIDTH))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |values: &[String]| -> String {
        values
            .iter()
            .zip(&widths)
            .map(|(v, w)| format!("{:<w$}", v, w = *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(cells.len() + 2);
    lines.push(line(&table.columns));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    lines.extend(cells.iter().map(|row| line(row)));
    lines
}

/// Print `table` through the logger.
pub(crate) fn log_table(table: &ResultTable) {
    if table.columns.is_empty() {
        log::info!("{}", "(no columns)".if_supports_color(Stdout, |t| t.dimmed()));
        return;
    }

    let mut lines = format_table(table).into_iter();
    if let Some(header) = lines.next() {
        log::info!("  {}", header.if_supports_color(Stdout, |t| t.bold()));
    }
    for line in lines {
        log::info!("  {}", line);
    }
    let noun = if table.len() == 1 { "row" } else { "rows" };
    log::info!(
        "  {}",
        format!("({} {})", table.len(), noun).if_supports_color(Stdout, |t| t.dimmed()),
    );
}

/// Unwrap a query result for display.
///
/// A failed query is reported and replaced by an empty table with
/// `fallback_columns`, so one bad report does not abort the command.
pub(crate) fn table_or_empty(
    result: Result<ResultTable, QueryError>,
    what: &str,
    fallback_columns: &[&str],
) -> ResultTable {
    match result {
        Ok(table) => table,
        Err(e) => {
            log::error!(
                "  {} {}: {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                what,
                e,
            );
            ResultTable::with_columns(fallback_columns)
        }
    }
}

/// Export `table` to a CSV file.
pub(crate) fn export_csv(table: &ResultTable, path: &Path) -> Result<(), CliError> {
    let file = std::fs::File::create(path).map_err(|e| {
        CliError::other(format!("Failed to create {}: {}", path.display(), e))
    })?;
    table.write_csv(file)?;
    log::info!(
        "  {} Wrote {} row(s) to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        table.len(),
        path.display(),
    );
    Ok(())
}
