use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use rusqlite::Connection;

use foodshare_db::admin::{AdHocOutcome, AdminSession};

use crate::CliError;
use crate::render::{export_csv, log_table, table_or_empty};

/// Run one operator-supplied SQL statement.
///
/// Errors from the statement itself are reported and shown as an empty
/// result without exporting anything; only a failed CSV export makes the
/// command fail.
pub(crate) fn run_admin_query(
    conn: &Connection,
    sql: &str,
    csv: Option<PathBuf>,
) -> Result<(), CliError> {
    let session = AdminSession::new(conn);

    let table = match session.run_ad_hoc(sql) {
        Ok(AdHocOutcome::Affected(changed)) => {
            log::info!(
                "  {} Statement executed, {} row(s) changed",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                changed,
            );
            if csv.is_some() {
                log::warn!("Statement returned no result set; nothing to export.");
            }
            return Ok(());
        }
        Ok(AdHocOutcome::Rows(table)) => table,
        Err(e) => {
            log_table(&table_or_empty(Err(e), "Query failed", &[]));
            return Ok(());
        }
    };

    log_table(&table);
    if let Some(path) = csv {
        export_csv(&table, &path)?;
    }
    Ok(())
}
