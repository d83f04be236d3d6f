//! Administrative ad-hoc SQL execution.
//!
//! [`AdminSession`] runs arbitrary operator-supplied SQL with no sandboxing.
//! It is kept apart from the report functions so that callers have to opt in
//! explicitly before raw SQL can reach the database.

use rusqlite::Connection;

use crate::table::{QueryError, ResultTable, collect_statement};

/// Result of an ad-hoc statement.
#[derive(Debug, Clone, PartialEq)]
pub enum AdHocOutcome {
    /// The statement produced a result set.
    Rows(ResultTable),
    /// The statement produced no columns; number of rows it changed.
    Affected(usize),
}

/// Capability to run raw SQL against a connection.
pub struct AdminSession<'conn> {
    conn: &'conn Connection,
}

impl<'conn> AdminSession<'conn> {
    /// Grant administrative access to `conn`.
    ///
    /// Only trusted operators should reach this; statements are executed as given.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Execute a single SQL statement.
    ///
    /// Statements that return columns (SELECT, PRAGMA, `RETURNING` clauses)
    /// yield [`AdHocOutcome::Rows`]; everything else yields the changed-row
    /// count. Only the first statement in `sql` is compiled and run.
    pub fn run_ad_hoc(&self, sql: &str) -> Result<AdHocOutcome, QueryError> {
        let sql = sql.trim();
        log::warn!("Running ad-hoc SQL: {}", sql);

        let mut stmt = self.conn.prepare(sql)?;
        if stmt.column_count() > 0 {
            let table = collect_statement(&mut stmt, &[])?;
            log::debug!("Ad-hoc query returned {} row(s)", table.len());
            Ok(AdHocOutcome::Rows(table))
        } else {
            let changed = stmt.execute([])?;
            log::debug!("Ad-hoc statement changed {} row(s)", changed);
            Ok(AdHocOutcome::Affected(changed))
        }
    }
}
