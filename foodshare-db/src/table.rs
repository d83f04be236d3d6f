//! Generic tabular query results and CSV export.
//!
//! Reports, table browsing, and ad-hoc queries all return a [`ResultTable`]:
//! the declared output columns plus rows of SQLite values.

use std::io;

use rusqlite::types::ToSql;
use rusqlite::{Connection, Statement};
use thiserror::Error;

pub use rusqlite::types::Value;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Unknown column '{column}' in table {table}")]
    UnknownColumn { table: String, column: String },
}

/// An ordered result set: column names plus rows of values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

/// A single row viewed as a column-name → value mapping.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    columns: &'a [String],
    values: &'a [Value],
}

impl<'a> Record<'a> {
    pub fn get(&self, column: &str) -> Option<&'a Value> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.values.get(idx)
    }
}

impl ResultTable {
    /// A table with columns but no rows.
    pub fn with_columns(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Look up a cell by row index and column name.
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)
    }

    /// The first cell of the first row, for single-metric queries.
    pub fn scalar(&self) -> Option<&Value> {
        self.rows.first()?.first()
    }

    pub fn record(&self, row: usize) -> Option<Record<'_>> {
        self.rows.get(row).map(|values| Record {
            columns: &self.columns,
            values,
        })
    }

    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().map(|values| Record {
            columns: &self.columns,
            values,
        })
    }

    /// Write the table as CSV: header row first, columns in declared order.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(&self.columns)?;
        for row in &self.rows {
            wtr.write_record(row.iter().map(display_value))?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn to_csv_string(&self) -> Result<String, csv::Error> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

/// Render a value the way it appears in CSV output and terminal tables.
///
/// NULL is empty, whole reals keep one decimal place ("75.0").
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => {
            format!("{:.1}", f)
        }
        Value::Real(f) => f.to_string(),
        Value::Text(s) => s.clone(),
        Value::Blob(b) => format!("<{} bytes>", b.len()),
    }
}

/// Numeric view of a value, for aggregate assertions and metrics.
pub fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Integer(i) => Some(*i as f64),
        Value::Real(f) => Some(*f),
        Value::Text(s) => s.trim().parse().ok(),
        Value::Null | Value::Blob(_) => None,
    }
}

/// Run a prepared statement and collect every row.
pub(crate) fn collect_statement(
    stmt: &mut Statement<'_>,
    params: &[&dyn ToSql],
) -> Result<ResultTable, QueryError> {
    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let width = columns.len();
    let rows = stmt.query_map(params, |row| {
        (0..width)
            .map(|i| row.get::<_, Value>(i))
            .collect::<Result<Vec<_>, _>>()
    })?;
    let rows = rows.collect::<Result<Vec<_>, _>>()?;
    Ok(ResultTable { columns, rows })
}

/// Prepare `sql`, bind `params`, and collect the result.
pub(crate) fn query_table(
    conn: &Connection,
    sql: &str,
    params: &[&dyn ToSql],
) -> Result<ResultTable, QueryError> {
    let mut stmt = conn.prepare(sql)?;
    collect_statement(&mut stmt, params)
}
