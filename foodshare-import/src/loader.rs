//! Full refresh of the four tables from CSV sources.
//!
//! Each table's source is read completely and deserialized into typed
//! records before the database is touched. The table is then dropped,
//! recreated, and bulk inserted inside a savepoint of one run-wide
//! transaction, so a table that fails keeps its previous contents while the
//! others still load.

use foodshare_db::schema::{self, SchemaError};
use foodshare_model::{
    Claim, FoodListing, Provider, Receiver, Table, format_date, format_timestamp,
};
use rusqlite::{Connection, Transaction, params};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::progress::LoadProgress;
use crate::sources::DataSources;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("No source configured for table {0}")]
    MissingSource(Table),
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("{0}: source has no header row")]
    NoHeader(Table),
    #[error("{table}: missing column(s): {columns}")]
    MissingColumns { table: Table, columns: String },
    #[error("{table}: row {row}: {source}")]
    Row {
        table: Table,
        row: u64,
        source: csv::Error,
    },
    #[error("{table}: row {row}: Quantity must not be negative (got {quantity})")]
    NegativeQuantity { table: Table, row: u64, quantity: i64 },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Outcome of loading one table.
#[derive(Debug)]
pub struct TableLoad {
    pub table: Table,
    /// Rows inserted, or why the table was skipped.
    pub result: Result<usize, LoadError>,
}

/// Per-table results of a [`load_all`] run.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub tables: Vec<TableLoad>,
}

impl LoadReport {
    /// Rows loaded into `table`, if it loaded.
    pub fn rows(&self, table: Table) -> Option<usize> {
        self.tables
            .iter()
            .find(|t| t.table == table)
            .and_then(|t| t.result.as_ref().ok().copied())
    }

    pub fn total_rows(&self) -> usize {
        self.tables
            .iter()
            .filter_map(|t| t.result.as_ref().ok())
            .sum()
    }

    pub fn failures(&self) -> impl Iterator<Item = (Table, &LoadError)> {
        self.tables
            .iter()
            .filter_map(|t| t.result.as_ref().err().map(|e| (t.table, e)))
    }

    /// Whether every table loaded.
    pub fn is_complete(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Typed rows for one table.
#[derive(Debug)]
enum Records {
    Providers(Vec<Provider>),
    Receivers(Vec<Receiver>),
    FoodListings(Vec<FoodListing>),
    Claims(Vec<Claim>),
}

impl Records {
    fn len(&self) -> usize {
        match self {
            Self::Providers(r) => r.len(),
            Self::Receivers(r) => r.len(),
            Self::FoodListings(r) => r.len(),
            Self::Claims(r) => r.len(),
        }
    }
}

/// Replace the contents of every table with its source's rows.
///
/// Makes sure the schema exists first. Per-table failures are collected in
/// the returned [`LoadReport`]; `Err` means the run as a whole could not
/// start or commit.
pub fn load_all(
    conn: &Connection,
    sources: &DataSources,
    progress: Option<&dyn LoadProgress>,
) -> Result<LoadReport, LoadError> {
    schema::ensure_schema(conn)?;

    let mut report = LoadReport::default();
    let mut tx = conn.unchecked_transaction()?;

    for (i, table) in Table::ALL.into_iter().enumerate() {
        if let Some(p) = progress {
            p.on_table(table, i + 1, Table::ALL.len());
        }

        let result = load_table(&mut tx, table, sources, progress);
        match &result {
            Ok(rows) => log::debug!("Loaded {} rows into {}", rows, table),
            Err(e) => log::warn!("Skipped {}: {}", table, e),
        }
        report.tables.push(TableLoad { table, result });
    }

    tx.commit()?;

    if let Some(p) = progress {
        p.on_complete(&format!(
            "Loaded {} rows into {} of {} tables",
            report.total_rows(),
            report.tables.iter().filter(|t| t.result.is_ok()).count(),
            report.tables.len(),
        ));
    }

    Ok(report)
}

fn load_table(
    tx: &mut Transaction<'_>,
    table: Table,
    sources: &DataSources,
    progress: Option<&dyn LoadProgress>,
) -> Result<usize, LoadError> {
    let source = sources.get(table).ok_or(LoadError::MissingSource(table))?;
    let text = source.read()?;
    let records = parse_table(table, &text)?;

    let sp = tx.savepoint()?;
    schema::recreate_table(&sp, table)?;
    let inserted = insert_records(&sp, table, &records, progress)?;
    sp.commit()?;

    Ok(inserted)
}

/// Parse a table's CSV text into typed records.
fn parse_table(table: Table, text: &str) -> Result<Records, LoadError> {
    let records = match table {
        Table::Providers => Records::Providers(parse_records(table, text)?),
        Table::Receivers => Records::Receivers(parse_records(table, text)?),
        Table::FoodListings => {
            let listings: Vec<FoodListing> = parse_records(table, text)?;
            if let Some((i, listing)) = listings.iter().enumerate().find(|(_, l)| l.quantity < 0) {
                return Err(LoadError::NegativeQuantity {
                    table,
                    row: i as u64 + 1,
                    quantity: listing.quantity,
                });
            }
            Records::FoodListings(listings)
        }
        Table::Claims => Records::Claims(parse_records(table, text)?),
    };
    Ok(records)
}

/// Read every row of `text`, requiring a header row with all of `table`'s columns.
///
/// Extra columns are ignored. Any malformed row fails the whole table.
pub fn parse_records<T: DeserializeOwned>(table: Table, text: &str) -> Result<Vec<T>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(LoadError::NoHeader(table));
    }
    let missing: Vec<&str> = table
        .columns()
        .iter()
        .copied()
        .filter(|c| !headers.iter().any(|h| h == *c))
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns {
            table,
            columns: missing.join(", "),
        });
    }

    reader
        .deserialize()
        .enumerate()
        .map(|(i, row)| {
            row.map_err(|e| LoadError::Row {
                table,
                row: i as u64 + 1,
                source: e,
            })
        })
        .collect()
}

fn insert_records(
    conn: &Connection,
    table: Table,
    records: &Records,
    progress: Option<&dyn LoadProgress>,
) -> Result<usize, LoadError> {
    let total = records.len();
    let report = |loaded: usize| {
        if let Some(p) = progress {
            p.on_rows(table, loaded, total);
        }
    };

    match records {
        Records::Providers(rows) => {
            let mut stmt = conn.prepare(
                "INSERT INTO providers (Provider_ID, Name, Type, Address, City, Contact)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for (i, p) in rows.iter().enumerate() {
                stmt.execute(params![
                    p.provider_id,
                    p.name,
                    p.provider_type,
                    p.address,
                    p.city,
                    p.contact,
                ])?;
                report(i + 1);
            }
        }
        Records::Receivers(rows) => {
            let mut stmt = conn.prepare(
                "INSERT INTO receivers (Receiver_ID, Name, Type, City, Contact)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for (i, r) in rows.iter().enumerate() {
                stmt.execute(params![
                    r.receiver_id,
                    r.name,
                    r.receiver_type,
                    r.city,
                    r.contact,
                ])?;
                report(i + 1);
            }
        }
        Records::FoodListings(rows) => {
            let mut stmt = conn.prepare(
                "INSERT INTO food_listings (Food_ID, Food_Name, Quantity, Expiry_Date, Provider_ID,
                     Provider_Type, Location, Food_Type, Meal_Type)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;
            for (i, l) in rows.iter().enumerate() {
                stmt.execute(params![
                    l.food_id,
                    l.food_name,
                    l.quantity,
                    format_date(l.expiry_date),
                    l.provider_id,
                    l.provider_type,
                    l.location,
                    l.food_type.as_str(),
                    l.meal_type.as_str(),
                ])?;
                report(i + 1);
            }
        }
        Records::Claims(rows) => {
            let mut stmt = conn.prepare(
                "INSERT INTO claims (Claim_ID, Food_ID, Receiver_ID, Status, Timestamp)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for (i, c) in rows.iter().enumerate() {
                stmt.execute(params![
                    c.claim_id,
                    c.food_id,
                    c.receiver_id,
                    c.status.as_str(),
                    format_timestamp(c.timestamp),
                ])?;
                report(i + 1);
            }
        }
    }

    Ok(total)
}
