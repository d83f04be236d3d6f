//! SQLite schema creation.
//!
//! Foreign keys are declared for documentation but enforcement is switched
//! off on every connection that goes through [`ensure_schema`]: listings and
//! claims may reference rows that no longer exist, and the reports use outer
//! joins to surface exactly those cases. The bundled SQLite enables
//! enforcement by default, so the pragma is always issued.

use std::path::Path;

use foodshare_model::Table;
use rusqlite::Connection;
use thiserror::Error;

/// The database could not be opened or its tables could not be created.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Cannot create database directory {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Create all four tables if they don't exist.
///
/// This is idempotent: safe to call on an existing database. Also turns
/// foreign key enforcement off for `conn`.
pub fn ensure_schema(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch("PRAGMA foreign_keys=OFF;")?;
    for table in Table::ALL {
        conn.execute_batch(create_sql(table))?;
    }
    Ok(())
}

/// Open or create a database at the given path and make sure the schema exists.
pub fn open_database(path: &Path) -> Result<Connection, SchemaError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| SchemaError::Io {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    ensure_schema(&conn)?;
    log::debug!("Opened database at {}", path.display());
    Ok(conn)
}

/// Open an in-memory database with the full schema. Useful for testing.
pub fn open_memory() -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    ensure_schema(&conn)?;
    Ok(conn)
}

/// Drop a table and create it again, empty.
pub fn recreate_table(conn: &Connection, table: Table) -> Result<(), SchemaError> {
    conn.execute_batch(&format!("DROP TABLE IF EXISTS {};", table.name()))?;
    conn.execute_batch(create_sql(table))?;
    Ok(())
}

/// Whether the table is present in the database.
pub fn table_exists(conn: &Connection, table: Table) -> Result<bool, SchemaError> {
    let exists = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1)",
        [table.name()],
        |row| row.get(0),
    )?;
    Ok(exists)
}

fn create_sql(table: Table) -> &'static str {
    match table {
        Table::Providers => PROVIDERS_SQL,
        Table::Receivers => RECEIVERS_SQL,
        Table::FoodListings => FOOD_LISTINGS_SQL,
        Table::Claims => CLAIMS_SQL,
    }
}

const PROVIDERS_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS providers (
    Provider_ID INTEGER PRIMARY KEY,
    Name TEXT NOT NULL,
    Type TEXT NOT NULL,
    Address TEXT NOT NULL,
    City TEXT NOT NULL,
    Contact TEXT NOT NULL
);
"#;

const RECEIVERS_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS receivers (
    Receiver_ID INTEGER PRIMARY KEY,
    Name TEXT NOT NULL,
    Type TEXT NOT NULL,
    City TEXT NOT NULL,
    Contact TEXT NOT NULL
);
"#;

const FOOD_LISTINGS_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS food_listings (
    Food_ID INTEGER PRIMARY KEY,
    Food_Name TEXT NOT NULL,
    Quantity INTEGER NOT NULL CHECK (Quantity >= 0),
    Expiry_Date DATE NOT NULL,
    Provider_ID INTEGER REFERENCES providers (Provider_ID),
    Provider_Type TEXT NOT NULL,
    Location TEXT NOT NULL,
    Food_Type TEXT NOT NULL,
    Meal_Type TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_food_listings_location ON food_listings(Location);
CREATE INDEX IF NOT EXISTS idx_food_listings_provider ON food_listings(Provider_ID);
"#;

const CLAIMS_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS claims (
    Claim_ID INTEGER PRIMARY KEY,
    Food_ID INTEGER REFERENCES food_listings (Food_ID),
    Receiver_ID INTEGER REFERENCES receivers (Receiver_ID),
    Status TEXT NOT NULL,
    Timestamp DATETIME NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_claims_food ON claims(Food_ID);
"#;
