//! Food donation data model: record types, table layouts, and date parsing.
//!
//! This crate defines the persistent data model without any database
//! dependencies. `foodshare-db` persists these types and `foodshare-import`
//! reads them from CSV sources.

pub mod dates;
pub mod table;
pub mod types;

pub use dates::{format_date, format_timestamp, parse_date, parse_timestamp};
pub use table::Table;
pub use types::*;
