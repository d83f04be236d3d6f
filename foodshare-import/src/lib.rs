//! Load CSV sources into the food donation database.
//!
//! This crate owns the wholesale refresh: reading the four source files,
//! validating and typing their rows, and replacing each table's contents.

pub mod loader;
pub mod progress;
pub mod sources;

pub use loader::{LoadError, LoadReport, TableLoad, load_all, parse_records};
pub use progress::{LoadProgress, LogProgress, SilentProgress};
pub use sources::{DataSources, Source, source_file_name};
