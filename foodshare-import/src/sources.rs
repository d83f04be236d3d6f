//! Where each table's CSV data comes from.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use foodshare_model::Table;

use crate::loader::LoadError;

/// A tabular CSV source: a file on disk or CSV text already in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Path(PathBuf),
    Inline(String),
}

impl Source {
    /// Read the whole source into memory.
    pub fn read(&self) -> Result<String, LoadError> {
        match self {
            Self::Path(path) => std::fs::read_to_string(path).map_err(|e| LoadError::Io {
                path: path.display().to_string(),
                source: e,
            }),
            Self::Inline(text) => Ok(text.clone()),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Path(path) => path.display().to_string(),
            Self::Inline(_) => "<inline>".to_string(),
        }
    }
}

/// Conventional file name for a table's source inside a data directory.
pub fn source_file_name(table: Table) -> &'static str {
    match table {
        Table::Providers => "providers_data.csv",
        Table::Receivers => "receivers_data.csv",
        Table::FoodListings => "food_listings_data.csv",
        Table::Claims => "claims_data.csv",
    }
}

/// Mapping from each table to its source.
#[derive(Debug, Clone, Default)]
pub struct DataSources {
    sources: BTreeMap<Table, Source>,
}

impl DataSources {
    pub fn new() -> Self {
        Self::default()
    }

    /// All four tables read from their conventional file names in `dir`.
    pub fn from_dir(dir: &Path) -> Self {
        let mut sources = Self::new();
        for table in Table::ALL {
            sources.insert(table, Source::Path(dir.join(source_file_name(table))));
        }
        sources
    }

    pub fn with(mut self, table: Table, source: Source) -> Self {
        self.insert(table, source);
        self
    }

    pub fn insert(&mut self, table: Table, source: Source) {
        self.sources.insert(table, source);
    }

    pub fn get(&self, table: Table) -> Option<&Source> {
        self.sources.get(&table)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Table, &Source)> {
        self.sources.iter().map(|(t, s)| (*t, s))
    }
}
