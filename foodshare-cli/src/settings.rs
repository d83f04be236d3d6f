//! User settings (database location, CSV data directory).
//!
//! Stored in `~/.config/foodshare/settings.toml`:
//!
//! ```toml
//! [database]
//! path = "/home/me/foodshare.db"
//!
//! [data]
//! dir = "/home/me/foodshare-data"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::CliError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct Settings {
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub data: DataSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct DatabaseSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct DataSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

/// Canonical path to the settings file: `~/.config/foodshare/settings.toml`.
pub(crate) fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("foodshare").join("settings.toml")
}

/// Database used when neither `--db` nor the settings file names one.
pub(crate) fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("foodshare")
        .join("foodshare.db")
}

impl Settings {
    /// Load from the canonical path. A missing file yields defaults.
    pub(crate) fn load() -> Result<Self, CliError> {
        Self::load_from(&settings_path())
    }

    pub(crate) fn load_from(path: &Path) -> Result<Self, CliError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(CliError::config(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )));
            }
        };
        toml::from_str(&contents)
            .map_err(|e| CliError::config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    pub(crate) fn save(&self) -> Result<(), CliError> {
        self.save_to(&settings_path())
    }

    /// Write atomically via a temp file in the same directory.
    pub(crate) fn save_to(&self, path: &Path) -> Result<(), CliError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let serialized = toml::to_string_pretty(self)
            .map_err(|e| CliError::config(format!("Failed to serialize settings: {}", e)))?;
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, serialized)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Resolve the database path: CLI flag, then settings, then the default.
    pub(crate) fn resolve_db_path(&self, cli_override: Option<PathBuf>) -> PathBuf {
        cli_override
            .or_else(|| self.database.path.clone())
            .unwrap_or_else(default_db_path)
    }

    /// Resolve the CSV directory: CLI flag, then settings, then the working directory.
    pub(crate) fn resolve_data_dir(&self, cli_override: Option<PathBuf>) -> PathBuf {
        cli_override
            .or_else(|| self.data.dir.clone())
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }
}
