use std::io::IsTerminal;
use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use rusqlite::Connection;

use foodshare_import::{DataSources, LoadProgress, LogProgress, SilentProgress, load_all};
use foodshare_model::Table;

use crate::CliError;

/// Reload every table from the CSV files in `data_dir`.
pub(crate) fn run_load(conn: &Connection, data_dir: &Path, quiet: bool) -> Result<(), CliError> {
    if !data_dir.is_dir() {
        return Err(CliError::other(format!(
            "Data directory not found: {}",
            data_dir.display()
        )));
    }

    log::info!(
        "{}",
        format!("Loading CSV data from {}", data_dir.display())
            .if_supports_color(Stdout, |t| t.bold()),
    );

    let sources = DataSources::from_dir(data_dir);
    for (table, source) in sources.iter() {
        log::debug!("  {} <- {}", table, source.describe());
    }

    let mode = ProgressMode::choose(quiet, std::io::stdout().is_terminal());
    let progress = mode.reporter();
    let report = load_all(conn, &sources, Some(progress.as_ref()))
        .map_err(|e| CliError::database(format!("Load failed: {}", e)))?;

    crate::log_blank();
    for entry in &report.tables {
        match &entry.result {
            Ok(rows) => log::info!(
                "  {} {:<14} {:>8} rows",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                entry.table.name(),
                rows,
            ),
            Err(e) => log::warn!(
                "  {} {:<14} skipped: {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                entry.table.name(),
                e,
            ),
        }
    }

    if !report.is_complete() {
        crate::log_blank();
        log::warn!("Skipped tables keep their previous contents.");
    }

    Ok(())
}

/// How load progress is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProgressMode {
    /// Nothing until the per-table summary.
    Silent,
    /// An `indicatif` bar on an interactive terminal.
    Bar,
    /// Periodic log lines, for redirected output and log files.
    Log,
}

impl ProgressMode {
    fn choose(quiet: bool, interactive: bool) -> Self {
        if quiet {
            Self::Silent
        } else if interactive {
            Self::Bar
        } else {
            Self::Log
        }
    }

    fn reporter(self) -> Box<dyn LoadProgress> {
        match self {
            Self::Silent => Box::new(SilentProgress),
            Self::Bar => Box::new(CliLoadProgress::new()),
            Self::Log => Box::new(LogProgress),
        }
    }
}

/// Progress bar over the rows of the table being loaded.
struct CliLoadProgress {
    bar: ProgressBar,
}

impl CliLoadProgress {
    fn new() -> Self {
        let bar = ProgressBar::new(0);
        if let Ok(style) =
            ProgressStyle::with_template("  {prefix:<14} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
        {
            bar.set_style(style.progress_chars("=> "));
        }
        Self { bar }
    }
}

impl LoadProgress for CliLoadProgress {
    fn on_table(&self, table: Table, current: usize, total: usize) {
        self.bar.reset();
        self.bar.set_length(0);
        self.bar.set_prefix(table.name());
        self.bar.set_message(format!("({}/{})", current, total));
    }

    fn on_rows(&self, _table: Table, loaded: usize, total: usize) {
        if self.bar.length() != Some(total as u64) {
            self.bar.set_length(total as u64);
        }
        self.bar.set_position(loaded as u64);
    }

    fn on_complete(&self, message: &str) {
        self.bar.finish_and_clear();
        log::info!("{}", message);
    }
}
