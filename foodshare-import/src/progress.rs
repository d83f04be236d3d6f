//! Load progress reporting.

use foodshare_model::Table;

/// Trait for receiving load progress updates.
pub trait LoadProgress {
    /// Called when a table starts loading. `current` is 1-based.
    fn on_table(&self, table: Table, current: usize, total: usize);

    /// Called after each row is inserted.
    fn on_rows(&self, table: Table, loaded: usize, total: usize);

    /// Called when the whole load is complete.
    fn on_complete(&self, message: &str);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl LoadProgress for SilentProgress {
    fn on_table(&self, _table: Table, _current: usize, _total: usize) {}
    fn on_rows(&self, _table: Table, _loaded: usize, _total: usize) {}
    fn on_complete(&self, _message: &str) {}
}

/// A progress reporter that logs to the `log` crate.
pub struct LogProgress;

impl LoadProgress for LogProgress {
    fn on_table(&self, table: Table, current: usize, total: usize) {
        log::info!("[{}/{}] Loading {}", current, total, table);
    }

    fn on_rows(&self, table: Table, loaded: usize, total: usize) {
        if loaded.is_multiple_of(500) || loaded == total {
            log::info!("  {} [{}/{}]", table, loaded, total);
        }
    }

    fn on_complete(&self, message: &str) {
        log::info!("{}", message);
    }
}
