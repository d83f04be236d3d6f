//! Logger setup: `env_logger` writing message-only lines to stdout, with an
//! optional plain-text copy in a log file.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use log::LevelFilter;

use crate::CliError;

/// Level implied by the global `--quiet` / `--verbose` flags.
pub(crate) fn level_for(quiet: bool, verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    }
}

/// Install the global logger. `RUST_LOG` overrides the flag-derived level.
pub(crate) fn init(quiet: bool, verbose: bool, logfile: Option<&Path>) -> Result<(), CliError> {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level_for(quiet, verbose));
    builder.parse_default_env();

    if verbose {
        builder.format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        });
    } else {
        builder.format(|buf, record| writeln!(buf, "{}", record.args()));
    }

    let target: Box<dyn Write + Send> = match logfile {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                CliError::other(format!("Failed to create log file {}: {}", path.display(), e))
            })?;
            Box::new(Tee {
                file: strip_ansi_escapes::Writer::new(file),
            })
        }
        None => Box::new(io::stdout()),
    };
    builder.target(env_logger::Target::Pipe(target));

    builder
        .try_init()
        .map_err(|e| CliError::other(format!("Failed to initialise logging: {}", e)))
}

/// Writes everything to stdout and an ANSI-stripped copy to a file.
struct Tee {
    file: strip_ansi_escapes::Writer<File>,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stdout().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()?;
        self.file.flush()
    }
}
