use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use rusqlite::Connection;

use foodshare_db::{Report, ReportParams, ResultTable};

use crate::CliError;
use crate::cli_types::ReportSelection;
use crate::render::{export_csv, log_table, table_or_empty};

pub(crate) fn run_report(
    conn: &Connection,
    selection: ReportSelection,
    city: Option<String>,
    csv: Option<PathBuf>,
) -> Result<(), CliError> {
    let params = ReportParams { city, today: None };

    match selection {
        ReportSelection::One(report) => {
            let table = run_one(conn, report, &params);
            if let Some(path) = csv {
                export_csv(&table, &path)?;
            }
        }
        ReportSelection::All => {
            if let Some(dir) = &csv {
                std::fs::create_dir_all(dir)?;
            }
            for report in Report::ALL {
                let table = run_one(conn, report, &params);
                if let Some(dir) = &csv {
                    export_csv(&table, &report_csv_path(dir, report))?;
                }
                crate::log_blank();
            }
        }
    }

    Ok(())
}

/// Run and print one report. Failures render as an empty table.
fn run_one(conn: &Connection, report: Report, params: &ReportParams) -> ResultTable {
    log::info!(
        "{} {}",
        format!("{:>2}.", report.number()).if_supports_color(Stdout, |t| t.dimmed()),
        report.title().if_supports_color(Stdout, |t| t.bold()),
    );
    if report.needs_city() && params.city.is_none() {
        log::info!(
            "    {}",
            "(pass --city to choose a city)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    let table = table_or_empty(report.run(conn, params), report.title(), &[]);
    log_table(&table);
    table
}

/// File name for one report when exporting all of them: `07-city-with-most-listings.csv`.
fn report_csv_path(dir: &Path, report: Report) -> PathBuf {
    dir.join(format!("{:02}-{}.csv", report.number(), report.name()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_names_sort_in_catalog_order() {
        let dir = Path::new("out");
        assert_eq!(
            report_csv_path(dir, Report::ProvidersReceiversPerCity),
            dir.join("01-providers-receivers-per-city.csv")
        );
        assert_eq!(
            report_csv_path(dir, Report::ListingsByExpiry),
            dir.join("15-listings-by-expiry.csv")
        );
    }
}
