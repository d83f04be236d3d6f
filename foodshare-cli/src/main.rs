//! foodshare CLI
//!
//! Command-line interface for loading, browsing, and reporting on surplus
//! food donations.

mod cli_types;
mod commands;
mod error;
mod logging;
mod render;
mod settings;

use clap::Parser;

use cli_types::{AdminAction, Cli, Commands, ConfigAction, ListingAction};
pub(crate) use error::CliError;
use settings::Settings;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let settings = Settings::load()?;

    // Config commands never touch the database.
    if let Commands::Config { action } = &cli.command {
        return match action {
            ConfigAction::Show => commands::config::run_config_show(&settings, cli.db),
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
            ConfigAction::SetDb { path } => commands::config::run_config_set_db(settings, path),
            ConfigAction::SetDataDir { dir } => {
                commands::config::run_config_set_data_dir(settings, dir)
            }
        };
    }

    let db_path = settings.resolve_db_path(cli.db);
    log::debug!("Using database {}", db_path.display());
    let conn = foodshare_db::open_database(&db_path).map_err(|e| {
        CliError::database(format!(
            "Failed to open database at {}: {}",
            db_path.display(),
            e
        ))
    })?;

    match cli.command {
        Commands::Load { data_dir } => {
            let data_dir = settings.resolve_data_dir(data_dir);
            commands::load::run_load(&conn, &data_dir, cli.quiet)
        }
        Commands::Report { report, city, csv } => {
            commands::report::run_report(&conn, report, city, csv)
        }
        Commands::Dashboard => {
            commands::dashboard::run_dashboard(&conn);
            Ok(())
        }
        Commands::Listings {
            filters,
            details,
            csv,
        } => commands::listings::run_listings(&conn, &filters, details, csv),
        Commands::Listing { action } => match action {
            ListingAction::Add {
                id,
                name,
                quantity,
                expiry,
                provider_id,
                provider_type,
                location,
                food_type,
                meal_type,
            } => commands::listing::run_listing_add(
                &conn,
                foodshare_model::NewListing {
                    food_id: id,
                    food_name: name,
                    quantity,
                    expiry_date: expiry,
                    provider_id,
                    provider_type,
                    location,
                    food_type,
                    meal_type,
                },
            ),
            ListingAction::Update { id, quantity } => {
                commands::listing::run_listing_update(&conn, id, quantity)
            }
            ListingAction::Delete { id } => commands::listing::run_listing_delete(&conn, id),
        },
        Commands::Admin { action } => match action {
            AdminAction::Query { sql, csv } => commands::admin::run_admin_query(&conn, &sql, csv),
        },
        Commands::Config { .. } => Ok(()),
    }
}

/// Emit an empty line through the logger.
pub(crate) fn log_blank() {
    log::info!("");
}
