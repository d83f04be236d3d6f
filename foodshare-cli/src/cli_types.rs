//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use foodshare_db::Report;
use foodshare_model::{FoodType, MealType};

#[derive(Parser)]
#[command(name = "foodshare")]
#[command(about = "Track surplus food listings, claims, and donation reports", long_about = None)]
pub(crate) struct Cli {
    /// SQLite database file (defaults to the configured or per-user location)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Which reports to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReportSelection {
    All,
    One(Report),
}

fn parse_report_selection(s: &str) -> Result<ReportSelection, String> {
    if s.trim().eq_ignore_ascii_case("all") {
        return Ok(ReportSelection::All);
    }
    s.parse::<Report>()
        .map(ReportSelection::One)
        .map_err(|e| e.to_string())
}

fn parse_expiry(s: &str) -> Result<NaiveDate, String> {
    foodshare_model::parse_date(s)
        .ok_or_else(|| format!("invalid date '{}', expected YYYY-MM-DD", s))
}

/// Filters for browsing food listings. Repeated or comma-separated values
/// within one flag are alternatives; different flags must all match.
#[derive(Args, Clone, Debug, Default)]
pub(crate) struct ListingFilterArgs {
    /// Listing location(s), e.g. "Springfield,Shelbyville"
    #[arg(long, value_delimiter = ',')]
    pub city: Vec<String>,

    /// Provider type(s), e.g. "Restaurant,Supermarket"
    #[arg(long, value_delimiter = ',')]
    pub provider_type: Vec<String>,

    /// Food type(s): vegetarian, non-vegetarian, vegan
    #[arg(long, value_delimiter = ',')]
    pub food_type: Vec<FoodType>,

    /// Case-insensitive substring of the food name
    #[arg(long)]
    pub search: Option<String>,

    /// A single Food_ID
    #[arg(long)]
    pub id: Option<i64>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Create the schema and reload every table from CSV files
    Load {
        /// Directory holding providers_data.csv, receivers_data.csv,
        /// food_listings_data.csv and claims_data.csv
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Run a named report (or its number 1-15), or "all"
    Report {
        #[arg(value_parser = parse_report_selection)]
        report: ReportSelection,

        /// City for the provider-contacts report
        #[arg(long)]
        city: Option<String>,

        /// Export to a CSV file; with "all", a directory receiving one file per report
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Show key metrics at a glance
    Dashboard,

    /// Browse food listings
    Listings {
        #[command(flatten)]
        filters: ListingFilterArgs,

        /// Show each listing's provider name, contact, and address (implied by --id)
        #[arg(long)]
        details: bool,

        /// Export the listings to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Add, update, or delete a single food listing
    Listing {
        #[command(subcommand)]
        action: ListingAction,
    },

    /// Administrative operations
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },

    /// Manage settings (database path, data directory)
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ListingAction {
    /// Add a new listing
    Add {
        /// Food_ID to use (defaults to the next free id)
        #[arg(long)]
        id: Option<i64>,

        /// Food name
        #[arg(long)]
        name: String,

        /// Quantity (must be positive)
        #[arg(long)]
        quantity: i64,

        /// Expiry date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_expiry)]
        expiry: NaiveDate,

        /// Provider_ID of the donating provider
        #[arg(long)]
        provider_id: i64,

        /// Provider type, e.g. "Restaurant"
        #[arg(long)]
        provider_type: String,

        /// Location (city)
        #[arg(long)]
        location: String,

        /// vegetarian, non-vegetarian, or vegan
        #[arg(long)]
        food_type: FoodType,

        /// breakfast, lunch, dinner, or snacks
        #[arg(long)]
        meal_type: MealType,
    },

    /// Change the quantity of a listing
    Update {
        /// Food_ID of the listing
        id: i64,

        /// New quantity (zero or more)
        #[arg(long)]
        quantity: i64,
    },

    /// Delete a listing (claims referencing it are kept)
    Delete {
        /// Food_ID of the listing
        id: i64,
    },
}

#[derive(Subcommand)]
pub(crate) enum AdminAction {
    /// Run one raw SQL statement against the database (no safeguards)
    Query {
        /// SQL text; only the first statement is executed
        sql: String,

        /// Export a result set to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show current settings and resolved paths
    Show,

    /// Print the settings file path
    Path,

    /// Set the database file used when --db is not given
    SetDb {
        path: PathBuf,
    },

    /// Set the CSV directory used by `load` when --data-dir is not given
    SetDataDir {
        dir: PathBuf,
    },
}
