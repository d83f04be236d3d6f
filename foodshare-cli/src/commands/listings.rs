use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use rusqlite::Connection;

use foodshare_db::{
    Filter, ResultTable, Value, display_value, distinct_values, get_table, provider_details,
};
use foodshare_model::Table;

use crate::CliError;
use crate::cli_types::ListingFilterArgs;
use crate::render::{export_csv, log_table, table_or_empty};

/// Translate command-line filter flags into browse filters.
pub(crate) fn listing_filters(args: &ListingFilterArgs) -> Vec<Filter> {
    let mut filters = Vec::new();
    if !args.city.is_empty() {
        filters.push(Filter::any_of("Location", args.city.iter().cloned()));
    }
    if !args.provider_type.is_empty() {
        filters.push(Filter::any_of(
            "Provider_Type",
            args.provider_type.iter().cloned(),
        ));
    }
    if !args.food_type.is_empty() {
        filters.push(Filter::any_of(
            "Food_Type",
            args.food_type.iter().map(|t| t.as_str().to_string()),
        ));
    }
    if let Some(search) = &args.search {
        filters.push(Filter::contains("Food_Name", search.clone()));
    }
    if let Some(id) = args.id {
        filters.push(Filter::eq("Food_ID", id));
    }
    filters
}

/// One "Food_ID Food_Name: provider name, contact, address, city" line per listing.
///
/// Listings whose provider is missing say so instead of failing.
pub(crate) fn provider_detail_lines(conn: &Connection, listings: &ResultTable) -> Vec<String> {
    listings
        .records()
        .map(|listing| {
            let food_id = listing.get("Food_ID").map(display_value).unwrap_or_default();
            let food_name = listing.get("Food_Name").map(display_value).unwrap_or_default();
            let provider = match listing.get("Provider_ID") {
                Some(Value::Integer(id)) => match provider_details(conn, *id) {
                    Ok(details) => match details.record(0) {
                        Some(p) => ["Name", "Contact", "Address", "City"]
                            .iter()
                            .map(|c| p.get(c).map(display_value).unwrap_or_default())
                            .collect::<Vec<_>>()
                            .join(", "),
                        None => format!("provider {} not found", id),
                    },
                    Err(e) => {
                        log::warn!("Failed to look up provider {}: {}", id, e);
                        "n/a".to_string()
                    }
                },
                _ => "no provider".to_string(),
            };
            format!("{} {}: {}", food_id, food_name, provider)
        })
        .collect()
}

pub(crate) fn run_listings(
    conn: &Connection,
    args: &ListingFilterArgs,
    details: bool,
    csv: Option<PathBuf>,
) -> Result<(), CliError> {
    let filters = listing_filters(args);
    log::debug!("Listing filters: {:?}", filters);

    let table = table_or_empty(
        get_table(conn, Table::FoodListings, &filters),
        "Browse listings",
        Table::FoodListings.columns(),
    );

    log::info!(
        "{}",
        "Food Listings".if_supports_color(Stdout, |t| t.bold()),
    );
    log_table(&table);

    if (details || args.id.is_some()) && !table.is_empty() {
        crate::log_blank();
        log::info!(
            "{}",
            "Provider details".if_supports_color(Stdout, |t| t.bold()),
        );
        for line in provider_detail_lines(conn, &table) {
            log::info!("  {}", line);
        }
    }

    if table.is_empty() && !filters.is_empty() {
        for (label, column) in [("Locations", "Location"), ("Provider types", "Provider_Type")] {
            match distinct_values(conn, Table::FoodListings, column) {
                Ok(values) if !values.is_empty() => log::info!(
                    "  {} {}",
                    format!("{}:", label).if_supports_color(Stdout, |t| t.dimmed()),
                    values.join(", "),
                ),
                Ok(_) => {}
                Err(e) => log::warn!("Failed to list {}: {}", label.to_lowercase(), e),
            }
        }
    }

    if let Some(path) = csv {
        export_csv(&table, &path)?;
    }
    Ok(())
}
