use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use rusqlite::Connection;

use foodshare_db::reports::{leader, metric};
use foodshare_db::{QueryError, ResultTable, row_count};
use foodshare_model::Table;

/// Print the headline metrics. Any metric that fails to compute shows as "n/a".
pub(crate) fn run_dashboard(conn: &Connection) {
    log::info!(
        "{}",
        "Food Donation Dashboard".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    let total_food = number(foodshare_db::total_food_available(conn));
    log::info!("  Total food available:   {:>10}", total_food);

    for (label, table) in [
        ("Providers:", Table::Providers),
        ("Receivers:", Table::Receivers),
        ("Food listings:", Table::FoodListings),
        ("Claims:", Table::Claims),
    ] {
        let count = match row_count(conn, table) {
            Ok(n) => n.to_string(),
            Err(e) => na(&e),
        };
        log::info!("  {:<23} {:>10}", label, count);
    }

    crate::log_blank();
    log::info!(
        "  Most claimed meal type: {}",
        text(foodshare_db::most_claimed_meal_type(conn)),
    );
    log::info!(
        "  City with most listings: {}",
        text(foodshare_db::city_with_most_listings(conn)),
    );
    log::info!(
        "  Top provider type:      {}",
        text(foodshare_db::most_contributing_provider_type(conn)),
    );
}

fn number(result: Result<ResultTable, QueryError>) -> String {
    match result {
        Ok(table) => match metric(&table) {
            Some(n) => format!("{}", n),
            None => "0".to_string(),
        },
        Err(e) => na(&e),
    }
}

fn text(result: Result<ResultTable, QueryError>) -> String {
    match result {
        Ok(table) => leader(&table)
            .map(str::to_string)
            .unwrap_or_else(|| "-".if_supports_color(Stdout, |t| t.dimmed()).to_string()),
        Err(e) => na(&e),
    }
}

fn na(err: &QueryError) -> String {
    log::warn!("Dashboard query failed: {}", err);
    "n/a".to_string()
}
