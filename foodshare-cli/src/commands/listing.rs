use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use rusqlite::Connection;

use foodshare_db::{
    Filter, MutationError, delete_listing, ensure_affected, get_table, insert_listing,
    update_listing_quantity,
};
use foodshare_model::{NewListing, Table};

use crate::CliError;
use crate::render::log_table;

fn mutation_error(e: MutationError) -> CliError {
    match e {
        MutationError::Storage(_) => CliError::database(e.to_string()),
        MutationError::Validation { .. } | MutationError::NotFound(_) => {
            CliError::other(e.to_string())
        }
    }
}

/// Show the stored row for `food_id`, if it can be read back.
fn show_listing(conn: &Connection, food_id: i64) {
    match get_table(conn, Table::FoodListings, &[Filter::eq("Food_ID", food_id)]) {
        Ok(table) => log_table(&table),
        Err(e) => log::warn!("Failed to read back listing {}: {}", food_id, e),
    }
}

pub(crate) fn run_listing_add(conn: &Connection, listing: NewListing) -> Result<(), CliError> {
    let id = insert_listing(conn, &listing).map_err(mutation_error)?;
    log::info!(
        "  {} Added listing {} ({})",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        id.if_supports_color(Stdout, |t| t.bold()),
        listing.food_name.trim(),
    );
    show_listing(conn, id);
    Ok(())
}

pub(crate) fn run_listing_update(
    conn: &Connection,
    food_id: i64,
    quantity: i64,
) -> Result<(), CliError> {
    update_listing_quantity(conn, food_id, quantity)
        .and_then(|changed| ensure_affected(changed, food_id))
        .map_err(mutation_error)?;
    log::info!(
        "  {} Listing {} quantity set to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        food_id,
        quantity,
    );
    show_listing(conn, food_id);
    Ok(())
}

pub(crate) fn run_listing_delete(conn: &Connection, food_id: i64) -> Result<(), CliError> {
    delete_listing(conn, food_id)
        .and_then(|changed| ensure_affected(changed, food_id))
        .map_err(mutation_error)?;
    log::info!(
        "  {} Deleted listing {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        food_id,
    );
    Ok(())
}
