//! Create, update, and delete operations on food listings.
//!
//! None of these touch the claims table: deleting a listing leaves any
//! claims that referenced it in place, pointing at a missing `Food_ID`.

use foodshare_model::{NewListing, format_date};
use rusqlite::{Connection, params};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MutationError {
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },
    #[error("Write rejected: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("Listing not found: Food_ID {0}")]
    NotFound(i64),
}

impl MutationError {
    fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }
}

/// Insert a new listing. Returns the listing's `Food_ID`.
///
/// The id is `listing.food_id` when supplied, otherwise the next rowid.
pub fn insert_listing(conn: &Connection, listing: &NewListing) -> Result<i64, MutationError> {
    validate_new_listing(listing)?;

    conn.execute(
        "INSERT INTO food_listings (Food_ID, Food_Name, Quantity, Expiry_Date, Provider_ID,
             Provider_Type, Location, Food_Type, Meal_Type)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            listing.food_id,
            listing.food_name.trim(),
            listing.quantity,
            format_date(listing.expiry_date),
            listing.provider_id,
            listing.provider_type.trim(),
            listing.location.trim(),
            listing.food_type.as_str(),
            listing.meal_type.as_str(),
        ],
    )?;

    let id = listing.food_id.unwrap_or_else(|| conn.last_insert_rowid());
    log::debug!("Inserted listing {} ({})", id, listing.food_name.trim());
    Ok(id)
}

/// Set the quantity of one listing. Returns the number of rows changed (0 or 1).
pub fn update_listing_quantity(
    conn: &Connection,
    food_id: i64,
    quantity: i64,
) -> Result<usize, MutationError> {
    if quantity < 0 {
        return Err(MutationError::validation(
            "Quantity",
            format!("must not be negative (got {quantity})"),
        ));
    }
    let changed = conn.execute(
        "UPDATE food_listings SET Quantity = ?2 WHERE Food_ID = ?1",
        params![food_id, quantity],
    )?;
    log::debug!("Updated quantity of listing {food_id} to {quantity}: {changed} row(s)");
    Ok(changed)
}

/// Remove one listing. Returns the number of rows removed (0 or 1).
pub fn delete_listing(conn: &Connection, food_id: i64) -> Result<usize, MutationError> {
    let changed = conn.execute(
        "DELETE FROM food_listings WHERE Food_ID = ?1",
        params![food_id],
    )?;
    log::debug!("Deleted listing {food_id}: {changed} row(s)");
    Ok(changed)
}

/// Turn a zero affected-row count into [`MutationError::NotFound`].
pub fn ensure_affected(changed: usize, food_id: i64) -> Result<usize, MutationError> {
    if changed == 0 {
        return Err(MutationError::NotFound(food_id));
    }
    Ok(changed)
}

fn validate_new_listing(listing: &NewListing) -> Result<(), MutationError> {
    for (field, value) in [
        ("Food_Name", &listing.food_name),
        ("Provider_Type", &listing.provider_type),
        ("Location", &listing.location),
    ] {
        if value.trim().is_empty() {
            return Err(MutationError::validation(field, "must not be empty"));
        }
    }
    if listing.quantity <= 0 {
        return Err(MutationError::validation(
            "Quantity",
            format!("must be a positive integer (got {})", listing.quantity),
        ));
    }
    if listing.provider_id <= 0 {
        return Err(MutationError::validation(
            "Provider_ID",
            format!("must be a positive integer (got {})", listing.provider_id),
        ));
    }
    if let Some(id) = listing.food_id.filter(|id| *id <= 0) {
        return Err(MutationError::validation(
            "Food_ID",
            format!("must be a positive integer (got {id})"),
        ));
    }
    Ok(())
}
