//! SQLite persistence layer for the food donation dataset.
//!
//! Provides schema creation, the report library, filtered browsing,
//! listing mutations, and an administrative ad-hoc SQL executor, all
//! backed by SQLite (via rusqlite with bundled feature).
//!
//! Every function takes the connection explicitly; there is no global handle.

pub mod admin;
pub mod browse;
pub mod operations;
pub mod reports;
pub mod schema;
pub mod table;

pub use browse::{Filter, distinct_values, get_table};
pub use operations::{
    MutationError, delete_listing, ensure_affected, insert_listing, update_listing_quantity,
};
pub use reports::{
    Report, ReportParams, avg_food_claimed_per_receiver, city_with_most_listings,
    claim_status_percentages, claims_per_food_item, listings_by_expiry, listings_by_expiry_today,
    most_claimed_meal_type, most_common_food_types, most_contributing_provider_type,
    provider_contacts_by_city, provider_details, providers_receivers_per_city, row_count,
    top_provider_by_successful_claims, top_receivers, total_donated_by_provider,
    total_food_available, unclaimed_food_items,
};
pub use schema::{SchemaError, ensure_schema, open_database, open_memory};
pub use table::{QueryError, ResultTable, Value, display_value};
