//! Read-only aggregate reports over the donation dataset.
//!
//! Every report returns a [`ResultTable`] with fixed output columns. Reports
//! that keep only the top group break ties on the group key ascending so the
//! answer does not depend on storage order.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use foodshare_model::{
    ClaimStatus, PROVIDER_TYPES, ParseValueError, RECEIVER_TYPES, Table, format_date,
};
use rusqlite::types::ToSql;
use rusqlite::{Connection, params};

use crate::table::{QueryError, ResultTable, Value, query_table};

// ── Providers & Receivers ───────────────────────────────────────────────────

/// 1. Number of providers and receivers in each city, city ascending.
///
/// Rows from both tables are pooled and counted by `Type`: a provider-type
/// value from [`PROVIDER_TYPES`] counts as a provider, one from
/// [`RECEIVER_TYPES`] as a receiver, and any other type is not counted.
pub fn providers_receivers_per_city(conn: &Connection) -> Result<ResultTable, QueryError> {
    let provider_slots = placeholders(1, PROVIDER_TYPES.len());
    let receiver_slots = placeholders(1 + PROVIDER_TYPES.len(), RECEIVER_TYPES.len());
    let sql = format!(
        "SELECT City,
                SUM(CASE WHEN Type IN ({provider_slots}) THEN 1 ELSE 0 END) AS Providers_Count,
                SUM(CASE WHEN Type IN ({receiver_slots}) THEN 1 ELSE 0 END) AS Receivers_Count
         FROM (
             SELECT City, Type FROM providers
             UNION ALL
             SELECT City, Type FROM receivers
         )
         GROUP BY City
         ORDER BY City"
    );
    let types: Vec<&str> = PROVIDER_TYPES.into_iter().chain(RECEIVER_TYPES).collect();
    let bound: Vec<&dyn ToSql> = types.iter().map(|t| t as &dyn ToSql).collect();
    query_table(conn, &sql, &bound)
}

/// `?start, ?start+1, ...` for `count` parameters.
fn placeholders(start: usize, count: usize) -> String {
    (start..start + count)
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// 2. The provider type with the largest total listed quantity.
pub fn most_contributing_provider_type(conn: &Connection) -> Result<ResultTable, QueryError> {
    query_table(
        conn,
        "SELECT p.Type, SUM(fl.Quantity) AS Total_Quantity
         FROM providers p
         JOIN food_listings fl ON p.Provider_ID = fl.Provider_ID
         GROUP BY p.Type
         ORDER BY Total_Quantity DESC, p.Type ASC
         LIMIT 1",
        &[],
    )
}

/// 3. Contact details of providers in exactly this city.
pub fn provider_contacts_by_city(conn: &Connection, city: &str) -> Result<ResultTable, QueryError> {
    query_table(
        conn,
        "SELECT Name, Contact, Address
         FROM providers
         WHERE City = ?1
         ORDER BY Name",
        params![city],
    )
}

/// 4. Receivers ranked by total quantity of completed claims.
pub fn top_receivers(conn: &Connection) -> Result<ResultTable, QueryError> {
    query_table(
        conn,
        "SELECT r.Name, SUM(fl.Quantity) AS Total_Food_Claimed
         FROM receivers r
         JOIN claims c ON r.Receiver_ID = c.Receiver_ID
         JOIN food_listings fl ON c.Food_ID = fl.Food_ID
         WHERE c.Status = ?1
         GROUP BY r.Receiver_ID, r.Name
         ORDER BY Total_Food_Claimed DESC, r.Name ASC",
        params![ClaimStatus::Completed.as_str()],
    )
}

/// 13. Total quantity listed per provider name. Providers sharing a name are summed together.
pub fn total_donated_by_provider(conn: &Connection) -> Result<ResultTable, QueryError> {
    query_table(
        conn,
        "SELECT p.Name, SUM(fl.Quantity) AS Total_Quantity_Donated
         FROM providers p
         JOIN food_listings fl ON p.Provider_ID = fl.Provider_ID
         GROUP BY p.Name
         ORDER BY Total_Quantity_Donated DESC, p.Name ASC",
        &[],
    )
}

// ── Listings & Availability ─────────────────────────────────────────────────

/// 5. Total quantity over all listings. An empty table yields 0.
pub fn total_food_available(conn: &Connection) -> Result<ResultTable, QueryError> {
    query_table(
        conn,
        "SELECT COALESCE(SUM(Quantity), 0) AS Total_Available_Food FROM food_listings",
        &[],
    )
}

/// 6. The location with the most listings.
pub fn city_with_most_listings(conn: &Connection) -> Result<ResultTable, QueryError> {
    query_table(
        conn,
        "SELECT Location, COUNT(Food_ID) AS Number_of_Listings
         FROM food_listings
         GROUP BY Location
         ORDER BY Number_of_Listings DESC, Location ASC
         LIMIT 1",
        &[],
    )
}

/// 7. Food types ranked by listing count.
pub fn most_common_food_types(conn: &Connection) -> Result<ResultTable, QueryError> {
    query_table(
        conn,
        "SELECT Food_Type, COUNT(Food_ID) AS Number_of_Listings
         FROM food_listings
         GROUP BY Food_Type
         ORDER BY Number_of_Listings DESC, Food_Type ASC",
        &[],
    )
}

/// 15. Listings bucketed by days until expiry, relative to `today`.
pub fn listings_by_expiry(conn: &Connection, today: NaiveDate) -> Result<ResultTable, QueryError> {
    query_table(
        conn,
        "SELECT CASE
                    WHEN Expiry_Date <= date(?1, '+7 days') THEN 'Expiring in < 7 days'
                    WHEN Expiry_Date <= date(?1, '+30 days') THEN 'Expiring in 7-30 days'
                    ELSE 'Expiring in > 30 days'
                END AS Expiry_Category,
                COUNT(Food_ID) AS Number_of_Listings
         FROM food_listings
         GROUP BY Expiry_Category
         ORDER BY MIN(CASE
                    WHEN Expiry_Date <= date(?1, '+7 days') THEN 0
                    WHEN Expiry_Date <= date(?1, '+30 days') THEN 1
                    ELSE 2
                END)",
        params![format_date(today)],
    )
}

/// Report 15 evaluated against the local calendar date.
pub fn listings_by_expiry_today(conn: &Connection) -> Result<ResultTable, QueryError> {
    listings_by_expiry(conn, chrono::Local::now().date_naive())
}

// ── Claims & Distribution ───────────────────────────────────────────────────

/// 8. Claims per listing. Listings nobody claimed appear with 0.
pub fn claims_per_food_item(conn: &Connection) -> Result<ResultTable, QueryError> {
    query_table(
        conn,
        "SELECT fl.Food_ID, fl.Food_Name, COUNT(c.Claim_ID) AS Number_of_Claims
         FROM food_listings fl
         LEFT JOIN claims c ON fl.Food_ID = c.Food_ID
         GROUP BY fl.Food_ID, fl.Food_Name
         ORDER BY Number_of_Claims DESC, fl.Food_ID ASC",
        &[],
    )
}

/// 9. The provider whose listings received the most completed claims.
pub fn top_provider_by_successful_claims(conn: &Connection) -> Result<ResultTable, QueryError> {
    query_table(
        conn,
        "SELECT p.Name, COUNT(c.Claim_ID) AS Successful_Claims_Count
         FROM providers p
         JOIN food_listings fl ON p.Provider_ID = fl.Provider_ID
         JOIN claims c ON fl.Food_ID = c.Food_ID
         WHERE c.Status = ?1
         GROUP BY p.Provider_ID, p.Name
         ORDER BY Successful_Claims_Count DESC, p.Name ASC
         LIMIT 1",
        params![ClaimStatus::Completed.as_str()],
    )
}

/// 10. Share of claims in each status, in percent. Empty when there are no claims.
pub fn claim_status_percentages(conn: &Connection) -> Result<ResultTable, QueryError> {
    query_table(
        conn,
        "SELECT Status,
                COUNT(Claim_ID) * 100.0 / (SELECT COUNT(*) FROM claims) AS Percentage
         FROM claims
         GROUP BY Status
         ORDER BY Status",
        &[],
    )
}

/// 11. Mean over receivers of their total completed-claim quantity.
pub fn avg_food_claimed_per_receiver(conn: &Connection) -> Result<ResultTable, QueryError> {
    query_table(
        conn,
        "SELECT AVG(Total_Claimed) AS Average_Quantity_Per_Receiver
         FROM (
             SELECT c.Receiver_ID, SUM(fl.Quantity) AS Total_Claimed
             FROM claims c
             JOIN food_listings fl ON c.Food_ID = fl.Food_ID
             WHERE c.Status = ?1
             GROUP BY c.Receiver_ID
         )",
        params![ClaimStatus::Completed.as_str()],
    )
}

/// 12. The meal type with the most claims of any status.
pub fn most_claimed_meal_type(conn: &Connection) -> Result<ResultTable, QueryError> {
    query_table(
        conn,
        "SELECT fl.Meal_Type, COUNT(c.Claim_ID) AS Total_Claims
         FROM food_listings fl
         JOIN claims c ON fl.Food_ID = c.Food_ID
         GROUP BY fl.Meal_Type
         ORDER BY Total_Claims DESC, fl.Meal_Type ASC
         LIMIT 1",
        &[],
    )
}

/// 14. Listings with no claim at all.
pub fn unclaimed_food_items(conn: &Connection) -> Result<ResultTable, QueryError> {
    query_table(
        conn,
        "SELECT fl.Food_ID, fl.Food_Name, fl.Provider_Type, fl.Location
         FROM food_listings fl
         LEFT JOIN claims c ON fl.Food_ID = c.Food_ID
         WHERE c.Claim_ID IS NULL
         ORDER BY fl.Food_ID",
        &[],
    )
}

// ── Dashboard Helpers ───────────────────────────────────────────────────────

/// Number of rows in a table.
pub fn row_count(conn: &Connection, table: Table) -> Result<i64, QueryError> {
    let count = conn.query_row(
        &format!("SELECT COUNT(*) FROM {}", table.name()),
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}

/// Name, contact, and address of one provider (empty when it doesn't exist).
pub fn provider_details(conn: &Connection, provider_id: i64) -> Result<ResultTable, QueryError> {
    query_table(
        conn,
        "SELECT Name, Contact, Address, City FROM providers WHERE Provider_ID = ?1",
        params![provider_id],
    )
}

// ── Report Catalog ──────────────────────────────────────────────────────────

/// The fifteen canonical reports, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Report {
    ProvidersReceiversPerCity,
    MostContributingProviderType,
    ProviderContactsByCity,
    TopReceivers,
    TotalFoodAvailable,
    CityWithMostListings,
    MostCommonFoodTypes,
    ClaimsPerFoodItem,
    TopProviderBySuccessfulClaims,
    ClaimStatusPercentages,
    AvgFoodClaimedPerReceiver,
    MostClaimedMealType,
    TotalDonatedByProvider,
    UnclaimedFoodItems,
    ListingsByExpiry,
}

/// Inputs for parameterized reports.
#[derive(Debug, Clone, Default)]
pub struct ReportParams {
    /// City for [`Report::ProviderContactsByCity`].
    pub city: Option<String>,
    /// Reference date for [`Report::ListingsByExpiry`]; defaults to today.
    pub today: Option<NaiveDate>,
}

impl Report {
    pub const ALL: [Report; 15] = [
        Self::ProvidersReceiversPerCity,
        Self::MostContributingProviderType,
        Self::ProviderContactsByCity,
        Self::TopReceivers,
        Self::TotalFoodAvailable,
        Self::CityWithMostListings,
        Self::MostCommonFoodTypes,
        Self::ClaimsPerFoodItem,
        Self::TopProviderBySuccessfulClaims,
        Self::ClaimStatusPercentages,
        Self::AvgFoodClaimedPerReceiver,
        Self::MostClaimedMealType,
        Self::TotalDonatedByProvider,
        Self::UnclaimedFoodItems,
        Self::ListingsByExpiry,
    ];

    /// 1-based position in [`Report::ALL`].
    pub fn number(&self) -> usize {
        Self::ALL.iter().position(|r| r == self).map_or(0, |i| i + 1)
    }

    /// Kebab-case identifier used on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ProvidersReceiversPerCity => "providers-receivers-per-city",
            Self::MostContributingProviderType => "most-contributing-provider-type",
            Self::ProviderContactsByCity => "provider-contacts",
            Self::TopReceivers => "top-receivers",
            Self::TotalFoodAvailable => "total-food-available",
            Self::CityWithMostListings => "city-with-most-listings",
            Self::MostCommonFoodTypes => "most-common-food-types",
            Self::ClaimsPerFoodItem => "claims-per-food-item",
            Self::TopProviderBySuccessfulClaims => "top-provider-by-successful-claims",
            Self::ClaimStatusPercentages => "claim-status-percentages",
            Self::AvgFoodClaimedPerReceiver => "avg-food-claimed-per-receiver",
            Self::MostClaimedMealType => "most-claimed-meal-type",
            Self::TotalDonatedByProvider => "total-donated-by-provider",
            Self::UnclaimedFoodItems => "unclaimed-food-items",
            Self::ListingsByExpiry => "listings-by-expiry",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::ProvidersReceiversPerCity => "Providers and receivers per city",
            Self::MostContributingProviderType => "Most contributing provider type",
            Self::ProviderContactsByCity => "Provider contacts in a city",
            Self::TopReceivers => "Receivers with the most food claimed",
            Self::TotalFoodAvailable => "Total quantity of available food",
            Self::CityWithMostListings => "City with the most food listings",
            Self::MostCommonFoodTypes => "Most commonly available food types",
            Self::ClaimsPerFoodItem => "Claims per food item",
            Self::TopProviderBySuccessfulClaims => "Top provider by successful claims",
            Self::ClaimStatusPercentages => "Claim status percentages",
            Self::AvgFoodClaimedPerReceiver => "Average quantity claimed per receiver",
            Self::MostClaimedMealType => "Most claimed meal type",
            Self::TotalDonatedByProvider => "Total quantity donated per provider",
            Self::UnclaimedFoodItems => "Unclaimed food items",
            Self::ListingsByExpiry => "Listings by expiry date",
        }
    }

    /// Whether the report cannot run without a [`ReportParams::city`].
    pub fn needs_city(&self) -> bool {
        matches!(self, Self::ProviderContactsByCity)
    }

    /// Run the report. A city report without a city yields an empty table.
    pub fn run(&self, conn: &Connection, params: &ReportParams) -> Result<ResultTable, QueryError> {
        match self {
            Self::ProvidersReceiversPerCity => providers_receivers_per_city(conn),
            Self::MostContributingProviderType => most_contributing_provider_type(conn),
            Self::ProviderContactsByCity => match params.city.as_deref() {
                Some(city) => provider_contacts_by_city(conn, city),
                None => Ok(ResultTable::with_columns(&["Name", "Contact", "Address"])),
            },
            Self::TopReceivers => top_receivers(conn),
            Self::TotalFoodAvailable => total_food_available(conn),
            Self::CityWithMostListings => city_with_most_listings(conn),
            Self::MostCommonFoodTypes => most_common_food_types(conn),
            Self::ClaimsPerFoodItem => claims_per_food_item(conn),
            Self::TopProviderBySuccessfulClaims => top_provider_by_successful_claims(conn),
            Self::ClaimStatusPercentages => claim_status_percentages(conn),
            Self::AvgFoodClaimedPerReceiver => avg_food_claimed_per_receiver(conn),
            Self::MostClaimedMealType => most_claimed_meal_type(conn),
            Self::TotalDonatedByProvider => total_donated_by_provider(conn),
            Self::UnclaimedFoodItems => unclaimed_food_items(conn),
            Self::ListingsByExpiry => match params.today {
                Some(today) => listings_by_expiry(conn, today),
                None => listings_by_expiry_today(conn),
            },
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Report {
    type Err = ParseValueError;

    /// Accepts the kebab-case name or the 1-based report number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(n) = s.parse::<usize>() {
            if let Some(report) = n.checked_sub(1).and_then(|i| Self::ALL.get(i)) {
                return Ok(*report);
            }
        }
        let wanted = s.to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|r| r.name() == wanted)
            .ok_or_else(|| ParseValueError {
                kind: "report",
                value: s.to_string(),
                expected: Self::ALL.map(|r| r.name()).join(", "),
            })
    }
}

/// Extract a single numeric metric from a one-cell report.
pub fn metric(table: &ResultTable) -> Option<f64> {
    table.scalar().and_then(crate::table::value_as_f64)
}

/// Text of the first column in the first row, for "top" reports.
pub fn leader(table: &ResultTable) -> Option<&str> {
    match table.scalar()? {
        Value::Text(s) => Some(s.as_str()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_numbers_follow_catalog_order() {
        assert_eq!(Report::ProvidersReceiversPerCity.number(), 1);
        assert_eq!(Report::ListingsByExpiry.number(), 15);
    }

    #[test]
    fn parse_by_name_or_number() {
        assert_eq!("top-receivers".parse::<Report>(), Ok(Report::TopReceivers));
        assert_eq!("top_receivers".parse::<Report>(), Ok(Report::TopReceivers));
        assert_eq!("10".parse::<Report>(), Ok(Report::ClaimStatusPercentages));
        assert!("0".parse::<Report>().is_err());
        assert!("16".parse::<Report>().is_err());
        assert!("everything".parse::<Report>().is_err());
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<_> = Report::ALL.iter().map(|r| r.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Report::ALL.len());
    }
}
