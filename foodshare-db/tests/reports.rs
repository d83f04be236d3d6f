use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use foodshare_db::reports::{leader, metric};
use foodshare_db::*;
use foodshare_model::Table;

const SEED: &str = r#"
INSERT INTO providers VALUES
    (1, 'Fresh Bites', 'Restaurant', '1 Main St', 'Springfield', '555-0101'),
    (2, 'Green Grocer', 'Grocery Store', '2 Oak Ave', 'Shelbyville', '555-0102'),
    (3, 'MegaMart', 'Supermarket', '3 Pine Rd', 'Springfield', '555-0103');
INSERT INTO receivers VALUES
    (1, 'Helping Hands', 'NGO', 'Springfield', '555-0201'),
    (2, 'Jane Doe', 'Individual', 'Capital City', '555-0202');
INSERT INTO food_listings VALUES
    (1, 'Bread', 10, '2025-03-10', 1, 'Restaurant', 'Springfield', 'Vegetarian', 'Breakfast'),
    (2, 'Soup', 20, '2025-03-20', 1, 'Restaurant', 'Springfield', 'Vegan', 'Lunch'),
    (3, 'Apples', 30, '2025-05-01', 2, 'Grocery Store', 'Shelbyville', 'Vegan', 'Snacks'),
    (4, 'Chicken', 15, '2025-03-05', 3, 'Supermarket', 'Springfield', 'Non-Vegetarian', 'Dinner'),
    (5, 'Rice', 25, '2025-04-15', 2, 'Grocery Store', 'Shelbyville', 'Vegetarian', 'Dinner');
INSERT INTO claims VALUES
    (1, 1, 1, 'Completed', '2025-03-01 09:00:00'),
    (2, 2, 1, 'Completed', '2025-03-01 10:00:00'),
    (3, 4, 2, 'Completed', '2025-03-02 11:00:00'),
    (4, 1, 2, 'Pending', '2025-03-02 12:00:00');
"#;

fn setup_db() -> rusqlite::Connection {
    let conn = open_memory().unwrap();
    conn.execute_batch(SEED).unwrap();
    conn
}

fn text(v: &str) -> Value {
    Value::Text(v.to_string())
}

fn column_texts(table: &ResultTable, column: &str) -> Vec<String> {
    (0..table.len())
        .map(|i| display_value(table.value(i, column).unwrap()))
        .collect()
}

#[test]
fn providers_and_receivers_per_city() {
    let conn = setup_db();
    let table = providers_receivers_per_city(&conn).unwrap();
    assert_eq!(table.columns, ["City", "Providers_Count", "Receivers_Count"]);
    assert_eq!(
        table.rows,
        vec![
            vec![text("Capital City"), Value::Integer(0), Value::Integer(1)],
            vec![text("Shelbyville"), Value::Integer(1), Value::Integer(0)],
            vec![text("Springfield"), Value::Integer(2), Value::Integer(1)],
        ]
    );
}

#[test]
fn per_city_counts_only_known_types() {
    let conn = open_memory().unwrap();
    conn.execute_batch(
        "INSERT INTO providers VALUES
             (1, 'Party Platters', 'Catering Service', '9 Elm St', 'Ogdenville', '555-0301'),
             (2, 'Corner Shop', 'Grocery Store', '4 Elm St', 'Ogdenville', '555-0302');
         INSERT INTO receivers VALUES
             (1, 'Night Haven', 'Shelter', 'Ogdenville', '555-0401'),
             (2, 'Eastside Hall', 'Community Center', 'Ogdenville', '555-0402');",
    )
    .unwrap();
    let table = providers_receivers_per_city(&conn).unwrap();
    assert_eq!(
        table.rows,
        vec![vec![text("Ogdenville"), Value::Integer(1), Value::Integer(1)]]
    );
}

#[test]
fn per_city_classifies_by_type_not_table() {
    let conn = open_memory().unwrap();
    conn.execute_batch(
        "INSERT INTO providers VALUES (1, 'Party Platters', 'Catering Service', '9 Elm St', 'X', '555-0301');
         INSERT INTO receivers VALUES (1, 'Night Haven', 'Shelter', 'X', '555-0401');",
    )
    .unwrap();
    let table = providers_receivers_per_city(&conn).unwrap();
    assert_eq!(
        table.rows,
        vec![vec![text("X"), Value::Integer(0), Value::Integer(0)]]
    );
}

#[test]
fn most_contributing_type_is_grocery() {
    let conn = setup_db();
    let table = most_contributing_provider_type(&conn).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(leader(&table), Some("Grocery Store"));
    assert_eq!(table.value(0, "Total_Quantity"), Some(&Value::Integer(55)));
}

#[test]
fn provider_contacts_exact_city() {
    let conn = setup_db();
    let table = provider_contacts_by_city(&conn, "Springfield").unwrap();
    assert_eq!(table.columns, ["Name", "Contact", "Address"]);
    assert_eq!(column_texts(&table, "Name"), ["Fresh Bites", "MegaMart"]);

    let none = provider_contacts_by_city(&conn, "springfield").unwrap();
    assert!(none.is_empty());
}

#[test]
fn provider_contacts_city_is_bound_not_spliced() {
    let conn = setup_db();
    let table = provider_contacts_by_city(&conn, "x' OR '1'='1").unwrap();
    assert!(table.is_empty());
}

#[test]
fn top_receivers_counts_completed_only() {
    let conn = setup_db();
    let table = top_receivers(&conn).unwrap();
    assert_eq!(column_texts(&table, "Name"), ["Helping Hands", "Jane Doe"]);
    assert_eq!(column_texts(&table, "Total_Food_Claimed"), ["30", "15"]);
}

#[test]
fn total_food_is_sum_of_quantities() {
    let conn = setup_db();
    let table = total_food_available(&conn).unwrap();
    assert_eq!(table.columns, ["Total_Available_Food"]);
    assert_eq!(metric(&table), Some(100.0));
}

#[test]
fn total_food_on_empty_table_is_zero() {
    let conn = open_memory().unwrap();
    let table = total_food_available(&conn).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.scalar(), Some(&Value::Integer(0)));
}

#[test]
fn city_with_most_listings_is_plurality() {
    let conn = setup_db();
    let table = city_with_most_listings(&conn).unwrap();
    assert_eq!(leader(&table), Some("Springfield"));
    assert_eq!(table.value(0, "Number_of_Listings"), Some(&Value::Integer(3)));
}

#[test]
fn city_tie_breaks_alphabetically() {
    let conn = setup_db();
    conn.execute(
        "INSERT INTO food_listings VALUES
            (6, 'Milk', 5, '2025-03-12', 2, 'Grocery Store', 'Shelbyville', 'Vegetarian', 'Breakfast')",
        [],
    )
    .unwrap();
    let table = city_with_most_listings(&conn).unwrap();
    assert_eq!(leader(&table), Some("Shelbyville"));
}

#[test]
fn food_types_ranked_with_ties_by_name() {
    let conn = setup_db();
    let table = most_common_food_types(&conn).unwrap();
    assert_eq!(
        column_texts(&table, "Food_Type"),
        ["Vegan", "Vegetarian", "Non-Vegetarian"]
    );
    assert_eq!(column_texts(&table, "Number_of_Listings"), ["2", "2", "1"]);
}

#[test]
fn claims_per_item_includes_zero() {
    let conn = setup_db();
    let table = claims_per_food_item(&conn).unwrap();
    assert_eq!(table.columns, ["Food_ID", "Food_Name", "Number_of_Claims"]);
    let counts: BTreeMap<String, String> = table
        .records()
        .map(|r| {
            (
                display_value(r.get("Food_Name").unwrap()),
                display_value(r.get("Number_of_Claims").unwrap()),
            )
        })
        .collect();
    assert_eq!(counts["Bread"], "2");
    assert_eq!(counts["Soup"], "1");
    assert_eq!(counts["Chicken"], "1");
    assert_eq!(counts["Apples"], "0");
    assert_eq!(counts["Rice"], "0");
    assert_eq!(table.value(0, "Food_Name"), Some(&text("Bread")));
}

#[test]
fn top_provider_by_completed_claims() {
    let conn = setup_db();
    let table = top_provider_by_successful_claims(&conn).unwrap();
    assert_eq!(leader(&table), Some("Fresh Bites"));
    assert_eq!(
        table.value(0, "Successful_Claims_Count"),
        Some(&Value::Integer(2))
    );
}

#[test]
fn status_percentages_scenario() {
    let conn = setup_db();
    let table = claim_status_percentages(&conn).unwrap();
    assert_eq!(
        table.rows,
        vec![
            vec![text("Completed"), Value::Real(75.0)],
            vec![text("Pending"), Value::Real(25.0)],
        ]
    );
}

#[test]
fn status_percentages_sum_to_hundred() {
    let conn = setup_db();
    conn.execute_batch(
        "INSERT INTO claims VALUES
            (5, 3, 1, 'Cancelled', '2025-03-03 08:00:00'),
            (6, 5, 2, 'Pending', '2025-03-03 09:00:00');",
    )
    .unwrap();
    let table = claim_status_percentages(&conn).unwrap();
    assert_eq!(table.len(), 3);
    let total: f64 = (0..table.len())
        .map(|i| foodshare_db::table::value_as_f64(table.value(i, "Percentage").unwrap()).unwrap())
        .sum();
    assert!((total - 100.0).abs() < 1e-9, "sum was {total}");
}

#[test]
fn status_percentages_empty_without_claims() {
    let conn = open_memory().unwrap();
    let table = claim_status_percentages(&conn).unwrap();
    assert!(table.is_empty());
    assert_eq!(table.columns, ["Status", "Percentage"]);
}

#[test]
fn average_claimed_per_receiver() {
    let conn = setup_db();
    let table = avg_food_claimed_per_receiver(&conn).unwrap();
    assert_eq!(metric(&table), Some(22.5));
}

#[test]
fn average_claimed_without_claims_is_null() {
    let conn = open_memory().unwrap();
    let table = avg_food_claimed_per_receiver(&conn).unwrap();
    assert_eq!(table.scalar(), Some(&Value::Null));
}

#[test]
fn most_claimed_meal_type_counts_all_statuses() {
    let conn = setup_db();
    let table = most_claimed_meal_type(&conn).unwrap();
    assert_eq!(leader(&table), Some("Breakfast"));
    assert_eq!(table.value(0, "Total_Claims"), Some(&Value::Integer(2)));
}

#[test]
fn total_donated_per_provider() {
    let conn = setup_db();
    let table = total_donated_by_provider(&conn).unwrap();
    assert_eq!(
        column_texts(&table, "Name"),
        ["Green Grocer", "Fresh Bites", "MegaMart"]
    );
    assert_eq!(
        column_texts(&table, "Total_Quantity_Donated"),
        ["55", "30", "15"]
    );
}

#[test]
fn total_donated_merges_providers_with_same_name() {
    let conn = open_memory().unwrap();
    conn.execute_batch(
        "INSERT INTO providers VALUES
             (1, 'Same Name', 'Restaurant', '1 A St', 'X', '555-0001'),
             (2, 'Same Name', 'Restaurant', '2 B St', 'Y', '555-0002');
         INSERT INTO food_listings VALUES
             (1, 'Bread', 10, '2025-03-10', 1, 'Restaurant', 'X', 'Vegetarian', 'Breakfast'),
             (2, 'Soup', 20, '2025-03-20', 2, 'Restaurant', 'Y', 'Vegan', 'Lunch');",
    )
    .unwrap();
    let table = total_donated_by_provider(&conn).unwrap();
    assert_eq!(table.rows, vec![vec![text("Same Name"), Value::Integer(30)]]);
}

#[test]
fn unclaimed_items_match_zero_claim_items() {
    let conn = setup_db();
    let unclaimed = unclaimed_food_items(&conn).unwrap();
    let per_item = claims_per_food_item(&conn).unwrap();

    let from_unclaimed: BTreeSet<String> = unclaimed
        .records()
        .map(|r| display_value(r.get("Food_ID").unwrap()))
        .collect();
    let from_counts: BTreeSet<String> = per_item
        .records()
        .filter(|r| r.get("Number_of_Claims") == Some(&Value::Integer(0)))
        .map(|r| display_value(r.get("Food_ID").unwrap()))
        .collect();

    assert_eq!(from_unclaimed, from_counts);
    assert_eq!(from_unclaimed, BTreeSet::from(["3".to_string(), "5".to_string()]));
}

#[test]
fn orphaned_claims_do_not_hide_unclaimed_items() {
    let conn = setup_db();
    conn.execute(
        "INSERT INTO claims VALUES (9, 999, 1, 'Pending', '2025-03-04 10:00:00')",
        [],
    )
    .unwrap();
    let unclaimed = unclaimed_food_items(&conn).unwrap();
    assert_eq!(column_texts(&unclaimed, "Food_Name"), ["Apples", "Rice"]);
}

#[test]
fn expiry_buckets_relative_to_today() {
    let conn = setup_db();
    let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    let table = listings_by_expiry(&conn, today).unwrap();
    assert_eq!(
        table.rows,
        vec![
            vec![text("Expiring in < 7 days"), Value::Integer(1)],
            vec![text("Expiring in 7-30 days"), Value::Integer(2)],
            vec![text("Expiring in > 30 days"), Value::Integer(2)],
        ]
    );
}

#[test]
fn expiry_bucket_edges() {
    let conn = open_memory().unwrap();
    conn.execute_batch(
        "INSERT INTO food_listings VALUES
            (1, 'A', 1, '2025-03-08', 1, 'Restaurant', 'X', 'Vegan', 'Lunch'),
            (2, 'B', 1, '2025-03-09', 1, 'Restaurant', 'X', 'Vegan', 'Lunch'),
            (3, 'C', 1, '2025-03-31', 1, 'Restaurant', 'X', 'Vegan', 'Lunch'),
            (4, 'D', 1, '2025-04-01', 1, 'Restaurant', 'X', 'Vegan', 'Lunch');",
    )
    .unwrap();
    let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    let table = listings_by_expiry(&conn, today).unwrap();
    assert_eq!(
        column_texts(&table, "Number_of_Listings"),
        ["1", "2", "1"]
    );
}

#[test]
fn every_report_runs_on_empty_database() {
    let conn = open_memory().unwrap();
    let params = ReportParams {
        city: Some("Springfield".to_string()),
        today: None,
    };
    for report in Report::ALL {
        let table = report.run(&conn, &params).unwrap();
        assert!(!table.columns.is_empty(), "{} has no columns", report);
    }
}

#[test]
fn city_report_without_city_is_empty() {
    let conn = setup_db();
    let table = Report::ProviderContactsByCity
        .run(&conn, &ReportParams::default())
        .unwrap();
    assert!(table.is_empty());
    assert_eq!(table.columns, ["Name", "Contact", "Address"]);
}

#[test]
fn report_fails_when_table_missing() {
    let conn = setup_db();
    conn.execute_batch("DROP TABLE claims;").unwrap();
    assert!(matches!(
        claim_status_percentages(&conn),
        Err(QueryError::Sqlite(_))
    ));
}

#[test]
fn dashboard_counts_and_provider_details() {
    let conn = setup_db();
    assert_eq!(row_count(&conn, Table::Providers).unwrap(), 3);
    assert_eq!(row_count(&conn, Table::Receivers).unwrap(), 2);

    let details = provider_details(&conn, 2).unwrap();
    assert_eq!(details.value(0, "Name"), Some(&text("Green Grocer")));
    assert!(provider_details(&conn, 42).unwrap().is_empty());
}
