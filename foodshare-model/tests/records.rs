use chrono::NaiveDate;
use foodshare_model::*;

fn read<T: serde::de::DeserializeOwned>(csv_text: &str) -> Result<Vec<T>, csv::Error> {
    csv::Reader::from_reader(csv_text.as_bytes())
        .deserialize()
        .collect()
}

#[test]
fn listing_from_csv_row() {
    let rows: Vec<FoodListing> = read(
        "Food_ID,Food_Name,Quantity,Expiry_Date,Provider_ID,Provider_Type,Location,Food_Type,Meal_Type\n\
         1,Bread,43,3/17/2025,110,Grocery Store,South Kellyville,Non-Vegetarian,Breakfast\n",
    )
    .unwrap();
    assert_eq!(rows.len(), 1);
    let listing = &rows[0];
    assert_eq!(listing.food_name, "Bread");
    assert_eq!(listing.expiry_date, NaiveDate::from_ymd_opt(2025, 3, 17).unwrap());
    assert_eq!(listing.provider_id, Some(110));
    assert_eq!(listing.food_type, FoodType::NonVegetarian);
    assert_eq!(listing.meal_type, MealType::Breakfast);
}

#[test]
fn listing_without_provider() {
    let rows: Vec<FoodListing> = read(
        "Food_ID,Food_Name,Quantity,Expiry_Date,Provider_ID,Provider_Type,Location,Food_Type,Meal_Type\n\
         2,Soup,3,2025-03-20,,Restaurant,Springfield,Vegan,Dinner\n",
    )
    .unwrap();
    assert_eq!(rows[0].provider_id, None);
}

#[test]
fn claim_timestamp_is_normalized() {
    let rows: Vec<Claim> = read(
        "Claim_ID,Food_ID,Receiver_ID,Status,Timestamp\n\
         1,164,908,Pending,3/5/2025 5:26\n",
    )
    .unwrap();
    assert_eq!(rows[0].status, ClaimStatus::Pending);
    assert_eq!(format_timestamp(rows[0].timestamp), "2025-03-05 05:26:00");
}

#[test]
fn unknown_status_is_rejected() {
    let result: Result<Vec<Claim>, _> = read(
        "Claim_ID,Food_ID,Receiver_ID,Status,Timestamp\n\
         1,164,908,Lost,2025-03-05 05:26:00\n",
    );
    assert!(result.is_err());
}

#[test]
fn bad_expiry_date_is_rejected() {
    let result: Result<Vec<FoodListing>, _> = read(
        "Food_ID,Food_Name,Quantity,Expiry_Date,Provider_ID,Provider_Type,Location,Food_Type,Meal_Type\n\
         1,Bread,43,soon,110,Grocery Store,Here,Vegan,Lunch\n",
    );
    assert!(result.is_err());
}

#[test]
fn provider_type_column_is_named_type() {
    let rows: Vec<Provider> = read(
        "Provider_ID,Name,Type,Address,City,Contact\n\
         1,Gonzales-Cochran,Supermarket,74347 Christopher Extensions,New Jessica,+1-600-220-0480\n",
    )
    .unwrap();
    assert_eq!(rows[0].provider_type, "Supermarket");
    assert_eq!(rows[0].city, "New Jessica");
}
