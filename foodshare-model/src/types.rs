//! Data model types for the food donation dataset.
//!
//! These types mirror the four persisted tables: providers, receivers,
//! food listings, and claims. Field names serialize to the column names used
//! by both the CSV sources and the SQLite schema.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dates;

/// Error returned when a string does not name a known enum variant.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct ParseValueError {
    pub kind: &'static str,
    pub value: String,
    pub expected: String,
}

impl ParseValueError {
    fn new(kind: &'static str, value: &str, variants: &[&str]) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected: variants.join(", "),
        }
    }
}

// ── Provider ────────────────────────────────────────────────────────────────

/// An organisation or person that lists food for donation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    #[serde(rename = "Provider_ID")]
    pub provider_id: i64,
    #[serde(rename = "Name")]
    pub name: String,
    /// Open set: "Restaurant", "Grocery Store", "Supermarket", "Catering Service", ...
    #[serde(rename = "Type")]
    pub provider_type: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Contact")]
    pub contact: String,
}

// ── Receiver ────────────────────────────────────────────────────────────────

/// An organisation or person that claims donated food.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receiver {
    #[serde(rename = "Receiver_ID")]
    pub receiver_id: i64,
    #[serde(rename = "Name")]
    pub name: String,
    /// Open set: "NGO", "Community Center", "Individual", "Shelter", ...
    #[serde(rename = "Type")]
    pub receiver_type: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Contact")]
    pub contact: String,
}

// ── Food Listing ────────────────────────────────────────────────────────────

/// A single donation offer.
///
/// `provider_id` is a soft reference: it may be absent or point at a
/// provider that does not exist.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FoodListing {
    #[serde(rename = "Food_ID")]
    pub food_id: i64,
    #[serde(rename = "Food_Name")]
    pub food_name: String,
    #[serde(rename = "Quantity")]
    pub quantity: i64,
    #[serde(rename = "Expiry_Date", deserialize_with = "dates::deserialize_date")]
    pub expiry_date: NaiveDate,
    #[serde(rename = "Provider_ID")]
    pub provider_id: Option<i64>,
    #[serde(rename = "Provider_Type")]
    pub provider_type: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Food_Type")]
    pub food_type: FoodType,
    #[serde(rename = "Meal_Type")]
    pub meal_type: MealType,
}

/// Input for creating a listing through the mutation gateway.
///
/// When `food_id` is `None` the database assigns the next free id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewListing {
    pub food_id: Option<i64>,
    pub food_name: String,
    pub quantity: i64,
    pub expiry_date: NaiveDate,
    pub provider_id: i64,
    pub provider_type: String,
    pub location: String,
    pub food_type: FoodType,
    pub meal_type: MealType,
}

/// Dietary category of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoodType {
    Vegetarian,
    #[serde(rename = "Non-Vegetarian")]
    NonVegetarian,
    Vegan,
}

impl FoodType {
    pub const ALL: [FoodType; 3] = [Self::Vegetarian, Self::NonVegetarian, Self::Vegan];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vegetarian => "Vegetarian",
            Self::NonVegetarian => "Non-Vegetarian",
            Self::Vegan => "Vegan",
        }
    }
}

impl fmt::Display for FoodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FoodType {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "vegetarian" | "veg" => Ok(Self::Vegetarian),
            "nonvegetarian" | "nonveg" => Ok(Self::NonVegetarian),
            "vegan" => Ok(Self::Vegan),
            _ => Err(ParseValueError::new(
                "food type",
                s,
                &Self::ALL.map(|t| t.as_str()),
            )),
        }
    }
}

/// Meal a listing is intended for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
}

impl MealType {
    pub const ALL: [MealType; 4] = [Self::Breakfast, Self::Lunch, Self::Dinner, Self::Snacks];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Breakfast => "Breakfast",
            Self::Lunch => "Lunch",
            Self::Dinner => "Dinner",
            Self::Snacks => "Snacks",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "breakfast" => Ok(Self::Breakfast),
            "lunch" => Ok(Self::Lunch),
            "dinner" => Ok(Self::Dinner),
            "snacks" | "snack" => Ok(Self::Snacks),
            _ => Err(ParseValueError::new(
                "meal type",
                s,
                &Self::ALL.map(|t| t.as_str()),
            )),
        }
    }
}

// ── Participant Types ───────────────────────────────────────────────────────

/// Type values counted as providers in the per-city breakdown.
pub const PROVIDER_TYPES: [&str; 3] = ["Restaurant", "Grocery Store", "Supermarket"];

/// Type values counted as receivers in the per-city breakdown.
pub const RECEIVER_TYPES: [&str; 3] = ["NGO", "Community Center", "Individual"];

// ── Claim ───────────────────────────────────────────────────────────────────

/// A receiver's claim against a listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Claim {
    #[serde(rename = "Claim_ID")]
    pub claim_id: i64,
    #[serde(rename = "Food_ID")]
    pub food_id: Option<i64>,
    #[serde(rename = "Receiver_ID")]
    pub receiver_id: Option<i64>,
    #[serde(rename = "Status")]
    pub status: ClaimStatus,
    #[serde(rename = "Timestamp", deserialize_with = "dates::deserialize_timestamp")]
    pub timestamp: NaiveDateTime,
}

/// Lifecycle state of a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimStatus {
    Completed,
    Pending,
    Cancelled,
}

impl ClaimStatus {
    pub const ALL: [ClaimStatus; 3] = [Self::Completed, Self::Pending, Self::Cancelled];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::Pending => "Pending",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimStatus {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "completed" => Ok(Self::Completed),
            "pending" => Ok(Self::Pending),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(ParseValueError::new(
                "claim status",
                s,
                &Self::ALL.map(|t| t.as_str()),
            )),
        }
    }
}

/// Lowercase and drop everything that isn't alphanumeric ("Non-Vegetarian" -> "nonvegetarian").
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
