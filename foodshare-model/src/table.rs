//! The four persisted tables and their column layouts.

use std::fmt;
use std::str::FromStr;

use crate::types::ParseValueError;

/// One of the dataset's tables.
///
/// Table names are never taken from user input as raw SQL; anything that
/// needs a table name goes through this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Table {
    Providers,
    Receivers,
    FoodListings,
    Claims,
}

impl Table {
    /// All tables in load order (referenced tables first).
    pub const ALL: [Table; 4] = [
        Self::Providers,
        Self::Receivers,
        Self::FoodListings,
        Self::Claims,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Providers => "providers",
            Self::Receivers => "receivers",
            Self::FoodListings => "food_listings",
            Self::Claims => "claims",
        }
    }

    /// Column names in declaration order.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Self::Providers => &["Provider_ID", "Name", "Type", "Address", "City", "Contact"],
            Self::Receivers => &["Receiver_ID", "Name", "Type", "City", "Contact"],
            Self::FoodListings => &[
                "Food_ID",
                "Food_Name",
                "Quantity",
                "Expiry_Date",
                "Provider_ID",
                "Provider_Type",
                "Location",
                "Food_Type",
                "Meal_Type",
            ],
            Self::Claims => &["Claim_ID", "Food_ID", "Receiver_ID", "Status", "Timestamp"],
        }
    }

    pub fn primary_key(&self) -> &'static str {
        self.columns()[0]
    }

    /// Resolve a column name case-insensitively to its canonical spelling.
    pub fn column(&self, name: &str) -> Option<&'static str> {
        self.columns()
            .iter()
            .copied()
            .find(|c| c.eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Table {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseValueError {
                kind: "table",
                value: s.to_string(),
                expected: Self::ALL.map(|t| t.name()).join(", "),
            })
    }
}
