//! Categorical fields
//!
//! Every enum round-trips through its display text, which is also what the
//! `Type`, `Food_Type`, `Meal_Type` and `Status` columns hold.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Display/parse impls shared by all categorical enums.
///
/// The enum must provide `ALL` and `as_str`. Parsing trims the input and
/// ignores ASCII case, so `"grocery store"` is accepted.
macro_rules! impl_categorical {
    ($ty:ident, $field:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                $ty::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| ValidationError::UnknownVariant {
                        field: $field,
                        value: s.to_string(),
                        expected: $ty::ALL
                            .iter()
                            .map(|v| v.as_str())
                            .collect::<Vec<_>>()
                            .join(", "),
                    })
            }
        }
    };
}

/// Provider type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum ProviderType {
    Restaurant,
    #[serde(rename = "Grocery Store")]
    #[cfg_attr(feature = "db", sqlx(rename = "Grocery Store"))]
    GroceryStore,
    #[serde(rename = "Catering Service")]
    #[cfg_attr(feature = "db", sqlx(rename = "Catering Service"))]
    CateringService,
    Supermarket,
    #[serde(rename = "NGO")]
    #[cfg_attr(feature = "db", sqlx(rename = "NGO"))]
    Ngo,
    Individual,
}

impl ProviderType {
    pub const ALL: &'static [ProviderType] = &[
        ProviderType::Restaurant,
        ProviderType::GroceryStore,
        ProviderType::CateringService,
        ProviderType::Supermarket,
        ProviderType::Ngo,
        ProviderType::Individual,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderType::Restaurant => "Restaurant",
            ProviderType::GroceryStore => "Grocery Store",
            ProviderType::CateringService => "Catering Service",
            ProviderType::Supermarket => "Supermarket",
            ProviderType::Ngo => "NGO",
            ProviderType::Individual => "Individual",
        }
    }
}

impl_categorical!(ProviderType, "provider type");

/// Receiver type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum ReceiverType {
    Shelter,
    #[serde(rename = "NGO")]
    #[cfg_attr(feature = "db", sqlx(rename = "NGO"))]
    Ngo,
    Individual,
    Charity,
    #[serde(rename = "Community Center")]
    #[cfg_attr(feature = "db", sqlx(rename = "Community Center"))]
    CommunityCenter,
}

impl ReceiverType {
    pub const ALL: &'static [ReceiverType] = &[
        ReceiverType::Shelter,
        ReceiverType::Ngo,
        ReceiverType::Individual,
        ReceiverType::Charity,
        ReceiverType::CommunityCenter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReceiverType::Shelter => "Shelter",
            ReceiverType::Ngo => "NGO",
            ReceiverType::Individual => "Individual",
            ReceiverType::Charity => "Charity",
            ReceiverType::CommunityCenter => "Community Center",
        }
    }
}

impl_categorical!(ReceiverType, "receiver type");

/// Dietary category of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum FoodType {
    Vegetarian,
    #[serde(rename = "Non-Vegetarian")]
    #[cfg_attr(feature = "db", sqlx(rename = "Non-Vegetarian"))]
    NonVegetarian,
    Vegan,
}

impl FoodType {
    pub const ALL: &'static [FoodType] =
        &[FoodType::Vegetarian, FoodType::NonVegetarian, FoodType::Vegan];

    pub fn as_str(&self) -> &'static str {
        match self {
            FoodType::Vegetarian => "Vegetarian",
            FoodType::NonVegetarian => "Non-Vegetarian",
            FoodType::Vegan => "Vegan",
        }
    }
}

impl_categorical!(FoodType, "food type");

/// Meal slot of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
}

impl MealType {
    pub const ALL: &'static [MealType] = &[
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snacks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
            MealType::Snacks => "Snacks",
        }
    }
}

impl_categorical!(MealType, "meal type");

/// Claim status
///
/// `Completed` never appears in entry forms but exists in imported data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum ClaimStatus {
    Pending,
    Claimed,
    Cancelled,
    Completed,
}

impl ClaimStatus {
    pub const ALL: &'static [ClaimStatus] = &[
        ClaimStatus::Pending,
        ClaimStatus::Claimed,
        ClaimStatus::Cancelled,
        ClaimStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Pending => "Pending",
            ClaimStatus::Claimed => "Claimed",
            ClaimStatus::Cancelled => "Cancelled",
            ClaimStatus::Completed => "Completed",
        }
    }
}

impl_categorical!(ClaimStatus, "claim status");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_display_text_case_insensitively() {
        assert_eq!(
            "grocery store".parse::<ProviderType>().unwrap(),
            ProviderType::GroceryStore
        );
        assert_eq!(
            " Non-Vegetarian ".parse::<FoodType>().unwrap(),
            FoodType::NonVegetarian
        );
        assert_eq!(
            "Community Center".parse::<ReceiverType>().unwrap(),
            ReceiverType::CommunityCenter
        );
        assert_eq!("NGO".parse::<ProviderType>().unwrap(), ProviderType::Ngo);
    }

    #[test]
    fn display_matches_stored_text() {
        for t in ProviderType::ALL {
            assert_eq!(t.to_string().parse::<ProviderType>().unwrap(), *t);
        }
        for s in ClaimStatus::ALL {
            assert_eq!(s.to_string().parse::<ClaimStatus>().unwrap(), *s);
        }
        assert_eq!(MealType::Snacks.to_string(), "Snacks");
    }

    #[test]
    fn rejects_unknown_text() {
        let err = "Fruits".parse::<FoodType>().unwrap_err();
        match err {
            ValidationError::UnknownVariant { field, value, expected } => {
                assert_eq!(field, "food type");
                assert_eq!(value, "Fruits");
                assert_eq!(expected, "Vegetarian, Non-Vegetarian, Vegan");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!("".parse::<ClaimStatus>().is_err());
    }

    #[test]
    fn serde_uses_display_text() {
        let json = serde_json::to_string(&ProviderType::CateringService).unwrap();
        assert_eq!(json, "\"Catering Service\"");
        let back: ReceiverType = serde_json::from_str("\"NGO\"").unwrap();
        assert_eq!(back, ReceiverType::Ngo);
    }
}
