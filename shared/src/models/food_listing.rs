//! Food Listing Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{FoodType, MealType, ProviderType};

/// A quantity of donated food offered by one provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct FoodListing {
    pub id: i64,
    pub food_name: String,
    /// Always >= 1 for rows written through the repository
    pub quantity: i64,
    /// Legacy rows may carry no expiry date
    pub expiry_date: Option<NaiveDate>,
    pub provider_id: i64,
    /// Copy of the provider's type at write time
    pub provider_type: ProviderType,
    pub location: String,
    pub food_type: FoodType,
    pub meal_type: MealType,
}

/// Create/replace food listing payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodListingCreate {
    pub food_name: String,
    pub quantity: i64,
    pub expiry_date: Option<NaiveDate>,
    pub provider_id: i64,
    /// Omit to copy the referenced provider's current type
    #[serde(default)]
    pub provider_type: Option<ProviderType>,
    pub location: String,
    pub food_type: FoodType,
    pub meal_type: MealType,
}

impl From<FoodListing> for FoodListingCreate {
    fn from(f: FoodListing) -> Self {
        Self {
            food_name: f.food_name,
            quantity: f.quantity,
            expiry_date: f.expiry_date,
            provider_id: f.provider_id,
            provider_type: Some(f.provider_type),
            location: f.location,
            food_type: f.food_type,
            meal_type: f.meal_type,
        }
    }
}

/// Listing joined with its provider's contact details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct FoodListingDetail {
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub listing: FoodListing,
    pub provider_name: String,
    pub provider_contact: String,
    pub provider_city: String,
}

/// Optional filters for listing searches; all unset means "everything"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingFilter {
    /// Provider city
    pub city: Option<String>,
    pub food_type: Option<FoodType>,
    pub meal_type: Option<MealType>,
    pub provider_type: Option<ProviderType>,
    /// Keep listings with `expiry_date <= today + days`
    pub expiring_within_days: Option<u32>,
}

impl ListingFilter {
    pub fn city(city: impl Into<String>) -> Self {
        Self {
            city: Some(city.into()),
            ..Default::default()
        }
    }

    pub fn food_type(food_type: FoodType) -> Self {
        Self {
            food_type: Some(food_type),
            ..Default::default()
        }
    }

    pub fn meal_type(meal_type: MealType) -> Self {
        Self {
            meal_type: Some(meal_type),
            ..Default::default()
        }
    }

    pub fn provider_type(provider_type: ProviderType) -> Self {
        Self {
            provider_type: Some(provider_type),
            ..Default::default()
        }
    }

    pub fn expiring_within(mut self, days: u32) -> Self {
        self.expiring_within_days = Some(days);
        self
    }
}
