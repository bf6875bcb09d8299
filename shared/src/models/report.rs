//! Report row types
//!
//! Every aggregate the reporting layer returns. Group keys are `Option`
//! because legacy rows may hold NULL in the grouped column.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ExpiryStatus;

/// Headline counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Kpis {
    pub total_food: i64,
    pub total_providers: i64,
    pub total_receivers: i64,
    pub total_claims: i64,
    /// Distinct listings with at least one "Claimed" claim
    pub claimed_items: i64,
    pub pending_claims: i64,
    pub cancelled_claims: i64,
    /// Listings whose expiry date is before the reference date
    pub expired_food: i64,
}

impl Kpis {
    pub fn claim_rate(&self) -> f64 {
        percentage(self.claimed_items, self.total_food)
    }

    pub fn pending_rate(&self) -> f64 {
        percentage(self.pending_claims, self.total_claims)
    }

    pub fn cancellation_rate(&self) -> f64 {
        percentage(self.cancelled_claims, self.total_claims)
    }

    pub fn expiry_rate(&self) -> f64 {
        percentage(self.expired_food, self.total_food)
    }
}

/// `part / whole * 100`, or 0 for an empty whole
pub fn percentage(part: i64, whole: i64) -> f64 {
    if whole > 0 {
        part as f64 * 100.0 / whole as f64
    } else {
        0.0
    }
}

/// One group of a count-by-category query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CategoryCount {
    pub category: Option<String>,
    pub count: i64,
}

/// Listings per provider city
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CityCount {
    pub city: Option<String>,
    pub food_count: i64,
}

/// Claims per receiver city
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CityClaimCount {
    pub city: Option<String>,
    pub claim_count: i64,
}

/// Listing volume for one group (food type, provider type or city)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct WasteStats {
    pub category: Option<String>,
    pub total_listings: i64,
    pub total_quantity: i64,
    pub avg_quantity: f64,
}

/// Claim counters for one status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ClaimStatusStats {
    pub status: Option<String>,
    pub total_claims: i64,
    pub unique_food_items: i64,
    pub unique_receivers: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DonationVsClaimed {
    pub total_donations: i64,
    /// Distinct listings with a claim of any status
    pub claimed_donations: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryBucketCount {
    pub status: ExpiryStatus,
    pub count: i64,
}

/// Listing with the provider fields the expiry views show
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ExpiringListing {
    pub food_id: i64,
    pub food_name: String,
    pub quantity: i64,
    pub expiry_date: Option<NaiveDate>,
    pub provider_name: String,
    pub city: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ExpiryDateRange {
    pub earliest: Option<NaiveDate>,
    pub latest: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ReceiverActivity {
    pub receiver_id: i64,
    pub name: String,
    pub city: String,
    pub claim_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ProviderCancellation {
    pub provider_id: i64,
    pub name: String,
    pub city: String,
    pub total_claims: i64,
    pub cancelled_claims: i64,
    /// Percentage, 0..=100
    pub cancellation_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ProviderQuantity {
    pub provider_id: i64,
    pub name: String,
    pub city: String,
    pub total_listings: i64,
    pub total_quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ProviderActivity {
    pub provider_id: i64,
    pub name: String,
    pub total_donations: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct FoodClaimCount {
    pub food_id: i64,
    pub food_name: String,
    pub claim_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DailyClaimCount {
    /// NULL when the stored timestamp is not a recognizable date
    pub claim_date: Option<NaiveDate>,
    pub total_claims: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct UnclaimedListing {
    pub food_id: i64,
    pub food_name: String,
    pub quantity: i64,
    pub expiry_date: Option<NaiveDate>,
    pub provider_name: String,
}

/// Everything the recommendations view shows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    pub expiring_soon: Vec<ExpiringListing>,
    pub active_receivers: Vec<ReceiverActivity>,
    pub high_demand: Vec<CategoryCount>,
    pub high_cancellation: Vec<ProviderCancellation>,
}
