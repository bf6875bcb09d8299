//! Claim Model

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{ClaimStatus, FoodType, MealType};

/// A receiver's claim on a food listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Claim {
    pub id: i64,
    pub food_id: i64,
    pub receiver_id: i64,
    pub status: ClaimStatus,
    pub timestamp: NaiveDateTime,
}

/// Create/replace claim payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimCreate {
    pub food_id: i64,
    pub receiver_id: i64,
    pub status: ClaimStatus,
    pub timestamp: NaiveDateTime,
}

impl From<Claim> for ClaimCreate {
    fn from(c: Claim) -> Self {
        Self {
            food_id: c.food_id,
            receiver_id: c.receiver_id,
            status: c.status,
            timestamp: c.timestamp,
        }
    }
}

/// Claim joined with its listing, receiver and (when still present) provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ClaimDetail {
    pub claim_id: i64,
    pub status: ClaimStatus,
    pub timestamp: NaiveDateTime,
    pub food_id: i64,
    pub food_name: String,
    pub food_type: FoodType,
    pub meal_type: MealType,
    pub quantity: i64,
    pub expiry_date: Option<NaiveDate>,
    pub provider_id: Option<i64>,
    pub provider_name: Option<String>,
    pub provider_city: Option<String>,
    pub receiver_id: i64,
    pub receiver_name: String,
    pub receiver_city: String,
    pub receiver_contact: String,
}
