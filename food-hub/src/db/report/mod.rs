//! Reporting Module
//!
//! Read-only aggregates over the ledger tables. Nothing is cached: every
//! call runs its query against the current data. Reports that depend on the
//! calendar take the reference date as a parameter instead of reading the
//! database clock.

pub mod distribution;
pub mod expiry;
pub mod kpi;
pub mod ranking;
pub mod unclaimed;

pub use kpi::{donation_vs_claimed, kpi_snapshot};

use chrono::NaiveDate;
use shared::models::{Recommendations, SOON_DAYS};
use sqlx::SqlitePool;

use super::repository::RepoResult;

/// Rows shown per ranking on the recommendations view
pub const RECOMMENDATION_LIMIT: i64 = 5;

/// Providers above this cancellation percentage are flagged
pub const DEFAULT_CANCELLATION_THRESHOLD: f64 = 20.0;

/// Action list: what expires soon, who claims most, what is in demand and
/// which providers see many cancellations
pub async fn recommendations(pool: &SqlitePool, today: NaiveDate) -> RepoResult<Recommendations> {
    let (expiring_soon, active_receivers, high_demand, high_cancellation) = tokio::try_join!(
        expiry::expiring_within(pool, today, SOON_DAYS as u32),
        ranking::most_active_receivers(pool, RECOMMENDATION_LIMIT),
        ranking::high_demand_food_types(pool, RECOMMENDATION_LIMIT),
        ranking::high_cancellation_providers(pool, DEFAULT_CANCELLATION_THRESHOLD),
    )?;

    Ok(Recommendations {
        expiring_soon,
        active_receivers,
        high_demand,
        high_cancellation,
    })
}
