//! Expiry reports
//!
//! Bucket boundaries come from [`ExpiryBounds`] and are bound as dates, so
//! the SQL bucketing and [`ExpiryStatus::classify`] use the same cut-offs.

use chrono::NaiveDate;
use shared::models::{
    ExpiringListing, ExpiryBounds, ExpiryBucketCount, ExpiryDateRange, ExpiryStatus, add_days,
};
use sqlx::SqlitePool;

use crate::db::repository::{RepoError, RepoResult};

const LISTING_WITH_PROVIDER: &str = "SELECT fl.Food_ID AS food_id, fl.Food_Name AS food_name, \
                                     fl.Quantity AS quantity, fl.Expiry_Date AS expiry_date, \
                                     p.Name AS provider_name, p.City AS city \
                                     FROM food_listings fl \
                                     JOIN providers p ON fl.Provider_ID = p.Provider_ID";

/// Listing counts per expiry bucket, all four buckets in order
///
/// Undated listings count as `Fresh`, so the counts add up to the number of
/// listings.
pub async fn expiry_distribution(
    pool: &SqlitePool,
    today: NaiveDate,
) -> RepoResult<Vec<ExpiryBucketCount>> {
    let bounds = ExpiryBounds::new(today);
    let rows = sqlx::query_as::<_, (String, i64)>(
        r#"
        SELECT
            CASE
                WHEN Expiry_Date IS NULL THEN 'Fresh'
                WHEN Expiry_Date < ?1 THEN 'Expired'
                WHEN Expiry_Date BETWEEN ?1 AND ?2 THEN 'Expiring Soon'
                WHEN Expiry_Date BETWEEN ?3 AND ?4 THEN 'Expiring This Week'
                ELSE 'Fresh'
            END AS expiry_status,
            COUNT(*) AS count
        FROM food_listings
        GROUP BY expiry_status
        "#,
    )
    .bind(bounds.today)
    .bind(bounds.soon_end)
    .bind(bounds.week_start)
    .bind(bounds.week_end)
    .fetch_all(pool)
    .await?;

    let mut buckets: Vec<ExpiryBucketCount> = ExpiryStatus::ALL
        .iter()
        .map(|&status| ExpiryBucketCount { status, count: 0 })
        .collect();
    for (label, count) in rows {
        let status = ExpiryStatus::from_label(&label)
            .ok_or_else(|| RepoError::Database(format!("Unexpected expiry bucket '{label}'")))?;
        if let Some(bucket) = buckets.iter_mut().find(|b| b.status == status) {
            bucket.count = count;
        }
    }
    Ok(buckets)
}

/// Listings expiring between `today` and `today + days`, both inclusive,
/// soonest first
pub async fn expiring_within(
    pool: &SqlitePool,
    today: NaiveDate,
    days: u32,
) -> RepoResult<Vec<ExpiringListing>> {
    let rows = sqlx::query_as::<_, ExpiringListing>(&format!(
        "{LISTING_WITH_PROVIDER} WHERE fl.Expiry_Date BETWEEN ?1 AND ?2 \
         ORDER BY fl.Expiry_Date, fl.Food_ID"
    ))
    .bind(today)
    .bind(add_days(today, u64::from(days)))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Listings dated before `today`, most recently expired first
pub async fn expired_listings(
    pool: &SqlitePool,
    today: NaiveDate,
) -> RepoResult<Vec<ExpiringListing>> {
    let rows = sqlx::query_as::<_, ExpiringListing>(&format!(
        "{LISTING_WITH_PROVIDER} WHERE fl.Expiry_Date < ?1 \
         ORDER BY fl.Expiry_Date DESC, fl.Food_ID"
    ))
    .bind(today)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn expiry_date_range(pool: &SqlitePool) -> RepoResult<ExpiryDateRange> {
    let range = sqlx::query_as::<_, ExpiryDateRange>(
        "SELECT MIN(Expiry_Date) AS earliest, MAX(Expiry_Date) AS latest FROM food_listings",
    )
    .fetch_one(pool)
    .await?;
    Ok(range)
}

pub async fn null_expiry_count(pool: &SqlitePool) -> RepoResult<i64> {
    let n = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM food_listings WHERE Expiry_Date IS NULL",
    )
    .fetch_one(pool)
    .await?;
    Ok(n)
}
