//! Rankings over providers, receivers and listings

use shared::models::{
    CategoryCount, DailyClaimCount, FoodClaimCount, ProviderActivity, ProviderCancellation,
    ProviderQuantity, ReceiverActivity,
};
use sqlx::SqlitePool;

use crate::db::repository::RepoResult;

/// Receivers by number of claims, any status
pub async fn most_active_receivers(
    pool: &SqlitePool,
    limit: i64,
) -> RepoResult<Vec<ReceiverActivity>> {
    let rows = sqlx::query_as::<_, ReceiverActivity>(
        r#"
        SELECT r.Receiver_ID AS receiver_id, r.Name AS name, r.City AS city,
               COUNT(c.Claim_ID) AS claim_count
        FROM receivers r
        JOIN claims c ON r.Receiver_ID = c.Receiver_ID
        GROUP BY r.Receiver_ID
        ORDER BY claim_count DESC, r.Receiver_ID
        LIMIT ?1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Food types by number of claims on their listings
pub async fn high_demand_food_types(
    pool: &SqlitePool,
    limit: i64,
) -> RepoResult<Vec<CategoryCount>> {
    let rows = sqlx::query_as::<_, CategoryCount>(
        r#"
        SELECT fl.Food_Type AS category, COUNT(c.Claim_ID) AS count
        FROM claims c
        JOIN food_listings fl ON c.Food_ID = fl.Food_ID
        GROUP BY fl.Food_Type
        ORDER BY count DESC, category
        LIMIT ?1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Providers whose share of cancelled claims is strictly above
/// `threshold_pct`, highest rate first
///
/// A provider's claims are all claims on all of its listings.
pub async fn high_cancellation_providers(
    pool: &SqlitePool,
    threshold_pct: f64,
) -> RepoResult<Vec<ProviderCancellation>> {
    let rows = sqlx::query_as::<_, ProviderCancellation>(
        r#"
        SELECT p.Provider_ID AS provider_id, p.Name AS name, p.City AS city,
               COUNT(c.Claim_ID) AS total_claims,
               SUM(CASE WHEN c.Status = 'Cancelled' THEN 1 ELSE 0 END) AS cancelled_claims,
               SUM(CASE WHEN c.Status = 'Cancelled' THEN 1 ELSE 0 END) * 100.0
                   / COUNT(c.Claim_ID) AS cancellation_rate
        FROM providers p
        JOIN food_listings fl ON p.Provider_ID = fl.Provider_ID
        JOIN claims c ON fl.Food_ID = c.Food_ID
        GROUP BY p.Provider_ID
        HAVING cancellation_rate > ?1
        ORDER BY cancellation_rate DESC, p.Provider_ID
        "#,
    )
    .bind(threshold_pct)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Providers by total listed quantity
pub async fn top_providers(pool: &SqlitePool, limit: i64) -> RepoResult<Vec<ProviderQuantity>> {
    let rows = sqlx::query_as::<_, ProviderQuantity>(
        r#"
        SELECT p.Provider_ID AS provider_id, p.Name AS name, p.City AS city,
               COUNT(fl.Food_ID) AS total_listings,
               COALESCE(SUM(fl.Quantity), 0) AS total_quantity
        FROM providers p
        JOIN food_listings fl ON p.Provider_ID = fl.Provider_ID
        GROUP BY p.Provider_ID
        ORDER BY total_quantity DESC, p.Provider_ID
        LIMIT ?1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Providers by number of listings
pub async fn most_active_providers(pool: &SqlitePool) -> RepoResult<Vec<ProviderActivity>> {
    let rows = sqlx::query_as::<_, ProviderActivity>(
        r#"
        SELECT p.Provider_ID AS provider_id, p.Name AS name,
               COUNT(fl.Food_ID) AS total_donations
        FROM providers p
        JOIN food_listings fl ON p.Provider_ID = fl.Provider_ID
        GROUP BY p.Provider_ID
        ORDER BY total_donations DESC, p.Provider_ID
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Listings by number of claims in status "Claimed"
pub async fn most_claimed_foods(pool: &SqlitePool, limit: i64) -> RepoResult<Vec<FoodClaimCount>> {
    let rows = sqlx::query_as::<_, FoodClaimCount>(
        r#"
        SELECT fl.Food_ID AS food_id, fl.Food_Name AS food_name,
               COUNT(c.Claim_ID) AS claim_count
        FROM claims c
        JOIN food_listings fl ON c.Food_ID = fl.Food_ID
        WHERE c.Status = 'Claimed'
        GROUP BY fl.Food_ID
        ORDER BY claim_count DESC, fl.Food_ID
        LIMIT ?1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Claims per calendar day, oldest first
pub async fn claims_daily_trend(pool: &SqlitePool) -> RepoResult<Vec<DailyClaimCount>> {
    let rows = sqlx::query_as::<_, DailyClaimCount>(
        r#"
        SELECT date(Timestamp) AS claim_date, COUNT(*) AS total_claims
        FROM claims
        GROUP BY claim_date
        ORDER BY claim_date
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
