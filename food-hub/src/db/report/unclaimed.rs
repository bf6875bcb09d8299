//! Listings nobody has claimed

use chrono::NaiveDate;
use shared::models::UnclaimedListing;
use sqlx::SqlitePool;

use crate::db::repository::RepoResult;

/// Listings without a single claim row, whatever its status
pub async fn unclaimed_listings(pool: &SqlitePool) -> RepoResult<Vec<UnclaimedListing>> {
    let rows = sqlx::query_as::<_, UnclaimedListing>(
        r#"
        SELECT fl.Food_ID AS food_id, fl.Food_Name AS food_name, fl.Quantity AS quantity,
               fl.Expiry_Date AS expiry_date, p.Name AS provider_name
        FROM food_listings fl
        LEFT JOIN claims c ON fl.Food_ID = c.Food_ID
        JOIN providers p ON fl.Provider_ID = p.Provider_ID
        WHERE c.Claim_ID IS NULL
        ORDER BY fl.Food_ID
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Unclaimed listings that have not expired yet, soonest expiry first
///
/// Undated listings are not included.
pub async fn unclaimed_available(
    pool: &SqlitePool,
    today: NaiveDate,
) -> RepoResult<Vec<UnclaimedListing>> {
    let rows = sqlx::query_as::<_, UnclaimedListing>(
        r#"
        SELECT fl.Food_ID AS food_id, fl.Food_Name AS food_name, fl.Quantity AS quantity,
               fl.Expiry_Date AS expiry_date, p.Name AS provider_name
        FROM food_listings fl
        LEFT JOIN claims c ON fl.Food_ID = c.Food_ID
        JOIN providers p ON fl.Provider_ID = p.Provider_ID
        WHERE c.Claim_ID IS NULL AND fl.Expiry_Date >= ?1
        ORDER BY fl.Expiry_Date, fl.Food_ID
        "#,
    )
    .bind(today)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
