//! Group-by breakdowns
//!
//! Group keys come back as text (`None` for NULL) so legacy values that no
//! longer parse as an enum still show up in a breakdown.

use shared::models::{CategoryCount, CityClaimCount, CityCount, ClaimStatusStats, WasteStats};
use sqlx::SqlitePool;

use crate::db::repository::RepoResult;

async fn category_counts(pool: &SqlitePool, sql: &str) -> RepoResult<Vec<CategoryCount>> {
    let rows = sqlx::query_as::<_, CategoryCount>(sql).fetch_all(pool).await?;
    Ok(rows)
}

async fn waste_stats(pool: &SqlitePool, sql: &str) -> RepoResult<Vec<WasteStats>> {
    let rows = sqlx::query_as::<_, WasteStats>(sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn food_type_distribution(pool: &SqlitePool) -> RepoResult<Vec<CategoryCount>> {
    category_counts(
        pool,
        "SELECT Food_Type AS category, COUNT(*) AS count FROM food_listings \
         GROUP BY Food_Type ORDER BY count DESC, category",
    )
    .await
}

pub async fn meal_type_distribution(pool: &SqlitePool) -> RepoResult<Vec<CategoryCount>> {
    category_counts(
        pool,
        "SELECT Meal_Type AS category, COUNT(*) AS count FROM food_listings \
         GROUP BY Meal_Type ORDER BY count DESC, category",
    )
    .await
}

/// Grouped by the type copied onto each listing, not the providers table
pub async fn provider_type_distribution(pool: &SqlitePool) -> RepoResult<Vec<CategoryCount>> {
    category_counts(
        pool,
        "SELECT Provider_Type AS category, COUNT(*) AS count FROM food_listings \
         GROUP BY Provider_Type ORDER BY count DESC, category",
    )
    .await
}

pub async fn claim_status_distribution(pool: &SqlitePool) -> RepoResult<Vec<CategoryCount>> {
    category_counts(
        pool,
        "SELECT Status AS category, COUNT(*) AS count FROM claims \
         GROUP BY Status ORDER BY count DESC, category",
    )
    .await
}

/// Listings per provider city, including cities whose providers list nothing
pub async fn city_distribution(pool: &SqlitePool) -> RepoResult<Vec<CityCount>> {
    let rows = sqlx::query_as::<_, CityCount>(
        r#"
        SELECT p.City AS city, COUNT(fl.Food_ID) AS food_count
        FROM providers p
        LEFT JOIN food_listings fl ON p.Provider_ID = fl.Provider_ID
        GROUP BY p.City
        ORDER BY food_count DESC, city
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn claims_by_receiver_city(pool: &SqlitePool) -> RepoResult<Vec<CityClaimCount>> {
    let rows = sqlx::query_as::<_, CityClaimCount>(
        r#"
        SELECT r.City AS city, COUNT(c.Claim_ID) AS claim_count
        FROM claims c
        JOIN receivers r ON c.Receiver_ID = r.Receiver_ID
        GROUP BY r.City
        ORDER BY claim_count DESC, city
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn claims_by_food_type(pool: &SqlitePool) -> RepoResult<Vec<CategoryCount>> {
    category_counts(
        pool,
        "SELECT fl.Food_Type AS category, COUNT(c.Claim_ID) AS count \
         FROM claims c JOIN food_listings fl ON c.Food_ID = fl.Food_ID \
         GROUP BY fl.Food_Type ORDER BY count DESC, category",
    )
    .await
}

pub async fn waste_stats_by_food_type(pool: &SqlitePool) -> RepoResult<Vec<WasteStats>> {
    waste_stats(
        pool,
        "SELECT Food_Type AS category, COUNT(*) AS total_listings, \
                COALESCE(SUM(Quantity), 0) AS total_quantity, \
                COALESCE(AVG(Quantity), 0.0) AS avg_quantity \
         FROM food_listings GROUP BY Food_Type \
         ORDER BY total_quantity DESC, category",
    )
    .await
}

pub async fn waste_stats_by_provider_type(pool: &SqlitePool) -> RepoResult<Vec<WasteStats>> {
    waste_stats(
        pool,
        "SELECT Provider_Type AS category, COUNT(*) AS total_listings, \
                COALESCE(SUM(Quantity), 0) AS total_quantity, \
                COALESCE(AVG(Quantity), 0.0) AS avg_quantity \
         FROM food_listings GROUP BY Provider_Type \
         ORDER BY total_quantity DESC, category",
    )
    .await
}

/// By provider city; listings whose provider is gone are left out
pub async fn waste_stats_by_city(pool: &SqlitePool) -> RepoResult<Vec<WasteStats>> {
    waste_stats(
        pool,
        "SELECT p.City AS category, COUNT(*) AS total_listings, \
                COALESCE(SUM(fl.Quantity), 0) AS total_quantity, \
                COALESCE(AVG(fl.Quantity), 0.0) AS avg_quantity \
         FROM food_listings fl JOIN providers p ON fl.Provider_ID = p.Provider_ID \
         GROUP BY p.City ORDER BY total_quantity DESC, category",
    )
    .await
}

pub async fn claims_statistics(pool: &SqlitePool) -> RepoResult<Vec<ClaimStatusStats>> {
    let rows = sqlx::query_as::<_, ClaimStatusStats>(
        r#"
        SELECT
            Status AS status,
            COUNT(*) AS total_claims,
            COUNT(DISTINCT Food_ID) AS unique_food_items,
            COUNT(DISTINCT Receiver_ID) AS unique_receivers
        FROM claims
        GROUP BY Status
        ORDER BY total_claims DESC, status
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::provider;
    use crate::db::test_support::test_db;
    use crate::seed::seed_sample_data;
    use shared::models::{ProviderCreate, ProviderType};

    fn count_of<'a>(rows: &'a [CategoryCount], key: &str) -> Option<&'a CategoryCount> {
        rows.iter().find(|r| r.category.as_deref() == Some(key))
    }

    #[tokio::test]
    async fn city_distribution_counts_listings_per_provider_city() {
        let (_dir, db) = test_db().await;
        seed_sample_data(&db.pool).await.unwrap();
        provider::create(
            &db.pool,
            ProviderCreate {
                name: "Quiet Bakery".into(),
                provider_type: ProviderType::Restaurant,
                address: "9 Side St".into(),
                city: "Boston".into(),
                contact: "555-0199".into(),
            },
        )
        .await
        .unwrap();

        let rows = city_distribution(&db.pool).await.unwrap();
        let pairs: Vec<_> = rows
            .iter()
            .map(|r| (r.city.as_deref().unwrap_or_default(), r.food_count))
            .collect();
        // New York = providers 1 and 4 (listings 1, 2, 5, 10)
        assert_eq!(
            pairs,
            [("New York", 4), ("Chicago", 3), ("Los Angeles", 3), ("Boston", 0)]
        );
    }

    #[tokio::test]
    async fn category_breakdowns_cover_every_listing() {
        let (_dir, db) = test_db().await;
        seed_sample_data(&db.pool).await.unwrap();

        for rows in [
            food_type_distribution(&db.pool).await.unwrap(),
            meal_type_distribution(&db.pool).await.unwrap(),
            provider_type_distribution(&db.pool).await.unwrap(),
        ] {
            assert_eq!(rows.iter().map(|r| r.count).sum::<i64>(), 10);
        }

        let meals = meal_type_distribution(&db.pool).await.unwrap();
        assert_eq!(count_of(&meals, "Dinner").unwrap().count, 3);
        let providers = provider_type_distribution(&db.pool).await.unwrap();
        assert_eq!(count_of(&providers, "Restaurant").unwrap().count, 3);

        let statuses = claim_status_distribution(&db.pool).await.unwrap();
        assert_eq!(count_of(&statuses, "Completed").unwrap().count, 5);
        assert_eq!(count_of(&statuses, "Pending").unwrap().count, 3);
        assert_eq!(count_of(&statuses, "Cancelled").unwrap().count, 2);
        assert!(count_of(&statuses, "Claimed").is_none());
    }

    #[tokio::test]
    async fn waste_stats_order_by_total_quantity() {
        let (_dir, db) = test_db().await;
        seed_sample_data(&db.pool).await.unwrap();

        let by_city = waste_stats_by_city(&db.pool).await.unwrap();
        // Los Angeles: Rice 20 + Vegetables 15 + Chicken 12
        assert_eq!(by_city[0].category.as_deref(), Some("Los Angeles"));
        assert_eq!(by_city[0].total_quantity, 47);
        assert_eq!(by_city[0].total_listings, 3);
        assert!((by_city[0].avg_quantity - 47.0 / 3.0).abs() < 1e-9);
        assert!(by_city.windows(2).all(|w| w[0].total_quantity >= w[1].total_quantity));

        let by_type = waste_stats_by_provider_type(&db.pool).await.unwrap();
        assert_eq!(by_type.iter().map(|r| r.total_listings).sum::<i64>(), 10);
        assert!(!waste_stats_by_food_type(&db.pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn claim_breakdowns() {
        let (_dir, db) = test_db().await;
        seed_sample_data(&db.pool).await.unwrap();

        let cities = claims_by_receiver_city(&db.pool).await.unwrap();
        assert_eq!(cities.iter().map(|c| c.claim_count).sum::<i64>(), 10);
        assert_eq!(cities[0].claim_count, 4);

        let by_food = claims_by_food_type(&db.pool).await.unwrap();
        assert_eq!(by_food.iter().map(|c| c.count).sum::<i64>(), 10);

        let stats = claims_statistics(&db.pool).await.unwrap();
        let completed = stats.iter().find(|s| s.status.as_deref() == Some("Completed")).unwrap();
        assert_eq!(completed.total_claims, 5);
        assert_eq!(completed.unique_food_items, 5);
        assert_eq!(completed.unique_receivers, 3);
    }

    #[tokio::test]
    async fn empty_tables_give_empty_breakdowns() {
        let (_dir, db) = test_db().await;
        assert!(food_type_distribution(&db.pool).await.unwrap().is_empty());
        assert!(city_distribution(&db.pool).await.unwrap().is_empty());
        assert!(claims_statistics(&db.pool).await.unwrap().is_empty());
        assert!(waste_stats_by_city(&db.pool).await.unwrap().is_empty());
    }
}
