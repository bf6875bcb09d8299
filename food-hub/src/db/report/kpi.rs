//! Headline counters

use chrono::NaiveDate;
use shared::models::{DonationVsClaimed, Kpis};
use sqlx::SqlitePool;

use crate::db::repository::RepoResult;

/// All dashboard counters in one round trip
///
/// `expired_food` counts listings dated strictly before `today`; listings
/// without an expiry date are never expired.
pub async fn kpi_snapshot(pool: &SqlitePool, today: NaiveDate) -> RepoResult<Kpis> {
    let kpis = sqlx::query_as::<_, Kpis>(
        r#"
        SELECT
            (SELECT COUNT(*) FROM food_listings) AS total_food,
            (SELECT COUNT(*) FROM providers) AS total_providers,
            (SELECT COUNT(*) FROM receivers) AS total_receivers,
            (SELECT COUNT(*) FROM claims) AS total_claims,
            (SELECT COUNT(DISTINCT Food_ID) FROM claims WHERE Status = 'Claimed') AS claimed_items,
            (SELECT COUNT(*) FROM claims WHERE Status = 'Pending') AS pending_claims,
            (SELECT COUNT(*) FROM claims WHERE Status = 'Cancelled') AS cancelled_claims,
            (SELECT COUNT(*) FROM food_listings WHERE Expiry_Date < ?1) AS expired_food
        "#,
    )
    .bind(today)
    .fetch_one(pool)
    .await?;
    Ok(kpis)
}

/// Total listings against listings that received any claim
pub async fn donation_vs_claimed(pool: &SqlitePool) -> RepoResult<DonationVsClaimed> {
    let row = sqlx::query_as::<_, DonationVsClaimed>(
        r#"
        SELECT
            (SELECT COUNT(*) FROM food_listings) AS total_donations,
            (SELECT COUNT(DISTINCT Food_ID) FROM claims) AS claimed_donations
        "#,
    )
    .fetch_one(pool)
    .await?;
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::{claim, food_listing};
    use crate::db::test_support::test_db;
    use crate::seed::seed_sample_data;
    use shared::models::{ClaimCreate, ClaimStatus, FoodListingCreate, FoodType, MealType, ProviderType};

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    #[tokio::test]
    async fn empty_ledger_is_all_zero() {
        let (_dir, db) = test_db().await;
        let kpis = kpi_snapshot(&db.pool, d(20)).await.unwrap();
        assert_eq!(kpis, Kpis::default());
        assert_eq!(kpis.expiry_rate(), 0.0);
    }

    #[tokio::test]
    async fn sample_data_counters() {
        let (_dir, db) = test_db().await;
        seed_sample_data(&db.pool).await.unwrap();

        let kpis = kpi_snapshot(&db.pool, d(20)).await.unwrap();
        assert_eq!(kpis.total_food, 10);
        assert_eq!(kpis.total_providers, 5);
        assert_eq!(kpis.total_receivers, 5);
        assert_eq!(kpis.total_claims, 10);
        assert_eq!(kpis.pending_claims, 3);
        assert_eq!(kpis.cancelled_claims, 2);
        // Bread (18th) and Milk (19th)
        assert_eq!(kpis.expired_food, 2);
        assert_eq!(kpis.expiry_rate(), 20.0);

        let dvc = donation_vs_claimed(&db.pool).await.unwrap();
        assert_eq!(dvc.total_donations, 10);
        assert_eq!(dvc.claimed_donations, 10);
    }

    #[tokio::test]
    async fn claimed_items_counts_distinct_listings() {
        let (_dir, db) = test_db().await;
        let listing = food_listing::create(
            &db.pool,
            FoodListingCreate {
                food_name: "Soup".into(),
                quantity: 4,
                expiry_date: None,
                provider_id: 1,
                provider_type: Some(ProviderType::Restaurant),
                location: "Kitchen".into(),
                food_type: FoodType::Vegetarian,
                meal_type: MealType::Dinner,
            },
        )
        .await
        .unwrap();
        for status in [ClaimStatus::Claimed, ClaimStatus::Claimed, ClaimStatus::Pending] {
            claim::create(
                &db.pool,
                ClaimCreate {
                    food_id: listing.id,
                    receiver_id: 1,
                    status,
                    timestamp: d(18).and_hms_opt(9, 0, 0).unwrap(),
                },
            )
            .await
            .unwrap();
        }

        let kpis = kpi_snapshot(&db.pool, d(20)).await.unwrap();
        assert_eq!(kpis.claimed_items, 1);
        assert_eq!(kpis.claim_rate(), 100.0);
        // Undated listing is not expired
        assert_eq!(kpis.expired_food, 0);
    }
}
