//! Claim Repository

use super::RepoResult;
use shared::models::{Claim, ClaimCreate, ClaimDetail, ClaimStatus};
use sqlx::{SqliteConnection, SqlitePool};

const COLUMNS: &str = "Claim_ID AS id, Food_ID AS food_id, Receiver_ID AS receiver_id, \
                       Status AS status, Timestamp AS timestamp";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Claim>> {
    let claims = sqlx::query_as::<_, Claim>(&format!("SELECT {COLUMNS} FROM claims"))
        .fetch_all(pool)
        .await?;
    Ok(claims)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Claim>> {
    let claim = sqlx::query_as::<_, Claim>(&format!(
        "SELECT {COLUMNS} FROM claims WHERE Claim_ID = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(claim)
}

pub async fn find_by_status(pool: &SqlitePool, status: ClaimStatus) -> RepoResult<Vec<Claim>> {
    let claims = sqlx::query_as::<_, Claim>(&format!(
        "SELECT {COLUMNS} FROM claims WHERE Status = ? ORDER BY Timestamp"
    ))
    .bind(status)
    .fetch_all(pool)
    .await?;
    Ok(claims)
}

/// Claims with listing, receiver and provider details, newest first
///
/// Claims whose listing or receiver is gone are skipped; a missing provider
/// only blanks the provider fields.
pub async fn find_all_detailed(pool: &SqlitePool) -> RepoResult<Vec<ClaimDetail>> {
    let claims = sqlx::query_as::<_, ClaimDetail>(
        "SELECT c.Claim_ID AS claim_id, c.Status AS status, c.Timestamp AS timestamp, \
                fl.Food_ID AS food_id, fl.Food_Name AS food_name, fl.Food_Type AS food_type, \
                fl.Meal_Type AS meal_type, fl.Quantity AS quantity, fl.Expiry_Date AS expiry_date, \
                p.Provider_ID AS provider_id, p.Name AS provider_name, p.City AS provider_city, \
                r.Receiver_ID AS receiver_id, r.Name AS receiver_name, r.City AS receiver_city, \
                r.Contact AS receiver_contact \
         FROM claims c \
         JOIN food_listings fl ON c.Food_ID = fl.Food_ID \
         JOIN receivers r ON c.Receiver_ID = r.Receiver_ID \
         LEFT JOIN providers p ON fl.Provider_ID = p.Provider_ID \
         ORDER BY c.Timestamp DESC, c.Claim_ID DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(claims)
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM claims")
        .fetch_one(pool)
        .await?;
    Ok(n)
}

/// Insert a claim; references are not checked
pub async fn create(pool: &SqlitePool, data: ClaimCreate) -> RepoResult<Claim> {
    let claim = sqlx::query_as::<_, Claim>(&format!(
        "INSERT INTO claims (Food_ID, Receiver_ID, Status, Timestamp) VALUES (?, ?, ?, ?) RETURNING {COLUMNS}"
    ))
    .bind(data.food_id)
    .bind(data.receiver_id)
    .bind(data.status)
    .bind(data.timestamp)
    .fetch_one(pool)
    .await?;
    tracing::debug!(id = claim.id, food_id = claim.food_id, status = %claim.status, "Claim created");
    Ok(claim)
}

pub async fn create_with_id(pool: &SqlitePool, id: i64, data: ClaimCreate) -> RepoResult<Claim> {
    let mut conn = pool.acquire().await?;
    insert_with_id(&mut conn, id, &data).await
}

/// [`create_with_id`] on a caller-held connection or transaction
pub async fn insert_with_id(
    conn: &mut SqliteConnection,
    id: i64,
    data: &ClaimCreate,
) -> RepoResult<Claim> {
    let claim = sqlx::query_as::<_, Claim>(&format!(
        "INSERT INTO claims (Claim_ID, Food_ID, Receiver_ID, Status, Timestamp) VALUES (?, ?, ?, ?, ?) RETURNING {COLUMNS}"
    ))
    .bind(id)
    .bind(data.food_id)
    .bind(data.receiver_id)
    .bind(data.status)
    .bind(data.timestamp)
    .fetch_one(&mut *conn)
    .await?;
    Ok(claim)
}

/// Overwrite every field of claim `id`; `None` when it does not exist
pub async fn update(pool: &SqlitePool, id: i64, data: ClaimCreate) -> RepoResult<Option<Claim>> {
    let claim = sqlx::query_as::<_, Claim>(&format!(
        "UPDATE claims SET Food_ID = ?, Receiver_ID = ?, Status = ?, Timestamp = ? WHERE Claim_ID = ? RETURNING {COLUMNS}"
    ))
    .bind(data.food_id)
    .bind(data.receiver_id)
    .bind(data.status)
    .bind(data.timestamp)
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(claim)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM claims WHERE Claim_ID = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::{food_listing, provider, receiver};
    use crate::db::test_support::test_db;
    use chrono::{NaiveDate, NaiveDateTime};
    use shared::models::{
        FoodListingCreate, FoodType, MealType, ProviderCreate, ProviderType, ReceiverCreate,
        ReceiverType,
    };

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    struct Fixture {
        provider_id: i64,
        food_id: i64,
        receiver_id: i64,
    }

    async fn fixture(pool: &SqlitePool) -> Fixture {
        let p = provider::create(
            pool,
            ProviderCreate {
                name: "Green Grocery".into(),
                provider_type: ProviderType::GroceryStore,
                address: "123 Main St".into(),
                city: "New York".into(),
                contact: "+1-123-456-7890".into(),
            },
        )
        .await
        .unwrap();
        let f = food_listing::create(
            pool,
            FoodListingCreate {
                food_name: "Apples".into(),
                quantity: 50,
                expiry_date: NaiveDate::from_ymd_opt(2025, 3, 25),
                provider_id: p.id,
                provider_type: None,
                location: "123 Main St".into(),
                food_type: FoodType::Vegan,
                meal_type: MealType::Snacks,
            },
        )
        .await
        .unwrap();
        let r = receiver::create(
            pool,
            ReceiverCreate {
                name: "City Shelter".into(),
                receiver_type: ReceiverType::Shelter,
                city: "New York".into(),
                contact: "+1-111-222-3333".into(),
            },
        )
        .await
        .unwrap();
        Fixture {
            provider_id: p.id,
            food_id: f.id,
            receiver_id: r.id,
        }
    }

    fn claim(fx: &Fixture, status: ClaimStatus, ts: NaiveDateTime) -> ClaimCreate {
        ClaimCreate {
            food_id: fx.food_id,
            receiver_id: fx.receiver_id,
            status,
            timestamp: ts,
        }
    }

    #[tokio::test]
    async fn crud_round_trip_keeps_timestamp() {
        let (_dir, db) = test_db().await;
        let fx = fixture(&db.pool).await;

        let c = create(&db.pool, claim(&fx, ClaimStatus::Pending, at(18, 10))).await.unwrap();
        assert_eq!(c.timestamp, at(18, 10));
        assert_eq!(find_by_id(&db.pool, c.id).await.unwrap().unwrap(), c);

        let updated = update(&db.pool, c.id, claim(&fx, ClaimStatus::Completed, at(19, 9)))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, ClaimStatus::Completed);
        assert!(update(&db.pool, c.id + 1, claim(&fx, ClaimStatus::Claimed, at(19, 9)))
            .await
            .unwrap()
            .is_none());

        assert!(delete(&db.pool, c.id).await.unwrap());
        assert!(!delete(&db.pool, c.id).await.unwrap());
        assert_eq!(count(&db.pool).await.unwrap(), 0);
    }

    async fn stored_text(pool: &SqlitePool, id: i64) -> (String, String) {
        sqlx::query_as("SELECT Status, CAST(Timestamp AS TEXT) FROM claims WHERE Claim_ID = ?")
            .bind(id)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn identical_update_is_byte_for_byte_stable() {
        let (_dir, db) = test_db().await;
        let fx = fixture(&db.pool).await;
        let created = create(&db.pool, claim(&fx, ClaimStatus::Claimed, at(18, 10)))
            .await
            .unwrap();

        let before = stored_text(&db.pool, created.id).await;

        let updated = update(&db.pool, created.id, created.clone().into())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated, created);
        assert_eq!(find_by_id(&db.pool, created.id).await.unwrap().unwrap(), created);
        assert_eq!(stored_text(&db.pool, created.id).await, before);
    }

    #[tokio::test]
    async fn find_by_status_filters_and_orders() {
        let (_dir, db) = test_db().await;
        let fx = fixture(&db.pool).await;
        create(&db.pool, claim(&fx, ClaimStatus::Pending, at(20, 8))).await.unwrap();
        create(&db.pool, claim(&fx, ClaimStatus::Cancelled, at(19, 8))).await.unwrap();
        create(&db.pool, claim(&fx, ClaimStatus::Pending, at(18, 8))).await.unwrap();

        let pending = find_by_status(&db.pool, ClaimStatus::Pending).await.unwrap();
        assert_eq!(pending.len(), 2);
        assert!(pending[0].timestamp < pending[1].timestamp);
        assert!(find_by_status(&db.pool, ClaimStatus::Completed).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn detailed_view_tolerates_missing_provider() {
        let (_dir, db) = test_db().await;
        let fx = fixture(&db.pool).await;
        create(&db.pool, claim(&fx, ClaimStatus::Claimed, at(18, 10))).await.unwrap();
        create(&db.pool, claim(&fx, ClaimStatus::Pending, at(19, 10))).await.unwrap();
        // Claim pointing at a listing that never existed
        create(
            &db.pool,
            ClaimCreate {
                food_id: 999,
                receiver_id: fx.receiver_id,
                status: ClaimStatus::Pending,
                timestamp: at(20, 10),
            },
        )
        .await
        .unwrap();

        let detailed = find_all_detailed(&db.pool).await.unwrap();
        assert_eq!(detailed.len(), 2);
        assert_eq!(detailed[0].timestamp, at(19, 10));
        assert_eq!(detailed[0].provider_name.as_deref(), Some("Green Grocery"));
        assert_eq!(detailed[0].receiver_name, "City Shelter");

        provider::delete(&db.pool, fx.provider_id).await.unwrap();
        let detailed = find_all_detailed(&db.pool).await.unwrap();
        assert_eq!(detailed.len(), 2);
        assert!(detailed.iter().all(|d| d.provider_id.is_none() && d.provider_name.is_none()));
    }
}
