//! End-to-end ledger scenarios against a real database file
//!
//! Each test opens its own file in a temp directory through `DbService`,
//! the same way the binaries do.

use chrono::{NaiveDate, NaiveDateTime};
use food_hub::db::report::{self, distribution, expiry, ranking, unclaimed};
use food_hub::db::repository::{claim, food_listing, provider, receiver};
use food_hub::db::inspect;
use food_hub::{AppError, Config, DbService, seed};
use shared::models::{
    ClaimCreate, ClaimStatus, ExpiryStatus, FoodListingCreate, FoodType, ListingFilter, MealType,
    ProviderCreate, ProviderType, ReceiverCreate, ReceiverType,
};
use tempfile::TempDir;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
}

fn at(d: u32, hour: u32) -> NaiveDateTime {
    day(d).and_hms_opt(hour, 0, 0).unwrap()
}

async fn open(dir: &TempDir) -> DbService {
    DbService::new(&dir.path().join("food_waste.db"), 4).await.unwrap()
}

async fn seeded() -> (TempDir, DbService) {
    let dir = tempfile::tempdir().unwrap();
    let db = open(&dir).await;
    let mut config = Config::with_work_dir(dir.path());
    config.seed_sample_data = true;
    seed::seed_database(&db.pool, &config).await.unwrap();
    (dir, db)
}

#[tokio::test]
async fn donation_lifecycle() {
    let (_dir, db) = seeded().await;
    let today = day(20);

    // A new bakery lists bread that expires tomorrow
    let bakery = provider::create(
        &db.pool,
        ProviderCreate {
            name: "Corner Bakery".into(),
            provider_type: ProviderType::Restaurant,
            address: "77 Baker St".into(),
            city: "Boston".into(),
            contact: "+1-617-555-0101".into(),
        },
    )
    .await
    .unwrap();
    let bread = food_listing::create(
        &db.pool,
        FoodListingCreate {
            food_name: "Sourdough".into(),
            quantity: 12,
            expiry_date: Some(day(21)),
            provider_id: bakery.id,
            provider_type: None,
            location: "77 Baker St".into(),
            food_type: FoodType::Vegan,
            meal_type: MealType::Breakfast,
        },
    )
    .await
    .unwrap();

    let boston = food_listing::search(&db.pool, &ListingFilter::city("Boston"), today)
        .await
        .unwrap();
    assert_eq!(boston.len(), 1);
    assert_eq!(boston[0].provider_name, "Corner Bakery");
    assert!(
        unclaimed::unclaimed_available(&db.pool, today)
            .await
            .unwrap()
            .iter()
            .any(|l| l.food_id == bread.id)
    );

    // A shelter claims it, then the claim is confirmed
    let shelter = receiver::create(
        &db.pool,
        ReceiverCreate {
            name: "Harbor Shelter".into(),
            receiver_type: ReceiverType::Shelter,
            city: "Boston".into(),
            contact: "+1-617-555-0199".into(),
        },
    )
    .await
    .unwrap();
    let pending = claim::create(
        &db.pool,
        ClaimCreate {
            food_id: bread.id,
            receiver_id: shelter.id,
            status: ClaimStatus::Pending,
            timestamp: at(20, 9),
        },
    )
    .await
    .unwrap();
    let before = report::kpi_snapshot(&db.pool, today).await.unwrap();

    let mut confirmed = ClaimCreate::from(pending.clone());
    confirmed.status = ClaimStatus::Claimed;
    claim::update(&db.pool, pending.id, confirmed).await.unwrap().unwrap();

    let after = report::kpi_snapshot(&db.pool, today).await.unwrap();
    assert_eq!(after.pending_claims, before.pending_claims - 1);
    assert_eq!(after.claimed_items, before.claimed_items + 1);
    assert!(unclaimed::unclaimed_listings(&db.pool).await.unwrap().is_empty());

    let top = ranking::most_claimed_foods(&db.pool, 10).await.unwrap();
    assert_eq!(top[0].food_name, "Sourdough");

    let detailed = claim::find_all_detailed(&db.pool).await.unwrap();
    assert_eq!(detailed[0].claim_id, pending.id);
    assert_eq!(detailed[0].receiver_name, "Harbor Shelter");
    assert_eq!(detailed[0].provider_city.as_deref(), Some("Boston"));
}

#[tokio::test]
async fn expiry_buckets_agree_with_kpis() {
    let (_dir, db) = seeded().await;

    for d in [15, 18, 20, 23, 24, 27, 31] {
        let today = day(d);
        let kpis = report::kpi_snapshot(&db.pool, today).await.unwrap();
        let buckets = expiry::expiry_distribution(&db.pool, today).await.unwrap();

        assert_eq!(buckets.iter().map(|b| b.count).sum::<i64>(), kpis.total_food);
        let expired = buckets
            .iter()
            .find(|b| b.status == ExpiryStatus::Expired)
            .unwrap();
        assert_eq!(expired.count, kpis.expired_food, "on the {d}th");
        assert_eq!(
            expiry::expired_listings(&db.pool, today).await.unwrap().len() as i64,
            kpis.expired_food
        );
    }
}

#[tokio::test]
async fn city_distribution_scenario() {
    let (_dir, db) = seeded().await;
    let rows = distribution::city_distribution(&db.pool).await.unwrap();

    let new_york = rows
        .iter()
        .find(|r| r.city.as_deref() == Some("New York"))
        .unwrap();
    let from_ny_providers = food_listing::find_all(&db.pool)
        .await
        .unwrap()
        .iter()
        .filter(|l| l.provider_id == 1 || l.provider_id == 4)
        .count() as i64;
    assert_eq!(new_york.food_count, from_ny_providers);
    assert_eq!(rows.iter().map(|r| r.food_count).sum::<i64>(), 10);
}

#[tokio::test]
async fn high_cancellation_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let db = open(&dir).await;

    let diner = provider::create(
        &db.pool,
        ProviderCreate {
            name: "Night Diner".into(),
            provider_type: ProviderType::Restaurant,
            address: "5 Late Ave".into(),
            city: "Austin".into(),
            contact: "555-0105".into(),
        },
    )
    .await
    .unwrap();

    // Claims spread over two of the diner's listings
    let mut listing_ids = Vec::new();
    for name in ["Burgers", "Fries"] {
        let listing = food_listing::create(
            &db.pool,
            FoodListingCreate {
                food_name: name.into(),
                quantity: 10,
                expiry_date: Some(day(25)),
                provider_id: diner.id,
                provider_type: None,
                location: "5 Late Ave".into(),
                food_type: FoodType::NonVegetarian,
                meal_type: MealType::Dinner,
            },
        )
        .await
        .unwrap();
        listing_ids.push(listing.id);
    }
    let statuses = [
        ClaimStatus::Pending,
        ClaimStatus::Pending,
        ClaimStatus::Claimed,
        ClaimStatus::Cancelled,
        ClaimStatus::Cancelled,
    ];
    for (i, status) in statuses.into_iter().enumerate() {
        claim::create(
            &db.pool,
            ClaimCreate {
                food_id: listing_ids[i % 2],
                receiver_id: 1,
                status,
                timestamp: at(20, 8 + i as u32),
            },
        )
        .await
        .unwrap();
    }

    let flagged = ranking::high_cancellation_providers(&db.pool, report::DEFAULT_CANCELLATION_THRESHOLD)
        .await
        .unwrap();
    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0].name, "Night Diner");
    assert!((flagged[0].cancellation_rate - 40.0).abs() < 1e-9);

    assert!(
        ranking::high_cancellation_providers(&db.pool, 40.0)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn concurrent_reports_share_the_pool() {
    let (_dir, db) = seeded().await;
    let today = day(20);

    let mut handles = Vec::new();
    for _ in 0..8 {
        let pool = db.pool.clone();
        handles.push(tokio::spawn(async move {
            report::recommendations(&pool, today).await
        }));
    }
    for handle in handles {
        let recs = handle.await.unwrap().unwrap();
        assert_eq!(recs.expiring_soon.len(), 5);
    }
}

#[tokio::test]
async fn reopen_and_inspect_read_only() {
    let (dir, db) = seeded().await;
    db.close().await;

    // Reopening runs migrations again without touching data
    let db = open(&dir).await;
    assert_eq!(provider::count(&db.pool).await.unwrap(), 5);
    db.close().await;

    let ro = DbService::open_read_only(&dir.path().join("food_waste.db"))
        .await
        .unwrap();
    let summaries = inspect::inspect(&ro.pool).await.unwrap();
    let total: i64 = summaries.iter().map(|s| s.row_count).sum();
    assert_eq!(total, 30);

    let err = provider::delete(&ro.pool, 1).await.unwrap_err();
    assert!(matches!(err, food_hub::RepoError::Database(_)));

    let missing = DbService::open_read_only(&dir.path().join("nope.db")).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
}
