//! Food Listing Repository

use super::{RepoError, RepoResult};
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, validate_quantity, validate_required_text, validate_text_len,
};
use chrono::NaiveDate;
use shared::ValidationError;
use shared::models::{
    FoodListing, FoodListingCreate, FoodListingDetail, ListingFilter, ProviderType, add_days,
};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

const COLUMNS: &str = "Food_ID AS id, Food_Name AS food_name, Quantity AS quantity, \
                       Expiry_Date AS expiry_date, Provider_ID AS provider_id, \
                       Provider_Type AS provider_type, Location AS location, \
                       Food_Type AS food_type, Meal_Type AS meal_type";

const DETAIL_SELECT: &str = "SELECT fl.Food_ID AS id, fl.Food_Name AS food_name, \
                             fl.Quantity AS quantity, fl.Expiry_Date AS expiry_date, \
                             fl.Provider_ID AS provider_id, fl.Provider_Type AS provider_type, \
                             fl.Location AS location, fl.Food_Type AS food_type, \
                             fl.Meal_Type AS meal_type, p.Name AS provider_name, \
                             p.Contact AS provider_contact, p.City AS provider_city \
                             FROM food_listings fl \
                             JOIN providers p ON fl.Provider_ID = p.Provider_ID";

fn validate(data: &FoodListingCreate) -> Result<(), ValidationError> {
    validate_required_text(&data.food_name, "food_name", MAX_NAME_LEN)?;
    validate_quantity(data.quantity)?;
    validate_text_len(&data.location, "location", MAX_ADDRESS_LEN)?;
    Ok(())
}

/// The provider type to store: the payload's, or the provider's current one
async fn resolve_provider_type(
    conn: &mut SqliteConnection,
    data: &FoodListingCreate,
) -> RepoResult<ProviderType> {
    if let Some(provider_type) = data.provider_type {
        return Ok(provider_type);
    }
    sqlx::query_scalar::<_, Option<ProviderType>>("SELECT Type FROM providers WHERE Provider_ID = ?")
        .bind(data.provider_id)
        .fetch_optional(&mut *conn)
        .await?
        .flatten()
        .ok_or_else(|| {
            RepoError::Validation(format!(
                "Provider {} not found; provider_type must be given explicitly",
                data.provider_id
            ))
        })
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<FoodListing>> {
    let listings = sqlx::query_as::<_, FoodListing>(&format!("SELECT {COLUMNS} FROM food_listings"))
        .fetch_all(pool)
        .await?;
    Ok(listings)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<FoodListing>> {
    let listing = sqlx::query_as::<_, FoodListing>(&format!(
        "SELECT {COLUMNS} FROM food_listings WHERE Food_ID = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(listing)
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM food_listings")
        .fetch_one(pool)
        .await?;
    Ok(n)
}

/// Listings joined with provider details, narrowed by `filter`
///
/// Only listings whose provider still exists are returned. With an expiry
/// window the result includes already-expired listings and is ordered by
/// expiry date; listings without a date never match a window.
pub async fn search(
    pool: &SqlitePool,
    filter: &ListingFilter,
    today: NaiveDate,
) -> RepoResult<Vec<FoodListingDetail>> {
    let mut qb = QueryBuilder::<Sqlite>::new(DETAIL_SELECT);
    qb.push(" WHERE 1 = 1");

    if let Some(city) = &filter.city {
        qb.push(" AND p.City = ").push_bind(city.clone());
    }
    if let Some(food_type) = filter.food_type {
        qb.push(" AND fl.Food_Type = ").push_bind(food_type);
    }
    if let Some(meal_type) = filter.meal_type {
        qb.push(" AND fl.Meal_Type = ").push_bind(meal_type);
    }
    if let Some(provider_type) = filter.provider_type {
        qb.push(" AND fl.Provider_Type = ").push_bind(provider_type);
    }
    if let Some(days) = filter.expiring_within_days {
        qb.push(" AND fl.Expiry_Date <= ")
            .push_bind(add_days(today, u64::from(days)));
        qb.push(" ORDER BY fl.Expiry_Date, fl.Food_ID");
    }

    tracing::debug!(?filter, %today, "Searching food listings");

    let listings = qb
        .build_query_as::<FoodListingDetail>()
        .fetch_all(pool)
        .await?;
    Ok(listings)
}

/// Insert a listing; the ID is assigned by SQLite
///
/// Without an explicit `provider_type` the provider must exist, since its
/// type is copied onto the listing.
pub async fn create(pool: &SqlitePool, data: FoodListingCreate) -> RepoResult<FoodListing> {
    validate(&data)?;
    let mut tx = pool.begin().await?;
    let provider_type = resolve_provider_type(&mut tx, &data).await?;

    let listing = sqlx::query_as::<_, FoodListing>(&format!(
        "INSERT INTO food_listings (Food_Name, Quantity, Expiry_Date, Provider_ID, Provider_Type, Location, Food_Type, Meal_Type) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING {COLUMNS}"
    ))
    .bind(&data.food_name)
    .bind(data.quantity)
    .bind(data.expiry_date)
    .bind(data.provider_id)
    .bind(provider_type)
    .bind(&data.location)
    .bind(data.food_type)
    .bind(data.meal_type)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    tracing::debug!(id = listing.id, provider_id = listing.provider_id, "Food listing created");
    Ok(listing)
}

pub async fn create_with_id(
    pool: &SqlitePool,
    id: i64,
    data: FoodListingCreate,
) -> RepoResult<FoodListing> {
    let mut tx = pool.begin().await?;
    let listing = insert_with_id(&mut tx, id, &data).await?;
    tx.commit().await?;
    Ok(listing)
}

/// [`create_with_id`] on a caller-held connection or transaction
pub async fn insert_with_id(
    conn: &mut SqliteConnection,
    id: i64,
    data: &FoodListingCreate,
) -> RepoResult<FoodListing> {
    validate(data)?;
    let provider_type = resolve_provider_type(conn, data).await?;

    let listing = sqlx::query_as::<_, FoodListing>(&format!(
        "INSERT INTO food_listings (Food_ID, Food_Name, Quantity, Expiry_Date, Provider_ID, Provider_Type, Location, Food_Type, Meal_Type) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING {COLUMNS}"
    ))
    .bind(id)
    .bind(&data.food_name)
    .bind(data.quantity)
    .bind(data.expiry_date)
    .bind(data.provider_id)
    .bind(provider_type)
    .bind(&data.location)
    .bind(data.food_type)
    .bind(data.meal_type)
    .fetch_one(&mut *conn)
    .await?;
    Ok(listing)
}

/// Overwrite every field of listing `id`; `None` when it does not exist
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: FoodListingCreate,
) -> RepoResult<Option<FoodListing>> {
    validate(&data)?;
    let mut tx = pool.begin().await?;

    // A missing listing is a no-op even when the provider is gone too
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM food_listings WHERE Food_ID = ?)")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
    if !exists {
        return Ok(None);
    }
    let provider_type = resolve_provider_type(&mut tx, &data).await?;

    let listing = sqlx::query_as::<_, FoodListing>(&format!(
        "UPDATE food_listings SET Food_Name = ?, Quantity = ?, Expiry_Date = ?, Provider_ID = ?, \
         Provider_Type = ?, Location = ?, Food_Type = ?, Meal_Type = ? \
         WHERE Food_ID = ? RETURNING {COLUMNS}"
    ))
    .bind(&data.food_name)
    .bind(data.quantity)
    .bind(data.expiry_date)
    .bind(data.provider_id)
    .bind(provider_type)
    .bind(&data.location)
    .bind(data.food_type)
    .bind(data.meal_type)
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(listing)
}

/// Delete listing `id`; claims referencing it are left in place
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM food_listings WHERE Food_ID = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
