//! Provider Repository

use super::RepoResult;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_CITY_LEN, MAX_CONTACT_LEN, MAX_NAME_LEN, validate_required_text,
    validate_text_len,
};
use shared::ValidationError;
use shared::models::{Provider, ProviderCreate};
use sqlx::{SqliteConnection, SqlitePool};

const COLUMNS: &str = "Provider_ID AS id, Name AS name, Type AS provider_type, \
                       Address AS address, City AS city, Contact AS contact";

fn validate(data: &ProviderCreate) -> Result<(), ValidationError> {
    validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&data.city, "city", MAX_CITY_LEN)?;
    validate_text_len(&data.address, "address", MAX_ADDRESS_LEN)?;
    validate_text_len(&data.contact, "contact", MAX_CONTACT_LEN)?;
    Ok(())
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Provider>> {
    let providers = sqlx::query_as::<_, Provider>(&format!("SELECT {COLUMNS} FROM providers"))
        .fetch_all(pool)
        .await?;
    Ok(providers)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Provider>> {
    let provider = sqlx::query_as::<_, Provider>(&format!(
        "SELECT {COLUMNS} FROM providers WHERE Provider_ID = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(provider)
}

pub async fn find_by_city(pool: &SqlitePool, city: &str) -> RepoResult<Vec<Provider>> {
    let providers = sqlx::query_as::<_, Provider>(&format!(
        "SELECT {COLUMNS} FROM providers WHERE City = ?"
    ))
    .bind(city)
    .fetch_all(pool)
    .await?;
    Ok(providers)
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM providers")
        .fetch_one(pool)
        .await?;
    Ok(n)
}

/// Insert a provider; the ID is assigned by SQLite
pub async fn create(pool: &SqlitePool, data: ProviderCreate) -> RepoResult<Provider> {
    validate(&data)?;
    let provider = sqlx::query_as::<_, Provider>(&format!(
        "INSERT INTO providers (Name, Type, Address, City, Contact) VALUES (?, ?, ?, ?, ?) RETURNING {COLUMNS}"
    ))
    .bind(&data.name)
    .bind(data.provider_type)
    .bind(&data.address)
    .bind(&data.city)
    .bind(&data.contact)
    .fetch_one(pool)
    .await?;
    tracing::debug!(id = provider.id, name = %provider.name, "Provider created");
    Ok(provider)
}

/// Insert a provider under a caller-chosen ID (imports)
pub async fn create_with_id(
    pool: &SqlitePool,
    id: i64,
    data: ProviderCreate,
) -> RepoResult<Provider> {
    let mut conn = pool.acquire().await?;
    insert_with_id(&mut conn, id, &data).await
}

/// [`create_with_id`] on a caller-held connection or transaction
pub async fn insert_with_id(
    conn: &mut SqliteConnection,
    id: i64,
    data: &ProviderCreate,
) -> RepoResult<Provider> {
    validate(data)?;
    let provider = sqlx::query_as::<_, Provider>(&format!(
        "INSERT INTO providers (Provider_ID, Name, Type, Address, City, Contact) VALUES (?, ?, ?, ?, ?, ?) RETURNING {COLUMNS}"
    ))
    .bind(id)
    .bind(&data.name)
    .bind(data.provider_type)
    .bind(&data.address)
    .bind(&data.city)
    .bind(&data.contact)
    .fetch_one(&mut *conn)
    .await?;
    Ok(provider)
}

/// Overwrite every field of provider `id`
///
/// The provider's listings get their denormalized `Provider_Type` refreshed
/// in the same transaction. Returns `None` (and writes nothing) when `id`
/// does not exist.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: ProviderCreate,
) -> RepoResult<Option<Provider>> {
    validate(&data)?;
    let mut tx = pool.begin().await?;

    let provider = sqlx::query_as::<_, Provider>(&format!(
        "UPDATE providers SET Name = ?, Type = ?, Address = ?, City = ?, Contact = ? WHERE Provider_ID = ? RETURNING {COLUMNS}"
    ))
    .bind(&data.name)
    .bind(data.provider_type)
    .bind(&data.address)
    .bind(&data.city)
    .bind(&data.contact)
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(provider) = provider else {
        tx.rollback().await?;
        return Ok(None);
    };

    let refreshed = sqlx::query(
        "UPDATE food_listings SET Provider_Type = ?1 WHERE Provider_ID = ?2 AND Provider_Type IS NOT ?1",
    )
    .bind(provider.provider_type)
    .bind(id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    tx.commit().await?;

    if refreshed > 0 {
        tracing::debug!(id, refreshed, "Provider type copied to listings");
    }
    Ok(Some(provider))
}

/// Delete provider `id`; listings referencing it are left in place
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM providers WHERE Provider_ID = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
