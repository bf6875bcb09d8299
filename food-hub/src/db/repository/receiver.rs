//! Receiver Repository

use super::RepoResult;
use crate::utils::validation::{
    MAX_CITY_LEN, MAX_CONTACT_LEN, MAX_NAME_LEN, validate_required_text, validate_text_len,
};
use shared::ValidationError;
use shared::models::{Receiver, ReceiverCreate};
use sqlx::{SqliteConnection, SqlitePool};

const COLUMNS: &str =
    "Receiver_ID AS id, Name AS name, Type AS receiver_type, City AS city, Contact AS contact";

fn validate(data: &ReceiverCreate) -> Result<(), ValidationError> {
    validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&data.city, "city", MAX_CITY_LEN)?;
    validate_text_len(&data.contact, "contact", MAX_CONTACT_LEN)?;
    Ok(())
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Receiver>> {
    let receivers = sqlx::query_as::<_, Receiver>(&format!("SELECT {COLUMNS} FROM receivers"))
        .fetch_all(pool)
        .await?;
    Ok(receivers)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Receiver>> {
    let receiver = sqlx::query_as::<_, Receiver>(&format!(
        "SELECT {COLUMNS} FROM receivers WHERE Receiver_ID = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(receiver)
}

pub async fn find_by_city(pool: &SqlitePool, city: &str) -> RepoResult<Vec<Receiver>> {
    let receivers = sqlx::query_as::<_, Receiver>(&format!(
        "SELECT {COLUMNS} FROM receivers WHERE City = ?"
    ))
    .bind(city)
    .fetch_all(pool)
    .await?;
    Ok(receivers)
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM receivers")
        .fetch_one(pool)
        .await?;
    Ok(n)
}

pub async fn create(pool: &SqlitePool, data: ReceiverCreate) -> RepoResult<Receiver> {
    validate(&data)?;
    let receiver = sqlx::query_as::<_, Receiver>(&format!(
        "INSERT INTO receivers (Name, Type, City, Contact) VALUES (?, ?, ?, ?) RETURNING {COLUMNS}"
    ))
    .bind(&data.name)
    .bind(data.receiver_type)
    .bind(&data.city)
    .bind(&data.contact)
    .fetch_one(pool)
    .await?;
    tracing::debug!(id = receiver.id, name = %receiver.name, "Receiver created");
    Ok(receiver)
}

pub async fn create_with_id(
    pool: &SqlitePool,
    id: i64,
    data: ReceiverCreate,
) -> RepoResult<Receiver> {
    let mut conn = pool.acquire().await?;
    insert_with_id(&mut conn, id, &data).await
}

/// [`create_with_id`] on a caller-held connection or transaction
pub async fn insert_with_id(
    conn: &mut SqliteConnection,
    id: i64,
    data: &ReceiverCreate,
) -> RepoResult<Receiver> {
    validate(data)?;
    let receiver = sqlx::query_as::<_, Receiver>(&format!(
        "INSERT INTO receivers (Receiver_ID, Name, Type, City, Contact) VALUES (?, ?, ?, ?, ?) RETURNING {COLUMNS}"
    ))
    .bind(id)
    .bind(&data.name)
    .bind(data.receiver_type)
    .bind(&data.city)
    .bind(&data.contact)
    .fetch_one(&mut *conn)
    .await?;
    Ok(receiver)
}

/// Overwrite every field of receiver `id`; `None` when it does not exist
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: ReceiverCreate,
) -> RepoResult<Option<Receiver>> {
    validate(&data)?;
    let receiver = sqlx::query_as::<_, Receiver>(&format!(
        "UPDATE receivers SET Name = ?, Type = ?, City = ?, Contact = ? WHERE Receiver_ID = ? RETURNING {COLUMNS}"
    ))
    .bind(&data.name)
    .bind(data.receiver_type)
    .bind(&data.city)
    .bind(&data.contact)
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(receiver)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM receivers WHERE Receiver_ID = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
