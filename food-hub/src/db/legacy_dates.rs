//! Legacy date normalization
//!
//! Runs at startup after SQLx migrations. Files written by the old dashboard
//! hold CSV dates verbatim (`3/17/2025`, `3/5/2025 5:26`), while reports
//! compare dates as ISO text and the models only decode ISO. Every
//! non-ISO `Expiry_Date` and `Timestamp` is rewritten in place, in one
//! transaction. A value in no accepted layout refuses the open.

use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::utils::time::{parse_optional_date, parse_timestamp};
use crate::utils::{AppError, AppResult};

const ISO_DATE_GLOB: &str = "[0-9][0-9][0-9][0-9]-[0-9][0-9]-[0-9][0-9]";

/// Fractional seconds may follow
const ISO_TIMESTAMP_GLOB: &str =
    "[0-9][0-9][0-9][0-9]-[0-9][0-9]-[0-9][0-9] [0-9][0-9]:[0-9][0-9]:[0-9][0-9]*";

/// Rows rewritten by [`normalize_dates_if_needed`]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedDates {
    pub expiry_dates: usize,
    pub timestamps: usize,
}

/// Expiry dates also show up as full timestamps in some exports
fn legacy_expiry(value: &str) -> AppResult<Option<NaiveDate>> {
    parse_optional_date(value).or_else(|_| parse_timestamp(value).map(|ts| Some(ts.date())))
}

/// Rewrite non-ISO dates and timestamps left by the legacy dashboard
pub async fn normalize_dates_if_needed(pool: &SqlitePool) -> AppResult<NormalizedDates> {
    let expiry_rows: Vec<(i64, String)> = sqlx::query_as(
        "SELECT rowid, CAST(Expiry_Date AS TEXT) FROM food_listings WHERE Expiry_Date IS NOT NULL AND Expiry_Date NOT GLOB ?1",
    )
    .bind(ISO_DATE_GLOB)
    .fetch_all(pool)
    .await?;

    let timestamp_rows: Vec<(i64, String)> = sqlx::query_as(
        "SELECT rowid, CAST(Timestamp AS TEXT) FROM claims WHERE Timestamp IS NOT NULL AND Timestamp NOT GLOB ?1",
    )
    .bind(ISO_TIMESTAMP_GLOB)
    .fetch_all(pool)
    .await?;

    if expiry_rows.is_empty() && timestamp_rows.is_empty() {
        return Ok(NormalizedDates::default());
    }

    tracing::info!(
        expiry_dates = expiry_rows.len(),
        timestamps = timestamp_rows.len(),
        "Non-ISO dates detected, normalizing"
    );

    let mut tx = pool.begin().await?;

    for (rowid, raw) in &expiry_rows {
        let expiry = legacy_expiry(raw).map_err(|_| {
            AppError::validation(format!(
                "food_listings row {rowid}: unrecognized Expiry_Date '{raw}'"
            ))
        })?;
        sqlx::query("UPDATE food_listings SET Expiry_Date = ?1 WHERE rowid = ?2")
            .bind(expiry.map(|d| d.format("%Y-%m-%d").to_string()))
            .bind(rowid)
            .execute(&mut *tx)
            .await?;
    }

    for (rowid, raw) in &timestamp_rows {
        let timestamp = parse_timestamp(raw).map_err(|_| {
            AppError::validation(format!("claims row {rowid}: unrecognized Timestamp '{raw}'"))
        })?;
        sqlx::query("UPDATE claims SET Timestamp = ?1 WHERE rowid = ?2")
            .bind(timestamp.format("%Y-%m-%d %H:%M:%S").to_string())
            .bind(rowid)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    Ok(NormalizedDates {
        expiry_dates: expiry_rows.len(),
        timestamps: timestamp_rows.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::test_db;

    #[tokio::test]
    async fn iso_rows_are_left_alone() {
        let (_dir, db) = test_db().await;
        sqlx::query("INSERT INTO food_listings (Food_ID, Food_Name, Expiry_Date) VALUES (1, 'Rice', '2025-03-17')")
            .execute(&db.pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO claims (Claim_ID, Food_ID, Timestamp) VALUES (1, 1, '2025-03-10 09:30:00.250')")
            .execute(&db.pool)
            .await
            .unwrap();

        let normalized = normalize_dates_if_needed(&db.pool).await.unwrap();
        assert_eq!(normalized, NormalizedDates::default());
    }

    #[tokio::test]
    async fn rewrites_us_dates_and_blank_expiry() {
        let (_dir, db) = test_db().await;
        for sql in [
            "INSERT INTO food_listings (Food_ID, Food_Name, Expiry_Date) VALUES (1, 'Rice', '3/17/2025')",
            "INSERT INTO food_listings (Food_ID, Food_Name, Expiry_Date) VALUES (2, 'Soup', '')",
            "INSERT INTO food_listings (Food_ID, Food_Name, Expiry_Date) VALUES (3, 'Bread', '2025-03-18 00:00:00')",
            "INSERT INTO claims (Claim_ID, Food_ID, Timestamp) VALUES (1, 1, '3/5/2025 5:26')",
            "INSERT INTO claims (Claim_ID, Food_ID, Timestamp) VALUES (2, 1, '2025-03-06T10:15')",
        ] {
            sqlx::query(sql).execute(&db.pool).await.unwrap();
        }

        let normalized = normalize_dates_if_needed(&db.pool).await.unwrap();
        assert_eq!(
            normalized,
            NormalizedDates {
                expiry_dates: 3,
                timestamps: 2
            }
        );

        let expiry: Vec<Option<String>> =
            sqlx::query_scalar("SELECT CAST(Expiry_Date AS TEXT) FROM food_listings ORDER BY Food_ID")
                .fetch_all(&db.pool)
                .await
                .unwrap();
        assert_eq!(
            expiry,
            [Some("2025-03-17".to_string()), None, Some("2025-03-18".to_string())]
        );
        let timestamps: Vec<String> = sqlx::query_scalar("SELECT CAST(Timestamp AS TEXT) FROM claims ORDER BY Claim_ID")
            .fetch_all(&db.pool)
            .await
            .unwrap();
        assert_eq!(timestamps, ["2025-03-05 05:26:00", "2025-03-06 10:15:00"]);

        // Second pass finds nothing left to do
        assert_eq!(
            normalize_dates_if_needed(&db.pool).await.unwrap(),
            NormalizedDates::default()
        );
    }

    #[tokio::test]
    async fn unknown_layout_is_rejected_without_partial_writes() {
        let (_dir, db) = test_db().await;
        sqlx::query("INSERT INTO food_listings (Food_ID, Food_Name, Expiry_Date) VALUES (1, 'Rice', '3/17/2025')")
            .execute(&db.pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO food_listings (Food_ID, Food_Name, Expiry_Date) VALUES (2, 'Soup', 'next week')")
            .execute(&db.pool)
            .await
            .unwrap();

        let err = normalize_dates_if_needed(&db.pool).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().contains("next week"));

        let first: String = sqlx::query_scalar("SELECT CAST(Expiry_Date AS TEXT) FROM food_listings WHERE Food_ID = 1")
            .fetch_one(&db.pool)
            .await
            .unwrap();
        assert_eq!(first, "3/17/2025");
    }
}
