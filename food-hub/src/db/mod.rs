//! Database Module
//!
//! Handles the SQLite connection pool and migrations. Repository and report
//! functions take `&SqlitePool`; nothing holds a connection between calls.

pub mod inspect;
pub mod legacy_dates;
pub mod report;
pub mod repository;

use std::path::Path;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};

use crate::utils::{AppError, AppResult};

/// Database service: owns a SQLite connection pool
#[derive(Clone)]
pub struct DbService {
    pub pool: SqlitePool,
}

impl DbService {
    /// Open (creating if missing) the database file, apply migrations and
    /// normalize legacy non-ISO dates
    ///
    /// WAL journal, normal sync, 5s busy timeout. Foreign keys stay OFF:
    /// deletes never cascade and orphaned references are allowed.
    pub async fn new(db_path: &Path, max_connections: u32) -> AppResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(false)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| {
                AppError::database(format!("Failed to open database {}: {e}", db_path.display()))
            })?;

        tracing::info!(
            path = %db_path.display(),
            max_connections,
            "Database connection established (SQLite WAL, busy_timeout=5000ms)"
        );

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");

        let normalized = legacy_dates::normalize_dates_if_needed(&pool).await?;
        if normalized != legacy_dates::NormalizedDates::default() {
            tracing::info!(?normalized, "Legacy dates normalized to ISO");
        }

        Ok(Self { pool })
    }

    /// Open an existing database file without creating or migrating it
    pub async fn open_read_only(db_path: &Path) -> AppResult<Self> {
        if !db_path.exists() {
            return Err(AppError::not_found(format!(
                "Database file {} does not exist",
                db_path.display()
            )));
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .read_only(true)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| {
                AppError::database(format!("Failed to open database {}: {e}", db_path.display()))
            })?;

        Ok(Self { pool })
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
