//! Initial data loading
//!
//! Two sources fill an empty database:
//!
//! - CSV exports (`providers.csv`, `receivers.csv`, `food_listings.csv`,
//!   `claims.csv`) with the legacy column headers, imported per table only
//!   while that table is empty
//! - a small built-in sample dataset, inserted only while `providers` is
//!   empty
//!
//! Every row is validated and inserted under its own ID inside one
//! transaction per table, so a bad row leaves the table untouched.

use std::fmt::Display;
use std::path::Path;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shared::models::{
    ClaimCreate, ClaimStatus, FoodListingCreate, FoodType, MealType, ProviderCreate, ProviderType,
    ReceiverCreate, ReceiverType,
};
use sqlx::{SqliteConnection, SqlitePool};

use crate::core::Config;
use crate::db::repository::{RepoResult, claim, food_listing, provider, receiver};
use crate::utils::time::{parse_optional_date, parse_timestamp};
use crate::utils::{AppError, AppResult};

/// Rows inserted per table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub providers: usize,
    pub receivers: usize,
    pub food_listings: usize,
    pub claims: usize,
}

impl SeedReport {
    pub fn total(&self) -> usize {
        self.providers + self.receivers + self.food_listings + self.claims
    }

    fn add(&mut self, other: SeedReport) {
        self.providers += other.providers;
        self.receivers += other.receivers;
        self.food_listings += other.food_listings;
        self.claims += other.claims;
    }
}

/// One CSV record shape and how it becomes an insert payload
trait SeedRow: DeserializeOwned {
    type Payload;
    const TABLE: &'static str;

    fn into_payload(self) -> AppResult<(i64, Self::Payload)>;

    async fn insert(conn: &mut SqliteConnection, id: i64, payload: &Self::Payload)
    -> RepoResult<()>;
}

#[derive(Debug, Deserialize)]
struct ProviderRow {
    #[serde(rename = "Provider_ID")]
    id: i64,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Type")]
    provider_type: String,
    #[serde(rename = "Address", default)]
    address: String,
    #[serde(rename = "City")]
    city: String,
    #[serde(rename = "Contact", default)]
    contact: String,
}

impl SeedRow for ProviderRow {
    type Payload = ProviderCreate;
    const TABLE: &'static str = "providers";

    fn into_payload(self) -> AppResult<(i64, ProviderCreate)> {
        Ok((
            self.id,
            ProviderCreate {
                name: self.name,
                provider_type: self.provider_type.parse()?,
                address: self.address,
                city: self.city,
                contact: self.contact,
            },
        ))
    }

    async fn insert(
        conn: &mut SqliteConnection,
        id: i64,
        payload: &ProviderCreate,
    ) -> RepoResult<()> {
        provider::insert_with_id(conn, id, payload).await.map(drop)
    }
}

#[derive(Debug, Deserialize)]
struct ReceiverRow {
    #[serde(rename = "Receiver_ID")]
    id: i64,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Type")]
    receiver_type: String,
    #[serde(rename = "City")]
    city: String,
    #[serde(rename = "Contact", default)]
    contact: String,
}

impl SeedRow for ReceiverRow {
    type Payload = ReceiverCreate;
    const TABLE: &'static str = "receivers";

    fn into_payload(self) -> AppResult<(i64, ReceiverCreate)> {
        Ok((
            self.id,
            ReceiverCreate {
                name: self.name,
                receiver_type: self.receiver_type.parse()?,
                city: self.city,
                contact: self.contact,
            },
        ))
    }

    async fn insert(
        conn: &mut SqliteConnection,
        id: i64,
        payload: &ReceiverCreate,
    ) -> RepoResult<()> {
        receiver::insert_with_id(conn, id, payload).await.map(drop)
    }
}

#[derive(Debug, Deserialize)]
struct FoodListingRow {
    #[serde(rename = "Food_ID")]
    id: i64,
    #[serde(rename = "Food_Name")]
    food_name: String,
    #[serde(rename = "Quantity")]
    quantity: i64,
    #[serde(rename = "Expiry_Date", default)]
    expiry_date: String,
    #[serde(rename = "Provider_ID")]
    provider_id: i64,
    #[serde(rename = "Provider_Type", default)]
    provider_type: String,
    #[serde(rename = "Location", default)]
    location: String,
    #[serde(rename = "Food_Type")]
    food_type: String,
    #[serde(rename = "Meal_Type")]
    meal_type: String,
}

impl SeedRow for FoodListingRow {
    type Payload = FoodListingCreate;
    const TABLE: &'static str = "food_listings";

    fn into_payload(self) -> AppResult<(i64, FoodListingCreate)> {
        // Blank provider type is filled from the provider on insert
        let provider_type = match self.provider_type.trim() {
            "" => None,
            text => Some(text.parse::<ProviderType>()?),
        };
        Ok((
            self.id,
            FoodListingCreate {
                food_name: self.food_name,
                quantity: self.quantity,
                expiry_date: parse_optional_date(&self.expiry_date)?,
                provider_id: self.provider_id,
                provider_type,
                location: self.location,
                food_type: self.food_type.parse()?,
                meal_type: self.meal_type.parse()?,
            },
        ))
    }

    async fn insert(
        conn: &mut SqliteConnection,
        id: i64,
        payload: &FoodListingCreate,
    ) -> RepoResult<()> {
        food_listing::insert_with_id(conn, id, payload).await.map(drop)
    }
}

#[derive(Debug, Deserialize)]
struct ClaimRow {
    #[serde(rename = "Claim_ID")]
    id: i64,
    #[serde(rename = "Food_ID")]
    food_id: i64,
    #[serde(rename = "Receiver_ID")]
    receiver_id: i64,
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "Timestamp")]
    timestamp: String,
}

impl SeedRow for ClaimRow {
    type Payload = ClaimCreate;
    const TABLE: &'static str = "claims";

    fn into_payload(self) -> AppResult<(i64, ClaimCreate)> {
        Ok((
            self.id,
            ClaimCreate {
                food_id: self.food_id,
                receiver_id: self.receiver_id,
                status: self.status.parse()?,
                timestamp: parse_timestamp(&self.timestamp)?,
            },
        ))
    }

    async fn insert(conn: &mut SqliteConnection, id: i64, payload: &ClaimCreate) -> RepoResult<()> {
        claim::insert_with_id(conn, id, payload).await.map(drop)
    }
}

/// Prefix caller-facing errors with the offending file and line
fn at_line(err: AppError, path: &Path, line: u64) -> AppError {
    let place = format!("{}, line {line}", path.display());
    match err {
        AppError::Validation(msg) => AppError::Validation(format!("{place}: {msg}")),
        AppError::Conflict(msg) => AppError::Conflict(format!("{place}: {msg}")),
        other => other,
    }
}

fn invalid_record(path: &Path, line: u64, err: impl Display) -> AppError {
    AppError::validation(format!("{}, line {line}: {err}", path.display()))
}

/// Parse and convert every record; the first bad one aborts
fn read_rows<R: SeedRow>(path: &Path) -> AppResult<Vec<(u64, i64, R::Payload)>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());
        let row: R = record
            .deserialize(Some(&headers))
            .map_err(|e| invalid_record(path, line, e))?;
        let (id, payload) = row.into_payload().map_err(|e| at_line(e, path, line))?;
        rows.push((line, id, payload));
    }
    Ok(rows)
}

async fn table_is_empty(pool: &SqlitePool, table: &str) -> AppResult<bool> {
    let n: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await?;
    Ok(n == 0)
}

async fn import_table<R: SeedRow>(pool: &SqlitePool, dir: &Path) -> AppResult<usize> {
    if !table_is_empty(pool, R::TABLE).await? {
        tracing::debug!(table = R::TABLE, "Table already has data, CSV import skipped");
        return Ok(0);
    }

    let path = dir.join(format!("{}.csv", R::TABLE));
    if !path.is_file() {
        tracing::warn!(table = R::TABLE, path = %path.display(), "CSV file not found, skipping");
        return Ok(0);
    }

    let rows = read_rows::<R>(&path)?;

    let mut tx = pool.begin().await?;
    for (line, id, payload) in &rows {
        R::insert(&mut tx, *id, payload)
            .await
            .map_err(|e| at_line(e.into(), &path, *line))?;
    }
    tx.commit().await?;

    tracing::info!(table = R::TABLE, rows = rows.len(), path = %path.display(), "CSV imported");
    Ok(rows.len())
}

/// Import `<dir>/<table>.csv` into each empty table
///
/// Tables are loaded parents first (providers, receivers, food listings,
/// claims) so a listing CSV without provider types can copy them from the
/// providers just imported.
pub async fn seed_from_csv_dir(pool: &SqlitePool, dir: &Path) -> AppResult<SeedReport> {
    Ok(SeedReport {
        providers: import_table::<ProviderRow>(pool, dir).await?,
        receivers: import_table::<ReceiverRow>(pool, dir).await?,
        food_listings: import_table::<FoodListingRow>(pool, dir).await?,
        claims: import_table::<ClaimRow>(pool, dir).await?,
    })
}

fn sample_providers() -> Vec<(i64, ProviderCreate)> {
    let p = |name: &str, provider_type, address: &str, city: &str, contact: &str| ProviderCreate {
        name: name.into(),
        provider_type,
        address: address.into(),
        city: city.into(),
        contact: contact.into(),
    };
    vec![
        (1, p("Green Grocery", ProviderType::GroceryStore, "123 Main St", "New York", "+1-123-456-7890")),
        (2, p("Fresh Restaurant", ProviderType::Restaurant, "456 Oak Ave", "Los Angeles", "+1-234-567-8901")),
        (3, p("Helping Hands", ProviderType::Ngo, "789 Pine Rd", "Chicago", "+1-345-678-9012")),
        (4, p("City Market", ProviderType::Supermarket, "321 Elm St", "New York", "+1-456-789-0123")),
        (5, p("Community Kitchen", ProviderType::CateringService, "654 Maple Dr", "Chicago", "+1-567-890-1234")),
    ]
}

fn sample_food_listings() -> Vec<(i64, FoodListingCreate)> {
    use FoodType::*;
    use MealType::*;

    let f = |name: &str, quantity, day: u32, provider_id, location: &str, food_type, meal_type| {
        FoodListingCreate {
            food_name: name.into(),
            quantity,
            expiry_date: NaiveDate::from_ymd_opt(2025, 3, day),
            provider_id,
            provider_type: None,
            location: location.into(),
            food_type,
            meal_type,
        }
    };
    vec![
        (1, f("Apples", 10, 20, 1, "123 Main St", Vegan, Snacks)),
        (2, f("Bread", 5, 18, 1, "123 Main St", Vegetarian, Breakfast)),
        (3, f("Rice", 20, 25, 2, "456 Oak Ave", Vegan, Lunch)),
        (4, f("Vegetables", 15, 22, 2, "456 Oak Ave", Vegan, Dinner)),
        (5, f("Milk", 8, 19, 4, "321 Elm St", Vegetarian, Breakfast)),
        (6, f("Chicken", 12, 21, 2, "456 Oak Ave", NonVegetarian, Dinner)),
        (7, f("Pasta", 7, 24, 5, "654 Maple Dr", Vegetarian, Lunch)),
        (8, f("Salad", 10, 23, 3, "789 Pine Rd", Vegan, Lunch)),
        (9, f("Soup", 15, 26, 5, "654 Maple Dr", Vegetarian, Dinner)),
        (10, f("Yogurt", 6, 20, 4, "321 Elm St", Vegetarian, Snacks)),
    ]
}

fn sample_receivers() -> Vec<(i64, ReceiverCreate)> {
    let r = |name: &str, receiver_type, city: &str, contact: &str| ReceiverCreate {
        name: name.into(),
        receiver_type,
        city: city.into(),
        contact: contact.into(),
    };
    vec![
        (1, r("City Shelter", ReceiverType::Shelter, "New York", "+1-111-222-3333")),
        (2, r("Food Bank", ReceiverType::Ngo, "Los Angeles", "+1-222-333-4444")),
        (3, r("John Doe", ReceiverType::Individual, "Chicago", "+1-333-444-5555")),
        (4, r("Community Center", ReceiverType::Charity, "New York", "+1-444-555-6666")),
        (5, r("Salvation Army", ReceiverType::Ngo, "Los Angeles", "+1-555-666-7777")),
    ]
}

fn sample_claims() -> Vec<(i64, ClaimCreate)> {
    use ClaimStatus::*;

    // Claim n is on listing n, made on March (9 + n) at (9 + n):00
    let statuses = [
        (1, Completed),
        (2, Pending),
        (3, Cancelled),
        (4, Completed),
        (5, Pending),
        (1, Completed),
        (2, Completed),
        (3, Pending),
        (4, Completed),
        (5, Cancelled),
    ];
    statuses
        .into_iter()
        .zip(1_i64..)
        .filter_map(|((receiver_id, status), n)| {
            let timestamp = NaiveDate::from_ymd_opt(2025, 3, 9 + n as u32)?
                .and_hms_opt(9 + n as u32, 0, 0)?;
            Some((
                n,
                ClaimCreate {
                    food_id: n,
                    receiver_id,
                    status,
                    timestamp,
                },
            ))
        })
        .collect()
}

/// Insert the built-in sample ledger when there are no providers yet
///
/// 5 providers (New York, Los Angeles, Chicago, New York, Chicago),
/// 10 listings expiring 2025-03-18 to 2025-03-26, 5 receivers and 10 claims.
pub async fn seed_sample_data(pool: &SqlitePool) -> AppResult<SeedReport> {
    if !table_is_empty(pool, "providers").await? {
        tracing::info!("Database already has providers, sample data skipped");
        return Ok(SeedReport::default());
    }

    let providers = sample_providers();
    let listings = sample_food_listings();
    let receivers = sample_receivers();
    let claims = sample_claims();

    let mut tx = pool.begin().await?;
    for (id, data) in &providers {
        provider::insert_with_id(&mut tx, *id, data).await?;
    }
    for (id, data) in &listings {
        food_listing::insert_with_id(&mut tx, *id, data).await?;
    }
    for (id, data) in &receivers {
        receiver::insert_with_id(&mut tx, *id, data).await?;
    }
    for (id, data) in &claims {
        claim::insert_with_id(&mut tx, *id, data).await?;
    }
    tx.commit().await?;

    let report = SeedReport {
        providers: providers.len(),
        receivers: receivers.len(),
        food_listings: listings.len(),
        claims: claims.len(),
    };
    tracing::info!(rows = report.total(), "Sample data inserted");
    Ok(report)
}

/// Startup seeding: CSV files first, then the sample dataset if enabled
pub async fn seed_database(pool: &SqlitePool, config: &Config) -> AppResult<SeedReport> {
    let mut report = seed_from_csv_dir(pool, &config.seed_dir).await?;
    if config.seed_sample_data {
        report.add(seed_sample_data(pool).await?);
    }
    Ok(report)
}
