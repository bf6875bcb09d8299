use std::path::PathBuf;

use chrono_tz::Tz;

use crate::utils::time::parse_timezone;
use crate::utils::AppResult;

/// Runtime configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | . | base directory for relative paths |
/// | DATABASE_PATH | food_waste.db | SQLite file |
/// | SEED_DIR | . | directory holding providers.csv, receivers.csv, food_listings.csv, claims.csv |
/// | SEED_SAMPLE_DATA | false | insert the built-in sample dataset into an empty database |
/// | TIMEZONE | UTC | business timezone used to compute "today" |
/// | MAX_CONNECTIONS | 5 | pool size |
/// | LOG_LEVEL | info | tracing level |
/// | LOG_DIR | (unset) | daily rolling log directory |
/// | ENVIRONMENT | development | environment name |
///
/// # Example
///
/// ```ignore
/// DATABASE_PATH=/data/food.db TIMEZONE=Asia/Kolkata cargo run --bin food-hub
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: PathBuf,
    /// Relative paths are resolved against `work_dir`
    pub database_path: PathBuf,
    pub seed_dir: PathBuf,
    pub seed_sample_data: bool,
    pub timezone: Tz,
    pub max_connections: u32,
    pub log_level: String,
    pub log_dir: Option<String>,
    /// development | staging | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    ///
    /// Only an unparsable `TIMEZONE` is an error; other malformed numbers or
    /// flags fall back to their defaults.
    pub fn from_env() -> AppResult<Self> {
        let work_dir = PathBuf::from(std::env::var("WORK_DIR").unwrap_or_else(|_| ".".into()));
        let database_path = resolve(
            &work_dir,
            std::env::var("DATABASE_PATH").unwrap_or_else(|_| "food_waste.db".into()),
        );
        let seed_dir = resolve(
            &work_dir,
            std::env::var("SEED_DIR").unwrap_or_else(|_| ".".into()),
        );
        let timezone = parse_timezone(&std::env::var("TIMEZONE").unwrap_or_else(|_| "UTC".into()))?;

        Ok(Self {
            work_dir,
            database_path,
            seed_dir,
            seed_sample_data: std::env::var("SEED_SAMPLE_DATA")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            timezone,
            max_connections: std::env::var("MAX_CONNECTIONS")
                .ok()
                .and_then(|p| p.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(5),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        })
    }

    /// Configuration rooted at `work_dir` with everything else defaulted
    ///
    /// Used by tests; ignores the environment.
    pub fn with_work_dir(work_dir: impl Into<PathBuf>) -> Self {
        let work_dir = work_dir.into();
        Self {
            database_path: work_dir.join("food_waste.db"),
            seed_dir: work_dir.clone(),
            work_dir,
            seed_sample_data: false,
            timezone: chrono_tz::UTC,
            max_connections: 5,
            log_level: "info".into(),
            log_dir: None,
            environment: "development".into(),
        }
    }
}

fn resolve(base: &std::path::Path, value: String) -> PathBuf {
    let path = PathBuf::from(value);
    if path.is_absolute() { path } else { base.join(path) }
}
