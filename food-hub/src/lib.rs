//! Food Hub - food donation ledger
//!
//! # Overview
//!
//! Providers (restaurants, grocery stores, NGOs...) list surplus food;
//! receivers (shelters, charities, individuals) claim it. This crate owns
//! the SQLite storage of that ledger and everything computed from it:
//!
//! - **Repositories** (`db::repository`): CRUD for providers, receivers,
//!   food listings and claims
//! - **Reports** (`db::report`): KPIs, distributions, expiry buckets,
//!   rankings and the recommendations bundle
//! - **Seeding** (`seed`): CSV import and a built-in sample dataset
//! - **Inspection** (`db::inspect`): read-only table overview
//!
//! # Module layout
//!
//! ```text
//! food-hub/src/
//! ├── core/          # configuration
//! ├── db/            # pool, migrations, repositories, reports
//! ├── seed.rs        # initial data
//! ├── utils/         # errors, logging, time, validation
//! └── bin/           # check-db
//! ```

pub mod core;
pub mod db;
pub mod seed;
pub mod utils;

pub use core::Config;
pub use db::DbService;
pub use db::repository::{RepoError, RepoResult};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

/// Load `.env`, read the configuration and install the logger it describes
pub fn setup_environment() -> AppResult<Config> {
    // A missing .env file is normal
    let _ = dotenv::dotenv();

    let config = Config::from_env()?;
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    Ok(config)
}
