//! Data models
//!
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).
//!
//! Categorical columns are closed enums. Each one stores its legacy display
//! text (e.g. `"Grocery Store"`) so existing database files stay readable.

pub mod category;
pub mod claim;
pub mod expiry;
pub mod food_listing;
pub mod provider;
pub mod receiver;
pub mod report;

// Re-exports
pub use category::*;
pub use claim::*;
pub use expiry::*;
pub use food_listing::*;
pub use provider::*;
pub use receiver::*;
pub use report::*;
