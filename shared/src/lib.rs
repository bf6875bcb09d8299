//! Shared types for the food donation ledger
//!
//! Domain models, categorical enums and report row types used by the
//! storage crate and by whatever presentation layer sits on top of it.

pub mod error;
pub mod models;

// Re-exports
pub use error::ValidationError;
pub use serde::{Deserialize, Serialize};
