//! Utility module
//!
//! - [`AppError`] / [`AppResult`] - application error type
//! - [`logger`] - tracing subscriber setup
//! - [`time`] - date parsing and the reference-date clock
//! - [`validation`] - payload field checks

pub mod error;
pub mod logger;
pub mod time;
pub mod validation;

pub use error::{AppError, AppResult};
