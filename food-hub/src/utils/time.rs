//! Date helpers
//!
//! Reports take the reference date as a parameter. The only place "now"
//! is read is [`today`], called by the binaries with the configured
//! business timezone.

use chrono::{NaiveDate, NaiveDateTime};
use chrono_tz::Tz;

use super::{AppError, AppResult};

/// Accepted calendar date layouts, ISO first
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Accepted timestamp layouts, ISO first
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Current calendar date in the business timezone
pub fn today(tz: Tz) -> NaiveDate {
    chrono::Utc::now().with_timezone(&tz).date_naive()
}

/// Parse a date (`YYYY-MM-DD` or `M/D/YYYY`)
pub fn parse_date(value: &str) -> AppResult<NaiveDate> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .ok_or_else(|| AppError::validation(format!("Invalid date format: {value}")))
}

/// Parse an optional date; blank means "no date"
pub fn parse_optional_date(value: &str) -> AppResult<Option<NaiveDate>> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    parse_date(value).map(Some)
}

/// Parse a timestamp; a bare date is taken as midnight
pub fn parse_timestamp(value: &str) -> AppResult<NaiveDateTime> {
    let value = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            parse_date(value)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| AppError::validation(format!("Invalid timestamp format: {value}")))
}

/// Parse a timezone name such as `Europe/Madrid`
pub fn parse_timezone(name: &str) -> AppResult<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|e| AppError::config(format!("Invalid timezone '{name}': {e}")))
}
