//! Calendar day utilities

use chrono::{Days, Local, NaiveDate};

use crate::{Error, Result};

/// Day format used in the published schedule (readable by JavaScript `Date`)
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Today's local calendar date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a `YYYY-MM-DD` day
pub fn parse_day(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DAY_FORMAT)
        .map_err(|e| Error::InvalidInput(format!("Invalid day '{}': {}", value, e)))
}

/// Format a day as `YYYY-MM-DD`
pub fn format_day(day: NaiveDate) -> String {
    day.format(DAY_FORMAT).to_string()
}

/// Whole days from `from` to `to` (negative when `to` is earlier)
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// The day after `day`
pub fn next_day(day: NaiveDate) -> Result<NaiveDate> {
    day.checked_add_days(Days::new(1))
        .ok_or_else(|| Error::InvalidInput(format!("No day after {}", day)))
}
