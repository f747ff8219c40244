//! Calendar-day strings.
//!
//! The rollover marker always uses [`day_key`]. The human-facing forms are
//! derived from the same date but never compared against stored markers.

use chrono::{Local, NaiveDate};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `Sunday, 10/18/2026`
pub fn display_date(date: NaiveDate) -> String {
    date.format("%A, %m/%d/%Y").to_string()
}

/// `20261018`
pub fn player_number(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}
