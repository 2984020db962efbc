//! Project number format: `PME-YYYYMMDD-NNN`.
//!
//! The date part is the business date the project was registered on and
//! `NNN` is the 1-based, zero-padded sequence within that date.

use chrono::{FixedOffset, NaiveDate};

use crate::types::Timestamp;

pub const PROJECT_NUMBER_PREFIX: &str = "PME";

/// Highest sequence representable in the three-digit suffix.
pub const MAX_DAILY_SEQUENCE: u32 = 999;

const DATE_FORMAT: &str = "%Y%m%d";

/// The prefix shared by every number issued on `date`, e.g. `PME-20241231-`.
pub fn day_prefix(date: NaiveDate) -> String {
    format!("{PROJECT_NUMBER_PREFIX}-{}-", date.format(DATE_FORMAT))
}

/// Format a project number. Returns `None` when `sequence` is outside
/// `1..=MAX_DAILY_SEQUENCE`.
pub fn format_project_number(date: NaiveDate, sequence: u32) -> Option<String> {
    if !(1..=MAX_DAILY_SEQUENCE).contains(&sequence) {
        return None;
    }
    Some(format!("{}{sequence:03}", day_prefix(date)))
}

/// Split a project number into its date and sequence.
pub fn parse_project_number(number: &str) -> Option<(NaiveDate, u32)> {
    let mut parts = number.split('-');
    let (Some(prefix), Some(date), Some(seq), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return None;
    };
    if prefix != PROJECT_NUMBER_PREFIX || seq.len() != 3 {
        return None;
    }
    let date = NaiveDate::parse_from_str(date, DATE_FORMAT).ok()?;
    let seq: u32 = seq.parse().ok()?;
    (seq >= 1).then_some((date, seq))
}

/// The sequence the next project on `date` should receive, given the numbers
/// already issued. Numbers from other dates are ignored.
pub fn next_sequence<'a>(date: NaiveDate, issued: impl IntoIterator<Item = &'a str>) -> u32 {
    issued
        .into_iter()
        .filter_map(parse_project_number)
        .filter(|(d, _)| *d == date)
        .map(|(_, seq)| seq)
        .max()
        .unwrap_or(0)
        + 1
}

/// The calendar date of `now` in the business time zone.
pub fn business_date(now: Timestamp, offset: FixedOffset) -> NaiveDate {
    now.with_timezone(&offset).date_naive()
}
