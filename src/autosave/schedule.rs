use anyhow::{Context as _, Result};
use chrono::{Datelike, Days, NaiveDate, Weekday};
use std::collections::BTreeMap;

use super::qualifier::QualifyingEntry;
use crate::config::DateBounds;

/// Qualifying entries grouped by the date their auto-save transfer goes out
pub type Schedule = BTreeMap<NaiveDate, Vec<QualifyingEntry>>;

/// Calendar date of an ISO 8601 timestamp like `2023-03-10T14:20:00-05:00`. The time of day
/// and the offset are ignored.
pub fn transaction_date(timestamp: &str) -> Result<NaiveDate> {
    let date = timestamp
        .split_once('T')
        .map_or(timestamp, |(date, _time)| date);
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .with_context(|| format!("Invalid transaction date {timestamp:?}"))
}

/// Transactions on a weekend aren't processed by the bank until the following Monday.
pub fn processing_date(date: NaiveDate) -> Result<NaiveDate> {
    let shift = match date.weekday() {
        Weekday::Sat => 2,
        Weekday::Sun => 1,
        _ => return Ok(date),
    };
    add_days(date, shift)
}

/// The auto-save transfer goes out on the business day after the transaction was processed.
pub fn auto_save_date(date: NaiveDate) -> Result<NaiveDate> {
    processing_date(add_days(processing_date(date)?, 1)?)
}

fn add_days(date: NaiveDate, days: u64) -> Result<NaiveDate> {
    date.checked_add_days(Days::new(days))
        .with_context(|| format!("Date out of range: {date} + {days} days"))
}

pub fn build_schedule(
    entries: impl IntoIterator<Item = QualifyingEntry>,
    bounds: &DateBounds,
) -> Result<Schedule> {
    let mut schedule = Schedule::new();
    for entry in entries {
        let date = transaction_date(&entry.date)?;
        if !bounds.contains(date) {
            log::debug!("Skipping {:?} on {date}, outside of date range", entry.description);
            continue;
        }
        schedule
            .entry(auto_save_date(date)?)
            .or_default()
            .push(entry);
    }
    Ok(schedule)
}
