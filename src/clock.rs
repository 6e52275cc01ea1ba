//! UTC clock readings as decimal stamps.
//!
//! A date stamp is the decimal number `YYYYMMDD` and a date-time stamp is `YYYYMMDDHHMMSS`, so
//! that both compare in calendar order.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Utc};

/// Returns today's UTC date as `YYYYMMDD`.
pub fn utc_date() -> u64 {
    date_stamp(Utc::now().date_naive())
}

/// Returns the current UTC date and time as `YYYYMMDDHHMMSS`.
pub fn utc_date_time() -> u64 {
    date_time_stamp(Utc::now().naive_utc())
}

/// Converts a date into its `YYYYMMDD` stamp.
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use dtuuid::clock::date_stamp;
///
/// let date = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
/// assert_eq!(date_stamp(date), 20241201);
/// ```
pub fn date_stamp(date: NaiveDate) -> u64 {
    // years before the common era have no decimal stamp
    let year = date.year().max(0) as u64;
    year * 10_000 + date.month() as u64 * 100 + date.day() as u64
}

/// Converts a date and time into its `YYYYMMDDHHMMSS` stamp.
pub fn date_time_stamp(date_time: NaiveDateTime) -> u64 {
    let time = date_time.time();
    date_stamp(date_time.date()) * 1_000_000
        + time.hour() as u64 * 10_000
        + time.minute() as u64 * 100
        + time.second() as u64
}
