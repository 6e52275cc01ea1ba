//! Identifiers stamped with a UTC date.

use crate::encoded::{two_digits, Encoded, Encoding};
use crate::{clock, Error};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::fmt;

/// Layout of a `YYYYMMDD` stamp in the first 4 bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateEncoding;

impl Encoding for DateEncoding {
    const NAME: &'static str = "DateUuid";
    const PREFIX_BYTES: usize = 4;

    type Fields = DateParts;

    fn now() -> u64 {
        clock::utc_date()
    }

    /// Takes the last four digits as month and day and everything before them as the year.
    fn split(digits: &str) -> Option<DateParts> {
        let at = digits.len().checked_sub(4).filter(|at| *at > 0)?;
        DateParts::new(
            digits[..at].parse().ok()?,
            two_digits(digits, at)?,
            two_digits(digits, at + 2)?,
        )
    }

    fn invalid(value: String) -> Error {
        Error::InvalidDateValue(value)
    }
}

/// Identifier carrying the UTC date of its creation.
///
/// # Examples
///
/// ```rust
/// use dtuuid::DateUuid;
///
/// let x = DateUuid::new();
/// println!("{}", x); // e.g. "0134d703-6a41-4bf8-b4b1-49f126d4f932"
/// println!("{}", x.date().unwrap().join("-")); // e.g. "2024-01-31"
///
/// let y: DateUuid = "0134d703-6a41-4bf8-b4b1-49f126d4f932".parse()?;
/// assert_eq!(y.date().unwrap().components(), ["2024", "01", "31"]);
/// # Ok::<(), dtuuid::Error>(())
/// ```
pub type DateUuid = Encoded<DateEncoding>;

impl Encoded<DateEncoding> {
    /// Returns the stamped date, or `None` if there is no valid stamp.
    pub fn date(&self) -> Option<DateParts> {
        self.fields()
    }

    /// Returns midnight UTC of the stamped date.
    ///
    /// Also `None` for stamps that pass the lax range checks but name no calendar day.
    pub fn date_time(&self) -> Option<DateTime<Utc>> {
        let naive = self.date()?.to_naive()?.and_hms_opt(0, 0, 0)?;
        Some(Utc.from_utc_datetime(&naive))
    }

    /// Returns [`date_time`](Self::date_time) converted into `tz`.
    pub fn date_time_in<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        self.date_time().map(|e| e.with_timezone(tz))
    }
}

/// Calendar date fields decoded from a stamp.
///
/// Month and day are only range checked, so a date such as 30 February is representable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateParts {
    pub year: u32,
    pub month: u32,
    pub day: u32,
}

impl DateParts {
    /// Returns the fields if the month is within 1..=12 and the day within 1..=31.
    pub fn new(year: u32, month: u32, day: u32) -> Option<Self> {
        if (1..=12).contains(&month) && (1..=31).contains(&day) {
            Some(Self { year, month, day })
        } else {
            None
        }
    }

    /// Returns the fields as `["YYYY", "MM", "DD"]`.
    pub fn components(&self) -> [String; 3] {
        [
            format!("{:04}", self.year),
            format!("{:02}", self.month),
            format!("{:02}", self.day),
        ]
    }

    /// Joins the components with `separator`.
    pub fn join(&self, separator: &str) -> String {
        self.components().join(separator)
    }

    /// Returns the calendar date, or `None` if it does not exist.
    pub fn to_naive(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(i32::try_from(self.year).ok()?, self.month, self.day)
    }
}

impl fmt::Display for DateParts {
    /// Returns the `YYYYMMDD` form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}{:02}", self.year, self.month, self.day)
    }
}
