//! Identifiers stamped with a UTC date and time.

use crate::date::DateParts;
use crate::encoded::{two_digits, Encoded, Encoding};
use crate::{clock, Error};
use chrono::{DateTime, NaiveTime, TimeZone, Utc};
use std::fmt;

/// Layout of a `YYYYMMDDHHMMSS` stamp in the first 6 bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateTimeEncoding;

impl Encoding for DateTimeEncoding {
    const NAME: &'static str = "DateTimeUuid";
    const PREFIX_BYTES: usize = 6;

    type Fields = DateTimeParts;

    fn now() -> u64 {
        clock::utc_date_time()
    }

    /// Cuts the digits into two-digit fields from the left; the first two make the year.
    fn split(digits: &str) -> Option<DateTimeParts> {
        Some(DateTimeParts {
            date: DateParts::new(
                digits.get(..4)?.parse().ok()?,
                two_digits(digits, 4)?,
                two_digits(digits, 6)?,
            )?,
            time: TimeParts::new(
                two_digits(digits, 8)?,
                two_digits(digits, 10)?,
                two_digits(digits, 12)?,
            )?,
        })
    }

    fn invalid(value: String) -> Error {
        Error::InvalidDateTimeValue(value)
    }
}

/// Identifier carrying the UTC date and time of its creation, to the second.
///
/// # Examples
///
/// ```rust
/// use dtuuid::DateTimeUuid;
///
/// let x = DateTimeUuid::new();
/// println!("{}", x); // e.g. "126885d2-0f33-4d31-8373-7b4cd61bb661"
/// println!("{}", x.time().unwrap().join(":")); // e.g. "03:49:31"
///
/// let y: DateTimeUuid = "126885d2-0f33-4d31-8373-7b4cd61bb661".parse()?;
/// assert_eq!(y.date_time().unwrap().to_rfc3339(), "2024-01-31T03:49:31+00:00");
/// # Ok::<(), dtuuid::Error>(())
/// ```
pub type DateTimeUuid = Encoded<DateTimeEncoding>;

impl Encoded<DateTimeEncoding> {
    /// Returns the stamped date, or `None` if there is no valid stamp.
    pub fn date(&self) -> Option<DateParts> {
        self.fields().map(|e| e.date)
    }

    /// Returns the stamped time of day, or `None` if there is no valid stamp.
    pub fn time(&self) -> Option<TimeParts> {
        self.fields().map(|e| e.time)
    }

    /// Returns the stamped instant in UTC.
    pub fn date_time(&self) -> Option<DateTime<Utc>> {
        let parts = self.fields()?;
        let naive = parts.date.to_naive()?.and_time(parts.time.to_naive()?);
        Some(Utc.from_utc_datetime(&naive))
    }

    /// Returns [`date_time`](Self::date_time) converted into `tz`.
    pub fn date_time_in<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        self.date_time().map(|e| e.with_timezone(tz))
    }
}

/// Date and time fields decoded from a stamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateTimeParts {
    pub date: DateParts,
    pub time: TimeParts,
}

impl fmt::Display for DateTimeParts {
    /// Returns the `YYYYMMDDHHMMSS` form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.date, self.time)
    }
}

/// Time of day fields decoded from a stamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeParts {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl TimeParts {
    /// Returns the fields if the hour is within 0..=23 and minute and second within 0..=59.
    pub fn new(hour: u32, minute: u32, second: u32) -> Option<Self> {
        if hour <= 23 && minute <= 59 && second <= 59 {
            Some(Self {
                hour,
                minute,
                second,
            })
        } else {
            None
        }
    }

    /// Returns the fields as `["HH", "MM", "SS"]`.
    pub fn components(&self) -> [String; 3] {
        [
            format!("{:02}", self.hour),
            format!("{:02}", self.minute),
            format!("{:02}", self.second),
        ]
    }

    /// Joins the components with `separator`.
    pub fn join(&self, separator: &str) -> String {
        self.components().join(separator)
    }

    /// Returns the time of day, or `None` if the fields are out of range.
    pub fn to_naive(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(self.hour, self.minute, self.second)
    }
}

impl fmt::Display for TimeParts {
    /// Returns the `HHMMSS` form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:02}{:02}", self.hour, self.minute, self.second)
    }
}
