//! Random or sortable UUIDs with date and date-time prefixes
//!
//! ```rust
//! use dtuuid::{DateTimeUuid, DateUuid, Uuid};
//!
//! let uuid = DateUuid::new();
//! println!("{}", uuid); // e.g. "0134d703-6a41-4bf8-b4b1-49f126d4f932"
//! println!("{:?}", uuid.date()); // e.g. Some(DateParts { year: 2024, month: 1, day: 31 })
//!
//! let uuid = DateTimeUuid::new();
//! println!("{}", uuid); // e.g. "126885d2-0f33-4d31-8373-7b4cd61bb661"
//! println!("{:?}", uuid.date_time()); // e.g. Some(2024-01-31T03:49:31Z)
//!
//! let uuid = Uuid::new();
//! println!("{}", uuid); // e.g. "84572c49-f0b6-4286-8008-22026cc6209e"
//! ```
//!
//! # Field and bit layout
//!
//! A date UUID carries the UTC date of its creation, written as the decimal number `YYYYMMDD`, in
//! its first 32 bits:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                           YYYYMMDD                            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |             rand              |  ver  |         rand          |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|                          rand                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                             rand                              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! A date-time UUID widens the stamp to 48 bits holding `YYYYMMDDHHMMSS`:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                        YYYYMMDDHHMMSS                         |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |        YYYYMMDDHHMMSS         |  ver  |         rand          |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|                          rand                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                             rand                              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The stamp is stored big-endian, so the leading hex digits of the canonical string read back
//!   as the decimal stamp and sort in calendar order.
//! - The 4-bit `ver` field is set at `0100` and the 2-bit `var` field at `10`, so every generated
//!   identifier is also a valid UUID version 4.
//! - The `rand` bits are filled with random numbers.
//!
//! Parsing recovers the calendar fields from the leading hex digits and range checks them. An
//! optional threshold rejects stamps older than a given decimal stamp, and stamps later than the
//! current UTC clock are always rejected.
//!
//! # Crate features
//!
//! - `uuid` (default): accepts `uuid::Uuid` values at construction.
//! - `serde`: serializes identifiers as strings and validates them strictly on deserialization.

#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
pub use error::{Error, Result};

mod uuid;
pub use uuid::{Uuid, Value};

pub mod clock;

mod encoded;
pub use encoded::{threshold_from_str, Encoded, Encoding};

mod date;
pub use date::{DateEncoding, DateParts, DateUuid};

mod date_time;
pub use date_time::{DateTimeEncoding, DateTimeParts, DateTimeUuid, TimeParts};
