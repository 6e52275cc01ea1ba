//! Identifiers carrying a decimal stamp in their leading bytes.
//!
//! The stamp (e.g. `20240131` for a date) is written big-endian into the first
//! [`Encoding::PREFIX_BYTES`] bytes, so the leading hex digits read back as the same number. The
//! remaining bytes are random apart from the version and variant bits.

use crate::uuid::{encode, set_version_variant, Uuid, Value};
use crate::{Error, Result};
use rand::RngCore;
use std::{fmt, hash, marker::PhantomData, str};
use tracing::trace;

/// Width and field layout of an encoded stamp.
///
/// Implementors only describe the layout; generation, parsing, and validation are shared.
pub trait Encoding: Sized {
    /// Name of the identifier type, as used in error messages.
    const NAME: &'static str;

    /// Number of leading bytes carrying the stamp.
    const PREFIX_BYTES: usize;

    /// Calendar fields recovered from a stamp.
    type Fields;

    /// Returns the stamp of the current UTC clock.
    fn now() -> u64;

    /// Splits the decimal digits of a stamp into range-checked fields.
    fn split(digits: &str) -> Option<Self::Fields>;

    /// Returns the error for a value failing strict validation.
    fn invalid(value: String) -> Error;

    /// Generates a canonical string stamped with [`Encoding::now`].
    fn generate() -> String {
        generate_core::<Self>(Self::now(), &mut rand::thread_rng())
    }

    /// Recovers the fields stamped into `value`.
    ///
    /// Returns `None` if the leading digits are not hexadecimal, the fields are out of range,
    /// the stamp is below a nonzero `threshold`, or the stamp lies in the future.
    fn parse(value: &str, threshold: Option<u64>) -> Option<Self::Fields> {
        parse_core::<Self>(value, threshold, Self::now())
    }

    /// Returns true if `value` passes [`Uuid::validate`] and [`Encoding::parse`].
    fn validate(value: &str, strict: bool, threshold: Option<u64>) -> bool {
        Uuid::validate(value, strict) && Self::parse(value, threshold).is_some()
    }
}

/// Builds an identifier from `stamp` followed by random bytes from `rng`.
pub(crate) fn generate_core<E: Encoding>(stamp: u64, rng: &mut impl RngCore) -> String {
    debug_assert!(stamp >> (E::PREFIX_BYTES * 8) == 0, "stamp exceeds prefix");

    let mut bytes = [0u8; 16];
    bytes[..E::PREFIX_BYTES].copy_from_slice(&stamp.to_be_bytes()[8 - E::PREFIX_BYTES..]);
    rng.fill_bytes(&mut bytes[E::PREFIX_BYTES..]);
    set_version_variant(&mut bytes);
    encode(&bytes)
}

/// Recovers the fields of `value`, bounding the stamp by `threshold` and `now`.
pub(crate) fn parse_core<E: Encoding>(
    value: &str,
    threshold: Option<u64>,
    now: u64,
) -> Option<E::Fields> {
    let Some(stamp) = leading_stamp(value, E::PREFIX_BYTES * 2) else {
        trace!(reason = "prefix", "no stamp in {}", E::NAME);
        return None;
    };
    let Some(fields) = E::split(&stamp.to_string()) else {
        trace!(reason = "range", stamp, "no stamp in {}", E::NAME);
        return None;
    };

    if matches!(threshold, Some(t) if t > 0 && stamp < t) {
        trace!(reason = "threshold", stamp, "stamp below threshold");
        return None;
    }
    if stamp > now {
        trace!(reason = "future", stamp, now, "stamp in the future");
        return None;
    }
    Some(fields)
}

/// Reads the first `len` hex digits of `value`, skipping the canonical hyphen at position 8.
fn leading_stamp(value: &str, len: usize) -> Option<u64> {
    let mut digits = String::with_capacity(len);
    for (i, c) in value.chars().enumerate() {
        if digits.len() == len {
            break;
        }
        if i == 8 && c == '-' {
            continue;
        }
        if !c.is_ascii_hexdigit() {
            return None;
        }
        digits.push(c);
    }

    if digits.len() == len {
        u64::from_str_radix(&digits, 16).ok()
    } else {
        None
    }
}

/// Reads a threshold given as decimal text, e.g. `"20240101"`.
///
/// Blank text and zero mean no threshold.
///
/// # Errors
///
/// Returns [`Error::InvalidThreshold`] if `src` is not a decimal integer.
///
/// # Examples
///
/// ```rust
/// use dtuuid::{threshold_from_str, DateUuid};
///
/// let threshold = threshold_from_str("20240101")?;
/// assert_eq!(threshold, Some(20240101));
/// assert!(DateUuid::validate("0134d703-6a41-4bf8-b4b1-49f126d4f932", true, threshold));
/// assert_eq!(threshold_from_str("")?, None);
/// assert!(threshold_from_str("2024-01-01").is_err());
/// # Ok::<(), dtuuid::Error>(())
/// ```
pub fn threshold_from_str(src: &str) -> Result<Option<u64>> {
    let src = src.trim();
    if src.is_empty() {
        return Ok(None);
    }
    src.parse::<u64>()
        .map(|t| Some(t).filter(|t| *t > 0))
        .map_err(|_| Error::InvalidThreshold(src.to_owned()))
}

/// Reads a field of up to two decimal digits starting at `start`.
pub(crate) fn two_digits(digits: &str, start: usize) -> Option<u32> {
    digits
        .get(start..digits.len().min(start + 2))?
        .parse()
        .ok()
}

/// Represents an identifier whose leading bytes carry a stamp laid out by `E`.
///
/// See [`DateUuid`](crate::DateUuid) and [`DateTimeUuid`](crate::DateTimeUuid).
pub struct Encoded<E> {
    uuid: Uuid,
    threshold: Option<u64>,
    encoding: PhantomData<E>,
}

impl<E: Encoding> Encoded<E> {
    /// Creates an identifier stamped with the current UTC clock.
    pub fn new() -> Self {
        Self::from_string(E::generate(), None)
    }

    /// Creates an identifier from a string, another identifier, or a [`uuid::Uuid`].
    ///
    /// Raw text and foreign values must carry a valid stamp when `strict` is set. Identifier
    /// instances are taken as they are.
    pub fn with_value<'a>(value: impl Into<Value<'a>>, strict: bool) -> Result<Self> {
        Self::with_threshold(value, strict, None)
    }

    /// Creates an identifier like [`Encoded::with_value`], additionally requiring the stamp to be
    /// at least `threshold` under strict construction.
    ///
    /// The threshold is kept and applied by the accessors.
    pub fn with_threshold<'a>(
        value: impl Into<Value<'a>>,
        strict: bool,
        threshold: Option<u64>,
    ) -> Result<Self> {
        value
            .into()
            .resolve(
                E::NAME,
                |text| !strict || E::validate(text, true, threshold),
                E::invalid,
            )
            .map(|text| Self::from_string(text, threshold))
    }

    fn from_string(value: String, threshold: Option<u64>) -> Self {
        Self {
            uuid: Uuid::unchecked(value),
            threshold,
            encoding: PhantomData,
        }
    }

    /// See [`Encoding::generate`].
    pub fn generate() -> String {
        E::generate()
    }

    /// See [`Encoding::parse`].
    pub fn parse(value: &str, threshold: Option<u64>) -> Option<E::Fields> {
        E::parse(value, threshold)
    }

    /// See [`Encoding::validate`].
    pub fn validate(value: &str, strict: bool, threshold: Option<u64>) -> bool {
        E::validate(value, strict, threshold)
    }

    /// Returns the fields stamped into this identifier, honoring the construction threshold.
    pub fn fields(&self) -> Option<E::Fields> {
        E::parse(self.as_str(), self.threshold)
    }

    /// Validates this identifier, falling back to the construction threshold when `threshold` is
    /// `None` or zero.
    pub fn is_valid(&self, strict: bool, threshold: Option<u64>) -> bool {
        let threshold = threshold.filter(|t| *t > 0).or(self.threshold);
        E::validate(self.as_str(), strict, threshold)
    }

    /// Returns the threshold given at construction.
    pub fn threshold(&self) -> Option<u64> {
        self.threshold
    }
}

impl<E> Encoded<E> {
    /// Returns the string value.
    pub fn as_str(&self) -> &str {
        self.uuid.as_str()
    }

    /// Returns the underlying plain identifier.
    pub fn as_uuid(&self) -> &Uuid {
        &self.uuid
    }

    /// Returns true if the value equals the string form of `other`.
    pub fn is_equal(&self, other: impl AsRef<str>) -> bool {
        self.uuid.is_equal(other)
    }
}

impl<E: Encoding> Default for Encoded<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for Encoded<E> {
    fn clone(&self) -> Self {
        Self {
            uuid: self.uuid.clone(),
            threshold: self.threshold,
            encoding: PhantomData,
        }
    }
}

impl<E: Encoding> fmt::Debug for Encoded<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple(E::NAME).field(&self.as_str()).finish()
    }
}

impl<E> fmt::Display for Encoded<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.uuid, f)
    }
}

impl<E> PartialEq for Encoded<E> {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
    }
}

impl<E> Eq for Encoded<E> {}

impl<E> PartialOrd for Encoded<E> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Encoded<E> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.uuid.cmp(&other.uuid)
    }
}

impl<E> hash::Hash for Encoded<E> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.uuid.hash(state);
    }
}

impl<E> PartialEq<str> for Encoded<E> {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl<E> PartialEq<&str> for Encoded<E> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl<E> PartialEq<String> for Encoded<E> {
    fn eq(&self, other: &String) -> bool {
        self.as_str() == other
    }
}

impl<E> AsRef<str> for Encoded<E> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<E: Encoding> str::FromStr for Encoded<E> {
    type Err = Error;

    /// Creates an object from a strictly valid string carrying a stamp.
    fn from_str(src: &str) -> Result<Self> {
        Self::with_value(src, true)
    }
}

impl<E: Encoding> TryFrom<String> for Encoded<E> {
    type Error = Error;

    fn try_from(src: String) -> Result<Self> {
        Self::with_value(src, true)
    }
}

impl<E: Encoding> From<Uuid> for Encoded<E> {
    fn from(src: Uuid) -> Self {
        Self::from_string(src.into(), None)
    }
}

impl<E> From<Encoded<E>> for Uuid {
    fn from(src: Encoded<E>) -> Self {
        src.uuid
    }
}

impl<E> From<Encoded<E>> for String {
    fn from(src: Encoded<E>) -> Self {
        src.uuid.into()
    }
}

impl<'a, E> From<&'a Encoded<E>> for Value<'a> {
    fn from(src: &'a Encoded<E>) -> Self {
        Value::from(&src.uuid)
    }
}

impl<E> From<Encoded<E>> for Value<'_> {
    fn from(src: Encoded<E>) -> Self {
        Value::from(src.uuid)
    }
}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
impl<E: Encoding> TryFrom<uuid::Uuid> for Encoded<E> {
    type Error = Error;

    fn try_from(src: uuid::Uuid) -> Result<Self> {
        Self::with_value(src, true)
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{Encoded, Encoding};
    use crate::uuid::serde_support::StrVisitor;
    use serde::{Deserializer, Serializer};

    impl<E> serde::Serialize for Encoded<E> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(self.as_str())
        }
    }

    impl<'de, E: Encoding> serde::Deserialize<'de> for Encoded<E> {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_str(StrVisitor::new())
        }
    }

}
