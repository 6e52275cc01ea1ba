use crate::{Error, Result};
use std::{borrow::Cow, fmt, str};
use tracing::debug;

/// Lengths of the hexadecimal groups of the 8-4-4-4-12 canonical form.
const GROUPS: [usize; 5] = [8, 4, 4, 4, 12];

/// Represents a Universally Unique IDentifier in its textual form.
///
/// The value is the string last validated or generated. It never changes after construction.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Uuid(String);

impl Uuid {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    pub const NULL: &'static str = "00000000-0000-0000-0000-000000000000";

    /// Nil UUID without hyphens
    pub const NULL_HASH: &'static str = "00000000000000000000000000000000";

    /// Creates a random version 4 UUID.
    pub fn new() -> Self {
        Self(Self::generate())
    }

    /// Creates a UUID from a string, another identifier, or a [`uuid::Uuid`].
    ///
    /// Raw text and foreign values must pass [`Uuid::validate`] in strict mode when `strict` is
    /// set. Identifier instances are taken as they are.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dtuuid::Uuid;
    ///
    /// let x = Uuid::with_value("84572c49-f0b6-4286-8008-22026cc6209e", true)?;
    /// assert!(x.is_valid(true));
    ///
    /// let y = Uuid::with_value("d41d8cd98f00b204e9800998ecf8427e", false)?;
    /// assert!(!y.is_valid(true));
    /// assert!(Uuid::with_value("d41d8cd98f00b204e9800998ecf8427e", true).is_err());
    /// # Ok::<(), dtuuid::Error>(())
    /// ```
    pub fn with_value<'a>(value: impl Into<Value<'a>>, strict: bool) -> Result<Self> {
        value
            .into()
            .resolve(
                "Uuid",
                |text| !strict || Self::validate(text, true),
                Error::InvalidValue,
            )
            .map(Self)
    }

    /// Wraps a string as it is.
    pub(crate) fn unchecked(value: String) -> Self {
        Self(value)
    }

    /// Creates a UUID from raw bytes as they are, in lowercase canonical form.
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(encode(&bytes))
    }

    /// Generates the canonical string of a random version 4 UUID.
    pub fn generate() -> String {
        let mut bytes: [u8; 16] = rand::random();
        set_version_variant(&mut bytes);
        encode(&bytes)
    }

    /// Returns true if `value` looks like a UUID.
    ///
    /// Strict mode requires hyphens, a `4` version nibble, and an `8`, `9`, `a`, or `b` variant
    /// nibble. Loose mode makes each hyphen optional and leaves both nibbles unconstrained. Any
    /// string longer than 36 characters is rejected in either mode.
    pub fn validate(value: &str, strict: bool) -> bool {
        let src = value.as_bytes();
        if src.len() > 36 {
            return false;
        }

        let mut pos = 0;
        let mut nibble = 0;
        for (i, len) in GROUPS.iter().enumerate() {
            if i > 0 {
                if src.get(pos) == Some(&b'-') {
                    pos += 1;
                } else if strict {
                    return false;
                }
            }
            for _ in 0..*len {
                let Some(&c) = src.get(pos) else {
                    return false;
                };
                let ok = match nibble {
                    12 if strict => c == b'4',
                    16 if strict => matches!(c.to_ascii_lowercase(), b'8' | b'9' | b'a' | b'b'),
                    _ => c.is_ascii_hexdigit(),
                };
                if !ok {
                    return false;
                }
                pos += 1;
                nibble += 1;
            }
        }
        pos == src.len()
    }

    /// Compares two strings, scanning every position once their lengths match.
    pub fn equals(known: &str, unknown: &str) -> bool {
        if known.len() != unknown.len() {
            return false;
        }

        known
            .bytes()
            .zip(unknown.bytes())
            .fold(0u8, |diff, (a, b)| diff | (a ^ b))
            == 0
    }

    /// Sets the version nibble to `4` and the variant bits to `10` in a copy of `bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPackingInput`] unless `bytes` is exactly 16 bytes long.
    pub fn apply_version_variant(bytes: &[u8]) -> Result<[u8; 16]> {
        let mut bins =
            <[u8; 16]>::try_from(bytes).map_err(|_| Error::InvalidPackingInput(bytes.len()))?;
        set_version_variant(&mut bins);
        Ok(bins)
    }

    /// Splits 32 hexadecimal characters into the hyphenated 8-4-4-4-12 form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormatInput`] unless `hex` is exactly 32 hexadecimal characters.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dtuuid::Uuid;
    ///
    /// let x = Uuid::format_hex("d41d8cd98f00b204e9800998ecf8427e")?;
    /// assert_eq!(x, "d41d8cd9-8f00-b204-e980-0998ecf8427e");
    /// # Ok::<(), dtuuid::Error>(())
    /// ```
    pub fn format_hex(hex: &str) -> Result<String> {
        if hex.len() != 32 || !hex.bytes().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidFormatInput(hex.to_owned()));
        }

        let mut buffer = String::with_capacity(36);
        let mut start = 0;
        for (i, len) in GROUPS.iter().enumerate() {
            if i > 0 {
                buffer.push('-');
            }
            buffer.push_str(&hex[start..start + len]);
            start += len;
        }
        Ok(buffer)
    }

    /// Returns the string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the value with hyphens removed.
    pub fn to_hash_string(&self) -> String {
        self.0.replace('-', "")
    }

    /// Returns true if the value is [`Uuid::NULL`].
    pub fn is_null(&self) -> bool {
        Self::equals(Self::NULL, &self.0)
    }

    /// Returns true if the value is [`Uuid::NULL_HASH`].
    pub fn is_null_hash(&self) -> bool {
        Self::equals(Self::NULL_HASH, &self.0)
    }

    /// Returns true if the value equals the string form of `other`.
    pub fn is_equal(&self, other: impl AsRef<str>) -> bool {
        Self::equals(&self.0, other.as_ref())
    }

    /// Validates the value with [`Uuid::validate`].
    pub fn is_valid(&self, strict: bool) -> bool {
        Self::validate(&self.0, strict)
    }
}

/// Forces the version nibble of byte 6 to `4` and the top bits of byte 8 to `10`.
pub(crate) fn set_version_variant(bytes: &mut [u8; 16]) {
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;
}

/// Encodes bytes as the lowercase 8-4-4-4-12 hexadecimal string.
pub(crate) fn encode(bytes: &[u8; 16]) -> String {
    const DIGITS: &[u8; 16] = b"0123456789abcdef";

    let mut buffer = String::with_capacity(36);
    for (i, e) in bytes.iter().enumerate() {
        buffer.push(DIGITS[(e >> 4) as usize] as char);
        buffer.push(DIGITS[(e & 15) as usize] as char);
        if i == 3 || i == 5 || i == 7 || i == 9 {
            buffer.push('-');
        }
    }
    buffer
}

impl Default for Uuid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl str::FromStr for Uuid {
    type Err = Error;

    /// Creates an object from a strictly valid canonical string.
    fn from_str(src: &str) -> Result<Self> {
        Self::with_value(src, true)
    }
}

impl TryFrom<String> for Uuid {
    type Error = Error;

    fn try_from(src: String) -> Result<Self> {
        Self::with_value(src, true)
    }
}

impl From<Uuid> for String {
    fn from(src: Uuid) -> Self {
        src.0
    }
}

impl AsRef<str> for Uuid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Uuid {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Uuid {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl PartialEq<String> for Uuid {
    fn eq(&self, other: &String) -> bool {
        &self.0 == other
    }
}

/// A value accepted by the identifier constructors.
///
/// Everything is resolved once into a string before any validation runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value<'a> {
    /// No value at all (an absent `Option`).
    Missing,

    /// Raw text, validated when construction is strict.
    Text(Cow<'a, str>),

    /// Another identifier instance, taken without validation.
    Instance(Cow<'a, Uuid>),

    /// A [`uuid::Uuid`], stringified in hyphenated form and validated like text.
    #[cfg(feature = "uuid")]
    #[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
    Foreign(uuid::Uuid),
}

impl Value<'_> {
    /// Resolves the value into its string, asking `accept` about text and foreign values.
    pub(crate) fn resolve(
        self,
        kind: &'static str,
        accept: impl FnOnce(&str) -> bool,
        reject: impl FnOnce(String) -> Error,
    ) -> Result<String> {
        let text = match self {
            Value::Missing => {
                debug!(kind, "rejected missing identifier value");
                return Err(Error::InvalidValueType {
                    expected: accepted_types(kind),
                    given: "None".to_owned(),
                });
            }
            Value::Instance(uuid) => return Ok(uuid.into_owned().0),
            Value::Text(text) => text.into_owned(),
            #[cfg(feature = "uuid")]
            Value::Foreign(src) => src.to_string(),
        };

        if accept(&text) {
            Ok(text)
        } else {
            debug!(kind, value = %text, "rejected identifier value");
            Err(reject(text))
        }
    }
}

/// Lists the accepted input kinds of an identifier type, e.g. `&str|Uuid|DateUuid|uuid::Uuid`.
fn accepted_types(kind: &str) -> String {
    let mut types = vec!["&str", "Uuid"];
    if kind != "Uuid" {
        types.push(kind);
    }
    #[cfg(feature = "uuid")]
    types.push("uuid::Uuid");
    types.join("|")
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(src: &'a str) -> Self {
        Value::Text(Cow::Borrowed(src))
    }
}

impl<'a> From<&'a String> for Value<'a> {
    fn from(src: &'a String) -> Self {
        Value::Text(Cow::Borrowed(src))
    }
}

impl From<String> for Value<'_> {
    fn from(src: String) -> Self {
        Value::Text(Cow::Owned(src))
    }
}

impl<'a> From<&'a Uuid> for Value<'a> {
    fn from(src: &'a Uuid) -> Self {
        Value::Instance(Cow::Borrowed(src))
    }
}

impl From<Uuid> for Value<'_> {
    fn from(src: Uuid) -> Self {
        Value::Instance(Cow::Owned(src))
    }
}

impl<'a, T: Into<Value<'a>>> From<Option<T>> for Value<'a> {
    fn from(src: Option<T>) -> Self {
        src.map_or(Value::Missing, Into::into)
    }
}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::{Uuid, Value};
    use crate::Error;

    impl From<uuid::Uuid> for Value<'_> {
        fn from(src: uuid::Uuid) -> Self {
            Value::Foreign(src)
        }
    }

    impl From<&uuid::Uuid> for Value<'_> {
        fn from(src: &uuid::Uuid) -> Self {
            Value::Foreign(*src)
        }
    }

    impl TryFrom<uuid::Uuid> for Uuid {
        type Error = Error;

        fn try_from(src: uuid::Uuid) -> Result<Self, Self::Error> {
            Self::with_value(src, true)
        }
    }

    impl TryFrom<&Uuid> for uuid::Uuid {
        type Error = Error;

        /// Parses the value, with or without hyphens, into a [`uuid::Uuid`].
        fn try_from(src: &Uuid) -> Result<Self, Self::Error> {
            uuid::Uuid::parse_str(&src.to_hash_string())
                .map_err(|_| Error::InvalidValue(src.to_string()))
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
pub(crate) mod serde_support {
    use super::{fmt, str, Uuid};
    use crate::Error;
    use serde::{de, Deserializer, Serializer};
    use std::marker::PhantomData;

    impl serde::Serialize for Uuid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(self.as_str())
        }
    }

    impl<'de> serde::Deserialize<'de> for Uuid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_str(StrVisitor::new())
        }
    }

    /// Deserializes any identifier type through its strict [`str::FromStr`] implementation.
    pub(crate) struct StrVisitor<T>(PhantomData<T>);

    impl<T> StrVisitor<T> {
        pub(crate) fn new() -> Self {
            Self(PhantomData)
        }
    }

    impl<T: str::FromStr<Err = Error>> de::Visitor<'_> for StrVisitor<T> {
        type Value = T;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a UUID string")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }
    }

}

#[cfg(test)]
mod tests {
    use super::{Uuid, Value};
    use crate::Error;
    use std::borrow::Cow;

    const UUID: &str = "84572c49-f0b6-4286-8008-22026cc6209e";

    /// Constructs from text and from other instances
    #[test]
    fn constructs_from_text_and_from_other_instances() {
        let x = Uuid::new();
        assert_eq!(x.as_str().len(), 36);
        assert_eq!(Uuid::with_value(x.as_str(), true), Ok(x.clone()));
        assert_eq!(Uuid::with_value(&x, true), Ok(x.clone()));

        let y: Uuid = UUID.parse().unwrap();
        assert_eq!(y, UUID);
        assert_eq!(Uuid::with_value(y.clone(), true).unwrap(), y);

        // instances are never revalidated
        let loose = Uuid::with_value("invalid", false).unwrap();
        assert_eq!(Uuid::with_value(&loose, true).unwrap(), "invalid");
    }

    /// Rejects missing and invalid values
    #[test]
    fn rejects_missing_and_invalid_values() {
        let e = Uuid::with_value(None::<&str>, true).unwrap_err();
        #[cfg(feature = "uuid")]
        assert_eq!(
            e.to_string(),
            "Argument value type must be &str|Uuid|uuid::Uuid, None given"
        );
        #[cfg(not(feature = "uuid"))]
        assert_eq!(e.to_string(), "Argument value type must be &str|Uuid, None given");

        // strictness does not excuse a missing value
        assert!(matches!(
            Uuid::with_value(Value::Missing, false),
            Err(Error::InvalidValueType { .. })
        ));

        assert_eq!(
            Uuid::with_value("invalid", true),
            Err(Error::InvalidValue("invalid".to_owned()))
        );
        assert_eq!(
            "invalid".parse::<Uuid>().unwrap_err().to_string(),
            "Invalid UUID value: 'invalid'"
        );
        assert!(Uuid::with_value(Some(UUID), true).is_ok());
    }

    /// Validates text under strict construction however it is wrapped
    #[test]
    fn validates_text_under_strict_construction_however_it_is_wrapped() {
        assert_eq!(
            Uuid::with_value(Value::Text(Cow::Borrowed("junk")), true),
            Err(Error::InvalidValue("junk".to_owned()))
        );
        assert_eq!(
            Uuid::with_value(Value::from("junk".to_owned()), true),
            Err(Error::InvalidValue("junk".to_owned()))
        );

        // only identifiers fill the instance variant
        let loose = Uuid::with_value("junk", false).unwrap();
        assert_eq!(Value::from(&loose), Value::Instance(Cow::Borrowed(&loose)));
        assert_eq!(
            Uuid::with_value(Value::Instance(Cow::Owned(loose.clone())), true),
            Ok(loose)
        );
    }

    /// Generates strictly valid random identifiers
    #[test]
    fn generates_strictly_valid_random_identifiers() {
        use std::collections::HashSet;

        let pattern = r"^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$";
        let re = regex::Regex::new(pattern).unwrap();
        let samples: Vec<Uuid> = (0..10_000).map(|_| Uuid::new()).collect();
        for e in &samples {
            assert!(re.is_match(e.as_str()), "{}", e);
            assert!(e.is_valid(true));
            assert_eq!(Uuid::with_value(e.as_str(), true).as_ref(), Ok(e));
            assert_eq!(Uuid::with_value(Value::from(e), true).as_ref(), Ok(e));
        }
        let unique: HashSet<&Uuid> = samples.iter().collect();
        assert_eq!(unique.len(), samples.len());

        // the low nibble next to the version and the bits after the variant stay random
        let nth = |n| -> HashSet<char> {
            samples
                .iter()
                .filter_map(|e| e.as_str().chars().nth(n))
                .collect()
        };
        assert_eq!(nth(15).len(), 16);
        assert_eq!(nth(19), "89ab".chars().collect::<HashSet<_>>());
    }

    /// Exposes string forms and null checks
    #[test]
    fn exposes_string_forms_and_null_checks() {
        let x: Uuid = UUID.parse().unwrap();
        assert_eq!(x.to_string(), UUID);
        assert_eq!(String::from(x.clone()), UUID);
        assert_eq!(format!("{:?}", x), format!("Uuid({:?})", UUID));
        assert_eq!(x.to_hash_string(), UUID.replace('-', ""));
        assert!(!x.is_null());
        assert!(!x.is_null_hash());
        assert!(x.is_equal(UUID));
        assert!(x.is_valid(true));

        let x = Uuid::with_value(Uuid::NULL, false).unwrap();
        assert!(x.is_null());
        assert!(!x.is_null_hash());
        assert!(x.is_equal(Uuid::NULL));
        assert!(!x.is_valid(true));
        assert!(x.is_valid(false));

        let x = Uuid::with_value(Uuid::NULL_HASH, false).unwrap();
        assert!(x.is_null_hash());
        assert!(x.is_equal(Uuid::NULL_HASH));
        assert!(!x.is_valid(true));
        assert!(x.is_valid(false));
    }

    /// Validates strict and loose forms
    #[test]
    fn validates_strict_and_loose_forms() {
        assert!(Uuid::validate(UUID, true));
        assert!(Uuid::validate(&UUID.to_uppercase(), true));
        assert!(Uuid::validate(&Uuid::generate(), true));
        assert!(!Uuid::validate("invalid", true));
        assert!(!Uuid::validate("invalid", false));
        assert!(!Uuid::validate("", false));

        let hash = "d41d8cd98f00b204e9800998ecf8427e";
        assert!(!Uuid::validate(hash, true));
        assert!(Uuid::validate(hash, false));
        assert!(Uuid::validate("d41d8cd9-8f00b204-e980-0998ecf8427e", false));
        assert!(Uuid::validate("d41d8cd9-8f00-b204-e980-0998ecf8427e", false));

        let cases = [
            // wrong version
            "84572c49-f0b6-5286-8008-22026cc6209e",
            // wrong variant
            "84572c49-f0b6-4286-c008-22026cc6209e",
            // misplaced hyphen
            "84572c4-9f0b6-4286-8008-22026cc6209e",
            // too long
            "84572c49-f0b6-4286-8008-22026cc6209e0",
            " 84572c49-f0b6-4286-8008-22026cc6209e",
            "84572c49-f0b6-4286-8008-22026cc6209g",
            "84572c49_f0b6-4286-8008-22026cc6209e",
        ];
        for e in cases {
            assert!(!Uuid::validate(e, true), "{}", e);
        }
        assert!(Uuid::validate(cases[0], false));
        assert!(Uuid::validate(cases[1], false));
        for e in &cases[2..] {
            assert!(!Uuid::validate(e, false), "{}", e);
        }
    }

    /// Compares strings position by position
    #[test]
    fn compares_strings_position_by_position() {
        let x = Uuid::new();
        let y = Uuid::with_value(&x, true).unwrap();
        assert!(Uuid::equals(x.as_str(), y.as_str()));
        assert!(!Uuid::equals(x.as_str(), "invalid"));
        assert!(!Uuid::equals("abc", "abd"));
        assert!(Uuid::equals("", ""));
    }

    /// Applies version and variant bits to 16 bytes only
    #[test]
    fn applies_version_and_variant_bits_to_16_bytes_only() {
        let bins = Uuid::apply_version_variant(&[0xff; 16]).unwrap();
        assert_eq!(bins[6], 0x4f);
        assert_eq!(bins[8], 0xbf);
        let bins = Uuid::apply_version_variant(&[0x00; 16]).unwrap();
        assert_eq!(bins[6], 0x40);
        assert_eq!(bins[8], 0x80);

        let bytes: [u8; 16] = rand::random();
        let bins = Uuid::apply_version_variant(&bytes).unwrap();
        assert_eq!(bins[6] & 0x0f, bytes[6] & 0x0f);
        assert_eq!(bins[8] & 0x3f, bytes[8] & 0x3f);
        for i in (0..6).chain(7..8).chain(9..16) {
            assert_eq!(bins[i], bytes[i], "byte {}", i);
        }

        assert_eq!(
            Uuid::apply_version_variant(&[0u8; 15]),
            Err(Error::InvalidPackingInput(15))
        );
        assert_eq!(
            Uuid::apply_version_variant(b"invalid"),
            Err(Error::InvalidPackingInput(7))
        );
    }

    /// Formats 32 hex characters only
    #[test]
    fn formats_32_hex_characters_only() {
        let hex = "0123456789ABCDEF0123456789abcdef";
        assert_eq!(
            Uuid::format_hex(hex).unwrap(),
            "01234567-89AB-CDEF-0123-456789abcdef"
        );
        assert_eq!(
            Uuid::format_hex(&hex[1..]),
            Err(Error::InvalidFormatInput(hex[1..].to_owned()))
        );
        assert!(Uuid::format_hex("invalid").is_err());
        assert!(Uuid::format_hex("0123456789abcdef0123456789abcdeg").is_err());
    }

    /// Encodes bytes in lowercase canonical form
    #[test]
    fn encodes_bytes_in_lowercase_canonical_form() {
        assert_eq!(Uuid::from_bytes([0x00; 16]), Uuid::NULL);
        assert_eq!(
            Uuid::from_bytes([0xff; 16]).as_str(),
            "ffffffff-ffff-ffff-ffff-ffffffffffff"
        );
        let bytes = [
            0x84, 0x57, 0x2c, 0x49, 0xf0, 0xb6, 0x42, 0x86, 0x80, 0x08, 0x22, 0x02, 0x6c, 0xc6,
            0x20, 0x9e,
        ];
        assert_eq!(Uuid::from_bytes(bytes), UUID);
    }

    /// Converts to and from uuid::Uuid
    #[cfg(feature = "uuid")]
    #[test]
    fn converts_to_and_from_uuid_crate() {
        let foreign = uuid::Uuid::parse_str(UUID).unwrap();
        let x = Uuid::with_value(foreign, true).unwrap();
        assert_eq!(x, UUID);
        assert_eq!(uuid::Uuid::try_from(&x), Ok(foreign));
        assert_eq!(Uuid::try_from(foreign), Ok(x));

        let hash = Uuid::with_value("d41d8cd98f00b204e9800998ecf8427e", false).unwrap();
        assert!(uuid::Uuid::try_from(&hash).is_ok());
        let junk = Uuid::with_value("invalid", false).unwrap();
        assert!(uuid::Uuid::try_from(&junk).is_err());

        // not version 4
        assert!(Uuid::try_from(uuid::Uuid::nil()).is_err());
    }
}
