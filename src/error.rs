//! Error types for identifier construction, packing, and formatting.

use thiserror::Error;

/// Errors raised while constructing, packing, or formatting identifiers.
///
/// Validation and parsing never raise; they answer `false` or `None` instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The constructor was given a kind of value it does not accept.
    #[error("Argument value type must be {expected}, {given} given")]
    InvalidValueType { expected: String, given: String },

    /// The value failed strict validation as a plain UUID.
    #[error("Invalid UUID value: '{0}'")]
    InvalidValue(String),

    /// The value failed strict validation as a date UUID.
    #[error("Invalid date UUID value: '{0}'")]
    InvalidDateValue(String),

    /// The value failed strict validation as a date/time UUID.
    #[error("Invalid date/time UUID value: '{0}'")]
    InvalidDateTimeValue(String),

    /// A threshold was given as text that is no decimal integer.
    #[error("Threshold must be a decimal integer, '{0}' given")]
    InvalidThreshold(String),

    /// Version/variant tagging was given a buffer that is not 16 bytes long.
    #[error("Modify for only 16-length bins, {0}-length given")]
    InvalidPackingInput(usize),

    /// Canonical formatting was given something other than 32 hex characters.
    #[error("Format for only 32-length hashes, '{0}' given")]
    InvalidFormatInput(String),
}

impl Error {
    /// Returns true if this error rejects a constructor argument.
    pub fn is_value_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidValueType { .. }
                | Error::InvalidValue(_)
                | Error::InvalidDateValue(_)
                | Error::InvalidDateTimeValue(_)
                | Error::InvalidThreshold(_)
        )
    }

    /// Returns true if this error rejects input to a low-level primitive.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidPackingInput(_) | Error::InvalidFormatInput(_)
        )
    }
}

/// Result type for identifier operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::Error;

    /// Renders messages naming expected and actual input
    #[test]
    fn renders_messages_naming_expected_and_actual_input() {
        let e = Error::InvalidValueType {
            expected: "&str|Uuid".to_owned(),
            given: "None".to_owned(),
        };
        assert_eq!(e.to_string(), "Argument value type must be &str|Uuid, None given");
        assert_eq!(
            Error::InvalidValue("invalid".to_owned()).to_string(),
            "Invalid UUID value: 'invalid'"
        );
        assert_eq!(
            Error::InvalidDateValue("invalid".to_owned()).to_string(),
            "Invalid date UUID value: 'invalid'"
        );
        assert_eq!(
            Error::InvalidDateTimeValue("invalid".to_owned()).to_string(),
            "Invalid date/time UUID value: 'invalid'"
        );
        assert_eq!(
            Error::InvalidPackingInput(15).to_string(),
            "Modify for only 16-length bins, 15-length given"
        );
        assert_eq!(
            Error::InvalidThreshold("2024-01-01".to_owned()).to_string(),
            "Threshold must be a decimal integer, '2024-01-01' given"
        );
    }

    /// Groups kinds into value and input errors
    #[test]
    fn groups_kinds_into_value_and_input_errors() {
        assert!(Error::InvalidDateValue(String::new()).is_value_error());
        assert!(!Error::InvalidDateValue(String::new()).is_input_error());
        assert!(Error::InvalidFormatInput(String::new()).is_input_error());
        assert!(!Error::InvalidPackingInput(0).is_value_error());
        assert!(Error::InvalidThreshold(String::new()).is_value_error());
    }
}
