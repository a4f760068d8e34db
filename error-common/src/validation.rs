//! Field validation shared by the service request types
//!
//! Services implement [`RequestValidation`] for their create/update requests
//! and use the macros below, which return early with a [`FieldViolation`]
//! converted into the caller's error type.

use thiserror::Error;

/// A single rejected request field
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Implemented by request payloads that must be checked before any
/// transaction is opened
pub trait RequestValidation {
    type Error: From<FieldViolation>;

    fn validate(&self) -> Result<(), Self::Error>;
}

/// Reject the request when `$predicate` is false
///
/// ```rust
/// use error_common::{validate_field, FieldViolation};
///
/// fn check(level: i32) -> Result<(), FieldViolation> {
///     validate_field!("triage_level", (1..=5).contains(&level), "must be between 1 and 5");
///     Ok(())
/// }
///
/// assert!(check(3).is_ok());
/// assert_eq!(check(9).unwrap_err().field, "triage_level");
/// ```
#[macro_export]
macro_rules! validate_field {
    ($field:expr, $predicate:expr, $message:expr) => {
        if !$predicate {
            return Err($crate::validation::FieldViolation::new($field, $message).into());
        }
    };
}

/// Reject blank strings
#[macro_export]
macro_rules! validate_required {
    ($field:expr, $value:expr) => {
        $crate::validate_field!($field, !$value.trim().is_empty(), "is required");
    };
}

/// Reject optional values outside an inclusive range; `None` passes
#[macro_export]
macro_rules! validate_range {
    ($field:expr, $value:expr, $min:expr, $max:expr) => {
        if let Some(v) = $value {
            $crate::validate_field!(
                $field,
                v >= $min && v <= $max,
                format!("must be between {} and {}", $min, $max)
            );
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Reading {
        nurse: String,
        heart_rate: Option<i32>,
    }

    impl RequestValidation for Reading {
        type Error = FieldViolation;

        fn validate(&self) -> Result<(), FieldViolation> {
            validate_required!("recorded_by", self.nurse);
            validate_range!("heart_rate", self.heart_rate, 0, 300);
            Ok(())
        }
    }

    #[test]
    fn test_blank_field_is_rejected() {
        let reading = Reading {
            nurse: "   ".to_string(),
            heart_rate: None,
        };
        let err = reading.validate().unwrap_err();
        assert_eq!(err.field, "recorded_by");
        assert_eq!(err.to_string(), "recorded_by: is required");
    }

    #[test]
    fn test_range_skips_absent_values() {
        let reading = Reading {
            nurse: "Nurse Joy".to_string(),
            heart_rate: None,
        };
        assert!(reading.validate().is_ok());

        let reading = Reading {
            nurse: "Nurse Joy".to_string(),
            heart_rate: Some(420),
        };
        assert_eq!(
            reading.validate().unwrap_err().message,
            "must be between 0 and 300"
        );
    }
}
