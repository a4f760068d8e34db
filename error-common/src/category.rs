use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse classification shared by every service error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Caller supplied invalid input
    Validation,
    /// A referenced row does not exist
    NotFound,
    /// The request conflicts with current row state
    Conflict,
    /// The database could not be reached
    Unavailable,
    /// The database rejected or failed the statement
    Database,
    /// Misconfiguration detected at runtime
    Configuration,
    /// Anything else
    Internal,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Validation => "validation_error",
            ErrorCategory::NotFound => "not_found",
            ErrorCategory::Conflict => "conflict",
            ErrorCategory::Unavailable => "service_unavailable",
            ErrorCategory::Database => "database_error",
            ErrorCategory::Configuration => "configuration_error",
            ErrorCategory::Internal => "internal_error",
        }
    }

    /// Whether the error was caused by the caller rather than the system
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ErrorCategory::Validation | ErrorCategory::NotFound | ErrorCategory::Conflict
        )
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Implemented by every service error so callers can map it without
/// matching on crate-specific variants.
pub trait Categorized: std::error::Error {
    fn category(&self) -> ErrorCategory;

    /// Stable error code from [`crate::codes`]
    fn code(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(ErrorCategory::Validation.is_client_error());
        assert!(ErrorCategory::Conflict.is_client_error());
        assert!(!ErrorCategory::Database.is_client_error());
        assert!(!ErrorCategory::Unavailable.is_client_error());
    }

    #[test]
    fn test_category_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorCategory::NotFound).unwrap();
        assert_eq!(json, "\"not_found\"");
        assert_eq!(ErrorCategory::NotFound.to_string(), "not_found");
    }
}
