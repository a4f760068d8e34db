//! Common error handling utilities for the hospital operations engine
//!
//! Every service crate owns its own `thiserror` enum. This crate provides the
//! pieces they share so the HTTP layer can treat them uniformly:
//!
//! - **ErrorCategory**: coarse classification (validation, not found,
//!   conflict, database, configuration, internal)
//! - **Categorized**: trait implemented by every service error, exposing a
//!   category and a stable error code
//! - **Error codes**: string constants grouped by domain
//! - **HospitalError**: process-level error used by binaries
//! - **Validation**: `RequestValidation` plus the `validate_*` macros
//!
//! # Example
//!
//! ```rust
//! use error_common::{Categorized, ErrorCategory, codes};
//!
//! #[derive(Debug, thiserror::Error)]
//! enum WardError {
//!     #[error("Bed {0} is not available")]
//!     BedUnavailable(String),
//! }
//!
//! impl Categorized for WardError {
//!     fn category(&self) -> ErrorCategory {
//!         ErrorCategory::Conflict
//!     }
//!
//!     fn code(&self) -> &'static str {
//!         codes::admission::BED_UNAVAILABLE
//!     }
//! }
//!
//! let err = WardError::BedUnavailable("B-101".into());
//! assert_eq!(err.category(), ErrorCategory::Conflict);
//! ```

pub mod category;
pub mod codes;
pub mod types;
pub mod validation;

pub use category::*;
pub use types::*;
pub use validation::{FieldViolation, RequestValidation};
