//! Admission Service for hospital inpatient flow
//!
//! Provides:
//! - Patient registration and lookup
//! - Department, room and bed management with a per-bed availability board
//! - Admission, discharge and transfer (ADT) workflows
//! - Medical record filing
//!
//! Every operation runs inside a single database transaction.

pub mod error;
pub mod facility;
pub mod patients;
pub mod requests;
pub mod service;

pub use error::*;
pub use requests::*;
pub use service::*;
