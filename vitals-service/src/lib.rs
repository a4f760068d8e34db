//! Vital Signs Service
//!
//! Records bedside observations, derives BMI and flags readings that fall
//! outside fixed adult normal ranges.

pub mod assessment;
pub mod error;
pub mod requests;
pub mod service;

pub use assessment::{assess, body_mass_index, Deviation, Finding, Vital, VitalAssessment};
pub use error::*;
pub use requests::*;
pub use service::*;
