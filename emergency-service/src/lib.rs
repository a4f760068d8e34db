//! Emergency Service for the emergency department
//!
//! Provides:
//! - Triage registration with a 1 (most urgent) to 5 level
//! - Status flow from WAITING to a terminal disposition, with start and end
//!   times stamped along the way
//! - The live queue and a per-status, per-level department summary

pub mod error;
pub mod flow;
pub mod requests;
pub mod service;
pub mod summary;

pub use error::*;
pub use requests::*;
pub use service::*;
pub use summary::*;
