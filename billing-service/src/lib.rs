//! Billing Service for inpatient stays
//!
//! Provides:
//! - Charge capture for medications and lab tests during an admission
//! - Bill generation from room, medication and lab charges
//! - Payments with automatic bill status tracking
//! - Insurance claims with insurer/patient split
//! - Outstanding receivables
//!
//! Amounts are [`rust_decimal::Decimal`] and rounded to cents half away
//! from zero.

pub mod claims;
pub mod error;
pub mod invoice;
pub mod models;
pub mod payment;
pub mod reporting;
pub mod service;

pub use claims::ClaimSplit;
pub use error::*;
pub use models::*;
pub use reporting::OutstandingReport;
pub use service::*;

use rust_decimal::{Decimal, RoundingStrategy};

/// Round to cents, half away from zero
pub fn money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
