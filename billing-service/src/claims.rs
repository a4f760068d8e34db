//! Insurance claim split and status flow
use crate::error::{BillingError, BillingResult};
use crate::money;
use database_layer::ClaimStatus;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// How a bill total divides between insurer and patient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ClaimSplit {
    #[schema(value_type = String)]
    pub insurance_amount: Decimal,
    #[schema(value_type = String)]
    pub patient_amount: Decimal,
}

/// Insurer share is `total * coverage / 100` rounded to cents; the patient
/// owes the remainder so the two always add up to the total.
pub fn split_claim(total: Decimal, coverage_percent: Decimal) -> ClaimSplit {
    let insurance_amount = money(total * coverage_percent / Decimal::ONE_HUNDRED);
    ClaimSplit {
        insurance_amount,
        patient_amount: total - insurance_amount,
    }
}

pub fn check_transition(from: ClaimStatus, to: ClaimStatus) -> BillingResult<()> {
    let allowed = matches!(
        (from, to),
        (ClaimStatus::Submitted, ClaimStatus::Approved)
            | (ClaimStatus::Submitted, ClaimStatus::Rejected)
            | (ClaimStatus::Approved, ClaimStatus::Paid)
    );
    if allowed {
        Ok(())
    } else {
        Err(BillingError::InvalidClaimTransition { from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_adds_up_to_total() {
        let split = split_claim(Decimal::new(123450, 2), Decimal::new(80, 0));
        assert_eq!(split.insurance_amount, Decimal::new(98760, 2));
        assert_eq!(split.patient_amount, Decimal::new(24690, 2));
    }

    #[test]
    fn test_half_cent_rounds_away_from_zero() {
        // 100.05 * 50% = 50.025
        let split = split_claim(Decimal::new(10005, 2), Decimal::new(50, 0));
        assert_eq!(split.insurance_amount, Decimal::new(5003, 2));
        assert_eq!(split.patient_amount, Decimal::new(5002, 2));
    }

    #[test]
    fn test_full_and_zero_coverage() {
        let total = Decimal::new(5000, 2);
        assert_eq!(split_claim(total, Decimal::ONE_HUNDRED).patient_amount, Decimal::ZERO);
        assert_eq!(split_claim(total, Decimal::ZERO).insurance_amount, Decimal::ZERO);
    }

    #[test]
    fn test_claim_transitions() {
        assert!(check_transition(ClaimStatus::Submitted, ClaimStatus::Approved).is_ok());
        assert!(check_transition(ClaimStatus::Approved, ClaimStatus::Paid).is_ok());
        assert!(check_transition(ClaimStatus::Submitted, ClaimStatus::Paid).is_err());
        assert!(check_transition(ClaimStatus::Rejected, ClaimStatus::Approved).is_err());
    }
}
