use database_layer::{AdmissionStatus, BillStatus, ClaimStatus, DatabaseError};
use error_common::{codes, Categorized, ErrorCategory, FieldViolation};
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum BillingError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Admission {0} not found")]
    AdmissionNotFound(Uuid),

    #[error("Bill {0} not found")]
    BillNotFound(Uuid),

    #[error("Insurance claim {0} not found")]
    ClaimNotFound(Uuid),

    #[error("Room {0} not found")]
    RoomNotFound(Uuid),

    #[error("Admission {admission_id} is {status}; charges require an active admission")]
    AdmissionNotActive {
        admission_id: Uuid,
        status: AdmissionStatus,
    },

    #[error("Admission {admission_id} already has bill {bill_number}")]
    BillExists {
        admission_id: Uuid,
        bill_number: String,
    },

    #[error("Bill {bill_id} is {status}")]
    InvalidBillState { bill_id: Uuid, status: BillStatus },

    #[error("Payment of {amount} exceeds balance due {balance}")]
    Overpayment { amount: Decimal, balance: Decimal },

    #[error("Bill {bill_id} already has an active claim {claim_id}")]
    ClaimExists { bill_id: Uuid, claim_id: Uuid },

    #[error("{what} exceeds the largest billable amount {limit}")]
    AmountOutOfRange { what: String, limit: Decimal },

    #[error("Claim cannot move from {from} to {to}")]
    InvalidClaimTransition { from: ClaimStatus, to: ClaimStatus },

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

pub type BillingResult<T> = Result<T, BillingError>;

impl From<FieldViolation> for BillingError {
    fn from(violation: FieldViolation) -> Self {
        BillingError::Validation(violation.to_string())
    }
}

impl Categorized for BillingError {
    fn category(&self) -> ErrorCategory {
        match self {
            BillingError::Validation(_) | BillingError::AmountOutOfRange { .. } => {
                ErrorCategory::Validation
            }
            BillingError::AdmissionNotFound(_)
            | BillingError::BillNotFound(_)
            | BillingError::ClaimNotFound(_)
            | BillingError::RoomNotFound(_) => ErrorCategory::NotFound,
            BillingError::AdmissionNotActive { .. }
            | BillingError::BillExists { .. }
            | BillingError::InvalidBillState { .. }
            | BillingError::Overpayment { .. }
            | BillingError::ClaimExists { .. }
            | BillingError::InvalidClaimTransition { .. } => ErrorCategory::Conflict,
            BillingError::Database(e) => e.category(),
        }
    }

    fn code(&self) -> &'static str {
        match self {
            BillingError::Validation(_) => codes::validation::INVALID_INPUT,
            BillingError::AmountOutOfRange { .. } => codes::validation::OUT_OF_RANGE,
            BillingError::AdmissionNotFound(_)
            | BillingError::BillNotFound(_)
            | BillingError::ClaimNotFound(_)
            | BillingError::RoomNotFound(_) => codes::not_found::RESOURCE_NOT_FOUND,
            BillingError::AdmissionNotActive { .. } => codes::admission::INVALID_ADMISSION_STATE,
            BillingError::BillExists { .. } => codes::billing::BILL_EXISTS,
            BillingError::InvalidBillState { .. } => codes::billing::INVALID_BILL_STATE,
            BillingError::Overpayment { .. } => codes::billing::OVERPAYMENT,
            BillingError::ClaimExists { .. } => codes::billing::CLAIM_EXISTS,
            BillingError::InvalidClaimTransition { .. } => {
                codes::billing::INVALID_CLAIM_TRANSITION
            }
            BillingError::Database(e) => e.code(),
        }
    }
}
