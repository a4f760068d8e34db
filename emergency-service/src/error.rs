use database_layer::{DatabaseError, TriageStatus};
use error_common::{codes, Categorized, ErrorCategory, FieldViolation};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum EmergencyError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Patient {0} not found")]
    PatientNotFound(Uuid),

    #[error("Triage record {0} not found")]
    TriageNotFound(Uuid),

    #[error("Triage cannot move from {from} to {to}")]
    InvalidTransition { from: TriageStatus, to: TriageStatus },

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

pub type EmergencyResult<T> = Result<T, EmergencyError>;

impl From<FieldViolation> for EmergencyError {
    fn from(violation: FieldViolation) -> Self {
        EmergencyError::Validation(violation.to_string())
    }
}

impl Categorized for EmergencyError {
    fn category(&self) -> ErrorCategory {
        match self {
            EmergencyError::Validation(_) => ErrorCategory::Validation,
            EmergencyError::PatientNotFound(_) | EmergencyError::TriageNotFound(_) => {
                ErrorCategory::NotFound
            }
            EmergencyError::InvalidTransition { .. } => ErrorCategory::Conflict,
            EmergencyError::Database(e) => e.category(),
        }
    }

    fn code(&self) -> &'static str {
        match self {
            EmergencyError::Validation(_) => codes::validation::INVALID_INPUT,
            EmergencyError::PatientNotFound(_) | EmergencyError::TriageNotFound(_) => {
                codes::not_found::RESOURCE_NOT_FOUND
            }
            EmergencyError::InvalidTransition { .. } => {
                codes::emergency::INVALID_TRIAGE_TRANSITION
            }
            EmergencyError::Database(e) => e.code(),
        }
    }
}
