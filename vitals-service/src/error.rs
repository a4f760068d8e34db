use database_layer::DatabaseError;
use error_common::{codes, Categorized, ErrorCategory, FieldViolation};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum VitalsError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Patient {0} not found")]
    PatientNotFound(Uuid),

    #[error("Admission {0} not found")]
    AdmissionNotFound(Uuid),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

pub type VitalsResult<T> = Result<T, VitalsError>;

impl From<FieldViolation> for VitalsError {
    fn from(violation: FieldViolation) -> Self {
        VitalsError::Validation(violation.to_string())
    }
}

impl Categorized for VitalsError {
    fn category(&self) -> ErrorCategory {
        match self {
            VitalsError::Validation(_) => ErrorCategory::Validation,
            VitalsError::PatientNotFound(_) | VitalsError::AdmissionNotFound(_) => {
                ErrorCategory::NotFound
            }
            VitalsError::Database(e) => e.category(),
        }
    }

    fn code(&self) -> &'static str {
        match self {
            VitalsError::Validation(_) => codes::validation::OUT_OF_RANGE,
            VitalsError::PatientNotFound(_) | VitalsError::AdmissionNotFound(_) => {
                codes::not_found::RESOURCE_NOT_FOUND
            }
            VitalsError::Database(e) => e.code(),
        }
    }
}
