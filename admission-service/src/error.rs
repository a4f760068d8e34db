use database_layer::{AdmissionStatus, DatabaseError};
use error_common::{codes, Categorized, ErrorCategory, FieldViolation};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum AdmissionError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Patient {0} not found")]
    PatientNotFound(Uuid),

    #[error("Department {0} not found")]
    DepartmentNotFound(Uuid),

    #[error("Room {0} not found")]
    RoomNotFound(Uuid),

    #[error("Bed {0} not found")]
    BedNotFound(Uuid),

    #[error("Admission {0} not found")]
    AdmissionNotFound(Uuid),

    #[error("No discharge plan for admission {0}")]
    DischargePlanNotFound(Uuid),

    #[error("Bed {0} is not available")]
    BedUnavailable(Uuid),

    #[error("Bed {0} is not occupied")]
    BedNotOccupied(Uuid),

    #[error("Patient {patient_id} is already admitted (admission {admission_id})")]
    AlreadyAdmitted { patient_id: Uuid, admission_id: Uuid },

    #[error("Admission {admission_id} is {status}")]
    InvalidState {
        admission_id: Uuid,
        status: AdmissionStatus,
    },

    #[error("Facility mismatch: {0}")]
    FacilityMismatch(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

pub type AdmissionResult<T> = Result<T, AdmissionError>;

impl From<FieldViolation> for AdmissionError {
    fn from(violation: FieldViolation) -> Self {
        AdmissionError::Validation(violation.to_string())
    }
}

impl Categorized for AdmissionError {
    fn category(&self) -> ErrorCategory {
        match self {
            AdmissionError::Validation(_) | AdmissionError::FacilityMismatch(_) => {
                ErrorCategory::Validation
            }
            AdmissionError::PatientNotFound(_)
            | AdmissionError::DepartmentNotFound(_)
            | AdmissionError::RoomNotFound(_)
            | AdmissionError::BedNotFound(_)
            | AdmissionError::AdmissionNotFound(_)
            | AdmissionError::DischargePlanNotFound(_) => ErrorCategory::NotFound,
            AdmissionError::BedUnavailable(_)
            | AdmissionError::BedNotOccupied(_)
            | AdmissionError::AlreadyAdmitted { .. }
            | AdmissionError::InvalidState { .. } => ErrorCategory::Conflict,
            AdmissionError::Database(e) => e.category(),
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AdmissionError::Validation(_) => codes::validation::INVALID_INPUT,
            AdmissionError::FacilityMismatch(_) => codes::admission::FACILITY_MISMATCH,
            AdmissionError::PatientNotFound(_)
            | AdmissionError::DepartmentNotFound(_)
            | AdmissionError::RoomNotFound(_)
            | AdmissionError::BedNotFound(_)
            | AdmissionError::AdmissionNotFound(_)
            | AdmissionError::DischargePlanNotFound(_) => codes::not_found::RESOURCE_NOT_FOUND,
            AdmissionError::BedUnavailable(_) | AdmissionError::BedNotOccupied(_) => {
                codes::admission::BED_UNAVAILABLE
            }
            AdmissionError::AlreadyAdmitted { .. } => codes::admission::ALREADY_ADMITTED,
            AdmissionError::InvalidState { .. } => codes::admission::INVALID_ADMISSION_STATE,
            AdmissionError::Database(e) => e.code(),
        }
    }
}
