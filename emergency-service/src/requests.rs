use crate::error::EmergencyError;
use chrono::{DateTime, Utc};
use database_layer::TriageStatus;
use error_common::{validate_range, validate_required, RequestValidation};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Most and least urgent triage levels
pub const MOST_URGENT: i32 = 1;
pub const LEAST_URGENT: i32 = 5;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterTriageRequest {
    pub patient_id: Uuid,
    pub chief_complaint: String,
    /// 1 (resuscitation) to 5 (non-urgent)
    #[schema(minimum = 1, maximum = 5)]
    pub triage_level: i32,
    pub triage_nurse: String,
    pub notes: Option<String>,
}

impl RequestValidation for RegisterTriageRequest {
    type Error = EmergencyError;

    fn validate(&self) -> Result<(), EmergencyError> {
        validate_required!("chief_complaint", self.chief_complaint);
        validate_required!("triage_nurse", self.triage_nurse);
        validate_range!(
            "triage_level",
            Some(self.triage_level),
            MOST_URGENT,
            LEAST_URGENT
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateTriageStatus {
    pub status: TriageStatus,
    /// Required when moving to ASSIGNED unless a doctor is already set
    pub assigned_doctor: Option<String>,
    /// Appended to the record's notes
    pub notes: Option<String>,
}

impl RequestValidation for UpdateTriageStatus {
    type Error = EmergencyError;

    fn validate(&self) -> Result<(), EmergencyError> {
        if let Some(doctor) = &self.assigned_doctor {
            validate_required!("assigned_doctor", doctor);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SummaryQuery {
    /// Count arrivals from this instant; defaults to the start of the
    /// current UTC day
    pub since: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(level: i32) -> RegisterTriageRequest {
        RegisterTriageRequest {
            patient_id: Uuid::new_v4(),
            chief_complaint: "Shortness of breath".to_string(),
            triage_level: level,
            triage_nurse: "Nurse Ratched".to_string(),
            notes: None,
        }
    }

    #[test]
    fn test_triage_level_bounds() {
        assert!(request(1).validate().is_ok());
        assert!(request(5).validate().is_ok());
        assert!(matches!(
            request(0).validate(),
            Err(EmergencyError::Validation(_))
        ));
        assert!(request(6).validate().is_err());
    }

    #[test]
    fn test_blank_doctor_is_rejected() {
        let update = UpdateTriageStatus {
            status: TriageStatus::Assigned,
            assigned_doctor: Some("  ".to_string()),
            notes: None,
        };
        assert!(update.validate().is_err());
    }
}
