use crate::error::VitalsError;
use error_common::{validate_field, validate_range, validate_required, RequestValidation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// One set of bedside observations; every measurement is optional
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct RecordVitalsRequest {
    pub patient_id: Uuid,
    pub admission_id: Option<Uuid>,
    pub temperature_c: Option<f64>,
    pub systolic_bp: Option<i32>,
    pub diastolic_bp: Option<i32>,
    pub heart_rate: Option<i32>,
    pub respiratory_rate: Option<i32>,
    pub oxygen_saturation: Option<i32>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub notes: Option<String>,
    pub recorded_by: String,
}

impl RecordVitalsRequest {
    fn has_measurement(&self) -> bool {
        self.temperature_c.is_some()
            || self.systolic_bp.is_some()
            || self.diastolic_bp.is_some()
            || self.heart_rate.is_some()
            || self.respiratory_rate.is_some()
            || self.oxygen_saturation.is_some()
            || self.height_cm.is_some()
            || self.weight_kg.is_some()
    }
}

impl RequestValidation for RecordVitalsRequest {
    type Error = VitalsError;

    /// Rejects physiologically impossible values; abnormal but plausible
    /// readings are accepted and flagged later by the assessment.
    fn validate(&self) -> Result<(), VitalsError> {
        validate_required!("recorded_by", self.recorded_by);
        validate_field!(
            "measurements",
            self.has_measurement(),
            "at least one measurement is required"
        );
        validate_range!("temperature_c", self.temperature_c, 25.0, 45.0);
        validate_range!("systolic_bp", self.systolic_bp, 0, 300);
        validate_range!("diastolic_bp", self.diastolic_bp, 0, 300);
        validate_range!("heart_rate", self.heart_rate, 0, 300);
        validate_range!("respiratory_rate", self.respiratory_rate, 0, 80);
        validate_range!("oxygen_saturation", self.oxygen_saturation, 0, 100);
        validate_range!("height_cm", self.height_cm, 30.0, 272.0);
        validate_range!("weight_kg", self.weight_kg, 0.5, 650.0);
        if let (Some(systolic), Some(diastolic)) = (self.systolic_bp, self.diastolic_bp) {
            validate_field!(
                "diastolic_bp",
                diastolic <= systolic,
                "must not exceed systolic_bp"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RecordVitalsRequest {
        RecordVitalsRequest {
            patient_id: Uuid::new_v4(),
            heart_rate: Some(72),
            recorded_by: "Nurse Joy".to_string(),
            ..RecordVitalsRequest::default()
        }
    }

    #[test]
    fn test_plausible_reading_passes() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_empty_reading_is_rejected() {
        let req = RecordVitalsRequest {
            heart_rate: None,
            ..request()
        };
        assert!(matches!(req.validate(), Err(VitalsError::Validation(_))));
    }

    #[test]
    fn test_impossible_temperature_is_rejected() {
        let req = RecordVitalsRequest {
            temperature_c: Some(51.0),
            ..request()
        };
        let err = req.validate().unwrap_err();
        assert!(err.to_string().contains("temperature_c"));
    }

    #[test]
    fn test_diastolic_above_systolic_is_rejected() {
        let req = RecordVitalsRequest {
            systolic_bp: Some(80),
            diastolic_bp: Some(120),
            ..request()
        };
        assert!(req.validate().is_err());
    }
}
