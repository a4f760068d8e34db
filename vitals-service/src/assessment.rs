//! Abnormal vital-sign detection and BMI.
//!
//! Normal ranges are inclusive. A measurement that was not taken is never
//! flagged.

use chrono::{DateTime, Utc};
use database_layer::VitalSigns;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

/// Inclusive normal range for one vital
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalRange {
    pub low: f64,
    pub high: f64,
}

impl NormalRange {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    fn deviation(&self, value: f64) -> Option<Deviation> {
        if value < self.low {
            Some(Deviation::Low)
        } else if value > self.high {
            Some(Deviation::High)
        } else {
            None
        }
    }
}

pub const TEMPERATURE_C: NormalRange = NormalRange::new(36.1, 37.8);
pub const SYSTOLIC_BP: NormalRange = NormalRange::new(90.0, 140.0);
pub const DIASTOLIC_BP: NormalRange = NormalRange::new(60.0, 90.0);
pub const HEART_RATE: NormalRange = NormalRange::new(60.0, 100.0);
pub const RESPIRATORY_RATE: NormalRange = NormalRange::new(12.0, 20.0);
/// SpO2 has no upper bound
pub const OXYGEN_SATURATION: NormalRange = NormalRange::new(95.0, 100.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Vital {
    Temperature,
    SystolicBloodPressure,
    DiastolicBloodPressure,
    HeartRate,
    RespiratoryRate,
    OxygenSaturation,
}

impl Vital {
    fn label(&self) -> &'static str {
        match self {
            Vital::Temperature => "temperature",
            Vital::SystolicBloodPressure => "systolic blood pressure",
            Vital::DiastolicBloodPressure => "diastolic blood pressure",
            Vital::HeartRate => "heart rate",
            Vital::RespiratoryRate => "respiratory rate",
            Vital::OxygenSaturation => "oxygen saturation",
        }
    }

    fn unit(&self) -> &'static str {
        match self {
            Vital::Temperature => "°C",
            Vital::SystolicBloodPressure | Vital::DiastolicBloodPressure => "mmHg",
            Vital::HeartRate => "bpm",
            Vital::RespiratoryRate => "/min",
            Vital::OxygenSaturation => "%",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Deviation {
    Low,
    High,
}

/// One out-of-range measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Finding {
    pub vital: Vital,
    pub value: f64,
    pub deviation: Deviation,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = match self.deviation {
            Deviation::Low => "Low",
            Deviation::High => "High",
        };
        write!(f, "{} {}: {} {}", direction, self.vital.label(), self.value, self.vital.unit())
    }
}

/// Outcome of checking one reading against the normal ranges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VitalAssessment {
    pub vital_signs_id: Uuid,
    pub patient_id: Uuid,
    pub recorded_at: DateTime<Utc>,
    pub findings: Vec<Finding>,
    /// `"Normal"`, or the findings joined with `"; "`
    pub summary: String,
}

impl VitalAssessment {
    pub fn is_normal(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Compare the six monitored vitals of a reading against their normal ranges
pub fn assess(vitals: &VitalSigns) -> VitalAssessment {
    let checks = [
        (Vital::Temperature, vitals.temperature_c, TEMPERATURE_C),
        (Vital::SystolicBloodPressure, vitals.systolic_bp.map(f64::from), SYSTOLIC_BP),
        (Vital::DiastolicBloodPressure, vitals.diastolic_bp.map(f64::from), DIASTOLIC_BP),
        (Vital::HeartRate, vitals.heart_rate.map(f64::from), HEART_RATE),
        (Vital::RespiratoryRate, vitals.respiratory_rate.map(f64::from), RESPIRATORY_RATE),
        (Vital::OxygenSaturation, vitals.oxygen_saturation.map(f64::from), OXYGEN_SATURATION),
    ];

    let findings: Vec<Finding> = checks
        .into_iter()
        .filter_map(|(vital, value, range)| {
            let value = value?;
            range.deviation(value).map(|deviation| Finding {
                vital,
                value,
                deviation,
            })
        })
        .collect();

    let summary = if findings.is_empty() {
        "Normal".to_string()
    } else {
        findings
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    };

    VitalAssessment {
        vital_signs_id: vitals.id,
        patient_id: vitals.patient_id,
        recorded_at: vitals.recorded_at,
        findings,
        summary,
    }
}

/// Body-mass index from height in centimetres and weight in kilograms,
/// rounded to two decimals
pub fn body_mass_index(height_cm: f64, weight_kg: f64) -> Option<f64> {
    if height_cm <= 0.0 || weight_kg <= 0.0 {
        return None;
    }
    let height_m = height_cm / 100.0;
    let bmi = weight_kg / (height_m * height_m);
    Some((bmi * 100.0).round() / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading() -> VitalSigns {
        VitalSigns {
            id: Uuid::new_v4(),
            patient_id: Uuid::new_v4(),
            admission_id: None,
            temperature_c: Some(36.8),
            systolic_bp: Some(120),
            diastolic_bp: Some(80),
            heart_rate: Some(72),
            respiratory_rate: Some(16),
            oxygen_saturation: Some(98),
            height_cm: None,
            weight_kg: None,
            bmi: None,
            notes: None,
            recorded_by: "Nurse Joy".to_string(),
            recorded_at: Utc::now(),
        }
    }

    #[test]
    fn test_all_in_range_is_normal() {
        let assessment = assess(&reading());
        assert!(assessment.is_normal());
        assert_eq!(assessment.summary, "Normal");
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let vitals = VitalSigns {
            temperature_c: Some(37.8),
            systolic_bp: Some(90),
            diastolic_bp: Some(90),
            heart_rate: Some(100),
            respiratory_rate: Some(12),
            oxygen_saturation: Some(95),
            ..reading()
        };
        assert_eq!(assess(&vitals).summary, "Normal");
    }

    #[test]
    fn test_absent_values_are_not_flagged() {
        let vitals = VitalSigns {
            temperature_c: None,
            systolic_bp: None,
            diastolic_bp: None,
            heart_rate: None,
            respiratory_rate: None,
            oxygen_saturation: None,
            ..reading()
        };
        assert!(assess(&vitals).is_normal());
    }

    #[test]
    fn test_findings_are_joined_in_order() {
        let vitals = VitalSigns {
            temperature_c: Some(39.2),
            heart_rate: Some(128),
            oxygen_saturation: Some(91),
            ..reading()
        };
        let assessment = assess(&vitals);
        assert_eq!(assessment.findings.len(), 3);
        assert_eq!(
            assessment.summary,
            "High temperature: 39.2 °C; High heart rate: 128 bpm; Low oxygen saturation: 91 %"
        );
    }

    #[test]
    fn test_low_blood_pressure_is_flagged() {
        let vitals = VitalSigns {
            systolic_bp: Some(85),
            diastolic_bp: Some(55),
            ..reading()
        };
        let deviations: Vec<_> = assess(&vitals)
            .findings
            .into_iter()
            .map(|f| (f.vital, f.deviation))
            .collect();
        assert_eq!(
            deviations,
            vec![
                (Vital::SystolicBloodPressure, Deviation::Low),
                (Vital::DiastolicBloodPressure, Deviation::Low),
            ]
        );
    }

    #[test]
    fn test_bmi_rounds_to_two_decimals() {
        assert_eq!(body_mass_index(175.0, 70.0), Some(22.86));
        assert_eq!(body_mass_index(160.0, 50.0), Some(19.53));
        assert_eq!(body_mass_index(0.0, 50.0), None);
    }
}
