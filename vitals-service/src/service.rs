use crate::assessment::{assess, body_mass_index, VitalAssessment};
use crate::error::{VitalsError, VitalsResult};
use crate::requests::RecordVitalsRequest;
use chrono::Utc;
use database_layer::{
    finish, AdmissionRows, ClinicalRows, HospitalDatabase, HospitalTransaction, PatientRows,
    VitalSigns,
};
use error_common::RequestValidation;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Upper bound for history queries
pub const MAX_HISTORY: i64 = 500;

#[derive(Clone)]
pub struct VitalsService {
    db: Arc<dyn HospitalDatabase>,
}

impl VitalsService {
    pub fn new(db: Arc<dyn HospitalDatabase>) -> Self {
        Self { db }
    }

    /// Store a reading, deriving BMI when both height and weight are present
    pub async fn record_vital_signs(&self, request: RecordVitalsRequest) -> VitalsResult<VitalSigns> {
        request.validate()?;
        let mut tx = self.db.begin().await?;
        let result = record(tx.as_mut(), request).await;
        let vitals = finish(tx, result).await?;

        let assessment = assess(&vitals);
        if assessment.is_normal() {
            info!(vital_signs_id = %vitals.id, patient_id = %vitals.patient_id, "Vital signs recorded");
        } else {
            warn!(
                vital_signs_id = %vitals.id,
                patient_id = %vitals.patient_id,
                findings = %assessment.summary,
                "Abnormal vital signs recorded"
            );
        }
        Ok(vitals)
    }

    /// `None` when no reading has this id
    pub async fn check_abnormal_vitals(
        &self,
        vital_signs_id: Uuid,
    ) -> VitalsResult<Option<VitalAssessment>> {
        let mut tx = self.db.begin().await?;
        let result = tx
            .vital_signs(vital_signs_id)
            .await
            .map_err(VitalsError::from);
        let vitals = finish(tx, result).await?;
        Ok(vitals.as_ref().map(assess))
    }

    pub async fn latest_vitals(&self, patient_id: Uuid) -> VitalsResult<Option<VitalSigns>> {
        Ok(self.vital_history(patient_id, 1).await?.into_iter().next())
    }

    /// Newest readings first
    pub async fn vital_history(&self, patient_id: Uuid, limit: i64) -> VitalsResult<Vec<VitalSigns>> {
        if !(1..=MAX_HISTORY).contains(&limit) {
            return Err(VitalsError::Validation(format!(
                "limit: must be between 1 and {}",
                MAX_HISTORY
            )));
        }
        let mut tx = self.db.begin().await?;
        let result: VitalsResult<Vec<VitalSigns>> = async {
            tx.patient(patient_id)
                .await?
                .ok_or(VitalsError::PatientNotFound(patient_id))?;
            Ok(tx.vital_history(patient_id, limit).await?)
        }
        .await;
        finish(tx, result).await
    }
}

async fn record(
    tx: &mut dyn HospitalTransaction,
    request: RecordVitalsRequest,
) -> VitalsResult<VitalSigns> {
    tx.patient(request.patient_id)
        .await?
        .ok_or(VitalsError::PatientNotFound(request.patient_id))?;

    if let Some(admission_id) = request.admission_id {
        let admission = tx
            .admission(admission_id)
            .await?
            .ok_or(VitalsError::AdmissionNotFound(admission_id))?;
        if admission.patient_id != request.patient_id {
            return Err(VitalsError::Validation(format!(
                "admission_id: admission {} belongs to another patient",
                admission_id
            )));
        }
    }

    let bmi = match (request.height_cm, request.weight_kg) {
        (Some(height), Some(weight)) => body_mass_index(height, weight),
        _ => None,
    };

    let vitals = VitalSigns {
        id: Uuid::new_v4(),
        patient_id: request.patient_id,
        admission_id: request.admission_id,
        temperature_c: request.temperature_c,
        systolic_bp: request.systolic_bp,
        diastolic_bp: request.diastolic_bp,
        heart_rate: request.heart_rate,
        respiratory_rate: request.respiratory_rate,
        oxygen_saturation: request.oxygen_saturation,
        height_cm: request.height_cm,
        weight_kg: request.weight_kg,
        bmi,
        notes: request.notes,
        recorded_by: request.recorded_by,
        recorded_at: Utc::now(),
    };
    tx.insert_vital_signs(&vitals).await?;
    Ok(vitals)
}
