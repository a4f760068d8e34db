// Patient registry and medical records
use crate::error::{AdmissionError, AdmissionResult};
use crate::requests::*;
use crate::service::AdmissionService;
use chrono::Utc;
use database_layer::{finish, AdmissionRows, ClinicalRows, MedicalRecord, Patient, PatientRows};
use error_common::RequestValidation;
use tracing::info;
use uuid::Uuid;

impl AdmissionService {
    pub async fn register_patient(
        &self,
        request: RegisterPatientRequest,
    ) -> AdmissionResult<Patient> {
        request.validate()?;
        let patient = Patient {
            id: Uuid::new_v4(),
            medical_record_number: request.medical_record_number.trim().to_string(),
            first_name: request.first_name.trim().to_string(),
            last_name: request.last_name.trim().to_string(),
            date_of_birth: request.date_of_birth,
            gender: request.gender,
            phone: request.phone,
            email: request.email,
            address: request.address,
            blood_group: request.blood_group,
            emergency_contact_name: request.emergency_contact_name,
            emergency_contact_phone: request.emergency_contact_phone,
            created_at: Utc::now(),
        };
        let mut tx = self.db.begin().await?;
        let result = tx.insert_patient(&patient).await.map_err(AdmissionError::from);
        finish(tx, result).await?;
        info!(patient_id = %patient.id, "Patient registered");
        Ok(patient)
    }

    pub async fn get_patient(&self, patient_id: Uuid) -> AdmissionResult<Patient> {
        let mut tx = self.db.begin().await?;
        let result: AdmissionResult<Patient> = async {
            tx.patient(patient_id)
                .await?
                .ok_or(AdmissionError::PatientNotFound(patient_id))
        }
        .await;
        finish(tx, result).await
    }

    pub async fn find_patient_by_mrn(&self, mrn: &str) -> AdmissionResult<Option<Patient>> {
        let mut tx = self.db.begin().await?;
        let result = tx.patient_by_mrn(mrn.trim()).await.map_err(AdmissionError::from);
        finish(tx, result).await
    }

    /// Patients ordered by name
    pub async fn list_patients(&self, limit: i64, offset: i64) -> AdmissionResult<Vec<Patient>> {
        if limit <= 0 || offset < 0 {
            return Err(AdmissionError::Validation(
                "limit must be positive and offset non-negative".to_string(),
            ));
        }
        let mut tx = self.db.begin().await?;
        let result = tx
            .list_patients(limit, offset)
            .await
            .map_err(AdmissionError::from);
        finish(tx, result).await
    }

    pub async fn add_medical_record(
        &self,
        patient_id: Uuid,
        request: AddMedicalRecordRequest,
    ) -> AdmissionResult<MedicalRecord> {
        request.validate()?;
        let mut tx = self.db.begin().await?;
        let result: AdmissionResult<MedicalRecord> = async {
            tx.patient(patient_id)
                .await?
                .ok_or(AdmissionError::PatientNotFound(patient_id))?;
            if let Some(admission_id) = request.admission_id {
                let admission = tx
                    .admission(admission_id)
                    .await?
                    .ok_or(AdmissionError::AdmissionNotFound(admission_id))?;
                if admission.patient_id != patient_id {
                    return Err(AdmissionError::Validation(format!(
                        "admission_id: admission {} belongs to another patient",
                        admission_id
                    )));
                }
            }
            let record = MedicalRecord {
                id: Uuid::new_v4(),
                patient_id,
                admission_id: request.admission_id,
                record_type: request.record_type,
                notes: request.notes,
                recorded_by: request.recorded_by,
                recorded_at: Utc::now(),
            };
            tx.insert_medical_record(&record).await?;
            Ok(record)
        }
        .await;
        let record = finish(tx, result).await?;
        info!(record_id = %record.id, record_type = %record.record_type, "Medical record filed");
        Ok(record)
    }

    /// Newest records first
    pub async fn medical_records(&self, patient_id: Uuid) -> AdmissionResult<Vec<MedicalRecord>> {
        let mut tx = self.db.begin().await?;
        let result: AdmissionResult<Vec<MedicalRecord>> = async {
            tx.patient(patient_id)
                .await?
                .ok_or(AdmissionError::PatientNotFound(patient_id))?;
            Ok(tx.medical_records(patient_id).await?)
        }
        .await;
        finish(tx, result).await
    }
}
