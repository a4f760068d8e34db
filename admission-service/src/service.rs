use crate::error::{AdmissionError, AdmissionResult};
use crate::requests::*;
use chrono::Utc;
use database_layer::{
    finish, Admission, AdmissionFilter, AdmissionRows, AdmissionStatus, Bed, ClinicalRows,
    DischargePlan, FacilityRows, HospitalDatabase, HospitalTransaction, MedicalRecord,
    PatientRows, PatientTransfer, RecordType, Room,
};
use error_common::RequestValidation;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

/// Result of a discharge: the closed admission and its plan
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DischargeOutcome {
    pub admission: Admission,
    pub discharge_plan: DischargePlan,
}

/// Result of a transfer: the moved admission and the history row
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TransferOutcome {
    pub admission: Admission,
    pub transfer: PatientTransfer,
}

/// Admission, discharge and transfer workflows.
///
/// Each public method runs in exactly one transaction; any error rolls back
/// every write the method made.
#[derive(Clone)]
pub struct AdmissionService {
    pub(crate) db: Arc<dyn HospitalDatabase>,
}

impl AdmissionService {
    pub fn new(db: Arc<dyn HospitalDatabase>) -> Self {
        Self { db }
    }

    /// Admit a patient into a specific bed.
    ///
    /// The bed is marked OCCUPIED and an ADMISSION_NOTE is filed in the same
    /// transaction.
    pub async fn admit_patient(&self, request: AdmitPatientRequest) -> AdmissionResult<Admission> {
        request.validate()?;
        let mut tx = self.db.begin().await?;
        let result = admit(tx.as_mut(), request).await;
        let admission = finish(tx, result).await?;
        info!(
            admission_id = %admission.id,
            patient_id = %admission.patient_id,
            bed_id = %admission.bed_id,
            "Patient admitted"
        );
        Ok(admission)
    }

    /// Close an admission, record its discharge plan and free the bed
    pub async fn discharge_patient(
        &self,
        admission_id: Uuid,
        request: DischargeRequest,
    ) -> AdmissionResult<DischargeOutcome> {
        request.validate()?;
        let mut tx = self.db.begin().await?;
        let result = discharge(tx.as_mut(), admission_id, request).await;
        let outcome = finish(tx, result).await?;
        info!(
            admission_id = %admission_id,
            bed_id = %outcome.admission.bed_id,
            disposition = %outcome.discharge_plan.discharge_disposition,
            "Patient discharged"
        );
        Ok(outcome)
    }

    /// Move an admitted patient to another bed, possibly in another department
    pub async fn transfer_patient(
        &self,
        admission_id: Uuid,
        request: TransferRequest,
    ) -> AdmissionResult<TransferOutcome> {
        request.validate()?;
        let mut tx = self.db.begin().await?;
        let result = transfer(tx.as_mut(), admission_id, request).await;
        let outcome = finish(tx, result).await?;
        info!(
            admission_id = %admission_id,
            from_bed_id = %outcome.transfer.from_bed_id,
            to_bed_id = %outcome.transfer.to_bed_id,
            "Patient transferred"
        );
        Ok(outcome)
    }

    pub async fn get_admission(&self, admission_id: Uuid) -> AdmissionResult<Admission> {
        let mut tx = self.db.begin().await?;
        let result = load_admission(tx.as_mut(), admission_id).await;
        finish(tx, result).await
    }

    pub async fn list_admissions(&self, query: AdmissionQuery) -> AdmissionResult<Vec<Admission>> {
        let filter = AdmissionFilter {
            status: query.status,
            department_id: query.department_id,
            patient_id: query.patient_id,
        };
        let mut tx = self.db.begin().await?;
        let result = tx.list_admissions(&filter).await.map_err(AdmissionError::from);
        finish(tx, result).await
    }

    /// Transfers for an admission, oldest first
    pub async fn transfer_history(
        &self,
        admission_id: Uuid,
    ) -> AdmissionResult<Vec<PatientTransfer>> {
        let mut tx = self.db.begin().await?;
        let result: AdmissionResult<_> = async {
            load_admission(tx.as_mut(), admission_id).await?;
            Ok(tx.transfers(admission_id).await?)
        }
        .await;
        finish(tx, result).await
    }

    pub async fn discharge_plan(&self, admission_id: Uuid) -> AdmissionResult<DischargePlan> {
        let mut tx = self.db.begin().await?;
        let result: AdmissionResult<_> = async {
            load_admission(tx.as_mut(), admission_id).await?;
            tx.discharge_plan(admission_id)
                .await?
                .ok_or(AdmissionError::DischargePlanNotFound(admission_id))
        }
        .await;
        finish(tx, result).await
    }
}

pub(crate) async fn load_admission(
    tx: &mut dyn HospitalTransaction,
    admission_id: Uuid,
) -> AdmissionResult<Admission> {
    tx.admission(admission_id)
        .await?
        .ok_or(AdmissionError::AdmissionNotFound(admission_id))
}

fn require_admitted(admission: &Admission) -> AdmissionResult<()> {
    if admission.admission_status != AdmissionStatus::Admitted {
        warn!(
            admission_id = %admission.id,
            status = %admission.admission_status,
            "Rejected change to closed admission"
        );
        return Err(AdmissionError::InvalidState {
            admission_id: admission.id,
            status: admission.admission_status,
        });
    }
    Ok(())
}

/// Resolve department, room and bed, checking that they nest
async fn locate_bed(
    tx: &mut dyn HospitalTransaction,
    department_id: Uuid,
    room_id: Uuid,
    bed_id: Uuid,
) -> AdmissionResult<(String, Room, Bed)> {
    let department = tx
        .department(department_id)
        .await?
        .ok_or(AdmissionError::DepartmentNotFound(department_id))?;
    let room = tx
        .room(room_id)
        .await?
        .ok_or(AdmissionError::RoomNotFound(room_id))?;
    if room.department_id != department.id {
        return Err(AdmissionError::FacilityMismatch(format!(
            "room {} is not in department {}",
            room.room_number, department.name
        )));
    }
    let bed = tx
        .bed(bed_id)
        .await?
        .ok_or(AdmissionError::BedNotFound(bed_id))?;
    if bed.room_id != room.id {
        return Err(AdmissionError::FacilityMismatch(format!(
            "bed {} is not in room {}",
            bed.bed_number, room.room_number
        )));
    }
    Ok((department.name, room, bed))
}

async fn admit(
    tx: &mut dyn HospitalTransaction,
    request: AdmitPatientRequest,
) -> AdmissionResult<Admission> {
    let patient = tx
        .patient(request.patient_id)
        .await?
        .ok_or(AdmissionError::PatientNotFound(request.patient_id))?;
    if let Some(open) = tx.open_admission_for_patient(patient.id).await? {
        return Err(AdmissionError::AlreadyAdmitted {
            patient_id: patient.id,
            admission_id: open.id,
        });
    }

    let (department_name, room, bed) =
        locate_bed(tx, request.department_id, request.room_id, request.bed_id).await?;

    let now = Utc::now();
    if tx.occupy_bed(bed.id, patient.id, now).await? == 0 {
        warn!(bed_id = %bed.id, status = %bed.bed_status, "Bed not available for admission");
        return Err(AdmissionError::BedUnavailable(bed.id));
    }

    let admission = Admission {
        id: Uuid::new_v4(),
        patient_id: patient.id,
        department_id: request.department_id,
        room_id: room.id,
        bed_id: bed.id,
        attending_doctor: request.attending_doctor,
        admission_type: request.admission_type,
        admission_reason: request.admission_reason,
        diagnosis: request.diagnosis,
        admission_date: request.admission_date.unwrap_or(now),
        discharge_date: None,
        admission_status: AdmissionStatus::Admitted,
        created_at: now,
        updated_at: now,
    };
    tx.insert_admission(&admission).await?;

    tx.insert_medical_record(&MedicalRecord {
        id: Uuid::new_v4(),
        patient_id: patient.id,
        admission_id: Some(admission.id),
        record_type: RecordType::AdmissionNote,
        notes: format!(
            "{} admission to {}, room {}, bed {}. Reason: {}",
            admission.admission_type,
            department_name,
            room.room_number,
            bed.bed_number,
            admission.admission_reason
        ),
        recorded_by: admission.attending_doctor.clone(),
        recorded_at: now,
    })
    .await?;

    Ok(admission)
}

async fn discharge(
    tx: &mut dyn HospitalTransaction,
    admission_id: Uuid,
    request: DischargeRequest,
) -> AdmissionResult<DischargeOutcome> {
    let mut admission = load_admission(tx, admission_id).await?;
    require_admitted(&admission)?;

    let now = Utc::now();
    admission.admission_status = AdmissionStatus::Discharged;
    admission.discharge_date = Some(now);
    admission.updated_at = now;
    tx.update_admission(&admission).await?;

    let discharge_plan = tx
        .upsert_discharge_plan(&DischargePlan {
            id: Uuid::new_v4(),
            admission_id,
            discharge_summary: request.discharge_summary.clone(),
            follow_up_instructions: request.follow_up_instructions,
            follow_up_date: request.follow_up_date,
            discharge_medications: request.discharge_medications,
            discharge_disposition: request.discharge_disposition,
            created_at: now,
            updated_at: now,
        })
        .await?;

    if tx.release_bed(admission.bed_id, now).await? == 0 {
        return Err(AdmissionError::BedNotOccupied(admission.bed_id));
    }

    tx.insert_medical_record(&MedicalRecord {
        id: Uuid::new_v4(),
        patient_id: admission.patient_id,
        admission_id: Some(admission_id),
        record_type: RecordType::DischargeSummary,
        notes: format!(
            "Discharged ({}). {}",
            request.discharge_disposition, request.discharge_summary
        ),
        recorded_by: request.discharged_by,
        recorded_at: now,
    })
    .await?;

    Ok(DischargeOutcome {
        admission,
        discharge_plan,
    })
}

async fn transfer(
    tx: &mut dyn HospitalTransaction,
    admission_id: Uuid,
    request: TransferRequest,
) -> AdmissionResult<TransferOutcome> {
    let mut admission = load_admission(tx, admission_id).await?;
    require_admitted(&admission)?;
    if request.to_bed_id == admission.bed_id {
        return Err(AdmissionError::Validation(
            "to_bed_id: patient already occupies this bed".to_string(),
        ));
    }

    let (department_name, room, bed) = locate_bed(
        tx,
        request.to_department_id,
        request.to_room_id,
        request.to_bed_id,
    )
    .await?;

    let now = Utc::now();
    if tx.release_bed(admission.bed_id, now).await? == 0 {
        return Err(AdmissionError::BedNotOccupied(admission.bed_id));
    }
    if tx.occupy_bed(bed.id, admission.patient_id, now).await? == 0 {
        warn!(bed_id = %bed.id, status = %bed.bed_status, "Bed not available for transfer");
        return Err(AdmissionError::BedUnavailable(bed.id));
    }

    let transfer = PatientTransfer {
        id: Uuid::new_v4(),
        admission_id,
        from_department_id: admission.department_id,
        from_room_id: admission.room_id,
        from_bed_id: admission.bed_id,
        to_department_id: request.to_department_id,
        to_room_id: room.id,
        to_bed_id: bed.id,
        reason: request.reason,
        transferred_by: request.transferred_by,
        transferred_at: now,
    };

    admission.department_id = request.to_department_id;
    admission.room_id = room.id;
    admission.bed_id = bed.id;
    admission.updated_at = now;
    tx.update_admission(&admission).await?;
    tx.insert_transfer(&transfer).await?;

    tx.insert_medical_record(&MedicalRecord {
        id: Uuid::new_v4(),
        patient_id: admission.patient_id,
        admission_id: Some(admission_id),
        record_type: RecordType::TransferNote,
        notes: format!(
            "Transferred to {}, room {}, bed {}. Reason: {}",
            department_name, room.room_number, bed.bed_number, transfer.reason
        ),
        recorded_by: transfer.transferred_by.clone(),
        recorded_at: now,
    })
    .await?;

    Ok(TransferOutcome {
        admission,
        transfer,
    })
}
