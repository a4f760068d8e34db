use crate::error::{EmergencyError, EmergencyResult};
use crate::flow::check_transition;
use crate::requests::{RegisterTriageRequest, SummaryQuery, UpdateTriageStatus};
use crate::summary::DepartmentSummary;
use chrono::{DateTime, Utc};
use database_layer::{
    finish, HospitalDatabase, HospitalTransaction, PatientRows, TriageRecord, TriageRows,
    TriageStatus,
};
use error_common::RequestValidation;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct EmergencyService {
    db: Arc<dyn HospitalDatabase>,
}

impl EmergencyService {
    pub fn new(db: Arc<dyn HospitalDatabase>) -> Self {
        Self { db }
    }

    /// Put a patient in the queue with status WAITING, arriving now
    pub async fn register_triage(
        &self,
        request: RegisterTriageRequest,
    ) -> EmergencyResult<TriageRecord> {
        request.validate()?;
        let mut tx = self.db.begin().await?;
        let result: EmergencyResult<_> = async {
            tx.patient(request.patient_id)
                .await?
                .ok_or(EmergencyError::PatientNotFound(request.patient_id))?;
            let record = TriageRecord {
                id: Uuid::new_v4(),
                patient_id: request.patient_id,
                chief_complaint: request.chief_complaint,
                triage_level: request.triage_level,
                triage_nurse: request.triage_nurse,
                assigned_doctor: None,
                triage_status: TriageStatus::Waiting,
                arrival_time: Utc::now(),
                start_time: None,
                end_time: None,
                notes: request.notes,
            };
            tx.insert_triage(&record).await?;
            Ok(record)
        }
        .await;
        let record = finish(tx, result).await?;
        info!(
            triage_id = %record.id,
            patient_id = %record.patient_id,
            level = record.triage_level,
            "Patient triaged"
        );
        Ok(record)
    }

    /// Advance a record one step along the triage flow
    pub async fn update_triage_status(
        &self,
        triage_id: Uuid,
        request: UpdateTriageStatus,
    ) -> EmergencyResult<TriageRecord> {
        request.validate()?;
        let mut tx = self.db.begin().await?;
        let result = advance(tx.as_mut(), triage_id, request).await;
        let record = finish(tx, result).await.map_err(|e| {
            if let EmergencyError::InvalidTransition { from, to } = &e {
                warn!(triage_id = %triage_id, from = %from, to = %to, "Rejected triage transition");
            }
            e
        })?;
        info!(triage_id = %triage_id, status = %record.triage_status, "Triage status updated");
        Ok(record)
    }

    pub async fn get_triage(&self, triage_id: Uuid) -> EmergencyResult<TriageRecord> {
        let mut tx = self.db.begin().await?;
        let result = load(tx.as_mut(), triage_id).await;
        finish(tx, result).await
    }

    /// Records still in the department, most urgent level first then
    /// earliest arrival
    pub async fn waiting_queue(&self) -> EmergencyResult<Vec<TriageRecord>> {
        let mut tx = self.db.begin().await?;
        let result = tx.active_triage().await.map_err(EmergencyError::from);
        finish(tx, result).await
    }

    pub async fn department_summary(
        &self,
        query: SummaryQuery,
    ) -> EmergencyResult<DepartmentSummary> {
        let since = query.since.unwrap_or_else(start_of_today);
        let mut tx = self.db.begin().await?;
        let result = tx.triage_since(since).await.map_err(EmergencyError::from);
        let records = finish(tx, result).await?;
        Ok(DepartmentSummary::from_records(since, &records))
    }
}

fn start_of_today() -> DateTime<Utc> {
    let now = Utc::now();
    now.date_naive()
        .and_hms_opt(0, 0, 0)
        .map_or(now, |midnight| midnight.and_utc())
}

async fn load(tx: &mut dyn HospitalTransaction, triage_id: Uuid) -> EmergencyResult<TriageRecord> {
    tx.triage(triage_id)
        .await?
        .ok_or(EmergencyError::TriageNotFound(triage_id))
}

async fn advance(
    tx: &mut dyn HospitalTransaction,
    triage_id: Uuid,
    request: UpdateTriageStatus,
) -> EmergencyResult<TriageRecord> {
    let mut record = load(tx, triage_id).await?;
    check_transition(record.triage_status, request.status)?;

    if let Some(doctor) = request.assigned_doctor {
        record.assigned_doctor = Some(doctor.trim().to_string());
    }
    if request.status == TriageStatus::Assigned && record.assigned_doctor.is_none() {
        return Err(EmergencyError::Validation(
            "assigned_doctor: is required to assign a patient".to_string(),
        ));
    }

    let now = Utc::now();
    if request.status == TriageStatus::InProgress {
        record.start_time = Some(now);
    }
    if request.status.is_terminal() {
        record.end_time = Some(now);
    }
    if let Some(note) = request.notes.filter(|n| !n.trim().is_empty()) {
        record.notes = Some(match record.notes.take() {
            Some(existing) => format!("{existing}\n{note}"),
            None => note,
        });
    }
    record.triage_status = request.status;

    tx.update_triage(&record).await?;
    Ok(record)
}
