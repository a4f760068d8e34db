//! Storage seams shared by the PostgreSQL and in-memory backends.
//!
//! Every operation runs inside a [`HospitalTransaction`] obtained from
//! [`HospitalDatabase::begin`]. Nothing a transaction writes is visible to
//! other callers until [`HospitalTransaction::commit`]; dropping or rolling
//! back a transaction discards its writes.
//!
//! Row-count returning updates (`occupy_bed`, `update_bill`, ...) report how
//! many rows matched so services can detect lost races without a second read.

use crate::error::DatabaseResult;
use crate::models::*;
use crate::status::BedStatus;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[async_trait]
pub trait PatientRows: Send {
    async fn insert_patient(&mut self, patient: &Patient) -> DatabaseResult<()>;
    async fn patient(&mut self, id: Uuid) -> DatabaseResult<Option<Patient>>;
    async fn patient_by_mrn(&mut self, mrn: &str) -> DatabaseResult<Option<Patient>>;
    /// Ordered by last name, first name
    async fn list_patients(&mut self, limit: i64, offset: i64) -> DatabaseResult<Vec<Patient>>;
}

#[async_trait]
pub trait FacilityRows: Send {
    async fn insert_department(&mut self, department: &Department) -> DatabaseResult<()>;
    async fn department(&mut self, id: Uuid) -> DatabaseResult<Option<Department>>;
    async fn departments(&mut self) -> DatabaseResult<Vec<Department>>;
    async fn insert_room(&mut self, room: &Room) -> DatabaseResult<()>;
    async fn room(&mut self, id: Uuid) -> DatabaseResult<Option<Room>>;
    async fn insert_bed(&mut self, bed: &Bed) -> DatabaseResult<()>;
    async fn bed(&mut self, id: Uuid) -> DatabaseResult<Option<Bed>>;

    /// Mark an AVAILABLE bed as OCCUPIED by `patient_id`. Returns 0 when the
    /// bed is not available.
    async fn occupy_bed(
        &mut self,
        bed_id: Uuid,
        patient_id: Uuid,
        at: DateTime<Utc>,
    ) -> DatabaseResult<u64>;

    /// Return an OCCUPIED bed to AVAILABLE and clear its patient
    async fn release_bed(&mut self, bed_id: Uuid, at: DateTime<Utc>) -> DatabaseResult<u64>;

    /// Change the housekeeping status of a bed that is not occupied
    async fn set_bed_status(
        &mut self,
        bed_id: Uuid,
        status: BedStatus,
        at: DateTime<Utc>,
    ) -> DatabaseResult<u64>;

    /// Ordered by department name, room number, bed number
    async fn bed_availability(&mut self, filter: &BedFilter) -> DatabaseResult<Vec<BedAvailability>>;
}

#[async_trait]
pub trait AdmissionRows: Send {
    async fn insert_admission(&mut self, admission: &Admission) -> DatabaseResult<()>;
    async fn admission(&mut self, id: Uuid) -> DatabaseResult<Option<Admission>>;
    async fn open_admission_for_patient(
        &mut self,
        patient_id: Uuid,
    ) -> DatabaseResult<Option<Admission>>;
    /// Overwrite the mutable columns (location, diagnosis, status, dates)
    async fn update_admission(&mut self, admission: &Admission) -> DatabaseResult<u64>;
    /// Newest admissions first
    async fn list_admissions(&mut self, filter: &AdmissionFilter) -> DatabaseResult<Vec<Admission>>;

    /// Insert the plan, or replace the existing plan for the same admission
    async fn upsert_discharge_plan(&mut self, plan: &DischargePlan)
        -> DatabaseResult<DischargePlan>;
    async fn discharge_plan(&mut self, admission_id: Uuid)
        -> DatabaseResult<Option<DischargePlan>>;

    async fn insert_transfer(&mut self, transfer: &PatientTransfer) -> DatabaseResult<()>;
    /// Oldest transfer first
    async fn transfers(&mut self, admission_id: Uuid) -> DatabaseResult<Vec<PatientTransfer>>;
}

#[async_trait]
pub trait ClinicalRows: Send {
    async fn insert_medical_record(&mut self, record: &MedicalRecord) -> DatabaseResult<()>;
    /// Newest records first
    async fn medical_records(&mut self, patient_id: Uuid) -> DatabaseResult<Vec<MedicalRecord>>;

    async fn insert_vital_signs(&mut self, vitals: &VitalSigns) -> DatabaseResult<()>;
    async fn vital_signs(&mut self, id: Uuid) -> DatabaseResult<Option<VitalSigns>>;
    /// Newest readings first
    async fn vital_history(&mut self, patient_id: Uuid, limit: i64)
        -> DatabaseResult<Vec<VitalSigns>>;
}

#[async_trait]
pub trait BillingRows: Send {
    async fn insert_medication_order(&mut self, order: &MedicationOrder) -> DatabaseResult<()>;
    async fn medication_orders(&mut self, admission_id: Uuid)
        -> DatabaseResult<Vec<MedicationOrder>>;
    async fn insert_lab_order(&mut self, order: &LabOrder) -> DatabaseResult<()>;
    async fn lab_orders(&mut self, admission_id: Uuid) -> DatabaseResult<Vec<LabOrder>>;

    async fn insert_bill(&mut self, bill: &Bill) -> DatabaseResult<()>;
    async fn bill(&mut self, id: Uuid) -> DatabaseResult<Option<Bill>>;
    async fn bill_for_admission(&mut self, admission_id: Uuid) -> DatabaseResult<Option<Bill>>;
    /// Overwrite total, amount paid and status
    async fn update_bill(&mut self, bill: &Bill) -> DatabaseResult<u64>;
    /// PENDING and PARTIALLY_PAID bills, oldest first
    async fn outstanding_bills(&mut self, patient_id: Option<Uuid>) -> DatabaseResult<Vec<Bill>>;

    async fn insert_bill_item(&mut self, item: &BillItem) -> DatabaseResult<()>;
    async fn bill_items(&mut self, bill_id: Uuid) -> DatabaseResult<Vec<BillItem>>;
    async fn insert_payment(&mut self, payment: &Payment) -> DatabaseResult<()>;
    /// Oldest payment first
    async fn payments(&mut self, bill_id: Uuid) -> DatabaseResult<Vec<Payment>>;

    async fn insert_claim(&mut self, claim: &InsuranceClaim) -> DatabaseResult<()>;
    async fn claim(&mut self, id: Uuid) -> DatabaseResult<Option<InsuranceClaim>>;
    async fn update_claim(&mut self, claim: &InsuranceClaim) -> DatabaseResult<u64>;
    async fn claims_for_bill(&mut self, bill_id: Uuid) -> DatabaseResult<Vec<InsuranceClaim>>;
}

#[async_trait]
pub trait TriageRows: Send {
    async fn insert_triage(&mut self, record: &TriageRecord) -> DatabaseResult<()>;
    async fn triage(&mut self, id: Uuid) -> DatabaseResult<Option<TriageRecord>>;
    /// Overwrite doctor, status, times and notes
    async fn update_triage(&mut self, record: &TriageRecord) -> DatabaseResult<u64>;
    /// Non-terminal records, most urgent level first then earliest arrival
    async fn active_triage(&mut self) -> DatabaseResult<Vec<TriageRecord>>;
    /// Every record that arrived at or after `since`
    async fn triage_since(&mut self, since: DateTime<Utc>) -> DatabaseResult<Vec<TriageRecord>>;
}

/// A unit of work over all hospital tables
#[async_trait]
pub trait HospitalTransaction:
    PatientRows + FacilityRows + AdmissionRows + ClinicalRows + BillingRows + TriageRows + Send
{
    async fn commit(self: Box<Self>) -> DatabaseResult<()>;
    async fn rollback(self: Box<Self>) -> DatabaseResult<()>;
}

/// Entry point services hold onto; hands out transactions
#[async_trait]
pub trait HospitalDatabase: Send + Sync {
    async fn begin(&self) -> DatabaseResult<Box<dyn HospitalTransaction>>;

    /// Cheap liveness probe for health checks
    async fn ping(&self) -> bool;

    fn backend_name(&self) -> &'static str;
}
