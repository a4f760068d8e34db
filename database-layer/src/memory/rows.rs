use super::tables::{require, require_new};
use super::InMemoryTransaction;
use crate::error::{DatabaseError, DatabaseResult};
use crate::models::*;
use crate::status::{AdmissionStatus, BedStatus};
use crate::store::{
    AdmissionRows, BillingRows, ClinicalRows, FacilityRows, PatientRows, TriageRows,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

fn window<T>(rows: Vec<T>, limit: i64, offset: i64) -> Vec<T> {
    let offset = usize::try_from(offset).unwrap_or(0);
    let limit = usize::try_from(limit).unwrap_or(0);
    rows.into_iter().skip(offset).take(limit).collect()
}

#[async_trait]
impl PatientRows for InMemoryTransaction {
    async fn insert_patient(&mut self, patient: &Patient) -> DatabaseResult<()> {
        self.working.check_patient(patient)?;
        self.working.patients.insert(patient.id, patient.clone());
        Ok(())
    }

    async fn patient(&mut self, id: Uuid) -> DatabaseResult<Option<Patient>> {
        Ok(self.working.patients.get(&id).cloned())
    }

    async fn patient_by_mrn(&mut self, mrn: &str) -> DatabaseResult<Option<Patient>> {
        Ok(self
            .working
            .patients
            .values()
            .find(|p| p.medical_record_number == mrn)
            .cloned())
    }

    async fn list_patients(&mut self, limit: i64, offset: i64) -> DatabaseResult<Vec<Patient>> {
        let mut rows: Vec<Patient> = self.working.patients.values().cloned().collect();
        rows.sort_by(|a, b| {
            (&a.last_name, &a.first_name, a.id).cmp(&(&b.last_name, &b.first_name, b.id))
        });
        Ok(window(rows, limit, offset))
    }
}

#[async_trait]
impl FacilityRows for InMemoryTransaction {
    async fn insert_department(&mut self, department: &Department) -> DatabaseResult<()> {
        self.working.check_department(department)?;
        self.working.departments.insert(department.id, department.clone());
        Ok(())
    }

    async fn department(&mut self, id: Uuid) -> DatabaseResult<Option<Department>> {
        Ok(self.working.departments.get(&id).cloned())
    }

    async fn departments(&mut self) -> DatabaseResult<Vec<Department>> {
        let mut rows: Vec<Department> = self.working.departments.values().cloned().collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn insert_room(&mut self, room: &Room) -> DatabaseResult<()> {
        self.working.check_room(room)?;
        self.working.rooms.insert(room.id, room.clone());
        Ok(())
    }

    async fn room(&mut self, id: Uuid) -> DatabaseResult<Option<Room>> {
        Ok(self.working.rooms.get(&id).cloned())
    }

    async fn insert_bed(&mut self, bed: &Bed) -> DatabaseResult<()> {
        self.working.check_bed(bed)?;
        self.working.beds.insert(bed.id, bed.clone());
        Ok(())
    }

    async fn bed(&mut self, id: Uuid) -> DatabaseResult<Option<Bed>> {
        Ok(self.working.beds.get(&id).cloned())
    }

    async fn occupy_bed(
        &mut self,
        bed_id: Uuid,
        patient_id: Uuid,
        at: DateTime<Utc>,
    ) -> DatabaseResult<u64> {
        require(&self.working.patients, patient_id, "patient")?;
        if self
            .working
            .beds
            .values()
            .any(|b| b.id != bed_id && b.current_patient_id == Some(patient_id))
        {
            return Err(DatabaseError::ConstraintViolation(format!(
                "patient {} already occupies a bed",
                patient_id
            )));
        }
        match self.working.beds.get_mut(&bed_id) {
            Some(bed) if bed.bed_status == BedStatus::Available => {
                bed.bed_status = BedStatus::Occupied;
                bed.current_patient_id = Some(patient_id);
                bed.updated_at = at;
                Ok(1)
            }
            _ => Ok(0),
        }
    }

    async fn release_bed(&mut self, bed_id: Uuid, at: DateTime<Utc>) -> DatabaseResult<u64> {
        match self.working.beds.get_mut(&bed_id) {
            Some(bed) if bed.bed_status == BedStatus::Occupied => {
                bed.bed_status = BedStatus::Available;
                bed.current_patient_id = None;
                bed.updated_at = at;
                Ok(1)
            }
            _ => Ok(0),
        }
    }

    async fn set_bed_status(
        &mut self,
        bed_id: Uuid,
        status: BedStatus,
        at: DateTime<Utc>,
    ) -> DatabaseResult<u64> {
        if status == BedStatus::Occupied {
            return Err(DatabaseError::ConstraintViolation(
                "occupied beds must carry exactly one patient".to_string(),
            ));
        }
        match self.working.beds.get_mut(&bed_id) {
            Some(bed) if bed.bed_status != BedStatus::Occupied => {
                bed.bed_status = status;
                bed.updated_at = at;
                Ok(1)
            }
            _ => Ok(0),
        }
    }

    async fn bed_availability(
        &mut self,
        filter: &BedFilter,
    ) -> DatabaseResult<Vec<BedAvailability>> {
        let mut rows: Vec<BedAvailability> = self
            .working
            .beds
            .values()
            .filter_map(|bed| self.working.bed_view(bed))
            .filter(|row| filter.matches(row))
            .collect();
        rows.sort_by(|a, b| {
            (&a.department_name, &a.room_number, &a.bed_number).cmp(&(
                &b.department_name,
                &b.room_number,
                &b.bed_number,
            ))
        });
        Ok(rows)
    }
}

#[async_trait]
impl AdmissionRows for InMemoryTransaction {
    async fn insert_admission(&mut self, admission: &Admission) -> DatabaseResult<()> {
        require_new(&self.working.admissions, admission.id, "admission")?;
        self.working.check_admission_row(admission)?;
        self.working.admissions.insert(admission.id, admission.clone());
        Ok(())
    }

    async fn admission(&mut self, id: Uuid) -> DatabaseResult<Option<Admission>> {
        Ok(self.working.admissions.get(&id).cloned())
    }

    async fn open_admission_for_patient(
        &mut self,
        patient_id: Uuid,
    ) -> DatabaseResult<Option<Admission>> {
        Ok(self
            .working
            .admissions
            .values()
            .find(|a| a.patient_id == patient_id && a.admission_status == AdmissionStatus::Admitted)
            .cloned())
    }

    async fn update_admission(&mut self, admission: &Admission) -> DatabaseResult<u64> {
        if !self.working.admissions.contains_key(&admission.id) {
            return Ok(0);
        }
        self.working.check_admission_row(admission)?;
        if let Some(row) = self.working.admissions.get_mut(&admission.id) {
            row.department_id = admission.department_id;
            row.room_id = admission.room_id;
            row.bed_id = admission.bed_id;
            row.diagnosis = admission.diagnosis.clone();
            row.discharge_date = admission.discharge_date;
            row.admission_status = admission.admission_status;
            row.updated_at = admission.updated_at;
        }
        Ok(1)
    }

    async fn list_admissions(
        &mut self,
        filter: &AdmissionFilter,
    ) -> DatabaseResult<Vec<Admission>> {
        let mut rows: Vec<Admission> = self
            .working
            .admissions
            .values()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.admission_date.cmp(&a.admission_date));
        Ok(rows)
    }

    async fn upsert_discharge_plan(
        &mut self,
        plan: &DischargePlan,
    ) -> DatabaseResult<DischargePlan> {
        require(&self.working.admissions, plan.admission_id, "admission")?;
        let existing = self
            .working
            .discharge_plans
            .values_mut()
            .find(|p| p.admission_id == plan.admission_id);
        if let Some(row) = existing {
            row.discharge_summary = plan.discharge_summary.clone();
            row.follow_up_instructions = plan.follow_up_instructions.clone();
            row.follow_up_date = plan.follow_up_date;
            row.discharge_medications = plan.discharge_medications.clone();
            row.discharge_disposition = plan.discharge_disposition;
            row.updated_at = plan.updated_at;
            return Ok(row.clone());
        }
        require_new(&self.working.discharge_plans, plan.id, "discharge plan")?;
        self.working.discharge_plans.insert(plan.id, plan.clone());
        Ok(plan.clone())
    }

    async fn discharge_plan(
        &mut self,
        admission_id: Uuid,
    ) -> DatabaseResult<Option<DischargePlan>> {
        Ok(self
            .working
            .discharge_plans
            .values()
            .find(|p| p.admission_id == admission_id)
            .cloned())
    }

    async fn insert_transfer(&mut self, transfer: &PatientTransfer) -> DatabaseResult<()> {
        require_new(&self.working.transfers, transfer.id, "transfer")?;
        require(&self.working.admissions, transfer.admission_id, "admission")?;
        require(&self.working.beds, transfer.from_bed_id, "bed")?;
        require(&self.working.beds, transfer.to_bed_id, "bed")?;
        self.working.transfers.insert(transfer.id, transfer.clone());
        Ok(())
    }

    async fn transfers(&mut self, admission_id: Uuid) -> DatabaseResult<Vec<PatientTransfer>> {
        let mut rows: Vec<PatientTransfer> = self
            .working
            .transfers
            .values()
            .filter(|t| t.admission_id == admission_id)
            .cloned()
            .collect();
        rows.sort_by_key(|t| t.transferred_at);
        Ok(rows)
    }
}

#[async_trait]
impl ClinicalRows for InMemoryTransaction {
    async fn insert_medical_record(&mut self, record: &MedicalRecord) -> DatabaseResult<()> {
        require_new(&self.working.medical_records, record.id, "medical record")?;
        require(&self.working.patients, record.patient_id, "patient")?;
        if let Some(admission_id) = record.admission_id {
            require(&self.working.admissions, admission_id, "admission")?;
        }
        self.working.medical_records.insert(record.id, record.clone());
        Ok(())
    }

    async fn medical_records(&mut self, patient_id: Uuid) -> DatabaseResult<Vec<MedicalRecord>> {
        let mut rows: Vec<MedicalRecord> = self
            .working
            .medical_records
            .values()
            .filter(|r| r.patient_id == patient_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        Ok(rows)
    }

    async fn insert_vital_signs(&mut self, vitals: &VitalSigns) -> DatabaseResult<()> {
        require_new(&self.working.vital_signs, vitals.id, "vital signs")?;
        require(&self.working.patients, vitals.patient_id, "patient")?;
        if let Some(admission_id) = vitals.admission_id {
            require(&self.working.admissions, admission_id, "admission")?;
        }
        self.working.vital_signs.insert(vitals.id, vitals.clone());
        Ok(())
    }

    async fn vital_signs(&mut self, id: Uuid) -> DatabaseResult<Option<VitalSigns>> {
        Ok(self.working.vital_signs.get(&id).cloned())
    }

    async fn vital_history(
        &mut self,
        patient_id: Uuid,
        limit: i64,
    ) -> DatabaseResult<Vec<VitalSigns>> {
        let mut rows: Vec<VitalSigns> = self
            .working
            .vital_signs
            .values()
            .filter(|v| v.patient_id == patient_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        Ok(window(rows, limit, 0))
    }
}

#[async_trait]
impl BillingRows for InMemoryTransaction {
    async fn insert_medication_order(&mut self, order: &MedicationOrder) -> DatabaseResult<()> {
        require_new(&self.working.medication_orders, order.id, "medication order")?;
        require(&self.working.admissions, order.admission_id, "admission")?;
        if order.quantity <= 0 || order.unit_price.is_sign_negative() {
            return Err(DatabaseError::ConstraintViolation(
                "medication quantity must be positive and price non-negative".to_string(),
            ));
        }
        self.working.medication_orders.insert(order.id, order.clone());
        Ok(())
    }

    async fn medication_orders(
        &mut self,
        admission_id: Uuid,
    ) -> DatabaseResult<Vec<MedicationOrder>> {
        let mut rows: Vec<MedicationOrder> = self
            .working
            .medication_orders
            .values()
            .filter(|o| o.admission_id == admission_id)
            .cloned()
            .collect();
        rows.sort_by_key(|o| o.ordered_at);
        Ok(rows)
    }

    async fn insert_lab_order(&mut self, order: &LabOrder) -> DatabaseResult<()> {
        require_new(&self.working.lab_orders, order.id, "lab order")?;
        require(&self.working.admissions, order.admission_id, "admission")?;
        if order.price.is_sign_negative() {
            return Err(DatabaseError::ConstraintViolation(
                "lab price must not be negative".to_string(),
            ));
        }
        self.working.lab_orders.insert(order.id, order.clone());
        Ok(())
    }

    async fn lab_orders(&mut self, admission_id: Uuid) -> DatabaseResult<Vec<LabOrder>> {
        let mut rows: Vec<LabOrder> = self
            .working
            .lab_orders
            .values()
            .filter(|o| o.admission_id == admission_id)
            .cloned()
            .collect();
        rows.sort_by_key(|o| o.ordered_at);
        Ok(rows)
    }

    async fn insert_bill(&mut self, bill: &Bill) -> DatabaseResult<()> {
        self.working.check_bill(bill)?;
        self.working.bills.insert(bill.id, bill.clone());
        Ok(())
    }

    async fn bill(&mut self, id: Uuid) -> DatabaseResult<Option<Bill>> {
        Ok(self.working.bills.get(&id).cloned())
    }

    async fn bill_for_admission(&mut self, admission_id: Uuid) -> DatabaseResult<Option<Bill>> {
        Ok(self
            .working
            .bills
            .values()
            .find(|b| b.admission_id == admission_id)
            .cloned())
    }

    async fn update_bill(&mut self, bill: &Bill) -> DatabaseResult<u64> {
        match self.working.bills.get_mut(&bill.id) {
            Some(row) => {
                row.total_amount = bill.total_amount;
                row.amount_paid = bill.amount_paid;
                row.bill_status = bill.bill_status;
                row.updated_at = bill.updated_at;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn outstanding_bills(&mut self, patient_id: Option<Uuid>) -> DatabaseResult<Vec<Bill>> {
        let mut rows: Vec<Bill> = self
            .working
            .bills
            .values()
            .filter(|b| b.bill_status.is_outstanding())
            .filter(|b| patient_id.map_or(true, |p| b.patient_id == p))
            .cloned()
            .collect();
        rows.sort_by_key(|b| b.bill_date);
        Ok(rows)
    }

    async fn insert_bill_item(&mut self, item: &BillItem) -> DatabaseResult<()> {
        require_new(&self.working.bill_items, item.id, "bill item")?;
        require(&self.working.bills, item.bill_id, "bill")?;
        self.working.bill_items.insert(item.id, item.clone());
        Ok(())
    }

    async fn bill_items(&mut self, bill_id: Uuid) -> DatabaseResult<Vec<BillItem>> {
        let mut rows: Vec<BillItem> = self
            .working
            .bill_items
            .values()
            .filter(|i| i.bill_id == bill_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            (a.item_type as u8, &a.description).cmp(&(b.item_type as u8, &b.description))
        });
        Ok(rows)
    }

    async fn insert_payment(&mut self, payment: &Payment) -> DatabaseResult<()> {
        require_new(&self.working.payments, payment.id, "payment")?;
        require(&self.working.bills, payment.bill_id, "bill")?;
        if payment.amount <= rust_decimal::Decimal::ZERO {
            return Err(DatabaseError::ConstraintViolation(
                "payment amount must be positive".to_string(),
            ));
        }
        self.working.payments.insert(payment.id, payment.clone());
        Ok(())
    }

    async fn payments(&mut self, bill_id: Uuid) -> DatabaseResult<Vec<Payment>> {
        let mut rows: Vec<Payment> = self
            .working
            .payments
            .values()
            .filter(|p| p.bill_id == bill_id)
            .cloned()
            .collect();
        rows.sort_by_key(|p| p.payment_date);
        Ok(rows)
    }

    async fn insert_claim(&mut self, claim: &InsuranceClaim) -> DatabaseResult<()> {
        require_new(&self.working.claims, claim.id, "insurance claim")?;
        require(&self.working.bills, claim.bill_id, "bill")?;
        self.working.claims.insert(claim.id, claim.clone());
        Ok(())
    }

    async fn claim(&mut self, id: Uuid) -> DatabaseResult<Option<InsuranceClaim>> {
        Ok(self.working.claims.get(&id).cloned())
    }

    async fn update_claim(&mut self, claim: &InsuranceClaim) -> DatabaseResult<u64> {
        match self.working.claims.get_mut(&claim.id) {
            Some(row) => {
                row.claim_status = claim.claim_status;
                row.updated_at = claim.updated_at;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn claims_for_bill(&mut self, bill_id: Uuid) -> DatabaseResult<Vec<InsuranceClaim>> {
        let mut rows: Vec<InsuranceClaim> = self
            .working
            .claims
            .values()
            .filter(|c| c.bill_id == bill_id)
            .cloned()
            .collect();
        rows.sort_by_key(|c| c.submitted_at);
        Ok(rows)
    }
}

#[async_trait]
impl TriageRows for InMemoryTransaction {
    async fn insert_triage(&mut self, record: &TriageRecord) -> DatabaseResult<()> {
        require_new(&self.working.triage, record.id, "triage record")?;
        require(&self.working.patients, record.patient_id, "patient")?;
        if !(1..=5).contains(&record.triage_level) {
            return Err(DatabaseError::ConstraintViolation(
                "triage_level must be between 1 and 5".to_string(),
            ));
        }
        self.working.triage.insert(record.id, record.clone());
        Ok(())
    }

    async fn triage(&mut self, id: Uuid) -> DatabaseResult<Option<TriageRecord>> {
        Ok(self.working.triage.get(&id).cloned())
    }

    async fn update_triage(&mut self, record: &TriageRecord) -> DatabaseResult<u64> {
        match self.working.triage.get_mut(&record.id) {
            Some(row) => {
                row.assigned_doctor = record.assigned_doctor.clone();
                row.triage_status = record.triage_status;
                row.start_time = record.start_time;
                row.end_time = record.end_time;
                row.notes = record.notes.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn active_triage(&mut self) -> DatabaseResult<Vec<TriageRecord>> {
        let mut rows: Vec<TriageRecord> = self
            .working
            .triage
            .values()
            .filter(|t| !t.triage_status.is_terminal())
            .cloned()
            .collect();
        rows.sort_by_key(|t| (t.triage_level, t.arrival_time));
        Ok(rows)
    }

    async fn triage_since(&mut self, since: DateTime<Utc>) -> DatabaseResult<Vec<TriageRecord>> {
        let mut rows: Vec<TriageRecord> = self
            .working
            .triage
            .values()
            .filter(|t| t.arrival_time >= since)
            .cloned()
            .collect();
        rows.sort_by_key(|t| t.arrival_time);
        Ok(rows)
    }
}
