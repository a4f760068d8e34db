use crate::error::{DatabaseError, DatabaseResult};
use crate::models::*;
use crate::status::{AdmissionStatus, BedStatus};
use std::collections::HashMap;
use uuid::Uuid;

/// Row storage for the in-memory backend, keyed by primary key.
///
/// The `check_*` helpers enforce the same unique, foreign-key and check
/// constraints the PostgreSQL schema declares.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub patients: HashMap<Uuid, Patient>,
    pub departments: HashMap<Uuid, Department>,
    pub rooms: HashMap<Uuid, Room>,
    pub beds: HashMap<Uuid, Bed>,
    pub admissions: HashMap<Uuid, Admission>,
    pub discharge_plans: HashMap<Uuid, DischargePlan>,
    pub transfers: HashMap<Uuid, PatientTransfer>,
    pub medical_records: HashMap<Uuid, MedicalRecord>,
    pub vital_signs: HashMap<Uuid, VitalSigns>,
    pub medication_orders: HashMap<Uuid, MedicationOrder>,
    pub lab_orders: HashMap<Uuid, LabOrder>,
    pub bills: HashMap<Uuid, Bill>,
    pub bill_items: HashMap<Uuid, BillItem>,
    pub payments: HashMap<Uuid, Payment>,
    pub claims: HashMap<Uuid, InsuranceClaim>,
    pub triage: HashMap<Uuid, TriageRecord>,
}

fn violation(message: impl Into<String>) -> DatabaseError {
    DatabaseError::ConstraintViolation(message.into())
}

pub(super) fn require<T>(table: &HashMap<Uuid, T>, id: Uuid, what: &str) -> DatabaseResult<()> {
    if table.contains_key(&id) {
        Ok(())
    } else {
        Err(violation(format!("{} {} does not exist", what, id)))
    }
}

pub(super) fn require_new<T>(table: &HashMap<Uuid, T>, id: Uuid, what: &str) -> DatabaseResult<()> {
    if table.contains_key(&id) {
        Err(violation(format!("duplicate {} id {}", what, id)))
    } else {
        Ok(())
    }
}

impl Tables {
    pub(super) fn check_patient(&self, patient: &Patient) -> DatabaseResult<()> {
        require_new(&self.patients, patient.id, "patient")?;
        if self
            .patients
            .values()
            .any(|p| p.medical_record_number == patient.medical_record_number)
        {
            return Err(violation(format!(
                "medical record number {} already exists",
                patient.medical_record_number
            )));
        }
        Ok(())
    }

    pub(super) fn check_department(&self, department: &Department) -> DatabaseResult<()> {
        require_new(&self.departments, department.id, "department")?;
        if self.departments.values().any(|d| d.name == department.name) {
            return Err(violation(format!("department {} already exists", department.name)));
        }
        Ok(())
    }

    pub(super) fn check_room(&self, room: &Room) -> DatabaseResult<()> {
        require_new(&self.rooms, room.id, "room")?;
        require(&self.departments, room.department_id, "department")?;
        if room.daily_rate.is_sign_negative() {
            return Err(violation("daily_rate must not be negative"));
        }
        if self
            .rooms
            .values()
            .any(|r| r.department_id == room.department_id && r.room_number == room.room_number)
        {
            return Err(violation(format!(
                "room {} already exists in department",
                room.room_number
            )));
        }
        Ok(())
    }

    pub(super) fn check_bed(&self, bed: &Bed) -> DatabaseResult<()> {
        require_new(&self.beds, bed.id, "bed")?;
        require(&self.rooms, bed.room_id, "room")?;
        if (bed.bed_status == BedStatus::Occupied) != bed.current_patient_id.is_some() {
            return Err(violation("occupied beds must carry exactly one patient"));
        }
        if self
            .beds
            .values()
            .any(|b| b.room_id == bed.room_id && b.bed_number == bed.bed_number)
        {
            return Err(violation(format!("bed {} already exists in room", bed.bed_number)));
        }
        Ok(())
    }

    pub(super) fn check_admission_row(&self, admission: &Admission) -> DatabaseResult<()> {
        require(&self.patients, admission.patient_id, "patient")?;
        require(&self.departments, admission.department_id, "department")?;
        require(&self.rooms, admission.room_id, "room")?;
        require(&self.beds, admission.bed_id, "bed")?;
        if admission.admission_status == AdmissionStatus::Admitted
            && self.admissions.values().any(|a| {
                a.id != admission.id
                    && a.patient_id == admission.patient_id
                    && a.admission_status == AdmissionStatus::Admitted
            })
        {
            return Err(violation(format!(
                "patient {} already has an open admission",
                admission.patient_id
            )));
        }
        Ok(())
    }

    pub(super) fn check_bill(&self, bill: &Bill) -> DatabaseResult<()> {
        require_new(&self.bills, bill.id, "bill")?;
        require(&self.patients, bill.patient_id, "patient")?;
        require(&self.admissions, bill.admission_id, "admission")?;
        if self.bills.values().any(|b| b.bill_number == bill.bill_number) {
            return Err(violation(format!("bill number {} already exists", bill.bill_number)));
        }
        if self.bills.values().any(|b| b.admission_id == bill.admission_id) {
            return Err(violation(format!(
                "admission {} already has a bill",
                bill.admission_id
            )));
        }
        Ok(())
    }

    pub(super) fn bed_view(&self, bed: &Bed) -> Option<BedAvailability> {
        let room = self.rooms.get(&bed.room_id)?;
        let department = self.departments.get(&room.department_id)?;
        Some(BedAvailability {
            bed_id: bed.id,
            bed_number: bed.bed_number.clone(),
            bed_status: bed.bed_status,
            current_patient_id: bed.current_patient_id,
            room_id: room.id,
            room_number: room.room_number.clone(),
            room_type: room.room_type,
            daily_rate: room.daily_rate,
            department_id: department.id,
            department_name: department.name.clone(),
        })
    }
}
