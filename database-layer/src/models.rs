// Row models, one struct per table
use crate::status::*;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Largest value a NUMERIC(12, 2) money column holds, 9 999 999 999.99
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_0FFF, 0xE8, 0, false, 2);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Patient {
    pub id: Uuid,
    pub medical_record_number: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub blood_group: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Department {
    pub id: Uuid,
    pub name: String,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Room {
    pub id: Uuid,
    pub department_id: Uuid,
    pub room_number: String,
    pub room_type: RoomType,
    pub daily_rate: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Bed {
    pub id: Uuid,
    pub room_id: Uuid,
    pub bed_number: String,
    pub bed_status: BedStatus,
    pub current_patient_id: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}

/// Row of the `bed_availability` view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BedAvailability {
    pub bed_id: Uuid,
    pub bed_number: String,
    pub bed_status: BedStatus,
    pub current_patient_id: Option<Uuid>,
    pub room_id: Uuid,
    pub room_number: String,
    pub room_type: RoomType,
    pub daily_rate: Decimal,
    pub department_id: Uuid,
    pub department_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Admission {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub department_id: Uuid,
    pub room_id: Uuid,
    pub bed_id: Uuid,
    pub attending_doctor: String,
    pub admission_type: AdmissionType,
    pub admission_reason: String,
    pub diagnosis: Option<String>,
    pub admission_date: DateTime<Utc>,
    pub discharge_date: Option<DateTime<Utc>>,
    pub admission_status: AdmissionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DischargePlan {
    pub id: Uuid,
    pub admission_id: Uuid,
    pub discharge_summary: String,
    pub follow_up_instructions: Option<String>,
    pub follow_up_date: Option<NaiveDate>,
    pub discharge_medications: Option<String>,
    pub discharge_disposition: DischargeDisposition,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PatientTransfer {
    pub id: Uuid,
    pub admission_id: Uuid,
    pub from_department_id: Uuid,
    pub from_room_id: Uuid,
    pub from_bed_id: Uuid,
    pub to_department_id: Uuid,
    pub to_room_id: Uuid,
    pub to_bed_id: Uuid,
    pub reason: String,
    pub transferred_by: String,
    pub transferred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MedicalRecord {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub admission_id: Option<Uuid>,
    pub record_type: RecordType,
    pub notes: String,
    pub recorded_by: String,
    pub recorded_at: DateTime<Utc>,
}

/// One set of bedside measurements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct VitalSigns {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub admission_id: Option<Uuid>,
    /// Degrees Celsius
    pub temperature_c: Option<f64>,
    /// mmHg
    pub systolic_bp: Option<i32>,
    /// mmHg
    pub diastolic_bp: Option<i32>,
    /// Beats per minute
    pub heart_rate: Option<i32>,
    /// Breaths per minute
    pub respiratory_rate: Option<i32>,
    /// SpO2 percent
    pub oxygen_saturation: Option<i32>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub bmi: Option<f64>,
    pub notes: Option<String>,
    pub recorded_by: String,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MedicationOrder {
    pub id: Uuid,
    pub admission_id: Uuid,
    pub medication_name: String,
    pub dosage: Option<String>,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub ordered_by: String,
    pub ordered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LabOrder {
    pub id: Uuid,
    pub admission_id: Uuid,
    pub test_name: String,
    pub price: Decimal,
    pub ordered_by: String,
    pub ordered_at: DateTime<Utc>,
}

/// Invoice header; `total_amount` is always the sum of its items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Bill {
    pub id: Uuid,
    pub bill_number: String,
    pub patient_id: Uuid,
    pub admission_id: Uuid,
    pub bill_date: DateTime<Utc>,
    pub total_amount: Decimal,
    pub amount_paid: Decimal,
    pub bill_status: BillStatus,
    pub generated_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Bill {
    pub fn balance_due(&self) -> Decimal {
        self.total_amount - self.amount_paid
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BillItem {
    pub id: Uuid,
    pub bill_id: Uuid,
    pub item_type: BillItemType,
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Payment {
    pub id: Uuid,
    pub bill_id: Uuid,
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    pub reference_number: Option<String>,
    pub received_by: String,
    pub payment_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct InsuranceClaim {
    pub id: Uuid,
    pub bill_id: Uuid,
    pub insurance_provider: String,
    pub policy_number: String,
    pub claim_amount: Decimal,
    pub coverage_percent: Decimal,
    pub insurance_amount: Decimal,
    pub patient_amount: Decimal,
    pub claim_status: ClaimStatus,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TriageRecord {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub chief_complaint: String,
    /// 1 (resuscitation) to 5 (non-urgent)
    pub triage_level: i32,
    pub triage_nurse: String,
    pub assigned_doctor: Option<String>,
    pub triage_status: TriageStatus,
    pub arrival_time: DateTime<Utc>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Filter for admission listings; `None` fields match everything
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionFilter {
    pub status: Option<AdmissionStatus>,
    pub department_id: Option<Uuid>,
    pub patient_id: Option<Uuid>,
}

impl AdmissionFilter {
    pub fn matches(&self, admission: &Admission) -> bool {
        self.status.map_or(true, |s| admission.admission_status == s)
            && self.department_id.map_or(true, |d| admission.department_id == d)
            && self.patient_id.map_or(true, |p| admission.patient_id == p)
    }
}

/// Filter for the bed availability view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BedFilter {
    pub department_id: Option<Uuid>,
    pub status: Option<BedStatus>,
}

impl BedFilter {
    pub fn matches(&self, row: &BedAvailability) -> bool {
        self.department_id.map_or(true, |d| row.department_id == d)
            && self.status.map_or(true, |s| row.bed_status == s)
    }
}
