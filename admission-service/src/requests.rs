// Request payloads accepted by the admission service
use crate::error::AdmissionError;
use chrono::{DateTime, NaiveDate, Utc};
use database_layer::{
    AdmissionStatus, AdmissionType, BedStatus, DischargeDisposition, Gender, RecordType, RoomType,
    MAX_AMOUNT,
};
use error_common::{validate_field, validate_required, RequestValidation};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterPatientRequest {
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
}

impl RequestValidation for RegisterPatientRequest {
    type Error = AdmissionError;

    fn validate(&self) -> Result<(), AdmissionError> {
        validate_required!("medical_record_number", self.medical_record_number);
        validate_required!("first_name", self.first_name);
        validate_required!("last_name", self.last_name);
        validate_field!(
            "date_of_birth",
            self.date_of_birth <= Utc::now().date_naive(),
            "must not be in the future"
        );
        if let Some(email) = &self.email {
            validate_field!("email", email.contains('@'), "is not a valid address");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateDepartmentRequest {
    pub name: String,
    pub location: Option<String>,
}

impl RequestValidation for CreateDepartmentRequest {
    type Error = AdmissionError;

    fn validate(&self) -> Result<(), AdmissionError> {
        validate_required!("name", self.name);
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateRoomRequest {
    pub department_id: Uuid,
    pub room_number: String,
    pub room_type: RoomType,
    #[schema(value_type = String, example = "150.00")]
    pub daily_rate: Decimal,
}

impl RequestValidation for CreateRoomRequest {
    type Error = AdmissionError;

    fn validate(&self) -> Result<(), AdmissionError> {
        validate_required!("room_number", self.room_number);
        validate_field!(
            "daily_rate",
            !self.daily_rate.is_sign_negative(),
            "must not be negative"
        );
        validate_field!(
            "daily_rate",
            self.daily_rate <= MAX_AMOUNT,
            format!("must not exceed {}", MAX_AMOUNT)
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateBedRequest {
    pub room_id: Uuid,
    pub bed_number: String,
}

impl RequestValidation for CreateBedRequest {
    type Error = AdmissionError;

    fn validate(&self) -> Result<(), AdmissionError> {
        validate_required!("bed_number", self.bed_number);
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateBedStatusRequest {
    pub status: BedStatus,
}

impl RequestValidation for UpdateBedStatusRequest {
    type Error = AdmissionError;

    fn validate(&self) -> Result<(), AdmissionError> {
        validate_field!(
            "status",
            self.status != BedStatus::Occupied,
            "beds become OCCUPIED only through admission or transfer"
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdmitPatientRequest {
    pub patient_id: Uuid,
    pub department_id: Uuid,
    pub room_id: Uuid,
    pub bed_id: Uuid,
    pub attending_doctor: String,
    pub admission_type: AdmissionType,
    pub admission_reason: String,
    pub diagnosis: Option<String>,
    /// Defaults to now; may be back-dated for late data entry
    pub admission_date: Option<DateTime<Utc>>,
}

impl RequestValidation for AdmitPatientRequest {
    type Error = AdmissionError;

    fn validate(&self) -> Result<(), AdmissionError> {
        validate_required!("attending_doctor", self.attending_doctor);
        validate_required!("admission_reason", self.admission_reason);
        if let Some(date) = self.admission_date {
            validate_field!("admission_date", date <= Utc::now(), "must not be in the future");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DischargeRequest {
    pub discharge_summary: String,
    pub follow_up_instructions: Option<String>,
    pub follow_up_date: Option<NaiveDate>,
    pub discharge_medications: Option<String>,
    pub discharge_disposition: DischargeDisposition,
    pub discharged_by: String,
}

impl RequestValidation for DischargeRequest {
    type Error = AdmissionError;

    fn validate(&self) -> Result<(), AdmissionError> {
        validate_required!("discharge_summary", self.discharge_summary);
        validate_required!("discharged_by", self.discharged_by);
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TransferRequest {
    pub to_department_id: Uuid,
    pub to_room_id: Uuid,
    pub to_bed_id: Uuid,
    pub reason: String,
    pub transferred_by: String,
}

impl RequestValidation for TransferRequest {
    type Error = AdmissionError;

    fn validate(&self) -> Result<(), AdmissionError> {
        validate_required!("reason", self.reason);
        validate_required!("transferred_by", self.transferred_by);
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddMedicalRecordRequest {
    pub admission_id: Option<Uuid>,
    pub record_type: RecordType,
    pub notes: String,
    pub recorded_by: String,
}

impl RequestValidation for AddMedicalRecordRequest {
    type Error = AdmissionError;

    fn validate(&self) -> Result<(), AdmissionError> {
        validate_required!("notes", self.notes);
        validate_required!("recorded_by", self.recorded_by);
        Ok(())
    }
}

/// Query filter for admission listings
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdmissionQuery {
    pub status: Option<AdmissionStatus>,
    pub department_id: Option<Uuid>,
    pub patient_id: Option<Uuid>,
}

/// Query filter for the bed board
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BedQuery {
    pub department_id: Option<Uuid>,
    pub status: Option<BedStatus>,
}
