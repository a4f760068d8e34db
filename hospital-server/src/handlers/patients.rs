use crate::error::{api_success, api_success_with_meta, ApiError, ApiResponse, ApiResult};
use crate::server::HospitalServer;
use crate::types::pagination::PaginationParams;
use admission_service::{AddMedicalRecordRequest, RegisterPatientRequest};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use database_layer::{MedicalRecord, Patient, VitalSigns};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PatientSearch {
    /// Exact medical record number; returns at most one patient
    pub mrn: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HistoryParams {
    /// Newest readings to return, 1 to 500
    #[param(example = 50)]
    pub limit: Option<i64>,
}

const DEFAULT_HISTORY: i64 = 50;

#[utoipa::path(
    post,
    path = "/api/v1/patients",
    request_body = RegisterPatientRequest,
    responses(
        (status = 201, description = "Patient registered", body = Patient),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Medical record number already in use")
    ),
    tag = "patients"
)]
pub async fn register_patient(
    State(server): State<HospitalServer>,
    Json(payload): Json<RegisterPatientRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Patient>>), ApiError> {
    let patient = server.admissions.register_patient(payload).await?;
    Ok((StatusCode::CREATED, Json(api_success(patient))))
}

#[utoipa::path(
    get,
    path = "/api/v1/patients",
    params(PatientSearch, PaginationParams),
    responses(
        (status = 200, description = "Patients ordered by name", body = Vec<Patient>)
    ),
    tag = "patients"
)]
pub async fn list_patients(
    State(server): State<HospitalServer>,
    Query(search): Query<PatientSearch>,
    Query(pagination): Query<PaginationParams>,
) -> ApiResult<Vec<Patient>> {
    if let Some(mrn) = search.mrn {
        let found = server.admissions.find_patient_by_mrn(&mrn).await?;
        return Ok(Json(api_success(found.into_iter().collect())));
    }

    let rows = server
        .admissions
        .list_patients(pagination.fetch_limit(), pagination.offset())
        .await?;
    let (patients, metadata) = pagination.paginate(rows);
    Ok(Json(api_success_with_meta(patients, metadata)))
}

#[utoipa::path(
    get,
    path = "/api/v1/patients/{id}",
    params(("id" = Uuid, Path, description = "Patient ID")),
    responses(
        (status = 200, description = "Patient found", body = Patient),
        (status = 404, description = "Patient not found")
    ),
    tag = "patients"
)]
pub async fn get_patient(
    State(server): State<HospitalServer>,
    Path(id): Path<Uuid>,
) -> ApiResult<Patient> {
    let patient = server.admissions.get_patient(id).await?;
    Ok(Json(api_success(patient)))
}

#[utoipa::path(
    get,
    path = "/api/v1/patients/{id}/medical-records",
    params(("id" = Uuid, Path, description = "Patient ID")),
    responses(
        (status = 200, description = "Medical records for the patient", body = Vec<MedicalRecord>),
        (status = 404, description = "Patient not found")
    ),
    tag = "patients"
)]
pub async fn list_medical_records(
    State(server): State<HospitalServer>,
    Path(id): Path<Uuid>,
) -> ApiResult<Vec<MedicalRecord>> {
    let records = server.admissions.medical_records(id).await?;
    Ok(Json(api_success(records)))
}

#[utoipa::path(
    post,
    path = "/api/v1/patients/{id}/medical-records",
    params(("id" = Uuid, Path, description = "Patient ID")),
    request_body = AddMedicalRecordRequest,
    responses(
        (status = 201, description = "Record filed", body = MedicalRecord),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Patient or admission not found")
    ),
    tag = "patients"
)]
pub async fn add_medical_record(
    State(server): State<HospitalServer>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddMedicalRecordRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MedicalRecord>>), ApiError> {
    let record = server.admissions.add_medical_record(id, payload).await?;
    Ok((StatusCode::CREATED, Json(api_success(record))))
}

#[utoipa::path(
    get,
    path = "/api/v1/patients/{id}/vitals",
    params(("id" = Uuid, Path, description = "Patient ID"), HistoryParams),
    responses(
        (status = 200, description = "Vital signs, newest first", body = Vec<VitalSigns>),
        (status = 400, description = "Limit out of range")
    ),
    tag = "vitals"
)]
pub async fn vital_history(
    State(server): State<HospitalServer>,
    Path(id): Path<Uuid>,
    Query(params): Query<HistoryParams>,
) -> ApiResult<Vec<VitalSigns>> {
    let history = server
        .vitals
        .vital_history(id, params.limit.unwrap_or(DEFAULT_HISTORY))
        .await?;
    Ok(Json(api_success(history)))
}
