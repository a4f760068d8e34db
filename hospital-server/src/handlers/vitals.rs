use crate::error::{api_success, ApiError, ApiResponse, ApiResult};
use crate::server::HospitalServer;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use database_layer::VitalSigns;
use uuid::Uuid;
use vitals_service::{RecordVitalsRequest, VitalAssessment};

#[utoipa::path(
    post,
    path = "/api/v1/vitals",
    request_body = RecordVitalsRequest,
    responses(
        (status = 201, description = "Reading stored, BMI derived when possible", body = VitalSigns),
        (status = 400, description = "Measurement out of range"),
        (status = 404, description = "Patient or admission not found")
    ),
    tag = "vitals"
)]
pub async fn record_vitals(
    State(server): State<HospitalServer>,
    Json(payload): Json<RecordVitalsRequest>,
) -> Result<(StatusCode, Json<ApiResponse<VitalSigns>>), ApiError> {
    let vitals = server.vitals.record_vital_signs(payload).await?;
    Ok((StatusCode::CREATED, Json(api_success(vitals))))
}

#[utoipa::path(
    get,
    path = "/api/v1/vitals/{id}/assessment",
    params(("id" = Uuid, Path, description = "Vital signs ID")),
    responses(
        (status = 200, description = "Reading checked against normal ranges", body = VitalAssessment),
        (status = 404, description = "Reading not found")
    ),
    tag = "vitals"
)]
pub async fn vitals_assessment(
    State(server): State<HospitalServer>,
    Path(id): Path<Uuid>,
) -> ApiResult<VitalAssessment> {
    match server.vitals.check_abnormal_vitals(id).await? {
        Some(assessment) => Ok(Json(api_success(assessment))),
        None => Err(ApiError::not_found(format!("Vital signs not found: {}", id))),
    }
}
