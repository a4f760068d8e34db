use crate::error::{api_success, ApiError, ApiResponse, ApiResult};
use crate::server::HospitalServer;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use database_layer::TriageRecord;
use emergency_service::{DepartmentSummary, RegisterTriageRequest, SummaryQuery, UpdateTriageStatus};
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/api/v1/emergency/triage",
    request_body = RegisterTriageRequest,
    responses(
        (status = 201, description = "Patient queued as WAITING", body = TriageRecord),
        (status = 400, description = "Triage level outside 1 to 5"),
        (status = 404, description = "Patient not found")
    ),
    tag = "emergency"
)]
pub async fn register_triage(
    State(server): State<HospitalServer>,
    Json(payload): Json<RegisterTriageRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TriageRecord>>), ApiError> {
    let record = server.emergency.register_triage(payload).await?;
    Ok((StatusCode::CREATED, Json(api_success(record))))
}

#[utoipa::path(
    get,
    path = "/api/v1/emergency/triage/{id}",
    params(("id" = Uuid, Path, description = "Triage record ID")),
    responses(
        (status = 200, description = "Triage record", body = TriageRecord),
        (status = 404, description = "Triage record not found")
    ),
    tag = "emergency"
)]
pub async fn get_triage(
    State(server): State<HospitalServer>,
    Path(id): Path<Uuid>,
) -> ApiResult<TriageRecord> {
    let record = server.emergency.get_triage(id).await?;
    Ok(Json(api_success(record)))
}

#[utoipa::path(
    put,
    path = "/api/v1/emergency/triage/{id}/status",
    params(("id" = Uuid, Path, description = "Triage record ID")),
    request_body = UpdateTriageStatus,
    responses(
        (status = 200, description = "Status advanced", body = TriageRecord),
        (status = 404, description = "Triage record not found"),
        (status = 409, description = "Transition not allowed")
    ),
    tag = "emergency"
)]
pub async fn update_triage_status(
    State(server): State<HospitalServer>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTriageStatus>,
) -> ApiResult<TriageRecord> {
    let record = server.emergency.update_triage_status(id, payload).await?;
    Ok(Json(api_success(record)))
}

#[utoipa::path(
    get,
    path = "/api/v1/emergency/queue",
    responses((status = 200, description = "Active patients, most urgent first", body = Vec<TriageRecord>)),
    tag = "emergency"
)]
pub async fn waiting_queue(State(server): State<HospitalServer>) -> ApiResult<Vec<TriageRecord>> {
    let queue = server.emergency.waiting_queue().await?;
    Ok(Json(api_success(queue)))
}

#[utoipa::path(
    get,
    path = "/api/v1/emergency/summary",
    params(SummaryQuery),
    responses((status = 200, description = "Arrivals since the given time", body = DepartmentSummary)),
    tag = "emergency"
)]
pub async fn department_summary(
    State(server): State<HospitalServer>,
    Query(query): Query<SummaryQuery>,
) -> ApiResult<DepartmentSummary> {
    let summary = server.emergency.department_summary(query).await?;
    Ok(Json(api_success(summary)))
}
