use crate::error::{api_success, ApiError, ApiResponse, ApiResult};
use crate::server::HospitalServer;
use admission_service::{
    AdmissionQuery, AdmitPatientRequest, DischargeOutcome, DischargeRequest, TransferOutcome,
    TransferRequest,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use billing_service::{BillDetail, GenerateBillRequest, OrderLabTestRequest, OrderMedicationRequest};
use database_layer::{Admission, DischargePlan, LabOrder, MedicationOrder, PatientTransfer};
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/api/v1/admissions",
    request_body = AdmitPatientRequest,
    responses(
        (status = 201, description = "Patient admitted and bed occupied", body = Admission),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Patient, department, room or bed not found"),
        (status = 409, description = "Bed unavailable or patient already admitted")
    ),
    tag = "admissions"
)]
pub async fn admit_patient(
    State(server): State<HospitalServer>,
    Json(payload): Json<AdmitPatientRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Admission>>), ApiError> {
    let admission = server.admissions.admit_patient(payload).await?;
    Ok((StatusCode::CREATED, Json(api_success(admission))))
}

#[utoipa::path(
    get,
    path = "/api/v1/admissions",
    params(AdmissionQuery),
    responses((status = 200, description = "Admissions, newest first", body = Vec<Admission>)),
    tag = "admissions"
)]
pub async fn list_admissions(
    State(server): State<HospitalServer>,
    Query(query): Query<AdmissionQuery>,
) -> ApiResult<Vec<Admission>> {
    let admissions = server.admissions.list_admissions(query).await?;
    Ok(Json(api_success(admissions)))
}

#[utoipa::path(
    get,
    path = "/api/v1/admissions/{id}",
    params(("id" = Uuid, Path, description = "Admission ID")),
    responses(
        (status = 200, description = "Admission found", body = Admission),
        (status = 404, description = "Admission not found")
    ),
    tag = "admissions"
)]
pub async fn get_admission(
    State(server): State<HospitalServer>,
    Path(id): Path<Uuid>,
) -> ApiResult<Admission> {
    let admission = server.admissions.get_admission(id).await?;
    Ok(Json(api_success(admission)))
}

#[utoipa::path(
    post,
    path = "/api/v1/admissions/{id}/discharge",
    params(("id" = Uuid, Path, description = "Admission ID")),
    request_body = DischargeRequest,
    responses(
        (status = 200, description = "Patient discharged and bed released", body = DischargeOutcome),
        (status = 404, description = "Admission not found"),
        (status = 409, description = "Admission already closed")
    ),
    tag = "admissions"
)]
pub async fn discharge_patient(
    State(server): State<HospitalServer>,
    Path(id): Path<Uuid>,
    Json(payload): Json<DischargeRequest>,
) -> ApiResult<DischargeOutcome> {
    let outcome = server.admissions.discharge_patient(id, payload).await?;
    Ok(Json(api_success(outcome)))
}

#[utoipa::path(
    post,
    path = "/api/v1/admissions/{id}/transfer",
    params(("id" = Uuid, Path, description = "Admission ID")),
    request_body = TransferRequest,
    responses(
        (status = 200, description = "Patient moved to the new bed", body = TransferOutcome),
        (status = 404, description = "Admission or destination not found"),
        (status = 409, description = "Destination bed unavailable or admission closed")
    ),
    tag = "admissions"
)]
pub async fn transfer_patient(
    State(server): State<HospitalServer>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TransferRequest>,
) -> ApiResult<TransferOutcome> {
    let outcome = server.admissions.transfer_patient(id, payload).await?;
    Ok(Json(api_success(outcome)))
}

#[utoipa::path(
    get,
    path = "/api/v1/admissions/{id}/transfers",
    params(("id" = Uuid, Path, description = "Admission ID")),
    responses(
        (status = 200, description = "Transfers, oldest first", body = Vec<PatientTransfer>),
        (status = 404, description = "Admission not found")
    ),
    tag = "admissions"
)]
pub async fn transfer_history(
    State(server): State<HospitalServer>,
    Path(id): Path<Uuid>,
) -> ApiResult<Vec<PatientTransfer>> {
    let transfers = server.admissions.transfer_history(id).await?;
    Ok(Json(api_success(transfers)))
}

#[utoipa::path(
    get,
    path = "/api/v1/admissions/{id}/discharge-plan",
    params(("id" = Uuid, Path, description = "Admission ID")),
    responses(
        (status = 200, description = "Discharge plan", body = DischargePlan),
        (status = 404, description = "Admission or plan not found")
    ),
    tag = "admissions"
)]
pub async fn discharge_plan(
    State(server): State<HospitalServer>,
    Path(id): Path<Uuid>,
) -> ApiResult<DischargePlan> {
    let plan = server.admissions.discharge_plan(id).await?;
    Ok(Json(api_success(plan)))
}

#[utoipa::path(
    post,
    path = "/api/v1/admissions/{id}/medications",
    params(("id" = Uuid, Path, description = "Admission ID")),
    request_body = OrderMedicationRequest,
    responses(
        (status = 201, description = "Medication charge captured", body = MedicationOrder),
        (status = 404, description = "Admission not found"),
        (status = 409, description = "Admission closed")
    ),
    tag = "billing"
)]
pub async fn order_medication(
    State(server): State<HospitalServer>,
    Path(id): Path<Uuid>,
    Json(payload): Json<OrderMedicationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MedicationOrder>>), ApiError> {
    let order = server.billing.order_medication(id, payload).await?;
    Ok((StatusCode::CREATED, Json(api_success(order))))
}

#[utoipa::path(
    post,
    path = "/api/v1/admissions/{id}/lab-orders",
    params(("id" = Uuid, Path, description = "Admission ID")),
    request_body = OrderLabTestRequest,
    responses(
        (status = 201, description = "Lab charge captured", body = LabOrder),
        (status = 404, description = "Admission not found"),
        (status = 409, description = "Admission closed")
    ),
    tag = "billing"
)]
pub async fn order_lab_test(
    State(server): State<HospitalServer>,
    Path(id): Path<Uuid>,
    Json(payload): Json<OrderLabTestRequest>,
) -> Result<(StatusCode, Json<ApiResponse<LabOrder>>), ApiError> {
    let order = server.billing.order_lab_test(id, payload).await?;
    Ok((StatusCode::CREATED, Json(api_success(order))))
}

#[utoipa::path(
    post,
    path = "/api/v1/admissions/{id}/bill",
    params(("id" = Uuid, Path, description = "Admission ID")),
    request_body = GenerateBillRequest,
    responses(
        (status = 201, description = "Bill generated from the stay's charges", body = BillDetail),
        (status = 404, description = "Admission not found"),
        (status = 409, description = "Admission already billed")
    ),
    tag = "billing"
)]
pub async fn generate_bill(
    State(server): State<HospitalServer>,
    Path(id): Path<Uuid>,
    Json(payload): Json<GenerateBillRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BillDetail>>), ApiError> {
    let bill = server.billing.generate_bill(id, payload).await?;
    Ok((StatusCode::CREATED, Json(api_success(bill))))
}
