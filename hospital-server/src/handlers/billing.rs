use crate::error::{api_success, ApiError, ApiResponse, ApiResult};
use crate::server::HospitalServer;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use billing_service::{
    BillDetail, OutstandingQuery, OutstandingReport, RecordPaymentRequest, SubmitClaimRequest,
    UpdateClaimStatusRequest,
};
use database_layer::{InsuranceClaim, Payment};
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/v1/billing/bills/{id}",
    params(("id" = Uuid, Path, description = "Bill ID")),
    responses(
        (status = 200, description = "Bill with items, payments and claims", body = BillDetail),
        (status = 404, description = "Bill not found")
    ),
    tag = "billing"
)]
pub async fn get_bill(
    State(server): State<HospitalServer>,
    Path(id): Path<Uuid>,
) -> ApiResult<BillDetail> {
    let bill = server.billing.get_bill(id).await?;
    Ok(Json(api_success(bill)))
}

#[utoipa::path(
    get,
    path = "/api/v1/billing/bills/outstanding",
    params(OutstandingQuery),
    responses((status = 200, description = "Bills with a balance due", body = OutstandingReport)),
    tag = "billing"
)]
pub async fn outstanding_bills(
    State(server): State<HospitalServer>,
    Query(query): Query<OutstandingQuery>,
) -> ApiResult<OutstandingReport> {
    let report = server.billing.outstanding_bills(query).await?;
    Ok(Json(api_success(report)))
}

#[utoipa::path(
    post,
    path = "/api/v1/billing/bills/{id}/payments",
    params(("id" = Uuid, Path, description = "Bill ID")),
    request_body = RecordPaymentRequest,
    responses(
        (status = 201, description = "Payment applied to the bill", body = Payment),
        (status = 400, description = "Amount not positive or above the balance"),
        (status = 404, description = "Bill not found"),
        (status = 409, description = "Bill is settled or cancelled")
    ),
    tag = "billing"
)]
pub async fn record_payment(
    State(server): State<HospitalServer>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RecordPaymentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Payment>>), ApiError> {
    let payment = server.billing.record_payment(id, payload).await?;
    Ok((StatusCode::CREATED, Json(api_success(payment))))
}

#[utoipa::path(
    post,
    path = "/api/v1/billing/bills/{id}/claims",
    params(("id" = Uuid, Path, description = "Bill ID")),
    request_body = SubmitClaimRequest,
    responses(
        (status = 201, description = "Claim submitted with the coverage split", body = InsuranceClaim),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Bill not found"),
        (status = 409, description = "Bill cancelled or already claimed")
    ),
    tag = "billing"
)]
pub async fn submit_claim(
    State(server): State<HospitalServer>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SubmitClaimRequest>,
) -> Result<(StatusCode, Json<ApiResponse<InsuranceClaim>>), ApiError> {
    let claim = server.billing.submit_insurance_claim(id, payload).await?;
    Ok((StatusCode::CREATED, Json(api_success(claim))))
}

#[utoipa::path(
    put,
    path = "/api/v1/billing/claims/{id}/status",
    params(("id" = Uuid, Path, description = "Claim ID")),
    request_body = UpdateClaimStatusRequest,
    responses(
        (status = 200, description = "Claim advanced", body = InsuranceClaim),
        (status = 404, description = "Claim not found"),
        (status = 409, description = "Transition not allowed")
    ),
    tag = "billing"
)]
pub async fn update_claim_status(
    State(server): State<HospitalServer>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateClaimStatusRequest>,
) -> ApiResult<InsuranceClaim> {
    let claim = server.billing.update_claim_status(id, payload).await?;
    Ok(Json(api_success(claim)))
}
