use crate::error::{api_success, ApiError, ApiResponse, ApiResult};
use crate::server::HospitalServer;
use admission_service::{
    BedQuery, CreateBedRequest, CreateDepartmentRequest, CreateRoomRequest, UpdateBedStatusRequest,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use database_layer::{Bed, BedAvailability, Department, Room};
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/api/v1/facility/departments",
    request_body = CreateDepartmentRequest,
    responses(
        (status = 201, description = "Department created", body = Department),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Department name already in use")
    ),
    tag = "facility"
)]
pub async fn create_department(
    State(server): State<HospitalServer>,
    Json(payload): Json<CreateDepartmentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Department>>), ApiError> {
    let department = server.admissions.create_department(payload).await?;
    Ok((StatusCode::CREATED, Json(api_success(department))))
}

#[utoipa::path(
    get,
    path = "/api/v1/facility/departments",
    responses((status = 200, description = "All departments", body = Vec<Department>)),
    tag = "facility"
)]
pub async fn list_departments(State(server): State<HospitalServer>) -> ApiResult<Vec<Department>> {
    let departments = server.admissions.list_departments().await?;
    Ok(Json(api_success(departments)))
}

#[utoipa::path(
    post,
    path = "/api/v1/facility/rooms",
    request_body = CreateRoomRequest,
    responses(
        (status = 201, description = "Room created", body = Room),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Department not found")
    ),
    tag = "facility"
)]
pub async fn create_room(
    State(server): State<HospitalServer>,
    Json(payload): Json<CreateRoomRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Room>>), ApiError> {
    let room = server.admissions.create_room(payload).await?;
    Ok((StatusCode::CREATED, Json(api_success(room))))
}

#[utoipa::path(
    post,
    path = "/api/v1/facility/beds",
    request_body = CreateBedRequest,
    responses(
        (status = 201, description = "Bed created as AVAILABLE", body = Bed),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Room not found")
    ),
    tag = "facility"
)]
pub async fn create_bed(
    State(server): State<HospitalServer>,
    Json(payload): Json<CreateBedRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Bed>>), ApiError> {
    let bed = server.admissions.create_bed(payload).await?;
    Ok((StatusCode::CREATED, Json(api_success(bed))))
}

#[utoipa::path(
    put,
    path = "/api/v1/facility/beds/{id}/status",
    params(("id" = Uuid, Path, description = "Bed ID")),
    request_body = UpdateBedStatusRequest,
    responses(
        (status = 200, description = "Bed status changed", body = Bed),
        (status = 404, description = "Bed not found"),
        (status = 409, description = "Bed is occupied")
    ),
    tag = "facility"
)]
pub async fn set_bed_status(
    State(server): State<HospitalServer>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBedStatusRequest>,
) -> ApiResult<Bed> {
    let bed = server.admissions.set_bed_status(id, payload).await?;
    Ok(Json(api_success(bed)))
}

#[utoipa::path(
    get,
    path = "/api/v1/facility/beds",
    params(BedQuery),
    responses((status = 200, description = "Bed board", body = Vec<BedAvailability>)),
    tag = "facility"
)]
pub async fn bed_availability(
    State(server): State<HospitalServer>,
    Query(query): Query<BedQuery>,
) -> ApiResult<Vec<BedAvailability>> {
    let beds = server.admissions.bed_availability(query).await?;
    Ok(Json(api_success(beds)))
}
