use crate::server::HospitalServer;
use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,

        crate::handlers::patients::register_patient,
        crate::handlers::patients::list_patients,
        crate::handlers::patients::get_patient,
        crate::handlers::patients::list_medical_records,
        crate::handlers::patients::add_medical_record,
        crate::handlers::patients::vital_history,

        crate::handlers::facility::create_department,
        crate::handlers::facility::list_departments,
        crate::handlers::facility::create_room,
        crate::handlers::facility::create_bed,
        crate::handlers::facility::set_bed_status,
        crate::handlers::facility::bed_availability,

        crate::handlers::admissions::admit_patient,
        crate::handlers::admissions::list_admissions,
        crate::handlers::admissions::get_admission,
        crate::handlers::admissions::discharge_patient,
        crate::handlers::admissions::transfer_patient,
        crate::handlers::admissions::transfer_history,
        crate::handlers::admissions::discharge_plan,
        crate::handlers::admissions::order_medication,
        crate::handlers::admissions::order_lab_test,
        crate::handlers::admissions::generate_bill,

        crate::handlers::vitals::record_vitals,
        crate::handlers::vitals::vitals_assessment,

        crate::handlers::billing::get_bill,
        crate::handlers::billing::outstanding_bills,
        crate::handlers::billing::record_payment,
        crate::handlers::billing::submit_claim,
        crate::handlers::billing::update_claim_status,

        crate::handlers::emergency::register_triage,
        crate::handlers::emergency::get_triage,
        crate::handlers::emergency::update_triage_status,
        crate::handlers::emergency::waiting_queue,
        crate::handlers::emergency::department_summary,
    ),
    components(
        schemas(
            crate::handlers::health::HealthResponse,
            crate::handlers::health::DatabaseHealth,
            crate::error::ApiErrorResponse,
            crate::error::PaginationInfo,
            crate::error::ResponseMetadata,
        )
    ),
    tags(
        (name = "health", description = "Liveness and database reachability"),
        (name = "patients", description = "Patient registration and medical records"),
        (name = "facility", description = "Departments, rooms and the bed board"),
        (name = "admissions", description = "Admission, discharge and transfer"),
        (name = "vitals", description = "Vital signs and abnormal-value checks"),
        (name = "billing", description = "Charges, bills, payments and insurance claims"),
        (name = "emergency", description = "Emergency triage queue"),
    ),
    info(
        title = "Hospital Operations API",
        version = "0.1.0",
        description = "Inpatient flow, bedside vitals, billing and emergency triage over a transactional SQL store.",
    )
)]
pub struct ApiDoc;

pub fn create_docs_routes() -> Router<HospitalServer> {
    Router::new().route(
        crate::routes::paths::OPENAPI_JSON,
        get(|| async { Json(ApiDoc::openapi()) }),
    )
}
