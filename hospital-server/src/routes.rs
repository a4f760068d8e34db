pub mod paths;

use crate::{
    handlers::{admissions, billing, emergency, facility, health, patients, vitals},
    openapi,
    server::HospitalServer,
};
use axum::{
    routing::{get, post, put},
    Router,
};
use paths::API_V1;

pub fn health_routes() -> Router<HospitalServer> {
    Router::new().route(paths::HEALTH, get(health::health_check))
}

pub fn patient_routes() -> Router<HospitalServer> {
    use paths::patients::*;
    Router::new()
        .route(
            PATIENTS,
            get(patients::list_patients).post(patients::register_patient),
        )
        .route(PATIENT_BY_ID, get(patients::get_patient))
        .route(
            MEDICAL_RECORDS,
            get(patients::list_medical_records).post(patients::add_medical_record),
        )
        .route(VITALS, get(patients::vital_history))
}

pub fn facility_routes() -> Router<HospitalServer> {
    use paths::facility::*;
    Router::new()
        .route(
            DEPARTMENTS,
            get(facility::list_departments).post(facility::create_department),
        )
        .route(ROOMS, post(facility::create_room))
        .route(
            BEDS,
            get(facility::bed_availability).post(facility::create_bed),
        )
        .route(BED_STATUS, put(facility::set_bed_status))
}

/// ADT workflow plus per-admission charge capture
pub fn admission_routes() -> Router<HospitalServer> {
    use paths::admissions::*;
    Router::new()
        .route(
            ADMISSIONS,
            get(admissions::list_admissions).post(admissions::admit_patient),
        )
        .route(ADMISSION_BY_ID, get(admissions::get_admission))
        .route(DISCHARGE, post(admissions::discharge_patient))
        .route(TRANSFER, post(admissions::transfer_patient))
        .route(TRANSFERS, get(admissions::transfer_history))
        .route(DISCHARGE_PLAN, get(admissions::discharge_plan))
        .route(MEDICATIONS, post(admissions::order_medication))
        .route(LAB_ORDERS, post(admissions::order_lab_test))
        .route(BILL, post(admissions::generate_bill))
}

pub fn vitals_routes() -> Router<HospitalServer> {
    use paths::vitals::*;
    Router::new()
        .route(VITALS, post(vitals::record_vitals))
        .route(ASSESSMENT, get(vitals::vitals_assessment))
}

pub fn billing_routes() -> Router<HospitalServer> {
    use paths::billing::*;
    Router::new()
        .route(OUTSTANDING, get(billing::outstanding_bills))
        .route(BILL_BY_ID, get(billing::get_bill))
        .route(PAYMENTS, post(billing::record_payment))
        .route(CLAIMS, post(billing::submit_claim))
        .route(CLAIM_STATUS, put(billing::update_claim_status))
}

pub fn emergency_routes() -> Router<HospitalServer> {
    use paths::emergency::*;
    Router::new()
        .route(TRIAGE, post(emergency::register_triage))
        .route(TRIAGE_BY_ID, get(emergency::get_triage))
        .route(TRIAGE_STATUS, put(emergency::update_triage_status))
        .route(QUEUE, get(emergency::waiting_queue))
        .route(SUMMARY, get(emergency::department_summary))
}

pub fn api_v1_routes() -> Router<HospitalServer> {
    Router::new()
        .merge(patient_routes())
        .merge(facility_routes())
        .merge(admission_routes())
        .merge(vitals_routes())
        .merge(billing_routes())
        .merge(emergency_routes())
}

/// Complete router, before state and middleware are attached
pub fn create_routes() -> Router<HospitalServer> {
    Router::new()
        .merge(health_routes())
        .merge(openapi::create_docs_routes())
        .nest(API_V1, api_v1_routes())
}
