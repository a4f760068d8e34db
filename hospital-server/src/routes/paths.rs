//! Route path constants
//!
//! Router paths are relative to [`API_V1`] and use axum's `:param` syntax.
//! The `api_v1` module holds the same paths in OpenAPI form, as written in
//! the handlers' `#[utoipa::path]` attributes.

pub const API_V1: &str = "/api/v1";

pub const HEALTH: &str = "/health";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";

pub mod patients {
    pub const PATIENTS: &str = "/patients";
    pub const PATIENT_BY_ID: &str = "/patients/:id";
    pub const MEDICAL_RECORDS: &str = "/patients/:id/medical-records";
    pub const VITALS: &str = "/patients/:id/vitals";
}

pub mod facility {
    pub const DEPARTMENTS: &str = "/facility/departments";
    pub const ROOMS: &str = "/facility/rooms";
    pub const BEDS: &str = "/facility/beds";
    pub const BED_STATUS: &str = "/facility/beds/:id/status";
}

pub mod admissions {
    pub const ADMISSIONS: &str = "/admissions";
    pub const ADMISSION_BY_ID: &str = "/admissions/:id";
    pub const DISCHARGE: &str = "/admissions/:id/discharge";
    pub const TRANSFER: &str = "/admissions/:id/transfer";
    pub const TRANSFERS: &str = "/admissions/:id/transfers";
    pub const DISCHARGE_PLAN: &str = "/admissions/:id/discharge-plan";
    pub const MEDICATIONS: &str = "/admissions/:id/medications";
    pub const LAB_ORDERS: &str = "/admissions/:id/lab-orders";
    pub const BILL: &str = "/admissions/:id/bill";
}

pub mod vitals {
    pub const VITALS: &str = "/vitals";
    pub const ASSESSMENT: &str = "/vitals/:id/assessment";
}

pub mod billing {
    pub const BILL_BY_ID: &str = "/billing/bills/:id";
    pub const OUTSTANDING: &str = "/billing/bills/outstanding";
    pub const PAYMENTS: &str = "/billing/bills/:id/payments";
    pub const CLAIMS: &str = "/billing/bills/:id/claims";
    pub const CLAIM_STATUS: &str = "/billing/claims/:id/status";
}

pub mod emergency {
    pub const TRIAGE: &str = "/emergency/triage";
    pub const TRIAGE_BY_ID: &str = "/emergency/triage/:id";
    pub const TRIAGE_STATUS: &str = "/emergency/triage/:id/status";
    pub const QUEUE: &str = "/emergency/queue";
    pub const SUMMARY: &str = "/emergency/summary";
}

/// Full paths in OpenAPI form
pub mod api_v1 {
    pub const PATIENTS: &str = "/api/v1/patients";
    pub const PATIENT_BY_ID: &str = "/api/v1/patients/{id}";
    pub const MEDICAL_RECORDS: &str = "/api/v1/patients/{id}/medical-records";
    pub const PATIENT_VITALS: &str = "/api/v1/patients/{id}/vitals";

    pub const DEPARTMENTS: &str = "/api/v1/facility/departments";
    pub const ROOMS: &str = "/api/v1/facility/rooms";
    pub const BEDS: &str = "/api/v1/facility/beds";
    pub const BED_STATUS: &str = "/api/v1/facility/beds/{id}/status";

    pub const ADMISSIONS: &str = "/api/v1/admissions";
    pub const ADMISSION_BY_ID: &str = "/api/v1/admissions/{id}";
    pub const DISCHARGE: &str = "/api/v1/admissions/{id}/discharge";
    pub const TRANSFER: &str = "/api/v1/admissions/{id}/transfer";
    pub const TRANSFERS: &str = "/api/v1/admissions/{id}/transfers";
    pub const DISCHARGE_PLAN: &str = "/api/v1/admissions/{id}/discharge-plan";
    pub const MEDICATIONS: &str = "/api/v1/admissions/{id}/medications";
    pub const LAB_ORDERS: &str = "/api/v1/admissions/{id}/lab-orders";
    pub const ADMISSION_BILL: &str = "/api/v1/admissions/{id}/bill";

    pub const VITALS: &str = "/api/v1/vitals";
    pub const VITALS_ASSESSMENT: &str = "/api/v1/vitals/{id}/assessment";

    pub const BILL_BY_ID: &str = "/api/v1/billing/bills/{id}";
    pub const OUTSTANDING_BILLS: &str = "/api/v1/billing/bills/outstanding";
    pub const PAYMENTS: &str = "/api/v1/billing/bills/{id}/payments";
    pub const CLAIMS: &str = "/api/v1/billing/bills/{id}/claims";
    pub const CLAIM_STATUS: &str = "/api/v1/billing/claims/{id}/status";

    pub const TRIAGE: &str = "/api/v1/emergency/triage";
    pub const TRIAGE_BY_ID: &str = "/api/v1/emergency/triage/{id}";
    pub const TRIAGE_STATUS: &str = "/api/v1/emergency/triage/{id}/status";
    pub const QUEUE: &str = "/api/v1/emergency/queue";
    pub const SUMMARY: &str = "/api/v1/emergency/summary";
}
