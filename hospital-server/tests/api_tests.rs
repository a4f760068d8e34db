use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use database_layer::InMemoryHospitalDatabase;
use http_body_util::BodyExt;
use hospital_server::{create_app, AppConfig, HospitalServer};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    let server = HospitalServer::with_database(
        AppConfig::default(),
        Arc::new(InMemoryHospitalDatabase::new()),
    );
    create_app(server)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn id(body: &Value) -> String {
    body["data"]["id"].as_str().unwrap().to_string()
}

fn decimal(value: &Value) -> f64 {
    value.as_str().unwrap().parse().unwrap()
}

async fn register_patient(app: &Router, mrn: &str, last_name: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/v1/patients",
        Some(json!({
            "medical_record_number": mrn,
            "first_name": "Jane",
            "last_name": last_name,
            "date_of_birth": "1980-04-02",
            "gender": "FEMALE"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    id(&body)
}

struct Ward {
    department_id: String,
    room_id: String,
    bed_id: String,
}

async fn seed_ward(app: &Router) -> Ward {
    let (_, department) = send(
        app,
        "POST",
        "/api/v1/facility/departments",
        Some(json!({ "name": "Cardiology", "location": "Block B" })),
    )
    .await;
    let department_id = id(&department);

    let (_, room) = send(
        app,
        "POST",
        "/api/v1/facility/rooms",
        Some(json!({
            "department_id": department_id,
            "room_number": "204",
            "room_type": "PRIVATE",
            "daily_rate": "150.00"
        })),
    )
    .await;
    let room_id = id(&room);

    let (status, bed) = send(
        app,
        "POST",
        "/api/v1/facility/beds",
        Some(json!({ "room_id": room_id, "bed_number": "A" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", bed);
    assert_eq!(bed["data"]["bed_status"], "AVAILABLE");

    Ward {
        department_id,
        room_id,
        bed_id: id(&bed),
    }
}

async fn admit(app: &Router, patient_id: &str, ward: &Ward) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        "/api/v1/admissions",
        Some(json!({
            "patient_id": patient_id,
            "department_id": ward.department_id,
            "room_id": ward.room_id,
            "bed_id": ward.bed_id,
            "attending_doctor": "Dr. House",
            "admission_type": "EMERGENCY",
            "admission_reason": "Chest pain"
        })),
    )
    .await
}

#[tokio::test]
async fn test_health_reports_backend() {
    let app = app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"]["backend"], "memory");
    assert_eq!(body["database"]["reachable"], true);
}

#[tokio::test]
async fn test_openapi_document_lists_routes() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);

    let paths = body["paths"].as_object().unwrap();
    for path in [
        "/health",
        "/api/v1/admissions/{id}/discharge",
        "/api/v1/billing/bills/{id}/payments",
        "/api/v1/emergency/queue",
    ] {
        assert!(paths.contains_key(path), "missing {}", path);
    }
}

#[tokio::test]
async fn test_admission_to_payment_flow() {
    let app = app();
    let patient_id = register_patient(&app, "MRN-7001", "Doe").await;
    let ward = seed_ward(&app).await;

    let (status, admission) = admit(&app, &patient_id, &ward).await;
    assert_eq!(status, StatusCode::CREATED, "{}", admission);
    assert_eq!(admission["data"]["admission_status"], "ADMITTED");
    let admission_id = id(&admission);

    let (_, beds) = send(&app, "GET", "/api/v1/facility/beds?status=OCCUPIED", None).await;
    assert_eq!(beds["data"].as_array().unwrap().len(), 1);

    let (status, vitals) = send(
        &app,
        "POST",
        "/api/v1/vitals",
        Some(json!({
            "patient_id": patient_id,
            "admission_id": admission_id,
            "temperature_c": 38.6,
            "heart_rate": 88,
            "recorded_by": "Nurse Joy"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", vitals);
    let (status, assessment) = send(
        &app,
        "GET",
        &format!("/api/v1/vitals/{}/assessment", id(&vitals)),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(assessment["data"]["summary"], "High temperature: 38.6 °C");

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/v1/admissions/{}/lab-orders", admission_id),
        Some(json!({ "test_name": "Troponin", "price": "45.00", "ordered_by": "Dr. House" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, bill) = send(
        &app,
        "POST",
        &format!("/api/v1/admissions/{}/bill", admission_id),
        Some(json!({ "generated_by": "Billing Desk" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", bill);
    assert_eq!(bill["data"]["items"].as_array().unwrap().len(), 2);
    assert_eq!(decimal(&bill["data"]["bill"]["total_amount"]), 195.0);
    assert_eq!(bill["data"]["bill"]["bill_status"], "PENDING");
    let bill_id = bill["data"]["bill"]["id"].as_str().unwrap().to_string();

    let payments = format!("/api/v1/billing/bills/{}/payments", bill_id);
    let (status, _) = send(
        &app,
        "POST",
        &payments,
        Some(json!({ "amount": "95.00", "payment_method": "CARD", "received_by": "Cashier" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, error) = send(
        &app,
        "POST",
        &payments,
        Some(json!({ "amount": "100.01", "payment_method": "CASH", "received_by": "Cashier" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "BILLING_4003");

    let (_, outstanding) = send(&app, "GET", "/api/v1/billing/bills/outstanding", None).await;
    assert_eq!(decimal(&outstanding["data"]["total_balance"]), 100.0);

    let (status, _) = send(
        &app,
        "POST",
        &payments,
        Some(json!({ "amount": "100.00", "payment_method": "CASH", "received_by": "Cashier" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (_, paid) = send(&app, "GET", &format!("/api/v1/billing/bills/{}", bill_id), None).await;
    assert_eq!(paid["data"]["bill"]["bill_status"], "PAID");
    assert_eq!(decimal(&paid["data"]["balance_due"]), 0.0);

    let (status, discharged) = send(
        &app,
        "POST",
        &format!("/api/v1/admissions/{}/discharge", admission_id),
        Some(json!({
            "discharge_summary": "Stable",
            "discharge_disposition": "HOME",
            "discharged_by": "Dr. House"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", discharged);
    let (_, beds) = send(&app, "GET", "/api/v1/facility/beds?status=AVAILABLE", None).await;
    assert_eq!(beds["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_occupied_bed_is_a_conflict() {
    let app = app();
    let first = register_patient(&app, "MRN-7001", "Doe").await;
    let second = register_patient(&app, "MRN-7002", "Roe").await;
    let ward = seed_ward(&app).await;

    let (status, _) = admit(&app, &first, &ward).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = admit(&app, &second, &ward).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "ADT_3001");
    assert!(body["error_id"].is_string());
}

#[tokio::test]
async fn test_error_statuses() {
    let app = app();

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/v1/patients/{}", uuid::Uuid::new_v4()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_type"], "not_found");

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/facility/departments",
        Some(json!({ "name": "  " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/v1/vitals/{}/assessment", uuid::Uuid::new_v4()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    register_patient(&app, "MRN-7001", "Doe").await;
    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/patients",
        Some(json!({
            "medical_record_number": "MRN-7001",
            "first_name": "John",
            "last_name": "Doe",
            "date_of_birth": "1975-01-01",
            "gender": "MALE"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_patient_listing_paginates() {
    let app = app();
    register_patient(&app, "MRN-7001", "Adams").await;
    register_patient(&app, "MRN-7002", "Baker").await;

    let (status, body) = send(&app, "GET", "/api/v1/patients?page=1&page_size=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["last_name"], "Adams");
    assert_eq!(body["metadata"]["pagination"]["has_next"], true);

    let (_, body) = send(&app, "GET", "/api/v1/patients?page=2&page_size=1", None).await;
    assert_eq!(body["data"][0]["last_name"], "Baker");
    assert_eq!(body["metadata"]["pagination"]["has_next"], false);
    assert_eq!(body["metadata"]["pagination"]["has_previous"], true);

    let (_, body) = send(&app, "GET", "/api/v1/patients?mrn=MRN-7002", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_triage_queue_and_transitions() {
    let app = app();
    let patient_id = register_patient(&app, "MRN-7001", "Doe").await;

    let (status, triage) = send(
        &app,
        "POST",
        "/api/v1/emergency/triage",
        Some(json!({
            "patient_id": patient_id,
            "chief_complaint": "Shortness of breath",
            "triage_level": 2,
            "triage_nurse": "Nurse Joy"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", triage);
    assert_eq!(triage["data"]["triage_status"], "WAITING");
    let status_uri = format!("/api/v1/emergency/triage/{}/status", id(&triage));

    let (_, queue) = send(&app, "GET", "/api/v1/emergency/queue", None).await;
    assert_eq!(queue["data"].as_array().unwrap().len(), 1);

    let (status, body) = send(&app, "PUT", &status_uri, Some(json!({ "status": "COMPLETED" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "ED_5001");

    let (status, _) = send(
        &app,
        "PUT",
        &status_uri,
        Some(json!({ "status": "ASSIGNED", "assigned_doctor": "Dr. Grey" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, summary) = send(&app, "GET", "/api/v1/emergency/summary", None).await;
    assert_eq!(summary["data"]["total_arrivals"], 1);

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/emergency/triage",
        Some(json!({
            "patient_id": patient_id,
            "chief_complaint": "Headache",
            "triage_level": 6,
            "triage_nurse": "Nurse Joy"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
