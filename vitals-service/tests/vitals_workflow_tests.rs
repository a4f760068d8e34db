use chrono::{NaiveDate, Utc};
use database_layer::prelude::*;
use std::sync::Arc;
use uuid::Uuid;
use vitals_service::*;

async fn seed_patient(db: &InMemoryHospitalDatabase, mrn: &str) -> Uuid {
    let patient = Patient {
        id: Uuid::new_v4(),
        medical_record_number: mrn.to_string(),
        first_name: "Florence".to_string(),
        last_name: "Nightingale".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1970, 5, 12).unwrap(),
        gender: Gender::Female,
        phone: None,
        email: None,
        address: None,
        blood_group: None,
        emergency_contact_name: None,
        emergency_contact_phone: None,
        created_at: Utc::now(),
    };
    let mut tx = db.begin().await.unwrap();
    tx.insert_patient(&patient).await.unwrap();
    tx.commit().await.unwrap();
    patient.id
}

fn setup() -> (InMemoryHospitalDatabase, VitalsService) {
    let db = InMemoryHospitalDatabase::new();
    let service = VitalsService::new(Arc::new(db.clone()));
    (db, service)
}

#[tokio::test]
async fn test_bmi_is_derived_when_height_and_weight_present() {
    let (db, service) = setup();
    let patient_id = seed_patient(&db, "MRN-2001").await;

    let vitals = service
        .record_vital_signs(RecordVitalsRequest {
            patient_id,
            height_cm: Some(180.0),
            weight_kg: Some(81.0),
            heart_rate: Some(70),
            recorded_by: "Nurse Joy".to_string(),
            ..RecordVitalsRequest::default()
        })
        .await
        .unwrap();
    assert_eq!(vitals.bmi, Some(25.0));

    let weight_only = service
        .record_vital_signs(RecordVitalsRequest {
            patient_id,
            weight_kg: Some(81.0),
            recorded_by: "Nurse Joy".to_string(),
            ..RecordVitalsRequest::default()
        })
        .await
        .unwrap();
    assert_eq!(weight_only.bmi, None);
}

#[tokio::test]
async fn test_abnormal_check_reports_findings() {
    let (db, service) = setup();
    let patient_id = seed_patient(&db, "MRN-2001").await;

    let febrile = service
        .record_vital_signs(RecordVitalsRequest {
            patient_id,
            temperature_c: Some(38.6),
            respiratory_rate: Some(24),
            oxygen_saturation: Some(97),
            recorded_by: "Nurse Joy".to_string(),
            ..RecordVitalsRequest::default()
        })
        .await
        .unwrap();

    let assessment = service
        .check_abnormal_vitals(febrile.id)
        .await
        .unwrap()
        .unwrap();
    assert!(!assessment.is_normal());
    assert_eq!(
        assessment.summary,
        "High temperature: 38.6 °C; High respiratory rate: 24 /min"
    );

    let normal = service
        .record_vital_signs(RecordVitalsRequest {
            patient_id,
            temperature_c: Some(36.9),
            systolic_bp: Some(118),
            diastolic_bp: Some(76),
            recorded_by: "Nurse Joy".to_string(),
            ..RecordVitalsRequest::default()
        })
        .await
        .unwrap();
    let assessment = service
        .check_abnormal_vitals(normal.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(assessment.summary, "Normal");
}

#[tokio::test]
async fn test_missing_reading_is_none() {
    let (_db, service) = setup();
    assert!(service
        .check_abnormal_vitals(Uuid::new_v4())
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_unknown_patient_is_not_found() {
    let (_db, service) = setup();
    let err = service
        .record_vital_signs(RecordVitalsRequest {
            patient_id: Uuid::new_v4(),
            heart_rate: Some(80),
            recorded_by: "Nurse Joy".to_string(),
            ..RecordVitalsRequest::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, VitalsError::PatientNotFound(_)));
}

#[tokio::test]
async fn test_history_is_newest_first() {
    let (db, service) = setup();
    let patient_id = seed_patient(&db, "MRN-2001").await;

    let mut ids = Vec::new();
    for rate in [70, 75, 80] {
        let vitals = service
            .record_vital_signs(RecordVitalsRequest {
                patient_id,
                heart_rate: Some(rate),
                recorded_by: "Nurse Joy".to_string(),
                ..RecordVitalsRequest::default()
            })
            .await
            .unwrap();
        ids.push(vitals.id);
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    }

    let history = service.vital_history(patient_id, 2).await.unwrap();
    let rates: Vec<_> = history.iter().map(|v| v.heart_rate).collect();
    assert_eq!(rates, vec![Some(80), Some(75)]);

    let latest = service.latest_vitals(patient_id).await.unwrap().unwrap();
    assert_eq!(latest.id, ids[2]);

    assert!(matches!(
        service.vital_history(patient_id, 0).await,
        Err(VitalsError::Validation(_))
    ));
}
