use chrono::{NaiveDate, Utc};
use database_layer::prelude::*;
use emergency_service::*;
use std::sync::Arc;
use uuid::Uuid;

async fn seed_patient(db: &InMemoryHospitalDatabase) -> Uuid {
    let patient = Patient {
        id: Uuid::new_v4(),
        medical_record_number: format!("MRN-{}", Uuid::new_v4().simple()),
        first_name: "Alan".to_string(),
        last_name: "Turing".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1954, 6, 7).unwrap(),
        gender: Gender::Male,
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

fn setup() -> (InMemoryHospitalDatabase, EmergencyService) {
    let db = InMemoryHospitalDatabase::new();
    let service = EmergencyService::new(Arc::new(db.clone()));
    (db, service)
}

fn triage(patient_id: Uuid, level: i32) -> RegisterTriageRequest {
    RegisterTriageRequest {
        patient_id,
        chief_complaint: "Chest pain".to_string(),
        triage_level: level,
        triage_nurse: "Nurse Joy".to_string(),
        notes: None,
    }
}

fn to(status: TriageStatus) -> UpdateTriageStatus {
    UpdateTriageStatus {
        status,
        assigned_doctor: None,
        notes: None,
    }
}

#[tokio::test]
async fn test_full_triage_flow_stamps_times() {
    let (db, service) = setup();
    let patient_id = seed_patient(&db).await;

    let record = service.register_triage(triage(patient_id, 2)).await.unwrap();
    assert_eq!(record.triage_status, TriageStatus::Waiting);
    assert!(record.start_time.is_none() && record.end_time.is_none());

    let missing_doctor = service
        .update_triage_status(record.id, to(TriageStatus::Assigned))
        .await
        .unwrap_err();
    assert!(matches!(missing_doctor, EmergencyError::Validation(_)));

    let assigned = service
        .update_triage_status(
            record.id,
            UpdateTriageStatus {
                assigned_doctor: Some("Dr. Quinn".to_string()),
                ..to(TriageStatus::Assigned)
            },
        )
        .await
        .unwrap();
    assert_eq!(assigned.assigned_doctor.as_deref(), Some("Dr. Quinn"));

    let started = service
        .update_triage_status(record.id, to(TriageStatus::InProgress))
        .await
        .unwrap();
    assert!(started.start_time.is_some());
    assert!(started.end_time.is_none());

    let done = service
        .update_triage_status(
            record.id,
            UpdateTriageStatus {
                notes: Some("Discharged with GP follow-up".to_string()),
                ..to(TriageStatus::Completed)
            },
        )
        .await
        .unwrap();
    assert!(done.end_time.is_some());
    assert_eq!(done.notes.as_deref(), Some("Discharged with GP follow-up"));

    let stored = service.get_triage(record.id).await.unwrap();
    assert_eq!(stored.triage_status, TriageStatus::Completed);
}

#[tokio::test]
async fn test_invalid_transition_leaves_record_unchanged() {
    let (db, service) = setup();
    let patient_id = seed_patient(&db).await;
    let record = service.register_triage(triage(patient_id, 3)).await.unwrap();

    let err = service
        .update_triage_status(record.id, to(TriageStatus::Completed))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EmergencyError::InvalidTransition {
            from: TriageStatus::Waiting,
            to: TriageStatus::Completed,
        }
    ));
    let stored = service.get_triage(record.id).await.unwrap();
    assert_eq!(stored.triage_status, TriageStatus::Waiting);
    assert!(stored.end_time.is_none());
}

#[tokio::test]
async fn test_left_without_being_seen_ends_the_visit() {
    let (db, service) = setup();
    let patient_id = seed_patient(&db).await;
    let record = service.register_triage(triage(patient_id, 5)).await.unwrap();

    let left = service
        .update_triage_status(record.id, to(TriageStatus::LeftWithoutBeingSeen))
        .await
        .unwrap();
    assert!(left.end_time.is_some());
    assert!(left.start_time.is_none());
    assert!(service.waiting_queue().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_queue_and_summary() {
    let (db, service) = setup();
    let patient_id = seed_patient(&db).await;

    let minor = service.register_triage(triage(patient_id, 4)).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    let critical = service.register_triage(triage(patient_id, 1)).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    let second_minor = service.register_triage(triage(patient_id, 4)).await.unwrap();

    let queue: Vec<Uuid> = service
        .waiting_queue()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(queue, vec![critical.id, minor.id, second_minor.id]);

    let summary = service
        .department_summary(SummaryQuery {
            since: Some(Utc::now() - chrono::Duration::hours(1)),
        })
        .await
        .unwrap();
    assert_eq!(summary.total_arrivals, 3);
    assert_eq!(summary.count(TriageStatus::Waiting), 3);
    let levels: Vec<usize> = summary.by_level.iter().map(|l| l.count).collect();
    assert_eq!(levels, vec![1, 0, 0, 2, 0]);
}

#[tokio::test]
async fn test_unknown_patient_and_record() {
    let (_db, service) = setup();
    let err = service
        .register_triage(triage(Uuid::new_v4(), 2))
        .await
        .unwrap_err();
    assert!(matches!(err, EmergencyError::PatientNotFound(_)));

    let err = service.get_triage(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, EmergencyError::TriageNotFound(_)));
}
