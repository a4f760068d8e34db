use chrono::{Duration, NaiveDate, Utc};
use database_layer::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

fn patient(mrn: &str) -> Patient {
    Patient {
        id: Uuid::new_v4(),
        medical_record_number: mrn.to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1985, 12, 10).unwrap(),
        gender: Gender::Female,
        phone: None,
        email: None,
        address: None,
        blood_group: None,
        emergency_contact_name: None,
        emergency_contact_phone: None,
        created_at: Utc::now(),
    }
}

struct Ward {
    department: Department,
    room: Room,
    beds: Vec<Bed>,
}

async fn seed_ward(db: &InMemoryHospitalDatabase, beds: usize) -> Ward {
    let now = Utc::now();
    let department = Department {
        id: Uuid::new_v4(),
        name: "General Medicine".to_string(),
        location: None,
        created_at: now,
    };
    let room = Room {
        id: Uuid::new_v4(),
        department_id: department.id,
        room_number: "101".to_string(),
        room_type: RoomType::General,
        daily_rate: Decimal::new(15000, 2),
        created_at: now,
    };
    let beds: Vec<Bed> = (0..beds)
        .map(|n| Bed {
            id: Uuid::new_v4(),
            room_id: room.id,
            bed_number: format!("B{}", n + 1),
            bed_status: BedStatus::Available,
            current_patient_id: None,
            updated_at: now,
        })
        .collect();

    let mut tx = db.begin().await.unwrap();
    tx.insert_department(&department).await.unwrap();
    tx.insert_room(&room).await.unwrap();
    for bed in &beds {
        tx.insert_bed(bed).await.unwrap();
    }
    tx.commit().await.unwrap();

    Ward {
        department,
        room,
        beds,
    }
}

fn admission(patient: &Patient, ward: &Ward, bed: &Bed) -> Admission {
    let now = Utc::now();
    Admission {
        id: Uuid::new_v4(),
        patient_id: patient.id,
        department_id: ward.department.id,
        room_id: ward.room.id,
        bed_id: bed.id,
        attending_doctor: "Dr. Grey".to_string(),
        admission_type: AdmissionType::Elective,
        admission_reason: "Observation".to_string(),
        diagnosis: None,
        admission_date: now,
        discharge_date: None,
        admission_status: AdmissionStatus::Admitted,
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn test_duplicate_mrn_is_a_constraint_violation() {
    let db = InMemoryHospitalDatabase::new();
    let mut tx = db.begin().await.unwrap();
    tx.insert_patient(&patient("MRN-0001")).await.unwrap();

    let err = tx.insert_patient(&patient("MRN-0001")).await.unwrap_err();
    assert!(matches!(err, DatabaseError::ConstraintViolation(_)));
}

#[tokio::test]
async fn test_occupy_bed_only_from_available() {
    let db = InMemoryHospitalDatabase::new();
    let ward = seed_ward(&db, 1).await;
    let first = patient("MRN-0001");
    let second = patient("MRN-0002");
    let bed_id = ward.beds[0].id;

    let mut tx = db.begin().await.unwrap();
    tx.insert_patient(&first).await.unwrap();
    tx.insert_patient(&second).await.unwrap();
    assert_eq!(tx.occupy_bed(bed_id, first.id, Utc::now()).await.unwrap(), 1);
    assert_eq!(tx.occupy_bed(bed_id, second.id, Utc::now()).await.unwrap(), 0);

    let bed = tx.bed(bed_id).await.unwrap().unwrap();
    assert_eq!(bed.bed_status, BedStatus::Occupied);
    assert_eq!(bed.current_patient_id, Some(first.id));

    // housekeeping changes are refused while the bed is occupied
    assert_eq!(
        tx.set_bed_status(bed_id, BedStatus::Cleaning, Utc::now()).await.unwrap(),
        0
    );
    assert_eq!(tx.release_bed(bed_id, Utc::now()).await.unwrap(), 1);
    let bed = tx.bed(bed_id).await.unwrap().unwrap();
    assert_eq!(bed.bed_status, BedStatus::Available);
    assert_eq!(bed.current_patient_id, None);
}

#[tokio::test]
async fn test_patient_cannot_hold_two_beds() {
    let db = InMemoryHospitalDatabase::new();
    let ward = seed_ward(&db, 2).await;
    let p = patient("MRN-0001");

    let mut tx = db.begin().await.unwrap();
    tx.insert_patient(&p).await.unwrap();
    tx.occupy_bed(ward.beds[0].id, p.id, Utc::now()).await.unwrap();
    let err = tx
        .occupy_bed(ward.beds[1].id, p.id, Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::ConstraintViolation(_)));
}

#[tokio::test]
async fn test_one_open_admission_per_patient() {
    let db = InMemoryHospitalDatabase::new();
    let ward = seed_ward(&db, 2).await;
    let p = patient("MRN-0001");

    let mut tx = db.begin().await.unwrap();
    tx.insert_patient(&p).await.unwrap();
    tx.insert_admission(&admission(&p, &ward, &ward.beds[0]))
        .await
        .unwrap();
    let err = tx
        .insert_admission(&admission(&p, &ward, &ward.beds[1]))
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::ConstraintViolation(_)));
}

#[tokio::test]
async fn test_discharge_plan_upsert_keeps_one_row() {
    let db = InMemoryHospitalDatabase::new();
    let ward = seed_ward(&db, 1).await;
    let p = patient("MRN-0001");
    let adm = admission(&p, &ward, &ward.beds[0]);
    let now = Utc::now();

    let mut tx = db.begin().await.unwrap();
    tx.insert_patient(&p).await.unwrap();
    tx.insert_admission(&adm).await.unwrap();

    let first = DischargePlan {
        id: Uuid::new_v4(),
        admission_id: adm.id,
        discharge_summary: "Stable".to_string(),
        follow_up_instructions: None,
        follow_up_date: None,
        discharge_medications: None,
        discharge_disposition: DischargeDisposition::Home,
        created_at: now,
        updated_at: now,
    };
    let stored = tx.upsert_discharge_plan(&first).await.unwrap();
    assert_eq!(stored.id, first.id);

    let revised = DischargePlan {
        id: Uuid::new_v4(),
        discharge_summary: "Stable, walking unaided".to_string(),
        discharge_disposition: DischargeDisposition::HomeWithCare,
        ..first.clone()
    };
    let stored = tx.upsert_discharge_plan(&revised).await.unwrap();
    assert_eq!(stored.id, first.id);
    assert_eq!(stored.discharge_summary, "Stable, walking unaided");
    assert_eq!(stored.discharge_disposition, DischargeDisposition::HomeWithCare);
    tx.commit().await.unwrap();

    assert_eq!(db.snapshot().await.discharge_plans.len(), 1);
}

#[tokio::test]
async fn test_active_triage_orders_by_level_then_arrival() {
    let db = InMemoryHospitalDatabase::new();
    let p = patient("MRN-0001");
    let base = Utc::now() - Duration::hours(1);
    let record = |level: i32, minutes: i64, status: TriageStatus| TriageRecord {
        id: Uuid::new_v4(),
        patient_id: p.id,
        chief_complaint: "Chest pain".to_string(),
        triage_level: level,
        triage_nurse: "Nurse Joy".to_string(),
        assigned_doctor: None,
        triage_status: status,
        arrival_time: base + Duration::minutes(minutes),
        start_time: None,
        end_time: None,
        notes: None,
    };
    let late_urgent = record(2, 30, TriageStatus::Waiting);
    let early_urgent = record(2, 10, TriageStatus::Waiting);
    let critical = record(1, 40, TriageStatus::Waiting);
    let done = record(1, 0, TriageStatus::Completed);

    let mut tx = db.begin().await.unwrap();
    tx.insert_patient(&p).await.unwrap();
    for r in [&late_urgent, &early_urgent, &critical, &done] {
        tx.insert_triage(r).await.unwrap();
    }
    let queue: Vec<Uuid> = tx
        .active_triage()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(queue, vec![critical.id, early_urgent.id, late_urgent.id]);

    let bad = record(6, 0, TriageStatus::Waiting);
    assert!(tx.insert_triage(&bad).await.is_err());
}

#[tokio::test]
async fn test_bed_availability_filters_by_status() {
    let db = InMemoryHospitalDatabase::new();
    let ward = seed_ward(&db, 3).await;

    let mut tx = db.begin().await.unwrap();
    tx.set_bed_status(ward.beds[2].id, BedStatus::Maintenance, Utc::now())
        .await
        .unwrap();
    let available = tx
        .bed_availability(&BedFilter {
            department_id: Some(ward.department.id),
            status: Some(BedStatus::Available),
        })
        .await
        .unwrap();
    let numbers: Vec<&str> = available.iter().map(|b| b.bed_number.as_str()).collect();
    assert_eq!(numbers, vec!["B1", "B2"]);
    assert!(available.iter().all(|b| b.department_name == "General Medicine"));
}
