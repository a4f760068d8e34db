use super::PgTransaction;
use crate::error::{DatabaseError, DatabaseResult};
use crate::models::TriageRecord;
use crate::status::TriageStatus;
use crate::store::TriageRows;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[async_trait]
impl TriageRows for PgTransaction {
    async fn insert_triage(&mut self, record: &TriageRecord) -> DatabaseResult<()> {
        sqlx::query(
            r#"
            INSERT INTO emergency_triage (
                id, patient_id, chief_complaint, triage_level, triage_nurse,
                assigned_doctor, triage_status, arrival_time, start_time, end_time, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(record.id)
        .bind(record.patient_id)
        .bind(&record.chief_complaint)
        .bind(record.triage_level)
        .bind(&record.triage_nurse)
        .bind(&record.assigned_doctor)
        .bind(record.triage_status)
        .bind(record.arrival_time)
        .bind(record.start_time)
        .bind(record.end_time)
        .bind(&record.notes)
        .execute(&mut *self.tx)
        .await
        .map_err(DatabaseError::from_sqlx)?;
        Ok(())
    }

    async fn triage(&mut self, id: Uuid) -> DatabaseResult<Option<TriageRecord>> {
        sqlx::query_as::<_, TriageRecord>("SELECT * FROM emergency_triage WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(DatabaseError::from_sqlx)
    }

    async fn update_triage(&mut self, record: &TriageRecord) -> DatabaseResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE emergency_triage
            SET assigned_doctor = $2, triage_status = $3, start_time = $4,
                end_time = $5, notes = $6
            WHERE id = $1
            "#,
        )
        .bind(record.id)
        .bind(&record.assigned_doctor)
        .bind(record.triage_status)
        .bind(record.start_time)
        .bind(record.end_time)
        .bind(&record.notes)
        .execute(&mut *self.tx)
        .await
        .map_err(DatabaseError::from_sqlx)?;
        Ok(result.rows_affected())
    }

    async fn active_triage(&mut self) -> DatabaseResult<Vec<TriageRecord>> {
        sqlx::query_as::<_, TriageRecord>(
            r#"
            SELECT * FROM emergency_triage
            WHERE triage_status IN ($1, $2, $3)
            ORDER BY triage_level, arrival_time
            "#,
        )
        .bind(TriageStatus::Waiting)
        .bind(TriageStatus::Assigned)
        .bind(TriageStatus::InProgress)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(DatabaseError::from_sqlx)
    }

    async fn triage_since(&mut self, since: DateTime<Utc>) -> DatabaseResult<Vec<TriageRecord>> {
        sqlx::query_as::<_, TriageRecord>(
            "SELECT * FROM emergency_triage WHERE arrival_time >= $1 ORDER BY arrival_time",
        )
        .bind(since)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(DatabaseError::from_sqlx)
    }
}
