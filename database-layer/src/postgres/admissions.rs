use super::PgTransaction;
use crate::error::{DatabaseError, DatabaseResult};
use crate::models::{Admission, AdmissionFilter, DischargePlan, PatientTransfer};
use crate::status::AdmissionStatus;
use crate::store::AdmissionRows;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
impl AdmissionRows for PgTransaction {
    async fn insert_admission(&mut self, admission: &Admission) -> DatabaseResult<()> {
        sqlx::query(
            r#"
            INSERT INTO patient_admissions (
                id, patient_id, department_id, room_id, bed_id, attending_doctor,
                admission_type, admission_reason, diagnosis, admission_date,
                discharge_date, admission_status, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(admission.id)
        .bind(admission.patient_id)
        .bind(admission.department_id)
        .bind(admission.room_id)
        .bind(admission.bed_id)
        .bind(&admission.attending_doctor)
        .bind(admission.admission_type)
        .bind(&admission.admission_reason)
        .bind(&admission.diagnosis)
        .bind(admission.admission_date)
        .bind(admission.discharge_date)
        .bind(admission.admission_status)
        .bind(admission.created_at)
        .bind(admission.updated_at)
        .execute(&mut *self.tx)
        .await
        .map_err(DatabaseError::from_sqlx)?;
        Ok(())
    }

    async fn admission(&mut self, id: Uuid) -> DatabaseResult<Option<Admission>> {
        sqlx::query_as::<_, Admission>("SELECT * FROM patient_admissions WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(DatabaseError::from_sqlx)
    }

    async fn open_admission_for_patient(
        &mut self,
        patient_id: Uuid,
    ) -> DatabaseResult<Option<Admission>> {
        sqlx::query_as::<_, Admission>(
            "SELECT * FROM patient_admissions WHERE patient_id = $1 AND admission_status = $2",
        )
        .bind(patient_id)
        .bind(AdmissionStatus::Admitted)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(DatabaseError::from_sqlx)
    }

    async fn update_admission(&mut self, admission: &Admission) -> DatabaseResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE patient_admissions
            SET department_id = $2, room_id = $3, bed_id = $4, diagnosis = $5,
                discharge_date = $6, admission_status = $7, updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(admission.id)
        .bind(admission.department_id)
        .bind(admission.room_id)
        .bind(admission.bed_id)
        .bind(&admission.diagnosis)
        .bind(admission.discharge_date)
        .bind(admission.admission_status)
        .bind(admission.updated_at)
        .execute(&mut *self.tx)
        .await
        .map_err(DatabaseError::from_sqlx)?;
        Ok(result.rows_affected())
    }

    async fn list_admissions(
        &mut self,
        filter: &AdmissionFilter,
    ) -> DatabaseResult<Vec<Admission>> {
        sqlx::query_as::<_, Admission>(
            r#"
            SELECT * FROM patient_admissions
            WHERE ($1::text IS NULL OR admission_status = $1)
              AND ($2::uuid IS NULL OR department_id = $2)
              AND ($3::uuid IS NULL OR patient_id = $3)
            ORDER BY admission_date DESC
            "#,
        )
        .bind(filter.status)
        .bind(filter.department_id)
        .bind(filter.patient_id)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(DatabaseError::from_sqlx)
    }

    async fn upsert_discharge_plan(
        &mut self,
        plan: &DischargePlan,
    ) -> DatabaseResult<DischargePlan> {
        sqlx::query_as::<_, DischargePlan>(
            r#"
            INSERT INTO discharge_plans (
                id, admission_id, discharge_summary, follow_up_instructions,
                follow_up_date, discharge_medications, discharge_disposition,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (admission_id) DO UPDATE
            SET discharge_summary = EXCLUDED.discharge_summary,
                follow_up_instructions = EXCLUDED.follow_up_instructions,
                follow_up_date = EXCLUDED.follow_up_date,
                discharge_medications = EXCLUDED.discharge_medications,
                discharge_disposition = EXCLUDED.discharge_disposition,
                updated_at = EXCLUDED.updated_at
            RETURNING *
            "#,
        )
        .bind(plan.id)
        .bind(plan.admission_id)
        .bind(&plan.discharge_summary)
        .bind(&plan.follow_up_instructions)
        .bind(plan.follow_up_date)
        .bind(&plan.discharge_medications)
        .bind(plan.discharge_disposition)
        .bind(plan.created_at)
        .bind(plan.updated_at)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(DatabaseError::from_sqlx)
    }

    async fn discharge_plan(
        &mut self,
        admission_id: Uuid,
    ) -> DatabaseResult<Option<DischargePlan>> {
        sqlx::query_as::<_, DischargePlan>("SELECT * FROM discharge_plans WHERE admission_id = $1")
            .bind(admission_id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(DatabaseError::from_sqlx)
    }

    async fn insert_transfer(&mut self, transfer: &PatientTransfer) -> DatabaseResult<()> {
        sqlx::query(
            r#"
            INSERT INTO patient_transfers (
                id, admission_id, from_department_id, from_room_id, from_bed_id,
                to_department_id, to_room_id, to_bed_id, reason, transferred_by, transferred_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(transfer.id)
        .bind(transfer.admission_id)
        .bind(transfer.from_department_id)
        .bind(transfer.from_room_id)
        .bind(transfer.from_bed_id)
        .bind(transfer.to_department_id)
        .bind(transfer.to_room_id)
        .bind(transfer.to_bed_id)
        .bind(&transfer.reason)
        .bind(&transfer.transferred_by)
        .bind(transfer.transferred_at)
        .execute(&mut *self.tx)
        .await
        .map_err(DatabaseError::from_sqlx)?;
        Ok(())
    }

    async fn transfers(&mut self, admission_id: Uuid) -> DatabaseResult<Vec<PatientTransfer>> {
        sqlx::query_as::<_, PatientTransfer>(
            "SELECT * FROM patient_transfers WHERE admission_id = $1 ORDER BY transferred_at",
        )
        .bind(admission_id)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(DatabaseError::from_sqlx)
    }
}
