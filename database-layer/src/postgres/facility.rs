use super::PgTransaction;
use crate::error::{DatabaseError, DatabaseResult};
use crate::models::{Bed, BedAvailability, BedFilter, Department, Room};
use crate::status::BedStatus;
use crate::store::FacilityRows;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[async_trait]
impl FacilityRows for PgTransaction {
    async fn insert_department(&mut self, department: &Department) -> DatabaseResult<()> {
        sqlx::query(
            "INSERT INTO departments (id, name, location, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(department.id)
        .bind(&department.name)
        .bind(&department.location)
        .bind(department.created_at)
        .execute(&mut *self.tx)
        .await
        .map_err(DatabaseError::from_sqlx)?;
        Ok(())
    }

    async fn department(&mut self, id: Uuid) -> DatabaseResult<Option<Department>> {
        sqlx::query_as::<_, Department>("SELECT * FROM departments WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(DatabaseError::from_sqlx)
    }

    async fn departments(&mut self) -> DatabaseResult<Vec<Department>> {
        sqlx::query_as::<_, Department>("SELECT * FROM departments ORDER BY name")
            .fetch_all(&mut *self.tx)
            .await
            .map_err(DatabaseError::from_sqlx)
    }

    async fn insert_room(&mut self, room: &Room) -> DatabaseResult<()> {
        sqlx::query(
            r#"
            INSERT INTO rooms (id, department_id, room_number, room_type, daily_rate, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(room.id)
        .bind(room.department_id)
        .bind(&room.room_number)
        .bind(room.room_type)
        .bind(room.daily_rate)
        .bind(room.created_at)
        .execute(&mut *self.tx)
        .await
        .map_err(DatabaseError::from_sqlx)?;
        Ok(())
    }

    async fn room(&mut self, id: Uuid) -> DatabaseResult<Option<Room>> {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(DatabaseError::from_sqlx)
    }

    async fn insert_bed(&mut self, bed: &Bed) -> DatabaseResult<()> {
        sqlx::query(
            r#"
            INSERT INTO beds (id, room_id, bed_number, bed_status, current_patient_id, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(bed.id)
        .bind(bed.room_id)
        .bind(&bed.bed_number)
        .bind(bed.bed_status)
        .bind(bed.current_patient_id)
        .bind(bed.updated_at)
        .execute(&mut *self.tx)
        .await
        .map_err(DatabaseError::from_sqlx)?;
        Ok(())
    }

    async fn bed(&mut self, id: Uuid) -> DatabaseResult<Option<Bed>> {
        sqlx::query_as::<_, Bed>("SELECT * FROM beds WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(DatabaseError::from_sqlx)
    }

    async fn occupy_bed(
        &mut self,
        bed_id: Uuid,
        patient_id: Uuid,
        at: DateTime<Utc>,
    ) -> DatabaseResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE beds
            SET bed_status = $2, current_patient_id = $3, updated_at = $4
            WHERE id = $1 AND bed_status = $5
            "#,
        )
        .bind(bed_id)
        .bind(BedStatus::Occupied)
        .bind(patient_id)
        .bind(at)
        .bind(BedStatus::Available)
        .execute(&mut *self.tx)
        .await
        .map_err(DatabaseError::from_sqlx)?;
        Ok(result.rows_affected())
    }

    async fn release_bed(&mut self, bed_id: Uuid, at: DateTime<Utc>) -> DatabaseResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE beds
            SET bed_status = $2, current_patient_id = NULL, updated_at = $3
            WHERE id = $1 AND bed_status = $4
            "#,
        )
        .bind(bed_id)
        .bind(BedStatus::Available)
        .bind(at)
        .bind(BedStatus::Occupied)
        .execute(&mut *self.tx)
        .await
        .map_err(DatabaseError::from_sqlx)?;
        Ok(result.rows_affected())
    }

    async fn set_bed_status(
        &mut self,
        bed_id: Uuid,
        status: BedStatus,
        at: DateTime<Utc>,
    ) -> DatabaseResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE beds
            SET bed_status = $2, updated_at = $3
            WHERE id = $1 AND bed_status <> $4
            "#,
        )
        .bind(bed_id)
        .bind(status)
        .bind(at)
        .bind(BedStatus::Occupied)
        .execute(&mut *self.tx)
        .await
        .map_err(DatabaseError::from_sqlx)?;
        Ok(result.rows_affected())
    }

    async fn bed_availability(
        &mut self,
        filter: &BedFilter,
    ) -> DatabaseResult<Vec<BedAvailability>> {
        sqlx::query_as::<_, BedAvailability>(
            r#"
            SELECT * FROM bed_availability
            WHERE ($1::uuid IS NULL OR department_id = $1)
              AND ($2::text IS NULL OR bed_status = $2)
            ORDER BY department_name, room_number, bed_number
            "#,
        )
        .bind(filter.department_id)
        .bind(filter.status)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(DatabaseError::from_sqlx)
    }
}
