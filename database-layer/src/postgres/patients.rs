use super::PgTransaction;
use crate::error::{DatabaseError, DatabaseResult};
use crate::models::Patient;
use crate::store::PatientRows;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
impl PatientRows for PgTransaction {
    async fn insert_patient(&mut self, patient: &Patient) -> DatabaseResult<()> {
        sqlx::query(
            r#"
            INSERT INTO patients (
                id, medical_record_number, first_name, last_name, date_of_birth, gender,
                phone, email, address, blood_group,
                emergency_contact_name, emergency_contact_phone, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(patient.id)
        .bind(&patient.medical_record_number)
        .bind(&patient.first_name)
        .bind(&patient.last_name)
        .bind(patient.date_of_birth)
        .bind(patient.gender)
        .bind(&patient.phone)
        .bind(&patient.email)
        .bind(&patient.address)
        .bind(&patient.blood_group)
        .bind(&patient.emergency_contact_name)
        .bind(&patient.emergency_contact_phone)
        .bind(patient.created_at)
        .execute(&mut *self.tx)
        .await
        .map_err(DatabaseError::from_sqlx)?;
        Ok(())
    }

    async fn patient(&mut self, id: Uuid) -> DatabaseResult<Option<Patient>> {
        sqlx::query_as::<_, Patient>("SELECT * FROM patients WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(DatabaseError::from_sqlx)
    }

    async fn patient_by_mrn(&mut self, mrn: &str) -> DatabaseResult<Option<Patient>> {
        sqlx::query_as::<_, Patient>("SELECT * FROM patients WHERE medical_record_number = $1")
            .bind(mrn)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(DatabaseError::from_sqlx)
    }

    async fn list_patients(&mut self, limit: i64, offset: i64) -> DatabaseResult<Vec<Patient>> {
        sqlx::query_as::<_, Patient>(
            r#"
            SELECT * FROM patients
            ORDER BY last_name, first_name, id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(DatabaseError::from_sqlx)
    }
}
