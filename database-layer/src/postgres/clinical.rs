use super::PgTransaction;
use crate::error::{DatabaseError, DatabaseResult};
use crate::models::{MedicalRecord, VitalSigns};
use crate::store::ClinicalRows;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
impl ClinicalRows for PgTransaction {
    async fn insert_medical_record(&mut self, record: &MedicalRecord) -> DatabaseResult<()> {
        sqlx::query(
            r#"
            INSERT INTO medical_records (
                id, patient_id, admission_id, record_type, notes, recorded_by, recorded_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(record.id)
        .bind(record.patient_id)
        .bind(record.admission_id)
        .bind(record.record_type)
        .bind(&record.notes)
        .bind(&record.recorded_by)
        .bind(record.recorded_at)
        .execute(&mut *self.tx)
        .await
        .map_err(DatabaseError::from_sqlx)?;
        Ok(())
    }

    async fn medical_records(&mut self, patient_id: Uuid) -> DatabaseResult<Vec<MedicalRecord>> {
        sqlx::query_as::<_, MedicalRecord>(
            "SELECT * FROM medical_records WHERE patient_id = $1 ORDER BY recorded_at DESC",
        )
        .bind(patient_id)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(DatabaseError::from_sqlx)
    }

    async fn insert_vital_signs(&mut self, vitals: &VitalSigns) -> DatabaseResult<()> {
        sqlx::query(
            r#"
            INSERT INTO vital_signs (
                id, patient_id, admission_id, temperature_c, systolic_bp, diastolic_bp,
                heart_rate, respiratory_rate, oxygen_saturation, height_cm, weight_kg,
                bmi, notes, recorded_by, recorded_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(vitals.id)
        .bind(vitals.patient_id)
        .bind(vitals.admission_id)
        .bind(vitals.temperature_c)
        .bind(vitals.systolic_bp)
        .bind(vitals.diastolic_bp)
        .bind(vitals.heart_rate)
        .bind(vitals.respiratory_rate)
        .bind(vitals.oxygen_saturation)
        .bind(vitals.height_cm)
        .bind(vitals.weight_kg)
        .bind(vitals.bmi)
        .bind(&vitals.notes)
        .bind(&vitals.recorded_by)
        .bind(vitals.recorded_at)
        .execute(&mut *self.tx)
        .await
        .map_err(DatabaseError::from_sqlx)?;
        Ok(())
    }

    async fn vital_signs(&mut self, id: Uuid) -> DatabaseResult<Option<VitalSigns>> {
        sqlx::query_as::<_, VitalSigns>("SELECT * FROM vital_signs WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(DatabaseError::from_sqlx)
    }

    async fn vital_history(
        &mut self,
        patient_id: Uuid,
        limit: i64,
    ) -> DatabaseResult<Vec<VitalSigns>> {
        sqlx::query_as::<_, VitalSigns>(
            r#"
            SELECT * FROM vital_signs
            WHERE patient_id = $1
            ORDER BY recorded_at DESC
            LIMIT $2
            "#,
        )
        .bind(patient_id)
        .bind(limit)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(DatabaseError::from_sqlx)
    }
}
