use super::PgTransaction;
use crate::error::{DatabaseError, DatabaseResult};
use crate::models::{Bill, BillItem, InsuranceClaim, LabOrder, MedicationOrder, Payment};
use crate::status::BillStatus;
use crate::store::BillingRows;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
impl BillingRows for PgTransaction {
    async fn insert_medication_order(&mut self, order: &MedicationOrder) -> DatabaseResult<()> {
        sqlx::query(
            r#"
            INSERT INTO medication_orders (
                id, admission_id, medication_name, dosage, quantity, unit_price,
                ordered_by, ordered_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(order.id)
        .bind(order.admission_id)
        .bind(&order.medication_name)
        .bind(&order.dosage)
        .bind(order.quantity)
        .bind(order.unit_price)
        .bind(&order.ordered_by)
        .bind(order.ordered_at)
        .execute(&mut *self.tx)
        .await
        .map_err(DatabaseError::from_sqlx)?;
        Ok(())
    }

    async fn medication_orders(
        &mut self,
        admission_id: Uuid,
    ) -> DatabaseResult<Vec<MedicationOrder>> {
        sqlx::query_as::<_, MedicationOrder>(
            "SELECT * FROM medication_orders WHERE admission_id = $1 ORDER BY ordered_at",
        )
        .bind(admission_id)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(DatabaseError::from_sqlx)
    }

    async fn insert_lab_order(&mut self, order: &LabOrder) -> DatabaseResult<()> {
        sqlx::query(
            r#"
            INSERT INTO lab_orders (id, admission_id, test_name, price, ordered_by, ordered_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(order.id)
        .bind(order.admission_id)
        .bind(&order.test_name)
        .bind(order.price)
        .bind(&order.ordered_by)
        .bind(order.ordered_at)
        .execute(&mut *self.tx)
        .await
        .map_err(DatabaseError::from_sqlx)?;
        Ok(())
    }

    async fn lab_orders(&mut self, admission_id: Uuid) -> DatabaseResult<Vec<LabOrder>> {
        sqlx::query_as::<_, LabOrder>(
            "SELECT * FROM lab_orders WHERE admission_id = $1 ORDER BY ordered_at",
        )
        .bind(admission_id)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(DatabaseError::from_sqlx)
    }

    async fn insert_bill(&mut self, bill: &Bill) -> DatabaseResult<()> {
        sqlx::query(
            r#"
            INSERT INTO billing (
                id, bill_number, patient_id, admission_id, bill_date, total_amount,
                amount_paid, bill_status, generated_by, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(bill.id)
        .bind(&bill.bill_number)
        .bind(bill.patient_id)
        .bind(bill.admission_id)
        .bind(bill.bill_date)
        .bind(bill.total_amount)
        .bind(bill.amount_paid)
        .bind(bill.bill_status)
        .bind(&bill.generated_by)
        .bind(bill.created_at)
        .bind(bill.updated_at)
        .execute(&mut *self.tx)
        .await
        .map_err(DatabaseError::from_sqlx)?;
        Ok(())
    }

    async fn bill(&mut self, id: Uuid) -> DatabaseResult<Option<Bill>> {
        sqlx::query_as::<_, Bill>("SELECT * FROM billing WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(DatabaseError::from_sqlx)
    }

    async fn bill_for_admission(&mut self, admission_id: Uuid) -> DatabaseResult<Option<Bill>> {
        sqlx::query_as::<_, Bill>("SELECT * FROM billing WHERE admission_id = $1")
            .bind(admission_id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(DatabaseError::from_sqlx)
    }

    async fn update_bill(&mut self, bill: &Bill) -> DatabaseResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE billing
            SET total_amount = $2, amount_paid = $3, bill_status = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(bill.id)
        .bind(bill.total_amount)
        .bind(bill.amount_paid)
        .bind(bill.bill_status)
        .bind(bill.updated_at)
        .execute(&mut *self.tx)
        .await
        .map_err(DatabaseError::from_sqlx)?;
        Ok(result.rows_affected())
    }

    async fn outstanding_bills(&mut self, patient_id: Option<Uuid>) -> DatabaseResult<Vec<Bill>> {
        sqlx::query_as::<_, Bill>(
            r#"
            SELECT * FROM billing
            WHERE bill_status IN ($1, $2)
              AND ($3::uuid IS NULL OR patient_id = $3)
            ORDER BY bill_date
            "#,
        )
        .bind(BillStatus::Pending)
        .bind(BillStatus::PartiallyPaid)
        .bind(patient_id)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(DatabaseError::from_sqlx)
    }

    async fn insert_bill_item(&mut self, item: &BillItem) -> DatabaseResult<()> {
        sqlx::query(
            r#"
            INSERT INTO billing_items (id, bill_id, item_type, description, quantity, unit_price, amount)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(item.id)
        .bind(item.bill_id)
        .bind(item.item_type)
        .bind(&item.description)
        .bind(item.quantity)
        .bind(item.unit_price)
        .bind(item.amount)
        .execute(&mut *self.tx)
        .await
        .map_err(DatabaseError::from_sqlx)?;
        Ok(())
    }

    async fn bill_items(&mut self, bill_id: Uuid) -> DatabaseResult<Vec<BillItem>> {
        // items are written in presentation order: room, medications, labs
        sqlx::query_as::<_, BillItem>(
            r#"
            SELECT * FROM billing_items
            WHERE bill_id = $1
            ORDER BY CASE item_type WHEN 'ROOM' THEN 0 WHEN 'MEDICATION' THEN 1 ELSE 2 END, description
            "#,
        )
        .bind(bill_id)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(DatabaseError::from_sqlx)
    }

    async fn insert_payment(&mut self, payment: &Payment) -> DatabaseResult<()> {
        sqlx::query(
            r#"
            INSERT INTO payments (
                id, bill_id, amount, payment_method, reference_number, received_by, payment_date
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(payment.id)
        .bind(payment.bill_id)
        .bind(payment.amount)
        .bind(payment.payment_method)
        .bind(&payment.reference_number)
        .bind(&payment.received_by)
        .bind(payment.payment_date)
        .execute(&mut *self.tx)
        .await
        .map_err(DatabaseError::from_sqlx)?;
        Ok(())
    }

    async fn payments(&mut self, bill_id: Uuid) -> DatabaseResult<Vec<Payment>> {
        sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE bill_id = $1 ORDER BY payment_date",
        )
        .bind(bill_id)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(DatabaseError::from_sqlx)
    }

    async fn insert_claim(&mut self, claim: &InsuranceClaim) -> DatabaseResult<()> {
        sqlx::query(
            r#"
            INSERT INTO insurance_claim_details (
                id, bill_id, insurance_provider, policy_number, claim_amount,
                coverage_percent, insurance_amount, patient_amount, claim_status,
                submitted_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(claim.id)
        .bind(claim.bill_id)
        .bind(&claim.insurance_provider)
        .bind(&claim.policy_number)
        .bind(claim.claim_amount)
        .bind(claim.coverage_percent)
        .bind(claim.insurance_amount)
        .bind(claim.patient_amount)
        .bind(claim.claim_status)
        .bind(claim.submitted_at)
        .bind(claim.updated_at)
        .execute(&mut *self.tx)
        .await
        .map_err(DatabaseError::from_sqlx)?;
        Ok(())
    }

    async fn claim(&mut self, id: Uuid) -> DatabaseResult<Option<InsuranceClaim>> {
        sqlx::query_as::<_, InsuranceClaim>("SELECT * FROM insurance_claim_details WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(DatabaseError::from_sqlx)
    }

    async fn update_claim(&mut self, claim: &InsuranceClaim) -> DatabaseResult<u64> {
        let result = sqlx::query(
            "UPDATE insurance_claim_details SET claim_status = $2, updated_at = $3 WHERE id = $1",
        )
        .bind(claim.id)
        .bind(claim.claim_status)
        .bind(claim.updated_at)
        .execute(&mut *self.tx)
        .await
        .map_err(DatabaseError::from_sqlx)?;
        Ok(result.rows_affected())
    }

    async fn claims_for_bill(&mut self, bill_id: Uuid) -> DatabaseResult<Vec<InsuranceClaim>> {
        sqlx::query_as::<_, InsuranceClaim>(
            "SELECT * FROM insurance_claim_details WHERE bill_id = $1 ORDER BY submitted_at",
        )
        .bind(bill_id)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(DatabaseError::from_sqlx)
    }
}
