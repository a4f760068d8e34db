use crate::claims::{check_transition, split_claim};
use crate::error::{BillingError, BillingResult};
use crate::invoice::{bill_number, build_items, stay_days, total};
use crate::models::*;
use crate::payment::{apply_payment, status_for};
use crate::reporting::OutstandingReport;
use chrono::Utc;
use database_layer::{
    finish, Admission, AdmissionRows, AdmissionStatus, Bill, BillStatus, BillingRows,
    ClaimStatus, FacilityRows, HospitalDatabase, HospitalTransaction, InsuranceClaim, LabOrder,
    MedicationOrder, Payment, PaymentMethod,
};
use error_common::RequestValidation;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Charge capture, billing, payments and insurance claims.
///
/// Every public method is one transaction. Bill totals and statuses are
/// recomputed inside the transaction that changes them.
#[derive(Clone)]
pub struct BillingService {
    db: Arc<dyn HospitalDatabase>,
}

impl BillingService {
    pub fn new(db: Arc<dyn HospitalDatabase>) -> Self {
        Self { db }
    }

    pub async fn order_medication(
        &self,
        admission_id: Uuid,
        request: OrderMedicationRequest,
    ) -> BillingResult<MedicationOrder> {
        request.validate()?;
        let mut tx = self.db.begin().await?;
        let result: BillingResult<_> = async {
            require_active(tx.as_mut(), admission_id).await?;
            let order = MedicationOrder {
                id: Uuid::new_v4(),
                admission_id,
                medication_name: request.medication_name,
                dosage: request.dosage,
                quantity: request.quantity,
                unit_price: crate::money(request.unit_price),
                ordered_by: request.ordered_by,
                ordered_at: Utc::now(),
            };
            tx.insert_medication_order(&order).await?;
            Ok(order)
        }
        .await;
        let order = finish(tx, result).await?;
        info!(admission_id = %admission_id, order_id = %order.id, "Medication ordered");
        Ok(order)
    }

    pub async fn order_lab_test(
        &self,
        admission_id: Uuid,
        request: OrderLabTestRequest,
    ) -> BillingResult<LabOrder> {
        request.validate()?;
        let mut tx = self.db.begin().await?;
        let result: BillingResult<_> = async {
            require_active(tx.as_mut(), admission_id).await?;
            let order = LabOrder {
                id: Uuid::new_v4(),
                admission_id,
                test_name: request.test_name,
                price: crate::money(request.price),
                ordered_by: request.ordered_by,
                ordered_at: Utc::now(),
            };
            tx.insert_lab_order(&order).await?;
            Ok(order)
        }
        .await;
        let order = finish(tx, result).await?;
        info!(admission_id = %admission_id, order_id = %order.id, "Lab test ordered");
        Ok(order)
    }

    /// Aggregate the stay's room, medication and lab charges into a bill.
    ///
    /// An admission has at most one bill. The room charge runs to the
    /// discharge date, or to now while the patient is still admitted.
    pub async fn generate_bill(
        &self,
        admission_id: Uuid,
        request: GenerateBillRequest,
    ) -> BillingResult<BillDetail> {
        request.validate()?;
        let mut tx = self.db.begin().await?;
        let result = generate(tx.as_mut(), admission_id, request).await;
        let detail = finish(tx, result).await?;
        info!(
            bill_id = %detail.bill.id,
            bill_number = %detail.bill.bill_number,
            admission_id = %admission_id,
            total = %detail.bill.total_amount,
            items = detail.items.len(),
            "Bill generated"
        );
        Ok(detail)
    }

    pub async fn get_bill(&self, bill_id: Uuid) -> BillingResult<BillDetail> {
        let mut tx = self.db.begin().await?;
        let result: BillingResult<_> = async {
            let bill = load_bill(tx.as_mut(), bill_id).await?;
            detail(tx.as_mut(), bill).await
        }
        .await;
        finish(tx, result).await
    }

    pub async fn record_payment(
        &self,
        bill_id: Uuid,
        request: RecordPaymentRequest,
    ) -> BillingResult<Payment> {
        request.validate()?;
        let mut tx = self.db.begin().await?;
        let result: BillingResult<_> = async {
            let bill = load_bill(tx.as_mut(), bill_id).await?;
            let payment = pay(
                tx.as_mut(),
                &bill,
                request.amount,
                request.payment_method,
                request.reference_number,
                request.received_by,
            )
            .await?;
            Ok(payment)
        }
        .await;
        let payment = finish(tx, result).await.map_err(|e| {
            if let BillingError::Overpayment { amount, balance } = &e {
                warn!(bill_id = %bill_id, amount = %amount, balance = %balance, "Overpayment rejected");
            }
            e
        })?;
        info!(
            bill_id = %bill_id,
            payment_id = %payment.id,
            amount = %payment.amount,
            method = %payment.payment_method,
            "Payment recorded"
        );
        Ok(payment)
    }

    /// Split the bill total between insurer and patient and file the claim
    pub async fn submit_insurance_claim(
        &self,
        bill_id: Uuid,
        request: SubmitClaimRequest,
    ) -> BillingResult<InsuranceClaim> {
        request.validate()?;
        let mut tx = self.db.begin().await?;
        let result: BillingResult<_> = async {
            let bill = load_bill(tx.as_mut(), bill_id).await?;
            if bill.bill_status == BillStatus::Cancelled {
                return Err(BillingError::InvalidBillState {
                    bill_id,
                    status: bill.bill_status,
                });
            }
            let existing = tx.claims_for_bill(bill_id).await?;
            if let Some(active) = existing
                .iter()
                .find(|c| c.claim_status != ClaimStatus::Rejected)
            {
                return Err(BillingError::ClaimExists {
                    bill_id,
                    claim_id: active.id,
                });
            }

            let split = split_claim(bill.total_amount, request.coverage_percent);
            let now = Utc::now();
            let claim = InsuranceClaim {
                id: Uuid::new_v4(),
                bill_id,
                insurance_provider: request.insurance_provider,
                policy_number: request.policy_number,
                claim_amount: bill.total_amount,
                coverage_percent: request.coverage_percent,
                insurance_amount: split.insurance_amount,
                patient_amount: split.patient_amount,
                claim_status: ClaimStatus::Submitted,
                submitted_at: now,
                updated_at: now,
            };
            tx.insert_claim(&claim).await?;
            Ok(claim)
        }
        .await;
        let claim = finish(tx, result).await?;
        info!(
            bill_id = %bill_id,
            claim_id = %claim.id,
            insurance_amount = %claim.insurance_amount,
            patient_amount = %claim.patient_amount,
            "Insurance claim submitted"
        );
        Ok(claim)
    }

    /// Advance a claim. A claim reaching PAID posts the insurer's share as an
    /// INSURANCE payment, capped at the bill's balance.
    pub async fn update_claim_status(
        &self,
        claim_id: Uuid,
        request: UpdateClaimStatusRequest,
    ) -> BillingResult<InsuranceClaim> {
        request.validate()?;
        let mut tx = self.db.begin().await?;
        let result = advance_claim(tx.as_mut(), claim_id, request).await;
        let claim = finish(tx, result).await?;
        info!(claim_id = %claim_id, status = %claim.claim_status, "Insurance claim updated");
        Ok(claim)
    }

    pub async fn outstanding_bills(
        &self,
        query: OutstandingQuery,
    ) -> BillingResult<OutstandingReport> {
        let mut tx = self.db.begin().await?;
        let result = tx
            .outstanding_bills(query.patient_id)
            .await
            .map_err(BillingError::from);
        let bills = finish(tx, result).await?;
        Ok(OutstandingReport::new(bills))
    }
}

async fn load_admission(
    tx: &mut dyn HospitalTransaction,
    admission_id: Uuid,
) -> BillingResult<Admission> {
    tx.admission(admission_id)
        .await?
        .ok_or(BillingError::AdmissionNotFound(admission_id))
}

async fn require_active(tx: &mut dyn HospitalTransaction, admission_id: Uuid) -> BillingResult<()> {
    let admission = load_admission(tx, admission_id).await?;
    if admission.admission_status != AdmissionStatus::Admitted {
        return Err(BillingError::AdmissionNotActive {
            admission_id,
            status: admission.admission_status,
        });
    }
    Ok(())
}

async fn load_bill(tx: &mut dyn HospitalTransaction, bill_id: Uuid) -> BillingResult<Bill> {
    tx.bill(bill_id)
        .await?
        .ok_or(BillingError::BillNotFound(bill_id))
}

async fn detail(tx: &mut dyn HospitalTransaction, bill: Bill) -> BillingResult<BillDetail> {
    let items = tx.bill_items(bill.id).await?;
    let payments = tx.payments(bill.id).await?;
    let claims = tx.claims_for_bill(bill.id).await?;
    Ok(BillDetail {
        balance_due: bill.balance_due(),
        bill,
        items,
        payments,
        claims,
    })
}

async fn generate(
    tx: &mut dyn HospitalTransaction,
    admission_id: Uuid,
    request: GenerateBillRequest,
) -> BillingResult<BillDetail> {
    let admission = load_admission(tx, admission_id).await?;
    if let Some(existing) = tx.bill_for_admission(admission_id).await? {
        return Err(BillingError::BillExists {
            admission_id,
            bill_number: existing.bill_number,
        });
    }
    let room = tx
        .room(admission.room_id)
        .await?
        .ok_or(BillingError::RoomNotFound(admission.room_id))?;

    let now = Utc::now();
    let days = stay_days(
        admission.admission_date,
        admission.discharge_date.unwrap_or(now),
    );
    let medications = tx.medication_orders(admission_id).await?;
    let labs = tx.lab_orders(admission_id).await?;

    let bill_id = Uuid::new_v4();
    let items = build_items(bill_id, &room, days, &medications, &labs)?;
    let total_amount = total(&items)?;
    let bill = Bill {
        id: bill_id,
        bill_number: bill_number(now, bill_id),
        patient_id: admission.patient_id,
        admission_id,
        bill_date: now,
        total_amount,
        amount_paid: Decimal::ZERO,
        bill_status: status_for(total_amount, Decimal::ZERO),
        generated_by: request.generated_by,
        created_at: now,
        updated_at: now,
    };
    tx.insert_bill(&bill).await?;
    for item in &items {
        tx.insert_bill_item(item).await?;
    }

    Ok(BillDetail {
        balance_due: bill.balance_due(),
        bill,
        items,
        payments: Vec::new(),
        claims: Vec::new(),
    })
}

async fn pay(
    tx: &mut dyn HospitalTransaction,
    bill: &Bill,
    amount: Decimal,
    payment_method: PaymentMethod,
    reference_number: Option<String>,
    received_by: String,
) -> BillingResult<Payment> {
    let mut updated = apply_payment(bill, amount)?;
    let now = Utc::now();
    updated.updated_at = now;

    let payment = Payment {
        id: Uuid::new_v4(),
        bill_id: bill.id,
        amount: updated.amount_paid - bill.amount_paid,
        payment_method,
        reference_number,
        received_by,
        payment_date: now,
    };
    tx.insert_payment(&payment).await?;
    tx.update_bill(&updated).await?;
    Ok(payment)
}

async fn advance_claim(
    tx: &mut dyn HospitalTransaction,
    claim_id: Uuid,
    request: UpdateClaimStatusRequest,
) -> BillingResult<InsuranceClaim> {
    let mut claim = tx
        .claim(claim_id)
        .await?
        .ok_or(BillingError::ClaimNotFound(claim_id))?;
    check_transition(claim.claim_status, request.status)?;

    claim.claim_status = request.status;
    claim.updated_at = Utc::now();
    tx.update_claim(&claim).await?;

    if claim.claim_status == ClaimStatus::Paid {
        let bill = load_bill(tx, claim.bill_id).await?;
        let amount = claim.insurance_amount.min(bill.balance_due());
        if amount > Decimal::ZERO && bill.bill_status.is_outstanding() {
            pay(
                tx,
                &bill,
                amount,
                PaymentMethod::Insurance,
                Some(claim.policy_number.clone()),
                request.updated_by,
            )
            .await?;
        }
    }
    Ok(claim)
}
