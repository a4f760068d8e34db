//! Payment application and bill status
use crate::error::{BillingError, BillingResult};
use crate::money;
use database_layer::{Bill, BillStatus};
use rust_decimal::Decimal;

/// Status implied by the amounts on a bill
pub fn status_for(total: Decimal, paid: Decimal) -> BillStatus {
    if paid >= total {
        BillStatus::Paid
    } else if paid > Decimal::ZERO {
        BillStatus::PartiallyPaid
    } else {
        BillStatus::Pending
    }
}

/// Apply `amount` to `bill`, returning the updated header.
///
/// The amount must be positive and no larger than the balance due; only
/// outstanding bills accept payments.
pub fn apply_payment(bill: &Bill, amount: Decimal) -> BillingResult<Bill> {
    let amount = money(amount);
    if amount <= Decimal::ZERO {
        return Err(BillingError::Validation("amount: must be positive".to_string()));
    }
    if !bill.bill_status.is_outstanding() {
        return Err(BillingError::InvalidBillState {
            bill_id: bill.id,
            status: bill.bill_status,
        });
    }
    let balance = bill.balance_due();
    if amount > balance {
        return Err(BillingError::Overpayment { amount, balance });
    }

    let amount_paid = bill.amount_paid + amount;
    Ok(Bill {
        amount_paid,
        bill_status: status_for(bill.total_amount, amount_paid),
        ..bill.clone()
    })
}
