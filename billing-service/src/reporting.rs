//! Receivables views over outstanding bills
use database_layer::Bill;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Unsettled bills, oldest first, with the combined balance
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OutstandingReport {
    pub bills: Vec<Bill>,
    #[schema(value_type = String)]
    pub total_balance: Decimal,
}

impl OutstandingReport {
    pub fn new(bills: Vec<Bill>) -> Self {
        let total_balance = bills.iter().map(Bill::balance_due).sum();
        Self {
            bills,
            total_balance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use database_layer::BillStatus;
    use uuid::Uuid;

    #[test]
    fn test_total_balance_sums_each_bill() {
        let now = Utc::now();
        let bill = |total: i64, paid: i64| Bill {
            id: Uuid::new_v4(),
            bill_number: "BILL-20240301-00000000".to_string(),
            patient_id: Uuid::new_v4(),
            admission_id: Uuid::new_v4(),
            bill_date: now,
            total_amount: Decimal::new(total, 2),
            amount_paid: Decimal::new(paid, 2),
            bill_status: BillStatus::PartiallyPaid,
            generated_by: "billing".to_string(),
            created_at: now,
            updated_at: now,
        };
        let report = OutstandingReport::new(vec![bill(50000, 10000), bill(12550, 0)]);
        assert_eq!(report.total_balance, Decimal::new(52550, 2));
        assert!(OutstandingReport::new(Vec::new()).total_balance.is_zero());
    }
}
