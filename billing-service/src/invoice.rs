//! Bill line items from an admission's stay and orders
use crate::error::{BillingError, BillingResult};
use crate::money;
use chrono::{DateTime, Utc};
use database_layer::{BillItem, BillItemType, LabOrder, MedicationOrder, Room, MAX_AMOUNT};
use rust_decimal::Decimal;
use uuid::Uuid;

const SECONDS_PER_DAY: i64 = 86_400;

/// Billable days for a stay: partial days round up, minimum one
pub fn stay_days(admitted: DateTime<Utc>, until: DateTime<Utc>) -> i64 {
    let seconds = (until - admitted).num_seconds().max(0);
    let days = (seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY;
    days.max(1)
}

/// `BILL-YYYYMMDD-XXXXXXXX`, the suffix taken from the bill id
pub fn bill_number(date: DateTime<Utc>, bill_id: Uuid) -> String {
    let simple = bill_id.simple().to_string().to_uppercase();
    format!("BILL-{}-{}", date.format("%Y%m%d"), &simple[..8])
}

/// `quantity × unit_price`, rounded, or an error when it overflows or
/// would not fit a money column
fn line_amount(quantity: Decimal, unit_price: Decimal, what: &str) -> BillingResult<Decimal> {
    quantity
        .checked_mul(unit_price)
        .map(money)
        .filter(|amount| *amount <= MAX_AMOUNT)
        .ok_or_else(|| out_of_range(what))
}

fn out_of_range(what: &str) -> BillingError {
    BillingError::AmountOutOfRange {
        what: what.to_string(),
        limit: MAX_AMOUNT,
    }
}

/// Line items in presentation order: room, medications, labs
pub fn build_items(
    bill_id: Uuid,
    room: &Room,
    days: i64,
    medications: &[MedicationOrder],
    labs: &[LabOrder],
) -> BillingResult<Vec<BillItem>> {
    let mut items = Vec::with_capacity(1 + medications.len() + labs.len());

    let days_billed = Decimal::from(days);
    let room_charge = format!(
        "Room {} ({}) - {} day{}",
        room.room_number,
        room.room_type,
        days,
        if days == 1 { "" } else { "s" }
    );
    items.push(BillItem {
        id: Uuid::new_v4(),
        bill_id,
        item_type: BillItemType::Room,
        amount: line_amount(days_billed, room.daily_rate, &room_charge)?,
        description: room_charge,
        quantity: days_billed,
        unit_price: room.daily_rate,
    });

    for order in medications {
        let quantity = Decimal::from(order.quantity);
        let description = match &order.dosage {
            Some(dosage) => format!("{} {}", order.medication_name, dosage),
            None => order.medication_name.clone(),
        };
        items.push(BillItem {
            id: Uuid::new_v4(),
            bill_id,
            item_type: BillItemType::Medication,
            amount: line_amount(quantity, order.unit_price, &description)?,
            description,
            quantity,
            unit_price: order.unit_price,
        });
    }

    for order in labs {
        items.push(BillItem {
            id: Uuid::new_v4(),
            bill_id,
            item_type: BillItemType::Lab,
            amount: line_amount(Decimal::ONE, order.price, &order.test_name)?,
            description: order.test_name.clone(),
            quantity: Decimal::ONE,
            unit_price: order.price,
        });
    }

    Ok(items)
}

/// Bill total; always the sum of the item amounts
pub fn total(items: &[BillItem]) -> BillingResult<Decimal> {
    items
        .iter()
        .try_fold(Decimal::ZERO, |sum, item| sum.checked_add(item.amount))
        .map(money)
        .filter(|sum| *sum <= MAX_AMOUNT)
        .ok_or_else(|| out_of_range("bill total"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use database_layer::RoomType;

    fn room() -> Room {
        Room {
            id: Uuid::new_v4(),
            department_id: Uuid::new_v4(),
            room_number: "305".to_string(),
            room_type: RoomType::Private,
            daily_rate: Decimal::new(20000, 2),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_stay_days_round_up_with_minimum_of_one() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        assert_eq!(stay_days(start, start), 1);
        assert_eq!(stay_days(start, start + Duration::hours(5)), 1);
        assert_eq!(stay_days(start, start + Duration::hours(24)), 1);
        assert_eq!(stay_days(start, start + Duration::hours(25)), 2);
        assert_eq!(stay_days(start, start + Duration::days(3)), 3);
    }

    #[test]
    fn test_bill_number_format() {
        let date = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        let id = Uuid::parse_str("3f2a9c1e-0000-4000-8000-000000000000").unwrap();
        assert_eq!(bill_number(date, id), "BILL-20240301-3F2A9C1E");
    }

    #[test]
    fn test_total_is_sum_of_items() {
        let bill_id = Uuid::new_v4();
        let medications = vec![MedicationOrder {
            id: Uuid::new_v4(),
            admission_id: Uuid::new_v4(),
            medication_name: "Ceftriaxone".to_string(),
            dosage: Some("1g IV".to_string()),
            quantity: 3,
            unit_price: Decimal::new(1875, 2),
            ordered_by: "Dr. Carter".to_string(),
            ordered_at: Utc::now(),
        }];
        let labs = vec![LabOrder {
            id: Uuid::new_v4(),
            admission_id: Uuid::new_v4(),
            test_name: "Complete blood count".to_string(),
            price: Decimal::new(4500, 2),
            ordered_by: "Dr. Carter".to_string(),
            ordered_at: Utc::now(),
        }];

        let items = build_items(bill_id, &room(), 2, &medications, &labs).unwrap();
        let types: Vec<_> = items.iter().map(|i| i.item_type).collect();
        assert_eq!(
            types,
            vec![BillItemType::Room, BillItemType::Medication, BillItemType::Lab]
        );
        assert_eq!(items[0].amount, Decimal::new(40000, 2));
        assert_eq!(items[1].amount, Decimal::new(5625, 2));
        assert_eq!(items[1].description, "Ceftriaxone 1g IV");
        // 400.00 + 56.25 + 45.00
        assert_eq!(total(&items).unwrap(), Decimal::new(50125, 2));
    }

    fn lab(price: Decimal) -> LabOrder {
        LabOrder {
            id: Uuid::new_v4(),
            admission_id: Uuid::new_v4(),
            test_name: "MRI".to_string(),
            price,
            ordered_by: "Dr. Carter".to_string(),
            ordered_at: Utc::now(),
        }
    }

    #[test]
    fn test_overflowing_line_is_rejected() {
        let medications = vec![MedicationOrder {
            id: Uuid::new_v4(),
            admission_id: Uuid::new_v4(),
            medication_name: "Alteplase".to_string(),
            dosage: None,
            quantity: 2,
            unit_price: Decimal::MAX,
            ordered_by: "Dr. Carter".to_string(),
            ordered_at: Utc::now(),
        }];
        let err = build_items(Uuid::new_v4(), &room(), 1, &medications, &[]).unwrap_err();
        assert!(matches!(err, BillingError::AmountOutOfRange { ref what, .. } if what == "Alteplase"));
    }

    #[test]
    fn test_total_beyond_column_limit_is_rejected() {
        let labs = vec![lab(MAX_AMOUNT), lab(MAX_AMOUNT)];
        let items = build_items(Uuid::new_v4(), &room(), 1, &[], &labs).unwrap();
        assert!(matches!(
            total(&items),
            Err(BillingError::AmountOutOfRange { .. })
        ));

        let room_only = build_items(Uuid::new_v4(), &room(), 1, &[], &[]).unwrap();
        assert_eq!(total(&room_only).unwrap(), Decimal::new(20000, 2));
    }
}
