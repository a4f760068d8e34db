use crate::error::BillingError;
use database_layer::{
    Bill, BillItem, ClaimStatus, InsuranceClaim, Payment, PaymentMethod, MAX_AMOUNT,
};
use error_common::{validate_field, validate_required, RequestValidation};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Medication dispensed during an admission
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderMedicationRequest {
    pub medication_name: String,
    pub dosage: Option<String>,
    pub quantity: i32,
    #[schema(value_type = String, example = "12.50")]
    pub unit_price: Decimal,
    pub ordered_by: String,
}

impl RequestValidation for OrderMedicationRequest {
    type Error = BillingError;

    fn validate(&self) -> Result<(), BillingError> {
        validate_required!("medication_name", self.medication_name);
        validate_required!("ordered_by", self.ordered_by);
        validate_field!("quantity", self.quantity > 0, "must be positive");
        validate_field!(
            "unit_price",
            !self.unit_price.is_sign_negative(),
            "must not be negative"
        );
        validate_field!(
            "unit_price",
            self.unit_price <= MAX_AMOUNT,
            format!("must not exceed {}", MAX_AMOUNT)
        );
        validate_field!(
            "quantity",
            Decimal::from(self.quantity) * self.unit_price <= MAX_AMOUNT,
            format!("times unit_price must not exceed {}", MAX_AMOUNT)
        );
        Ok(())
    }
}

/// Laboratory test performed during an admission
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderLabTestRequest {
    pub test_name: String,
    #[schema(value_type = String, example = "45.00")]
    pub price: Decimal,
    pub ordered_by: String,
}

impl RequestValidation for OrderLabTestRequest {
    type Error = BillingError;

    fn validate(&self) -> Result<(), BillingError> {
        validate_required!("test_name", self.test_name);
        validate_required!("ordered_by", self.ordered_by);
        validate_field!("price", !self.price.is_sign_negative(), "must not be negative");
        validate_field!(
            "price",
            self.price <= MAX_AMOUNT,
            format!("must not exceed {}", MAX_AMOUNT)
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GenerateBillRequest {
    pub generated_by: String,
}

impl RequestValidation for GenerateBillRequest {
    type Error = BillingError;

    fn validate(&self) -> Result<(), BillingError> {
        validate_required!("generated_by", self.generated_by);
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecordPaymentRequest {
    #[schema(value_type = String, example = "100.00")]
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    pub reference_number: Option<String>,
    pub received_by: String,
}

impl RequestValidation for RecordPaymentRequest {
    type Error = BillingError;

    fn validate(&self) -> Result<(), BillingError> {
        validate_required!("received_by", self.received_by);
        validate_field!("amount", self.amount > Decimal::ZERO, "must be positive");
        validate_field!(
            "amount",
            self.amount <= MAX_AMOUNT,
            format!("must not exceed {}", MAX_AMOUNT)
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmitClaimRequest {
    pub insurance_provider: String,
    pub policy_number: String,
    /// Share of the bill the insurer covers, 0 to 100
    #[schema(value_type = String, example = "80")]
    pub coverage_percent: Decimal,
}

impl RequestValidation for SubmitClaimRequest {
    type Error = BillingError;

    fn validate(&self) -> Result<(), BillingError> {
        validate_required!("insurance_provider", self.insurance_provider);
        validate_required!("policy_number", self.policy_number);
        validate_field!(
            "coverage_percent",
            self.coverage_percent >= Decimal::ZERO && self.coverage_percent <= Decimal::ONE_HUNDRED,
            "must be between 0 and 100"
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateClaimStatusRequest {
    pub status: ClaimStatus,
    pub updated_by: String,
}

impl RequestValidation for UpdateClaimStatusRequest {
    type Error = BillingError;

    fn validate(&self) -> Result<(), BillingError> {
        validate_required!("updated_by", self.updated_by);
        Ok(())
    }
}

/// Bill header with everything attached to it
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BillDetail {
    pub bill: Bill,
    pub items: Vec<BillItem>,
    pub payments: Vec<Payment>,
    pub claims: Vec<InsuranceClaim>,
    #[schema(value_type = String)]
    pub balance_due: Decimal,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OutstandingQuery {
    pub patient_id: Option<Uuid>,
}
