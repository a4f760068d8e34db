// Standardized error codes for the hospital operations engine.
// Codes are stable identifiers returned to API clients; messages may change.

pub mod validation {
    pub const INVALID_INPUT: &str = "VALIDATION_1001";
    pub const MISSING_REQUIRED_FIELD: &str = "VALIDATION_1002";
    pub const OUT_OF_RANGE: &str = "VALIDATION_1003";
}

pub mod not_found {
    pub const RESOURCE_NOT_FOUND: &str = "NOT_FOUND_2001";
}

pub mod admission {
    pub const BED_UNAVAILABLE: &str = "ADT_3001";
    pub const ALREADY_ADMITTED: &str = "ADT_3002";
    pub const INVALID_ADMISSION_STATE: &str = "ADT_3003";
    pub const FACILITY_MISMATCH: &str = "ADT_3004";
}

pub mod billing {
    pub const BILL_EXISTS: &str = "BILLING_4001";
    pub const INVALID_BILL_STATE: &str = "BILLING_4002";
    pub const OVERPAYMENT: &str = "BILLING_4003";
    pub const CLAIM_EXISTS: &str = "BILLING_4004";
    pub const INVALID_CLAIM_TRANSITION: &str = "BILLING_4005";
}

pub mod emergency {
    pub const INVALID_TRIAGE_TRANSITION: &str = "ED_5001";
}

pub mod database {
    pub const CONNECTION_FAILED: &str = "DB_6001";
    pub const QUERY_FAILED: &str = "DB_6002";
    pub const CONSTRAINT_VIOLATION: &str = "DB_6003";
    pub const MIGRATION_FAILED: &str = "DB_6004";
}

pub mod system {
    pub const CONFIGURATION: &str = "SYS_9001";
    pub const INTERNAL: &str = "SYS_9002";
}
