//! Lifecycle enums stored as upper-case text columns
use std::fmt;
use thiserror::Error;

/// Raised when a text column holds a value outside the enum
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {kind} value '{value}'")]
pub struct UnknownStatus {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! text_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash,
            serde::Serialize, serde::Deserialize, utoipa::ToSchema,
        )]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = UnknownStatus;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_uppercase().as_str() {
                    $($text => Ok($name::$variant),)+
                    _ => Err(UnknownStatus {
                        kind: stringify!($name),
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl sqlx::Type<sqlx::Postgres> for $name {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <&str as sqlx::Type<sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
                <&str as sqlx::Type<sqlx::Postgres>>::compatible(ty)
            }
        }

        impl<'r> sqlx::Decode<'r, sqlx::Postgres> for $name {
            fn decode(
                value: sqlx::postgres::PgValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                let text = <&str as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
                Ok(text.parse::<$name>()?)
            }
        }

        impl<'q> sqlx::Encode<'q, sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut sqlx::postgres::PgArgumentBuffer,
            ) -> sqlx::encode::IsNull {
                <&str as sqlx::Encode<sqlx::Postgres>>::encode(self.as_str(), buf)
            }
        }
    };
}

text_enum! {
    Gender {
        Male => "MALE",
        Female => "FEMALE",
        Other => "OTHER",
        Unknown => "UNKNOWN",
    }
}

text_enum! {
    /// Room classification; drives the nightly room charge
    RoomType {
        General => "GENERAL",
        SemiPrivate => "SEMI_PRIVATE",
        Private => "PRIVATE",
        Icu => "ICU",
        Isolation => "ISOLATION",
    }
}

text_enum! {
    BedStatus {
        Available => "AVAILABLE",
        Occupied => "OCCUPIED",
        Maintenance => "MAINTENANCE",
        Cleaning => "CLEANING",
    }
}

text_enum! {
    AdmissionType {
        Emergency => "EMERGENCY",
        Elective => "ELECTIVE",
        Urgent => "URGENT",
        Maternity => "MATERNITY",
        Transfer => "TRANSFER",
    }
}

text_enum! {
    AdmissionStatus {
        Admitted => "ADMITTED",
        Discharged => "DISCHARGED",
    }
}

text_enum! {
    DischargeDisposition {
        Home => "HOME",
        HomeWithCare => "HOME_WITH_CARE",
        Rehabilitation => "REHABILITATION",
        TransferredOut => "TRANSFERRED_OUT",
        AgainstMedicalAdvice => "AGAINST_MEDICAL_ADVICE",
        Deceased => "DECEASED",
    }
}

text_enum! {
    RecordType {
        AdmissionNote => "ADMISSION_NOTE",
        ProgressNote => "PROGRESS_NOTE",
        TransferNote => "TRANSFER_NOTE",
        DischargeSummary => "DISCHARGE_SUMMARY",
        Procedure => "PROCEDURE",
        Diagnosis => "DIAGNOSIS",
    }
}

text_enum! {
    BillStatus {
        Pending => "PENDING",
        PartiallyPaid => "PARTIALLY_PAID",
        Paid => "PAID",
        Cancelled => "CANCELLED",
    }
}

text_enum! {
    BillItemType {
        Room => "ROOM",
        Medication => "MEDICATION",
        Lab => "LAB",
    }
}

text_enum! {
    PaymentMethod {
        Cash => "CASH",
        Card => "CARD",
        BankTransfer => "BANK_TRANSFER",
        Cheque => "CHEQUE",
        Insurance => "INSURANCE",
    }
}

text_enum! {
    ClaimStatus {
        Submitted => "SUBMITTED",
        Approved => "APPROVED",
        Rejected => "REJECTED",
        Paid => "PAID",
    }
}

text_enum! {
    TriageStatus {
        Waiting => "WAITING",
        Assigned => "ASSIGNED",
        InProgress => "IN_PROGRESS",
        Completed => "COMPLETED",
        Admitted => "ADMITTED",
        Transferred => "TRANSFERRED",
        LeftWithoutBeingSeen => "LEFT_WITHOUT_BEING_SEEN",
    }
}

impl BillStatus {
    /// Bills that still expect money
    pub fn is_outstanding(&self) -> bool {
        matches!(self, BillStatus::Pending | BillStatus::PartiallyPaid)
    }
}

impl TriageStatus {
    /// Terminal states carry an end time and leave the queue
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TriageStatus::Completed
                | TriageStatus::Admitted
                | TriageStatus::Transferred
                | TriageStatus::LeftWithoutBeingSeen
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_round_trips_through_from_str() {
        for status in TriageStatus::ALL {
            assert_eq!(status.as_str().parse::<TriageStatus>().unwrap(), *status);
        }
        assert_eq!("partially_paid".parse::<BillStatus>().unwrap(), BillStatus::PartiallyPaid);
    }

    #[test]
    fn test_unknown_value_is_rejected() {
        let err = "VACANT".parse::<BedStatus>().unwrap_err();
        assert_eq!(err.kind, "BedStatus");
        assert_eq!(err.value, "VACANT");
    }

    #[test]
    fn test_serde_matches_column_text() {
        let json = serde_json::to_string(&TriageStatus::LeftWithoutBeingSeen).unwrap();
        assert_eq!(json, "\"LEFT_WITHOUT_BEING_SEEN\"");
        let json = serde_json::to_string(&DischargeDisposition::HomeWithCare).unwrap();
        assert_eq!(json, format!("\"{}\"", DischargeDisposition::HomeWithCare.as_str()));
    }

    #[test]
    fn test_terminal_triage_states() {
        assert!(TriageStatus::Completed.is_terminal());
        assert!(TriageStatus::LeftWithoutBeingSeen.is_terminal());
        assert!(!TriageStatus::InProgress.is_terminal());
    }
}
