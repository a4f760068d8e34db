use admission_service::AdmissionError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use billing_service::BillingError;
use database_layer::DatabaseError;
use emergency_service::EmergencyError;
use error_common::{codes, Categorized, ErrorCategory};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};
use utoipa::ToSchema;
use uuid::Uuid;
use vitals_service::VitalsError;

/// Standard API error response structure
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Unique error ID for correlating with server logs
    pub error_id: String,
    /// Error category, e.g. `not_found`
    pub error_type: String,
    /// Stable machine-readable code, e.g. `ADM_3001`
    pub code: String,
    pub message: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Standard API success response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ResponseMetadata>,
}

/// Response metadata for paginated listings
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ResponseMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationInfo>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginationInfo {
    pub page: u32,
    pub page_size: u32,
    pub has_next: bool,
    pub has_previous: bool,
}

/// Error returned by every handler
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{message}")]
    Validation { code: &'static str, message: String },

    #[error("{message}")]
    NotFound { code: &'static str, message: String },

    #[error("{message}")]
    Conflict { code: &'static str, message: String },

    #[error("{message}")]
    ServiceUnavailable { code: &'static str, message: String },

    #[error("{message}")]
    Database { code: &'static str, message: String },

    #[error("{message}")]
    Configuration { code: &'static str, message: String },

    #[error("{message}")]
    Internal { code: &'static str, message: String },
}

impl ApiError {
    /// Map any service error by its category
    pub fn from_categorized<E: Categorized>(err: &E) -> Self {
        let code = err.code();
        let message = err.to_string();
        match err.category() {
            ErrorCategory::Validation => ApiError::Validation { code, message },
            ErrorCategory::NotFound => ApiError::NotFound { code, message },
            ErrorCategory::Conflict => ApiError::Conflict { code, message },
            ErrorCategory::Unavailable => ApiError::ServiceUnavailable { code, message },
            ErrorCategory::Database => ApiError::Database { code, message },
            ErrorCategory::Configuration => ApiError::Configuration { code, message },
            ErrorCategory::Internal => ApiError::Internal { code, message },
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound {
            code: codes::not_found::RESOURCE_NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            code: codes::validation::INVALID_INPUT,
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Database { .. }
            | ApiError::Configuration { .. }
            | ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_type(&self) -> &'static str {
        self.category().as_str()
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ApiError::Validation { .. } => ErrorCategory::Validation,
            ApiError::NotFound { .. } => ErrorCategory::NotFound,
            ApiError::Conflict { .. } => ErrorCategory::Conflict,
            ApiError::ServiceUnavailable { .. } => ErrorCategory::Unavailable,
            ApiError::Database { .. } => ErrorCategory::Database,
            ApiError::Configuration { .. } => ErrorCategory::Configuration,
            ApiError::Internal { .. } => ErrorCategory::Internal,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation { code, .. }
            | ApiError::NotFound { code, .. }
            | ApiError::Conflict { code, .. }
            | ApiError::ServiceUnavailable { code, .. }
            | ApiError::Database { code, .. }
            | ApiError::Configuration { code, .. }
            | ApiError::Internal { code, .. } => code,
        }
    }

    /// Message safe to show a caller; server-side failures are not echoed
    fn public_message(&self) -> String {
        match self {
            ApiError::ServiceUnavailable { .. } => {
                "The database is unavailable. Try again in a few moments.".to_string()
            }
            ApiError::Database { .. } | ApiError::Configuration { .. } | ApiError::Internal { .. } => {
                "The request could not be completed.".to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v4().to_string();
        let status_code = self.status_code();

        if self.category().is_client_error() {
            warn!(
                error_id = %error_id,
                code = self.code(),
                status_code = status_code.as_u16(),
                error = %self,
                "Request rejected"
            );
        } else {
            error!(
                error_id = %error_id,
                code = self.code(),
                status_code = status_code.as_u16(),
                error = %self,
                "API error occurred"
            );
        }

        let body = ApiErrorResponse {
            error_id,
            error_type: self.error_type().to_string(),
            code: self.code().to_string(),
            message: self.public_message(),
            timestamp: chrono::Utc::now(),
        };
        (status_code, Json(body)).into_response()
    }
}

macro_rules! from_categorized {
    ($($error:ty),+ $(,)?) => {
        $(
            impl From<$error> for ApiError {
                fn from(err: $error) -> Self {
                    ApiError::from_categorized(&err)
                }
            }
        )+
    };
}

from_categorized!(
    AdmissionError,
    VitalsError,
    BillingError,
    EmergencyError,
    DatabaseError,
);

/// Helper function to create successful API responses
pub fn api_success<T>(data: T) -> ApiResponse<T> {
    ApiResponse {
        success: true,
        data,
        metadata: None,
    }
}

pub fn api_success_with_meta<T>(data: T, metadata: ResponseMetadata) -> ApiResponse<T> {
    ApiResponse {
        success: true,
        data,
        metadata: Some(metadata),
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_service_errors_map_to_status_codes() {
        let missing: ApiError = AdmissionError::PatientNotFound(Uuid::new_v4()).into();
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);

        let busy: ApiError = AdmissionError::BedUnavailable(Uuid::new_v4()).into();
        assert_eq!(busy.status_code(), StatusCode::CONFLICT);
        assert_eq!(busy.code(), codes::admission::BED_UNAVAILABLE);

        let invalid: ApiError = VitalsError::Validation("heart_rate: out of range".into()).into();
        assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);

        let down: ApiError =
            BillingError::Database(DatabaseError::ConnectionFailed("refused".into())).into();
        assert_eq!(down.status_code(), StatusCode::SERVICE_UNAVAILABLE);

        let broken: ApiError = DatabaseError::QueryFailed("syntax".into()).into();
        assert_eq!(broken.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_server_errors_hide_details() {
        let err: ApiError = DatabaseError::QueryFailed("relation \"bills\" does not exist".into()).into();
        assert!(!err.public_message().contains("relation"));

        let err = ApiError::not_found("Vital signs abc not found");
        assert_eq!(err.public_message(), "Vital signs abc not found");
    }
}
