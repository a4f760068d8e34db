use error_common::{codes, Categorized, ErrorCategory};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Migration error: {0}")]
    MigrationError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;

impl DatabaseError {
    /// Translate a driver error, pulling integrity violations out so callers
    /// can report them as conflicts.
    pub fn from_sqlx(error: sqlx::Error) -> Self {
        if let Some(db_error) = error.as_database_error() {
            // unique_violation, foreign_key_violation, check_violation
            if matches!(db_error.code().as_deref(), Some("23505" | "23503" | "23514")) {
                return DatabaseError::ConstraintViolation(db_error.message().to_string());
            }
        }
        match error {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                DatabaseError::ConnectionFailed(error.to_string())
            }
            other => DatabaseError::SqlxError(other),
        }
    }
}

impl Categorized for DatabaseError {
    fn category(&self) -> ErrorCategory {
        match self {
            DatabaseError::ConnectionFailed(_) => ErrorCategory::Unavailable,
            DatabaseError::ConstraintViolation(_) => ErrorCategory::Conflict,
            DatabaseError::ConfigurationError(_) => ErrorCategory::Configuration,
            DatabaseError::SqlxError(sqlx::Error::RowNotFound) => ErrorCategory::NotFound,
            DatabaseError::QueryFailed(_)
            | DatabaseError::MigrationError(_)
            | DatabaseError::SqlxError(_) => ErrorCategory::Database,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            DatabaseError::ConnectionFailed(_) => codes::database::CONNECTION_FAILED,
            DatabaseError::ConstraintViolation(_) => codes::database::CONSTRAINT_VIOLATION,
            DatabaseError::MigrationError(_) => codes::database::MIGRATION_FAILED,
            DatabaseError::ConfigurationError(_) => codes::system::CONFIGURATION,
            DatabaseError::SqlxError(sqlx::Error::RowNotFound) => {
                codes::not_found::RESOURCE_NOT_FOUND
            }
            DatabaseError::QueryFailed(_) | DatabaseError::SqlxError(_) => {
                codes::database::QUERY_FAILED
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_timeout_is_unavailable() {
        let err = DatabaseError::from_sqlx(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, DatabaseError::ConnectionFailed(_)));
        assert_eq!(err.category(), ErrorCategory::Unavailable);
    }

    #[test]
    fn test_row_not_found_is_not_found() {
        let err = DatabaseError::from_sqlx(sqlx::Error::RowNotFound);
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn test_constraint_violation_is_conflict() {
        let err = DatabaseError::ConstraintViolation("duplicate bill".into());
        assert_eq!(err.category(), ErrorCategory::Conflict);
        assert_eq!(err.code(), codes::database::CONSTRAINT_VIOLATION);
    }
}
