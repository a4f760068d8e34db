// Transaction completion helpers
use crate::error::DatabaseError;
use crate::store::HospitalTransaction;
use std::fmt::Display;
use tracing::{debug, error};

/// Commit `tx` when `result` is Ok, roll it back otherwise.
///
/// The caller's error always wins over a failed rollback; the rollback
/// failure is logged and dropped.
pub async fn finish<T, E>(
    tx: Box<dyn HospitalTransaction>,
    result: Result<T, E>,
) -> Result<T, E>
where
    E: From<DatabaseError> + Display,
{
    match result {
        Ok(value) => {
            tx.commit().await?;
            debug!("Transaction committed");
            Ok(value)
        }
        Err(err) => {
            debug!(error = %err, "Rolling back transaction");
            if let Err(rollback_err) = tx.rollback().await {
                error!(error = %rollback_err, "Failed to roll back transaction");
            }
            Err(err)
        }
    }
}
