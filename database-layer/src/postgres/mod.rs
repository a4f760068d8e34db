//! PostgreSQL backend built on sqlx transactions
mod admissions;
mod billing;
mod clinical;
mod facility;
mod patients;
mod triage;

use crate::connection::DatabasePool;
use crate::error::{DatabaseError, DatabaseResult};
use crate::store::{HospitalDatabase, HospitalTransaction};
use async_trait::async_trait;
use sqlx::{Postgres, Transaction};
use tracing::debug;

#[derive(Clone)]
pub struct PgHospitalDatabase {
    pool: DatabasePool,
}

impl PgHospitalDatabase {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }
}

#[async_trait]
impl HospitalDatabase for PgHospitalDatabase {
    async fn begin(&self) -> DatabaseResult<Box<dyn HospitalTransaction>> {
        debug!("Beginning transaction");
        let tx = self
            .pool
            .pool()
            .begin()
            .await
            .map_err(|e| DatabaseError::QueryFailed(format!("Failed to begin transaction: {}", e)))?;
        Ok(Box::new(PgTransaction { tx }))
    }

    async fn ping(&self) -> bool {
        self.pool.is_healthy().await
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}

/// Open sqlx transaction; the row traits are implemented per table family
pub struct PgTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl HospitalTransaction for PgTransaction {
    async fn commit(self: Box<Self>) -> DatabaseResult<()> {
        self.tx.commit().await.map_err(DatabaseError::from_sqlx)
    }

    async fn rollback(self: Box<Self>) -> DatabaseResult<()> {
        self.tx.rollback().await.map_err(DatabaseError::from_sqlx)
    }
}
