//! In-memory backend used for local runs and tests.
//!
//! Transactions are serialized: `begin` takes the table lock for the whole
//! unit of work and operates on a private copy, so readers never observe a
//! half-applied operation and a rollback is just dropping the copy.
//!
//! The copy is taken eagerly for every transaction, reads included, so each
//! `begin` costs time proportional to the whole dataset. This backend is
//! sized for development and tests; use PostgreSQL for anything larger.
mod rows;
mod tables;

use crate::error::DatabaseResult;
use crate::store::{HospitalDatabase, HospitalTransaction};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

pub use tables::Tables;

#[derive(Clone, Default)]
pub struct InMemoryHospitalDatabase {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryHospitalDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the committed state
    pub async fn snapshot(&self) -> Tables {
        self.tables.lock().await.clone()
    }
}

#[async_trait]
impl HospitalDatabase for InMemoryHospitalDatabase {
    async fn begin(&self) -> DatabaseResult<Box<dyn HospitalTransaction>> {
        let committed = self.tables.clone().lock_owned().await;
        let working = committed.clone();
        debug!("Beginning in-memory transaction");
        Ok(Box::new(InMemoryTransaction { committed, working }))
    }

    async fn ping(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

pub struct InMemoryTransaction {
    committed: OwnedMutexGuard<Tables>,
    working: Tables,
}

#[async_trait]
impl HospitalTransaction for InMemoryTransaction {
    async fn commit(self: Box<Self>) -> DatabaseResult<()> {
        let InMemoryTransaction {
            mut committed,
            working,
        } = *self;
        *committed = working;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> DatabaseResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Department;
    use crate::store::FacilityRows;
    use chrono::Utc;
    use uuid::Uuid;

    fn department(name: &str) -> Department {
        Department {
            id: Uuid::new_v4(),
            name: name.to_string(),
            location: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_commit_publishes_writes() {
        let db = InMemoryHospitalDatabase::new();
        let mut tx = db.begin().await.unwrap();
        tx.insert_department(&department("Cardiology")).await.unwrap();
        tx.commit().await.unwrap();

        assert_eq!(db.snapshot().await.departments.len(), 1);
    }

    #[tokio::test]
    async fn test_rollback_discards_writes() {
        let db = InMemoryHospitalDatabase::new();
        let mut tx = db.begin().await.unwrap();
        tx.insert_department(&department("Cardiology")).await.unwrap();
        tx.rollback().await.unwrap();

        assert!(db.snapshot().await.departments.is_empty());
    }

    #[tokio::test]
    async fn test_dropped_transaction_discards_writes() {
        let db = InMemoryHospitalDatabase::new();
        {
            let mut tx = db.begin().await.unwrap();
            tx.insert_department(&department("Oncology")).await.unwrap();
        }
        assert!(db.snapshot().await.departments.is_empty());
    }
}
