//! Hospital database layer
//!
//! Schema, row models and the transactional storage seam shared by every
//! hospital workflow service.
//!
//! # Key Features
//!
//! - **Unit of work**: every service operation runs inside one
//!   [`HospitalTransaction`] and commits or rolls back as a whole
//! - **Two backends**: [`PgHospitalDatabase`] over a sqlx pool and
//!   [`InMemoryHospitalDatabase`] for local runs and tests
//! - **Integrity**: unique MRNs, one bed per patient, one open admission per
//!   patient and one bill per admission are enforced by both backends
//! - **Migrations**: the PostgreSQL schema ships in `migrations/` and is
//!   applied with [`DatabasePool::run_migrations`]
//!
//! # Example Usage
//!
//! ```rust
//! use database_layer::prelude::*;
//! use chrono::Utc;
//! use uuid::Uuid;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), DatabaseError> {
//! let db = InMemoryHospitalDatabase::new();
//!
//! let mut tx = db.begin().await?;
//! tx.insert_department(&Department {
//!     id: Uuid::new_v4(),
//!     name: "Cardiology".to_string(),
//!     location: Some("Block B".to_string()),
//!     created_at: Utc::now(),
//! })
//! .await?;
//! tx.commit().await?;
//!
//! let mut tx = db.begin().await?;
//! assert_eq!(tx.departments().await?.len(), 1);
//! tx.rollback().await?;
//! # Ok(())
//! # }
//! ```
//!
//! Against PostgreSQL:
//!
//! ```rust,ignore
//! let pool = DatabasePool::connect(&DatabaseConfig::with_url("postgres://localhost/hospital")).await?;
//! pool.run_migrations().await?;
//! let db: Arc<dyn HospitalDatabase> = Arc::new(PgHospitalDatabase::new(pool));
//! ```

pub mod config;
pub mod connection;
pub mod error;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod status;
pub mod store;
pub mod transaction;

pub use config::DatabaseConfig;
pub use connection::DatabasePool;
pub use error::{DatabaseError, DatabaseResult};
pub use memory::InMemoryHospitalDatabase;
pub use models::*;
pub use postgres::PgHospitalDatabase;
pub use status::*;
pub use store::*;
pub use transaction::finish;

pub mod prelude {
    pub use crate::error::{DatabaseError, DatabaseResult};
    pub use crate::memory::InMemoryHospitalDatabase;
    pub use crate::models::*;
    pub use crate::status::*;
    pub use crate::store::{
        AdmissionRows, BillingRows, ClinicalRows, FacilityRows, HospitalDatabase,
        HospitalTransaction, PatientRows, TriageRows,
    };
    pub use crate::transaction::finish;
}
