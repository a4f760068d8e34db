use crate::config::AppConfig;
use admission_service::AdmissionService;
use anyhow::{Context, Result};
use billing_service::BillingService;
use database_layer::{
    DatabasePool, HospitalDatabase, InMemoryHospitalDatabase, PgHospitalDatabase,
};
use emergency_service::EmergencyService;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};
use vitals_service::VitalsService;

/// Shared handler state
#[derive(Clone)]
pub struct HospitalServer {
    pub config: Arc<AppConfig>,
    pub database: Arc<dyn HospitalDatabase>,
    pub admissions: AdmissionService,
    pub vitals: VitalsService,
    pub billing: BillingService,
    pub emergency: EmergencyService,
    started_at: Instant,
}

impl HospitalServer {
    /// Connect to PostgreSQL when a database URL is configured, otherwise
    /// fall back to the in-memory backend
    pub async fn new(config: AppConfig) -> Result<Self> {
        let database: Arc<dyn HospitalDatabase> = match &config.database.url {
            Some(_) => {
                let pool = DatabasePool::connect(&config.database)
                    .await
                    .context("connecting to PostgreSQL")?;
                if config.database.run_migrations {
                    pool.run_migrations()
                        .await
                        .context("applying database migrations")?;
                }
                Arc::new(PgHospitalDatabase::new(pool))
            }
            None => {
                warn!("No database URL configured; data is kept in memory and lost on exit");
                Arc::new(InMemoryHospitalDatabase::new())
            }
        };
        Ok(Self::with_database(config, database))
    }

    /// Build the server over an existing backend
    pub fn with_database(config: AppConfig, database: Arc<dyn HospitalDatabase>) -> Self {
        info!(backend = database.backend_name(), "Hospital services initialised");
        Self {
            config: Arc::new(config),
            admissions: AdmissionService::new(Arc::clone(&database)),
            vitals: VitalsService::new(Arc::clone(&database)),
            billing: BillingService::new(Arc::clone(&database)),
            emergency: EmergencyService::new(Arc::clone(&database)),
            database,
            started_at: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
