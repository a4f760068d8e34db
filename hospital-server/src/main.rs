use clap::Parser;
use database_layer::DatabasePool;
use error_common::{HospitalError, Result};
use hospital_server::{create_app, AppConfig, HospitalServer};
use logger_redacted::init_logging;
use tracing::info;

/// Hospital operations HTTP server
#[derive(Parser, Debug)]
#[command(name = "hospital-server")]
#[command(about = "Admissions, vitals, billing and emergency triage API")]
struct Args {
    /// Server bind address, overrides the configuration file
    #[arg(long, env = "HOSPITAL_HOST")]
    host: Option<String>,

    /// Server port, overrides the configuration file
    #[arg(short, long, env = "HOSPITAL_PORT")]
    port: Option<u16>,

    /// Configuration file path
    #[arg(short, long, default_value = "hospital-server.yaml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Apply database migrations and exit
    #[arg(long)]
    migrate_only: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let mut config = AppConfig::load(&args.config)
        .map_err(|e| HospitalError::ConfigError(e.to_string()))?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if args.verbose {
        config.logging.log_level = "debug".to_string();
    }

    init_logging(&config.logging).map_err(|e| HospitalError::ConfigError(e.to_string()))?;

    info!("Starting {}", config.server.name);
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    if args.migrate_only {
        return migrate(&config).await;
    }

    let addr = config
        .server
        .bind_address()
        .map_err(|e| HospitalError::ConfigError(format!("invalid bind address: {}", e)))?;

    let server = HospitalServer::new(config).await?;
    let app = create_app(server);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| HospitalError::NetworkError(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Server running on http://{}", addr);
    info!("Health check available at: http://{}/health", addr);
    info!("OpenAPI document at: http://{}/api-docs/openapi.json", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| HospitalError::ServerError(format!("HTTP server error: {}", e)))?;

    info!("Server stopped");
    Ok(())
}

async fn migrate(config: &AppConfig) -> Result<()> {
    if config.database.url.is_none() {
        return Err(HospitalError::ConfigError(
            "--migrate-only needs a database URL".to_string(),
        ));
    }
    let pool = DatabasePool::connect(&config.database)
        .await
        .map_err(|e| HospitalError::DatabaseError(e.to_string()))?;
    pool.run_migrations()
        .await
        .map_err(|e| HospitalError::DatabaseError(e.to_string()))?;
    pool.close().await;
    info!("Migrations applied");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
