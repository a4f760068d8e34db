//! Layered server configuration: built-in defaults, then an optional YAML
//! file, then `HOSPITAL__*` environment variables.
use config::{Config, ConfigError, Environment, File};
use database_layer::DatabaseConfig;
use logger_redacted::LoggerConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

pub const ENV_PREFIX: &str = "HOSPITAL";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub name: String,
    pub host: String,
    pub port: u16,
    /// Allowed browser origins; empty disables CORS headers
    pub cors_origins: Vec<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            name: "Hospital Operations Engine".to_string(),
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:8080".to_string(),
            ],
        }
    }
}

impl ServerSettings {
    pub fn bind_address(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub database: DatabaseConfig,
    pub logging: LoggerConfig,
}

impl AppConfig {
    /// Load configuration. A missing file is not an error.
    ///
    /// `DATABASE_URL` is honoured when `HOSPITAL__DATABASE__URL` is unset.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let mut config: AppConfig = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?)
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        if config.database.url.is_none() {
            config.database.url = std::env::var("DATABASE_URL").ok();
        }
        Ok(config)
    }
}
