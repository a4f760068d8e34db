// Logger configuration
use crate::redactor::RedactionConfig;
use serde::{Deserialize, Serialize};

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable single-line output
    Pretty,
    /// Structured JSON, one object per line
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub redaction_enabled: bool,
    /// Replace sensitive values with a short digest instead of a mask
    pub hash_for_correlation: bool,
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub log_level: String,
    pub format: LogFormat,
    pub include_targets: bool,
}

impl LoggerConfig {
    pub fn redaction_config(&self) -> RedactionConfig {
        RedactionConfig {
            hash_for_correlation: self.hash_for_correlation,
            ..RedactionConfig::default()
        }
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            redaction_enabled: true,
            hash_for_correlation: false,
            log_level: "info,sqlx=warn,tower_http=info".to_string(),
            format: LogFormat::Pretty,
            include_targets: true,
        }
    }
}
