use std::env;
use std::time::Duration;

use crate::workflows::applications::screening::ScreeningConfig;

/// Top-level configuration for the workflow core.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub telemetry: TelemetryConfig,
    pub screening: ScreeningConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let screening = match env::var("SCORING_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidTimeout { value: raw.clone() })?;
                if secs == 0 {
                    return Err(ConfigError::InvalidTimeout { value: raw });
                }
                ScreeningConfig {
                    scoring_timeout: Duration::from_secs(secs),
                }
            }
            Err(_) => ScreeningConfig::default(),
        };

        Ok(Self {
            telemetry: TelemetryConfig { log_level },
            screening,
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid SCORING_TIMEOUT_SECS '{value}': expected a positive whole number of seconds")]
    InvalidTimeout { value: String },
}
