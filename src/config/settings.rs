//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use std::path::Path;
use serde::{Deserialize, Serialize};

/// Environment variable prefix, e.g. `TICKETNOW__API__EXPRESS_URL`
pub const ENV_PREFIX: &str = "TICKETNOW";

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub api: ApiConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    pub dashboard: DashboardConfig,
    pub logging: LoggingConfig,
}

/// Backend endpoints
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Events backend root; resources live under `/api`
    pub express_url: String,
    /// Payments backend root
    pub fastapi_url: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

/// Credentials forwarded to the backends
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    pub token: Option<String>,
}

/// List screen configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DashboardConfig {
    pub page_size: usize,
    pub reservations_page_size: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for the daily rolling log file; disabled when absent
    pub file_path: Option<String>,
}

impl Settings {
    /// Load settings from `config.toml` (if present) and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::build(config::File::with_name("config").required(false))
    }

    /// Load settings from an explicit file plus environment variables
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        Self::build(config::File::from(path.as_ref()).required(true))
    }

    fn build<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let defaults = Settings::default();

        let settings = config::Config::builder()
            .set_default("api.express_url", defaults.api.express_url)?
            .set_default("api.fastapi_url", defaults.api.fastapi_url)?
            .set_default("api.timeout_seconds", defaults.api.timeout_seconds)?
            .set_default("api.user_agent", defaults.api.user_agent)?
            .set_default("dashboard.page_size", defaults.dashboard.page_size as u64)?
            .set_default(
                "dashboard.reservations_page_size",
                defaults.dashboard.reservations_page_size as u64,
            )?
            .set_default("logging.level", defaults.logging.level)?
            .add_source(file)
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::AdminError> {
        super::validation::validate_settings(self)
    }

    /// Settings with the bearer token replaced, e.g. from a command line flag
    pub fn with_token(mut self, token: Option<String>) -> Self {
        if token.is_some() {
            self.auth.token = token;
        }
        self
    }

    /// Copy safe to print: the token is masked
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.auth.token.is_some() {
            copy.auth.token = Some("********".to_string());
        }
        copy
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                express_url: "http://localhost:3000".to_string(),
                fastapi_url: "http://localhost:8000".to_string(),
                timeout_seconds: 15,
                user_agent: format!("ticketnow-admin/{}", env!("CARGO_PKG_VERSION")),
            },
            auth: AuthConfig::default(),
            dashboard: DashboardConfig {
                page_size: 10,
                reservations_page_size: 5,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: None,
            },
        }
    }
}
