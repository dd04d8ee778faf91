//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use url::Url;
use crate::utils::errors::{AdminError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_api_config(&settings.api)?;
    validate_auth_config(&settings.auth)?;
    validate_dashboard_config(&settings.dashboard)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

fn validate_base_url(name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(AdminError::Config(format!("{} is required", name)));
    }

    let url = Url::parse(value)?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(AdminError::Config(format!(
            "{} must use http or https, got '{}'",
            name,
            url.scheme()
        )));
    }

    Ok(())
}

/// Validate backend configuration
fn validate_api_config(config: &super::ApiConfig) -> Result<()> {
    validate_base_url("Events backend URL", &config.express_url)?;
    validate_base_url("Payments backend URL", &config.fastapi_url)?;

    if config.timeout_seconds == 0 {
        return Err(AdminError::Config(
            "API timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate credentials configuration
fn validate_auth_config(config: &super::AuthConfig) -> Result<()> {
    if let Some(token) = &config.token {
        if token.trim().is_empty() {
            return Err(AdminError::Config(
                "Auth token must not be blank when set".to_string()
            ));
        }
    }

    Ok(())
}

/// Validate list screen configuration
fn validate_dashboard_config(config: &super::DashboardConfig) -> Result<()> {
    if config.page_size == 0 || config.reservations_page_size == 0 {
        return Err(AdminError::Config(
            "Page sizes must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(AdminError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(AdminError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
