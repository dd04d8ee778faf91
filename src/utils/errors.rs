//! Error handling for TicketNow Admin
//!
//! This module defines the main error type used throughout the console
//! and classifies errors for logging and exit codes.

use thiserror::Error;

/// Main error type for the admin console
#[derive(Error, Debug)]
pub enum AdminError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("{resource} not found: {id}")]
    NotFound { resource: String, id: String },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias for admin console operations
pub type Result<T> = std::result::Result<T, AdminError>;

impl AdminError {
    /// Shorthand for a validation failure
    pub fn validation(message: impl Into<String>) -> Self {
        AdminError::Validation(message.into())
    }

    /// Shorthand for a missing record
    pub fn not_found(resource: &str, id: impl ToString) -> Self {
        AdminError::NotFound {
            resource: resource.to_string(),
            id: id.to_string(),
        }
    }

    /// HTTP status carried by the error, if it came from a backend response
    pub fn status(&self) -> Option<u16> {
        match self {
            AdminError::Api { status, .. } => Some(*status),
            AdminError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            AdminError::Config(_) => false,
            AdminError::ConfigLoad(_) => false,
            AdminError::Http(_) => true,
            AdminError::Api { status, .. } => *status >= 500 || *status == 429,
            AdminError::NotFound { .. } => false,
            AdminError::Validation(_) => true,
            AdminError::Authentication(_) => false,
            AdminError::Serialization(_) => false,
            AdminError::Io(_) => true,
            AdminError::UrlParse(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AdminError::Config(_) => ErrorSeverity::Critical,
            AdminError::ConfigLoad(_) => ErrorSeverity::Critical,
            AdminError::UrlParse(_) => ErrorSeverity::Critical,
            AdminError::Authentication(_) => ErrorSeverity::Warning,
            AdminError::NotFound { .. } => ErrorSeverity::Warning,
            AdminError::Validation(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
