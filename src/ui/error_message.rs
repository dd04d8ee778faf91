//! Inline error display for list screens

use std::fmt;
use crate::utils::errors::AdminError;

/// Message shown above a table when loading failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMessage {
    message: String,
    cause: Option<String>,
}

impl ErrorMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: None,
        }
    }

    /// Screen-level message with the underlying error kept for verbose output
    pub fn with_cause(message: impl Into<String>, cause: &AdminError) -> Self {
        Self {
            message: message.into(),
            cause: Some(cause.to_string()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> Option<&str> {
        self.cause.as_deref()
    }
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error: {}", self.message)?;
        if f.alternate() {
            if let Some(cause) = &self.cause {
                write!(f, " ({})", cause)?;
            }
        }
        Ok(())
    }
}
