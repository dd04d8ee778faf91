//! Identity endpoints on the events backend
//!
//! The console only forwards credentials and hands the returned token to the
//! other services; session storage and refresh are left to the identity
//! service.

use tracing::{info, warn};
use crate::models::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::utils::errors::{AdminError, Result};
use crate::utils::helpers::is_valid_email;
use super::http::RestClient;

/// Minimum password length accepted by the login form
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Authentication client
#[derive(Debug, Clone)]
pub struct AuthService {
    client: RestClient,
}

impl AuthService {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    /// Check the login form before any request is made
    pub fn validate_credentials(email: &str, password: &str) -> Result<()> {
        if email.trim().is_empty() {
            return Err(AdminError::validation("Email is required"));
        }
        if password.is_empty() {
            return Err(AdminError::validation("Password is required"));
        }
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AdminError::validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }
        Ok(())
    }

    /// Exchange credentials for an access token
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        Self::validate_credentials(email, password)?;

        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };

        match self.client.post_json::<_, LoginResponse>("login", &request, "Invalid credentials").await {
            Ok(response) => {
                info!(user_id = response.user.user_id, "Login succeeded");
                Ok(response)
            }
            Err(AdminError::Api { status: 400, message }) | Err(AdminError::Authentication(message)) => {
                warn!("Login rejected");
                Err(AdminError::Authentication(message))
            }
            Err(e) => Err(e),
        }
    }

    /// Register a new account
    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse> {
        Self::validate_credentials(&request.email, &request.password)?;
        if !is_valid_email(&request.email) {
            return Err(AdminError::validation("Email address is not valid"));
        }

        let response: RegisterResponse = self
            .client
            .post_json("register", request, "Registration failed")
            .await?;
        info!(user_id = response.user.user_id, "Account registered");
        Ok(response)
    }
}
