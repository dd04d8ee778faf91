//! User endpoints on the events backend; all calls carry the bearer token

use tracing::info;
use crate::models::{StatusResponse, UpdateUserPayload, User};
use crate::utils::errors::{AdminError, Result};
use super::http::RestClient;

/// Client for `/api/users`
#[derive(Debug, Clone)]
pub struct UserService {
    client: RestClient,
}

impl UserService {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        self.client.require_token()?;
        self.client.get("users", "Failed to load users").await
    }

    pub async fn get(&self, id: i64) -> Result<User> {
        self.client.require_token()?;
        self.client
            .get(&format!("users/{}", id), "Failed to load user")
            .await
            .map_err(|e| match e {
                AdminError::Api { status: 404, .. } => AdminError::not_found("User", id),
                other => other,
            })
    }

    pub async fn update(&self, payload: &UpdateUserPayload) -> Result<User> {
        self.client.require_token()?;
        let user: User = self
            .client
            .put_json(&format!("users/{}", payload.user_id), payload, "Failed to update profile")
            .await?;
        info!(user_id = user.user_id, "User updated");
        Ok(user)
    }

    /// Flip the active flag; returns the new status
    pub async fn toggle_status(&self, id: i64) -> Result<bool> {
        self.client.require_token()?;
        let response: StatusResponse = self
            .client
            .patch(&format!("users/{}/status", id), "Failed to change user status")
            .await?;
        info!(user_id = id, status = response.status, "User status toggled");
        Ok(response.status)
    }
}
