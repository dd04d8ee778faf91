//! Payment log endpoints on the payments backend

use tracing::info;
use crate::models::{CreatedId, PaymentLog, NewPaymentLog, PaymentLogUpdate};
use crate::utils::errors::{AdminError, Result};
use super::http::RestClient;

/// Client for `/payment-logs`. Logs are written by the payment gateway
/// integration; the console only corrects or removes them.
#[derive(Debug, Clone)]
pub struct PaymentLogService {
    client: RestClient,
}

impl PaymentLogService {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    fn item_path(id: &str) -> String {
        format!("payment-logs/{}", urlencoding::encode(id))
    }

    pub async fn list(&self) -> Result<Vec<PaymentLog>> {
        self.client.get("payment-logs", "Failed to load payment logs").await
    }

    pub async fn get(&self, id: &str) -> Result<PaymentLog> {
        self.client
            .get(&Self::item_path(id), "Payment log not found")
            .await
            .map_err(|e| match e {
                AdminError::Api { status: 404, .. } => AdminError::not_found("Payment log", id),
                other => other,
            })
    }

    pub async fn create(&self, payload: &NewPaymentLog) -> Result<CreatedId> {
        let created: CreatedId = self.client.post_json("payment-logs", payload, "Failed to create payment log").await?;
        info!(id = %created.id, "Payment log created");
        Ok(created)
    }

    pub async fn update(&self, id: &str, changes: &PaymentLogUpdate) -> Result<()> {
        self.client
            .put_json::<_, serde_json::Value>(&Self::item_path(id), changes, "Failed to update payment log")
            .await?;
        info!(id = id, "Payment log updated");
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .delete::<serde_json::Value>(&Self::item_path(id), "Failed to delete payment log")
            .await?;
        info!(id = id, "Payment log deleted");
        Ok(())
    }
}
