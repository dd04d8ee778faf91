//! Waiting queue entry endpoints on the payments backend

use tracing::info;
use crate::models::{CreatedId, QueueStatus, WaitingQueue, WaitingQueueUpdate};
use crate::utils::errors::{AdminError, Result};
use super::http::RestClient;

/// Client for `/waiting-queues`
#[derive(Debug, Clone)]
pub struct WaitingQueueService {
    client: RestClient,
}

impl WaitingQueueService {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    fn item_path(id: &str) -> String {
        format!("waiting-queues/{}", urlencoding::encode(id))
    }

    pub async fn list(&self) -> Result<Vec<WaitingQueue>> {
        self.client.get("waiting-queues", "Failed to load waiting queue").await
    }

    pub async fn get(&self, id: &str) -> Result<WaitingQueue> {
        self.client
            .get(&Self::item_path(id), "Waiting queue entry not found")
            .await
            .map_err(|e| match e {
                AdminError::Api { status: 404, .. } => AdminError::not_found("Waiting queue entry", id),
                other => other,
            })
    }

    pub async fn create(&self, payload: &WaitingQueue) -> Result<CreatedId> {
        let created: CreatedId = self.client.post_json("waiting-queues", payload, "Failed to create waiting queue entry").await?;
        info!(id = %created.id, "Waiting queue entry created");
        Ok(created)
    }

    pub async fn update(&self, id: &str, changes: &WaitingQueueUpdate) -> Result<()> {
        self.client
            .put_json::<_, serde_json::Value>(&Self::item_path(id), changes, "Failed to update waiting queue entry")
            .await?;
        info!(id = id, "Waiting queue entry updated");
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .delete::<serde_json::Value>(&Self::item_path(id), "Failed to delete waiting queue entry")
            .await?;
        info!(id = id, "Waiting queue entry deleted");
        Ok(())
    }

    /// Mark an entry as notified so the user can complete the purchase
    pub async fn notify(&self, id: &str) -> Result<()> {
        let changes = WaitingQueueUpdate {
            status: Some(QueueStatus::Notified),
            ..Default::default()
        };
        self.update(id, &changes).await
    }
}
