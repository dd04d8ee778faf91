//! Ticket type endpoints on the payments backend

use tracing::info;
use crate::models::{CreatedId, TicketType, TicketTypeUpdate};
use crate::utils::errors::{AdminError, Result};
use super::http::RestClient;

/// Client for `/ticket-types`
#[derive(Debug, Clone)]
pub struct TicketTypeService {
    client: RestClient,
}

impl TicketTypeService {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    fn item_path(id: &str) -> String {
        format!("ticket-types/{}", urlencoding::encode(id))
    }

    pub async fn list(&self) -> Result<Vec<TicketType>> {
        self.client.get("ticket-types", "Failed to load ticket types").await
    }

    pub async fn get(&self, id: &str) -> Result<TicketType> {
        self.client
            .get(&Self::item_path(id), "Ticket type not found")
            .await
            .map_err(|e| match e {
                AdminError::Api { status: 404, .. } => AdminError::not_found("Ticket type", id),
                other => other,
            })
    }

    pub async fn create(&self, payload: &TicketType) -> Result<CreatedId> {
        let created: CreatedId = self.client.post_json("ticket-types", payload, "Failed to create ticket type").await?;
        info!(id = %created.id, "Ticket type created");
        Ok(created)
    }

    pub async fn update(&self, id: &str, changes: &TicketTypeUpdate) -> Result<()> {
        self.client
            .put_json::<_, serde_json::Value>(&Self::item_path(id), changes, "Failed to update ticket type")
            .await?;
        info!(id = id, "Ticket type updated");
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .delete::<serde_json::Value>(&Self::item_path(id), "Failed to delete ticket type")
            .await?;
        info!(id = id, "Ticket type deleted");
        Ok(())
    }

    /// Ticket types on sale for one event
    pub async fn for_event(&self, event_id: &str) -> Result<Vec<TicketType>> {
        let all = self.list().await?;
        Ok(all.into_iter().filter(|t| t.event_id == event_id).collect())
    }
}
