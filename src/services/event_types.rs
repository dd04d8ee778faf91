//! Event type endpoints on the events backend

use tracing::info;
use crate::models::{CreateEventTypePayload, EventType, UpdateEventTypePayload};
use crate::utils::errors::{AdminError, Result};
use super::http::RestClient;

/// Client for `/api/event-types`
#[derive(Debug, Clone)]
pub struct EventTypeService {
    client: RestClient,
}

impl EventTypeService {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<EventType>> {
        self.client.get("event-types", "Failed to load event types").await
    }

    pub async fn get(&self, id: i64) -> Result<EventType> {
        self.client
            .get(&format!("event-types/{}", id), "Event type not found")
            .await
            .map_err(|e| match e {
                AdminError::Api { status: 404, .. } => AdminError::not_found("Event type", id),
                other => other,
            })
    }

    pub async fn create(&self, payload: &CreateEventTypePayload) -> Result<EventType> {
        let created: EventType = self
            .client
            .post_json("event-types", payload, "Failed to create event type")
            .await?;
        info!(event_type_id = created.event_type_id, "Event type created");
        Ok(created)
    }

    pub async fn update(&self, payload: &UpdateEventTypePayload) -> Result<EventType> {
        let updated: EventType = self
            .client
            .put_json(
                &format!("event-types/{}", payload.event_type_id),
                payload,
                "Failed to update event type",
            )
            .await?;
        info!(event_type_id = updated.event_type_id, "Event type updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.client
            .delete::<serde_json::Value>(&format!("event-types/{}", id), "Failed to delete event type")
            .await?;
        info!(event_type_id = id, "Event type deleted");
        Ok(())
    }
}
