//! Events endpoints on the events backend

use reqwest::Method;
use tracing::{debug, info};
use crate::models::{CreateEventPayload, Event, UpdateEventPayload};
use crate::utils::errors::{AdminError, Result};
use super::http::{FilePart, RestClient};

/// Client for `/api/events`
#[derive(Debug, Clone)]
pub struct EventService {
    client: RestClient,
}

impl EventService {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Event>> {
        let events: Vec<Event> = self.client.get("events", "Failed to load events").await?;
        debug!(count = events.len(), "Loaded events");
        Ok(events)
    }

    pub async fn get(&self, id: i64) -> Result<Event> {
        self.client
            .get(&format!("events/{}", id), "Event not found")
            .await
            .map_err(|e| match e {
                AdminError::Api { status: 404, .. } => AdminError::not_found("Event", id),
                other => other,
            })
    }

    /// Create an event; the image, when given, is uploaded in the same form
    pub async fn create(&self, payload: &CreateEventPayload) -> Result<Event> {
        let file = payload.image_path.as_deref().map(|path| FilePart { field: "image", path });
        let event: Event = self
            .client
            .send_multipart(Method::POST, "events", payload.form_fields(), file, "Failed to create event")
            .await?;
        info!(event_id = event.event_id, "Event created");
        Ok(event)
    }

    pub async fn update(&self, payload: &UpdateEventPayload) -> Result<Event> {
        let file = payload.image_path.as_deref().map(|path| FilePart { field: "image", path });
        let event: Event = self
            .client
            .send_multipart(
                Method::PUT,
                &format!("events/{}", payload.event_id),
                payload.form_fields(),
                file,
                "Failed to update event",
            )
            .await?;
        info!(event_id = event.event_id, "Event updated");
        Ok(event)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.client
            .delete::<serde_json::Value>(&format!("events/{}", id), "Failed to delete event")
            .await?;
        info!(event_id = id, "Event deleted");
        Ok(())
    }
}
