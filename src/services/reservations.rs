//! Reservation endpoints on the payments backend

use tracing::info;
use crate::models::{CreatedId, NewReservation, Reservation, ReservationStatus, ReservationUpdate};
use crate::utils::errors::{AdminError, Result};
use super::http::RestClient;

/// Client for `/reservations`
#[derive(Debug, Clone)]
pub struct ReservationService {
    client: RestClient,
}

impl ReservationService {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    fn item_path(id: &str) -> String {
        format!("reservations/{}", urlencoding::encode(id))
    }

    pub async fn list(&self) -> Result<Vec<Reservation>> {
        self.client.get("reservations", "Failed to load reservations").await
    }

    pub async fn get(&self, id: &str) -> Result<Reservation> {
        self.client
            .get(&Self::item_path(id), "Reservation not found")
            .await
            .map_err(|e| match e {
                AdminError::Api { status: 404, .. } => AdminError::not_found("Reservation", id),
                other => other,
            })
    }

    pub async fn create(&self, payload: &NewReservation) -> Result<CreatedId> {
        let created: CreatedId = self.client.post_json("reservations", payload, "Failed to create reservation").await?;
        info!(id = %created.id, "Reservation created");
        Ok(created)
    }

    pub async fn update(&self, id: &str, changes: &ReservationUpdate) -> Result<()> {
        self.client
            .put_json::<_, serde_json::Value>(&Self::item_path(id), changes, "Failed to update reservation")
            .await?;
        info!(id = id, "Reservation updated");
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .delete::<serde_json::Value>(&Self::item_path(id), "Failed to delete reservation")
            .await?;
        info!(id = id, "Reservation deleted");
        Ok(())
    }

    /// Cancel a reservation, recording why
    pub async fn cancel(&self, id: &str, reason: Option<&str>) -> Result<()> {
        let changes = ReservationUpdate {
            status: Some(ReservationStatus::Cancelled),
            cancellation_reason: reason.map(str::to_string),
            ..Default::default()
        };
        self.update(id, &changes).await
    }
}
