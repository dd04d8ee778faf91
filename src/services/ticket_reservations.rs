//! Ticket reservation endpoints on the events backend

use tracing::info;
use crate::models::{
    CreateGuestReservationPayload, CreateTicketReservationPayload, MessageResponse,
    TicketReservation, TokenCheck, UpdateTicketReservationPayload,
};
use crate::utils::errors::{AdminError, Result};
use crate::utils::helpers::is_valid_email;
use super::http::RestClient;

/// Client for ticket reservations made against events
#[derive(Debug, Clone)]
pub struct TicketReservationService {
    client: RestClient,
}

impl TicketReservationService {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    fn check_quantity(quantity: i64) -> Result<()> {
        if quantity <= 0 {
            return Err(AdminError::validation("Quantity must be at least 1"));
        }
        Ok(())
    }

    pub async fn create(&self, payload: &CreateTicketReservationPayload) -> Result<TicketReservation> {
        self.client.require_token()?;
        Self::check_quantity(payload.quantity)?;
        let reservation: TicketReservation = self
            .client
            .post_json("ticket-reservations", payload, "Failed to create reservation")
            .await?;
        info!(reservation_id = reservation.reservation_id, "Ticket reservation created");
        Ok(reservation)
    }

    /// Reservation on behalf of a guest; no token needed
    pub async fn create_guest(&self, payload: &CreateGuestReservationPayload) -> Result<TicketReservation> {
        Self::check_quantity(payload.quantity)?;
        if payload.guest_name.trim().is_empty() {
            return Err(AdminError::validation("Guest name is required"));
        }
        if !is_valid_email(&payload.guest_email) {
            return Err(AdminError::validation("Guest email is not valid"));
        }
        let reservation: TicketReservation = self
            .client
            .post_json("guest-reservations", payload, "Guest reservation failed")
            .await?;
        info!(reservation_id = reservation.reservation_id, "Guest reservation created");
        Ok(reservation)
    }

    pub async fn mine(&self) -> Result<Vec<TicketReservation>> {
        self.client.require_token()?;
        self.client.get("my-reservations", "Failed to load your reservations").await
    }

    /// Only the quantity can change
    pub async fn update(&self, payload: &UpdateTicketReservationPayload) -> Result<TicketReservation> {
        self.client.require_token()?;
        Self::check_quantity(payload.quantity)?;
        let body = serde_json::json!({ "quantity": payload.quantity });
        self.client
            .put_json(
                &format!("ticket-reservations/{}", payload.reservation_id),
                &body,
                "Failed to update reservation",
            )
            .await
    }

    pub async fn cancel(&self, reservation_id: i64) -> Result<MessageResponse> {
        self.client.require_token()?;
        let response: Option<MessageResponse> = self
            .client
            .delete(&format!("ticket-reservations/{}", reservation_id), "Failed to cancel reservation")
            .await?;
        info!(reservation_id = reservation_id, "Ticket reservation cancelled");
        Ok(response.unwrap_or(MessageResponse { message: String::new() }))
    }

    /// Download the reservation voucher as PDF bytes
    pub async fn pdf(&self, reservation_id: i64) -> Result<Vec<u8>> {
        self.client.require_token()?;
        self.client
            .get_bytes(&format!("ticket-reservations/{}/pdf", reservation_id), "Failed to fetch PDF")
            .await
    }

    pub async fn check_token(&self) -> Result<bool> {
        self.client.require_token()?;
        let check: TokenCheck = self.client.get("check-token", "Invalid token").await?;
        Ok(check.valid)
    }
}
