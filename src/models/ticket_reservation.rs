//! Ticket reservation model (events backend, bearer protected)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketReservation {
    pub reservation_id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub event_id: Option<i64>,
    pub quantity: i64,
    pub total_price: String,
    pub reserved_at: String,
    #[serde(default)]
    pub guest_email: Option<String>,
    #[serde(default)]
    pub guest_name: Option<String>,
    #[serde(default)]
    pub guest_phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTicketReservationPayload {
    pub event_id: i64,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateGuestReservationPayload {
    pub event_id: i64,
    pub quantity: i64,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateTicketReservationPayload {
    pub reservation_id: i64,
    pub quantity: i64,
}
