//! Reservation model (payments backend)

use serde::{Deserialize, Serialize};
use crate::utils::helpers::{lenient_f64, lenient_option_f64};
use super::common::string_enum;

string_enum! {
    /// Lifecycle state of a reservation
    ReservationStatus {
        Pending => "pending",
        Confirmed => "confirmed",
        Cancelled => "cancelled",
        Expired => "expired",
    }
}

/// One ticket line inside a reservation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservedTicket {
    pub ticket_type_id: String,
    pub quantity: i64,
    #[serde(deserialize_with = "lenient_f64")]
    pub unit_price: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub subtotal: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: String,
    pub event_id: String,
    pub user_id: String,
    #[serde(default)]
    pub guest_email: Option<String>,
    #[serde(default)]
    pub tickets: Vec<ReservedTicket>,
    pub status: ReservationStatus,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub payment_reference: Option<String>,
    #[serde(deserialize_with = "lenient_f64")]
    pub total_amount: f64,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub taxes: Option<Vec<String>>,
    #[serde(default)]
    pub discount_code: Option<String>,
    #[serde(default)]
    pub queue_position: Option<i64>,
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(default)]
    pub cancellation_reason: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Reservation {
    /// Sum of ticket quantities
    pub fn ticket_count(&self) -> i64 {
        self.tickets.iter().map(|t| t.quantity).sum()
    }
}

/// Partial update sent with PUT
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReservationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ReservationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_reference: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_option_f64"
    )]
    pub total_amount: Option<f64>,
}

/// Body used to create a reservation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReservation {
    pub event_id: String,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_email: Option<String>,
    pub tickets: Vec<ReservedTicket>,
    pub status: ReservationStatus,
    pub total_amount: f64,
    pub currency: String,
}
