//! Ticket type model (payments backend)

use serde::{Deserialize, Serialize};
use crate::utils::helpers::lenient_f64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub event_id: String,
    pub name: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub price: f64,
    pub max_quantity: i64,
    pub current_stock: i64,
    pub is_active: bool,
    pub sales_start_at: String,
    pub sales_end_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Partial update sent with PUT
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TicketTypeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales_start_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales_end_at: Option<String>,
}
