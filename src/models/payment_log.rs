//! Payment log model (payments backend)

use serde::{Deserialize, Serialize};
use crate::utils::helpers::{lenient_f64, lenient_option_f64};
use super::common::string_enum;

string_enum! {
    /// Outcome recorded for a payment attempt
    PaymentStatus {
        Pending => "pending",
        Approved => "approved",
        Failed => "failed",
        Refunded => "refunded",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentLog {
    pub id: String,
    pub reservation_id: String,
    pub status: PaymentStatus,
    #[serde(deserialize_with = "lenient_f64")]
    pub amount: f64,
    #[serde(default)]
    pub gateway_response: Option<serde_json::Value>,
    #[serde(default)]
    pub registered_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Body used to create a payment log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPaymentLog {
    pub reservation_id: String,
    pub status: PaymentStatus,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_response: Option<serde_json::Value>,
}

/// Partial update sent with PUT
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentLogUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PaymentStatus>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_option_f64"
    )]
    pub amount: Option<f64>,
}
