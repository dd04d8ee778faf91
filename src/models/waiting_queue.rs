//! Waiting queue entry model (payments backend)

use serde::{Deserialize, Serialize};
use super::common::string_enum;

string_enum! {
    /// Position of an entry in the waiting flow
    QueueStatus {
        Waiting => "waiting",
        Notified => "notified",
        Expired => "expired",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaitingQueue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub reservation_id: String,
    pub event_id: String,
    pub user_id: String,
    pub status: QueueStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Partial update sent with PUT
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaitingQueueUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<QueueStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation_id: Option<String>,
}
