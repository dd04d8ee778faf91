//! Event model

use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use crate::utils::helpers::lenient_option_f64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub event_id: i64,
    pub event_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub event_type_id: Option<i64>,
    pub start_datetime: String,
    pub end_datetime: String,
    pub capacity: i64,
    #[serde(default, deserialize_with = "lenient_option_f64")]
    pub base_price: Option<f64>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Fields submitted when creating an event; sent as a multipart form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateEventPayload {
    pub event_name: String,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub event_type_id: Option<i64>,
    pub start_datetime: String,
    pub end_datetime: String,
    pub capacity: i64,
    pub base_price: Option<f64>,
    /// Local image forwarded as the `image` file part
    pub image_path: Option<PathBuf>,
}

/// Partial update; only present fields are sent
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateEventPayload {
    pub event_id: i64,
    pub event_name: Option<String>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub event_type_id: Option<i64>,
    pub start_datetime: Option<String>,
    pub end_datetime: Option<String>,
    pub capacity: Option<i64>,
    pub base_price: Option<f64>,
    pub image_path: Option<PathBuf>,
}

impl CreateEventPayload {
    /// Text fields of the multipart form, in submission order
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("event_name", self.event_name.clone())];
        push_non_empty(&mut fields, "description", self.description.as_deref());
        push_non_empty(&mut fields, "short_description", self.short_description.as_deref());
        if let Some(type_id) = self.event_type_id {
            fields.push(("event_type_id", type_id.to_string()));
        }
        fields.push(("start_datetime", self.start_datetime.clone()));
        fields.push(("end_datetime", self.end_datetime.clone()));
        fields.push(("capacity", self.capacity.to_string()));
        if let Some(price) = self.base_price {
            fields.push(("base_price", price.to_string()));
        }
        fields
    }
}

impl UpdateEventPayload {
    /// Text fields of the multipart form; absent fields are left untouched by the backend
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        push_non_empty(&mut fields, "event_name", self.event_name.as_deref());
        push_non_empty(&mut fields, "description", self.description.as_deref());
        push_non_empty(&mut fields, "short_description", self.short_description.as_deref());
        if let Some(type_id) = self.event_type_id {
            fields.push(("event_type_id", type_id.to_string()));
        }
        push_non_empty(&mut fields, "start_datetime", self.start_datetime.as_deref());
        push_non_empty(&mut fields, "end_datetime", self.end_datetime.as_deref());
        if let Some(capacity) = self.capacity {
            fields.push(("capacity", capacity.to_string()));
        }
        if let Some(price) = self.base_price {
            fields.push(("base_price", price.to_string()));
        }
        fields
    }
}

fn push_non_empty(fields: &mut Vec<(&'static str, String)>, name: &'static str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        fields.push((name, value.to_string()));
    }
}
