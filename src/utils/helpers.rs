//! Helper functions and utilities
//!
//! This module contains formatting and parsing helpers shared by the
//! screens, the renderer and the models.

use std::sync::OnceLock;
use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Deserializer};

/// Display format used in every table
pub const DISPLAY_DATETIME_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Format accepted by `datetime-local` style inputs
pub const DATETIME_LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Parse a backend or form timestamp.
///
/// Accepts RFC 3339, naive ISO timestamps with seconds (treated as UTC) and
/// `datetime-local` values without seconds.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", DATETIME_LOCAL_FORMAT] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    None
}

/// Format a timestamp string as `dd/MM/yyyy HH:mm`, or empty when absent or unparseable
pub fn format_display_datetime(value: Option<&str>) -> String {
    value
        .and_then(parse_timestamp)
        .map(|dt| dt.format(DISPLAY_DATETIME_FORMAT).to_string())
        .unwrap_or_default()
}

/// Convert a backend timestamp into the `YYYY-MM-DDTHH:MM` form used by edit forms
pub fn to_datetime_local(value: &str) -> Option<String> {
    parse_timestamp(value).map(|dt| dt.format(DATETIME_LOCAL_FORMAT).to_string())
}

/// Format a money amount with two decimals
pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// Truncate text to a maximum number of characters with ellipsis
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_length.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}

/// Create a pagination info string; `current_page` is zero-based.
/// An empty list still reads as page 1 of 1.
pub fn create_pagination_info(current_page: usize, total_pages: usize, total_items: usize) -> String {
    format!(
        "Page {} of {} (Total: {})",
        current_page + 1,
        total_pages.max(1),
        total_items
    )
}

/// Validate email format
pub fn is_valid_email(email: &str) -> bool {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(email))
}

/// Validate phone number format (basic validation)
pub fn is_valid_phone(phone: &str) -> bool {
    phone.chars().all(|c| c.is_ascii_digit() || c == '+' || c == '-' || c == ' ')
        && phone.chars().filter(|c| c.is_ascii_digit()).count() >= 7
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

/// Parse a money amount the backend serialized as text, e.g. `"350.00"`
pub fn parse_amount(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

fn number_from(value: NumberOrString) -> Option<f64> {
    match value {
        NumberOrString::Number(n) => Some(n),
        NumberOrString::Text(s) => parse_amount(&s),
    }
}

/// Deserialize a number that the backend may send as a JSON number or a numeric string
pub fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = NumberOrString::deserialize(deserializer)?;
    number_from(value).ok_or_else(|| serde::de::Error::custom("expected a number or numeric string"))
}

/// Optional variant of [`lenient_f64`]; unparseable strings become `None`
pub fn lenient_option_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<NumberOrString>::deserialize(deserializer)?;
    Ok(value.and_then(number_from))
}
