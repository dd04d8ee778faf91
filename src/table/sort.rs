//! Sort keys, directions and comparable cell values

use std::cmp::Ordering;
use chrono::{DateTime, Utc};
use crate::utils::helpers::parse_timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Arrow shown next to the active column header
    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        }
    }
}

/// Active sort column and direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortConfig {
    pub key: &'static str,
    pub direction: SortDirection,
}

/// Value of one cell as seen by the sorter
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Text(String),
    Number(f64),
    Date(DateTime<Utc>),
    Bool(bool),
    Missing,
}

impl SortValue {
    pub fn text(value: Option<&str>) -> Self {
        match value {
            Some(v) => SortValue::Text(v.to_string()),
            None => SortValue::Missing,
        }
    }

    pub fn number(value: Option<f64>) -> Self {
        match value {
            Some(v) if !v.is_nan() => SortValue::Number(v),
            _ => SortValue::Missing,
        }
    }

    /// Parse a backend timestamp; unparseable values count as missing
    pub fn date(value: Option<&str>) -> Self {
        value
            .and_then(parse_timestamp)
            .map(SortValue::Date)
            .unwrap_or(SortValue::Missing)
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, SortValue::Missing)
    }

    /// Ascending comparison between two present values.
    ///
    /// Text compares case-insensitively with the raw text as tie-breaker.
    /// Values of different kinds compare equal so that the stable sort keeps
    /// their original order.
    pub fn compare(&self, other: &SortValue) -> Ordering {
        match (self, other) {
            (SortValue::Text(a), SortValue::Text(b)) => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
            (SortValue::Number(a), SortValue::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (SortValue::Date(a), SortValue::Date(b)) => a.cmp(b),
            (SortValue::Bool(a), SortValue::Bool(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

/// Order two cells for `direction`; missing values go last either way
pub fn compare_for(a: &SortValue, b: &SortValue, direction: SortDirection) -> Ordering {
    match (a.is_missing(), b.is_missing()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => match direction {
            SortDirection::Asc => a.compare(b),
            SortDirection::Desc => b.compare(a),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_case_insensitive() {
        let a = SortValue::text(Some("alpha"));
        let b = SortValue::text(Some("Beta"));
        assert_eq!(a.compare(&b), Ordering::Less);
        assert_eq!(compare_for(&a, &b, SortDirection::Desc), Ordering::Greater);
    }

    #[test]
    fn test_dates_compare_chronologically() {
        let early = SortValue::date(Some("2024-12-31T21:00:00-03:00"));
        let late = SortValue::date(Some("2025-01-01T01:00:00Z"));
        assert_eq!(early.compare(&late), Ordering::Less);
    }

    #[test]
    fn test_missing_sorts_last_both_ways() {
        let present = SortValue::number(Some(1.0));
        let missing = SortValue::number(None);
        assert_eq!(compare_for(&missing, &present, SortDirection::Asc), Ordering::Greater);
        assert_eq!(compare_for(&missing, &present, SortDirection::Desc), Ordering::Greater);
        assert!(SortValue::date(Some("not a date")).is_missing());
    }

    #[test]
    fn test_mixed_kinds_are_equal() {
        let text = SortValue::text(Some("10"));
        let number = SortValue::Number(2.0);
        assert_eq!(text.compare(&number), Ordering::Equal);
    }

    #[test]
    fn test_direction_flip() {
        assert_eq!(SortDirection::Asc.flipped(), SortDirection::Desc);
        assert_eq!(SortDirection::Desc.flipped().indicator(), "▲");
    }
}
