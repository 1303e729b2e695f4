//! Display helpers shared by every panel.
//!
//! Codes coming from query strings may be unknown to this client; those are shown verbatim.

use chrono::{DateTime, Utc};

use crate::features::reports::models::{Category, Priority, ReportStatus};

pub fn category_label(code: &str) -> String {
    code.parse::<Category>()
        .map(|c| c.label().to_string())
        .unwrap_or_else(|_| code.to_string())
}

pub fn status_label(code: &str) -> String {
    code.parse::<ReportStatus>()
        .map(|s| s.label().to_string())
        .unwrap_or_else(|_| code.to_string())
}

pub fn priority_label(code: &str) -> String {
    code.parse::<Priority>()
        .map(|p| p.label().to_string())
        .unwrap_or_else(|_| code.to_string())
}

/// Short date, e.g. `3/1/2024`
pub fn format_date(value: &DateTime<Utc>) -> String {
    value.format("%-m/%-d/%Y").to_string()
}

/// Date and time, e.g. `3/1/2024 10:05:00 AM`
pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value.format("%-m/%-d/%Y %-I:%M:%S %p").to_string()
}

pub fn format_optional_datetime(value: Option<&DateTime<Utc>>, missing: &str) -> String {
    value
        .map(format_datetime)
        .unwrap_or_else(|| missing.to_string())
}

/// First eight characters of an id followed by an ellipsis
pub fn short_id(id: &str) -> String {
    let head: String = id.chars().take(8).collect();
    format!("{}...", head)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_labels() {
        assert_eq!(category_label("water_leakage"), "Water Leakage");
        assert_eq!(status_label("in_progress"), "In Progress");
        assert_eq!(priority_label("urgent"), "Urgent");
    }

    #[test]
    fn test_unknown_codes_pass_through() {
        assert_eq!(category_label("sinkholes"), "sinkholes");
        assert_eq!(status_label("archived"), "archived");
    }

    #[test]
    fn test_dates() {
        let value = Utc.with_ymd_and_hms(2024, 3, 1, 14, 5, 9).unwrap();
        assert_eq!(format_date(&value), "3/1/2024");
        assert_eq!(format_datetime(&value), "3/1/2024 2:05:09 PM");
        assert_eq!(format_optional_datetime(None, "Never"), "Never");
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("65f0c0ffee123456"), "65f0c0ff...");
        assert_eq!(short_id("abc"), "abc...");
    }
}
