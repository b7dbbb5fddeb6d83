//! Formatting helpers for timestamps and ages shown by the CLI

use chrono::{DateTime, Duration, Local, Utc};

/// Format a UTC instant as local date/time.
///
/// # Example output
/// `2026-10-17 14:30`
pub fn format_timestamp_local(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// Format the age of an entry.
///
/// # Example output
/// - `3d 4h` (days, hours)
/// - `2h 15m` (hours, minutes)
/// - `5m` (minutes only)
/// - `just now` (under a minute)
/// - `in the future` (clock skew)
pub fn format_age(age: Duration) -> String {
    if age < Duration::zero() {
        return "in the future".to_string();
    }

    let days = age.num_days();
    let hours = age.num_hours() % 24;
    let mins = age.num_minutes() % 60;

    if days > 0 {
        format!("{}d {}h", days, hours)
    } else if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else if mins > 0 {
        format!("{}m", mins)
    } else {
        "just now".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_timestamp_local_has_date() {
        let at = Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap();
        // Exact output depends on local TZ, but the date survives any offset
        assert!(format_timestamp_local(at).starts_with("2025-01-15"));
    }

    #[test]
    fn test_format_age_days() {
        assert_eq!(format_age(Duration::days(3) + Duration::hours(4)), "3d 4h");
        assert_eq!(format_age(Duration::days(30)), "30d 0h");
    }

    #[test]
    fn test_format_age_hours_minutes() {
        assert_eq!(format_age(Duration::minutes(135)), "2h 15m");
        assert_eq!(format_age(Duration::minutes(5)), "5m");
    }

    #[test]
    fn test_format_age_small_and_negative() {
        assert_eq!(format_age(Duration::seconds(10)), "just now");
        assert_eq!(format_age(Duration::seconds(-10)), "in the future");
    }
}
