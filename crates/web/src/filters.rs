//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use chrono::{DateTime, Utc};

/// Format a timestamp for display.
///
/// Usage in templates: `{{ post.created_at|datetime }}`
#[askama::filter_fn]
pub fn datetime(value: &DateTime<Utc>, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format_datetime(value))
}

fn format_datetime(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_datetime_format() {
        let ts = Utc.with_ymd_and_hms(2026, 1, 24, 17, 5, 0).unwrap();
        assert_eq!(format_datetime(&ts), "2026-01-24 17:05");
    }
}
