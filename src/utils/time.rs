//! Time utilities

use chrono::{DateTime, SecondsFormat, Utc};

/// Get current UTC time
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// RFC 3339 with second precision and a `Z` suffix
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp() {
        let dt = DateTime::parse_from_rfc3339("2024-01-15T12:00:00.750+02:00")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(format_timestamp(&dt), "2024-01-15T10:00:00Z");
    }
}
