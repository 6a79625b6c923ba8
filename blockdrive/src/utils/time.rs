use chrono::{DateTime, Utc};

/// Returns the current time in whole seconds since the Unix epoch.
pub fn now_unix_seconds() -> i64 {
    Utc::now().timestamp()
}

/// Formats a Unix timestamp (seconds) as RFC 3339, e.g. "1970-01-01T00:16:40+00:00".
///
/// Out-of-range values are rendered as the raw number.
pub fn format_unix_seconds(seconds: i64) -> String {
    DateTime::<Utc>::from_timestamp(seconds, 0)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| seconds.to_string())
}
