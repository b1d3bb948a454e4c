use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::trace;

use crate::error::{BillingError, Result};

/// Number of seconds in the only billing granularity we aggregate.
pub const HOURLY_INTERVAL_SECS: i64 = 3600;

// ── Timestamp parsing ─────────────────────────────────────────────────────────

/// Parse an ISO 8601 timestamp as found in billing reports into UTC.
///
/// Accepts RFC 3339 (`2017-03-01T00:00:00Z`, any fixed offset), the
/// minute-precision form AWS uses in `identity/TimeInterval`
/// (`2017-03-01T00:00Z`), and naive date-times which are taken as UTC.
/// Returns `None` for empty strings or unrecognised formats.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    // Replace trailing 'Z' with '+00:00'.
    let normalised = if let Some(stripped) = s.strip_suffix('Z') {
        format!("{}+00:00", stripped)
    } else {
        s.to_string()
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalised) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(&normalised, "%Y-%m-%dT%H:%M%:z") {
        return Some(dt.with_timezone(&Utc));
    }

    const NAIVE_FMTS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
    ];
    for fmt in NAIVE_FMTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }

    trace!("could not parse timestamp \"{}\"", s);
    None
}

// ── TimeInterval ──────────────────────────────────────────────────────────────

/// The `identity/TimeInterval` column: `"<start>/<end>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeInterval {
    /// Parse `"<start>/<end>"`, splitting on the first `/`.
    pub fn parse(field: &str) -> Result<Self> {
        let (start_raw, end_raw) = field.split_once('/').ok_or_else(|| {
            BillingError::malformed(format!("time interval \"{}\" has no '/' separator", field))
        })?;

        let start = parse_timestamp(start_raw).ok_or_else(|| {
            BillingError::malformed(format!("invalid interval start \"{}\"", start_raw))
        })?;
        let end = parse_timestamp(end_raw).ok_or_else(|| {
            BillingError::malformed(format!("invalid interval end \"{}\"", end_raw))
        })?;

        Ok(Self { start, end })
    }

    /// Interval length in whole seconds. Negative when `end` precedes `start`.
    pub fn duration_secs(&self) -> i64 {
        (self.end - self.start).num_seconds()
    }

    pub fn is_hourly(&self) -> bool {
        self.duration_secs() == HOURLY_INTERVAL_SECS
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone as _, Timelike};

    // ── parse_timestamp ──────────────────────────────────────────────────────

    #[test]
    fn test_parse_timestamp_z_suffix() {
        let dt = parse_timestamp("2017-03-01T10:30:00Z").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2017, 3, 1, 10, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_timestamp_minute_precision() {
        let dt = parse_timestamp("2017-03-01T01:00Z").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2017, 3, 1, 1, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_timestamp_with_offset() {
        let dt = parse_timestamp("2017-03-01T12:00:00+02:00").unwrap();
        // 12:00 +02:00 = 10:00 UTC
        assert_eq!(dt.hour(), 10);
    }

    #[test]
    fn test_parse_timestamp_naive_is_utc() {
        let dt = parse_timestamp("2017-03-01 05:00:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2017, 3, 1, 5, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_timestamp_empty_returns_none() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("   ").is_none());
    }

    #[test]
    fn test_parse_timestamp_garbage_returns_none() {
        assert!(parse_timestamp("not-a-date").is_none());
    }

    // ── TimeInterval ─────────────────────────────────────────────────────────

    #[test]
    fn test_interval_hourly() {
        let interval = TimeInterval::parse("2017-03-01T00:00:00Z/2017-03-01T01:00:00Z").unwrap();
        assert_eq!(interval.duration_secs(), 3600);
        assert!(interval.is_hourly());
        assert_eq!(interval.end, Utc.with_ymd_and_hms(2017, 3, 1, 1, 0, 0).unwrap());
    }

    #[test]
    fn test_interval_daily_is_not_hourly() {
        let interval = TimeInterval::parse("2017-03-01T00:00Z/2017-03-02T00:00Z").unwrap();
        assert_eq!(interval.duration_secs(), 86_400);
        assert!(!interval.is_hourly());
    }

    #[test]
    fn test_interval_inverted_is_negative() {
        let interval = TimeInterval::parse("2017-03-01T01:00Z/2017-03-01T00:00Z").unwrap();
        assert_eq!(interval.duration_secs(), -3600);
        assert!(!interval.is_hourly());
    }

    #[test]
    fn test_interval_without_separator_is_malformed() {
        let err = TimeInterval::parse("2017-03-01T00:00:00Z").unwrap_err();
        assert!(matches!(err, BillingError::MalformedRow { .. }));
    }

    #[test]
    fn test_interval_with_bad_end_is_malformed() {
        let err = TimeInterval::parse("2017-03-01T00:00:00Z/tomorrow").unwrap_err();
        assert!(err.to_string().contains("tomorrow"));
    }
}
