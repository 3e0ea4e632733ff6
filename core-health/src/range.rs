//! Query windows expressed in epoch milliseconds.

use chrono::{DateTime, Duration, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// Half-open `[start_ms, end_ms)` window.
///
/// No ordering is enforced here; the repository rejects malformed windows
/// before any provider sees them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    pub start_ms: i64,
    pub end_ms: i64,
}

impl TimeRange {
    pub fn new(start_ms: i64, end_ms: i64) -> Self {
        Self { start_ms, end_ms }
    }

    /// Local calendar day containing `instant`, from midnight to the next
    /// midnight in `offset`.
    ///
    /// Returns `None` only at the edges of chrono's representable range.
    pub fn day_containing(instant: DateTime<Utc>, offset: FixedOffset) -> Option<Self> {
        let local_midnight = instant
            .with_timezone(&offset)
            .date_naive()
            .and_hms_opt(0, 0, 0)?
            .and_local_timezone(offset)
            .single()?;
        let next_midnight = local_midnight.checked_add_signed(Duration::days(1))?;

        Some(Self::new(
            local_midnight.timestamp_millis(),
            next_midnight.timestamp_millis(),
        ))
    }

    /// Window of `length` ending at `end`.
    pub fn trailing(end: DateTime<Utc>, length: Duration) -> Option<Self> {
        let start = end.checked_sub_signed(length)?;
        Some(Self::new(start.timestamp_millis(), end.timestamp_millis()))
    }

    pub fn duration_ms(&self) -> i64 {
        self.end_ms.saturating_sub(self.start_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const DAY_MS: i64 = 86_400_000;

    #[test]
    fn test_day_containing_utc() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 1, 15, 30, 0).unwrap();
        let range = TimeRange::day_containing(instant, FixedOffset::east_opt(0).unwrap()).unwrap();

        assert_eq!(range.start_ms, 1_709_251_200_000);
        assert_eq!(range.end_ms, 1_709_251_200_000 + DAY_MS);
        assert_eq!(range.duration_ms(), DAY_MS);
    }

    #[test]
    fn test_day_containing_respects_offset() {
        // 23:30 UTC on Feb 29 is already March 1 in UTC+2.
        let instant = Utc.with_ymd_and_hms(2024, 2, 29, 23, 30, 0).unwrap();
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let range = TimeRange::day_containing(instant, offset).unwrap();

        // Local midnight March 1 (UTC+2) is 22:00 UTC on Feb 29.
        assert_eq!(range.start_ms, 1_709_251_200_000 - 2 * 3_600_000);
        assert_eq!(range.duration_ms(), DAY_MS);
        assert!(range.start_ms <= instant.timestamp_millis());
        assert!(instant.timestamp_millis() < range.end_ms);
    }

    #[test]
    fn test_trailing_window() {
        let end = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let range = TimeRange::trailing(end, Duration::minutes(60)).unwrap();

        assert_eq!(range.end_ms, end.timestamp_millis());
        assert_eq!(range.duration_ms(), 3_600_000);
    }
}
