//! Slack timestamp parsing and day-file naming.
//!
//! Slack identifies every message with a fixed-point timestamp string such
//! as `"1610000000.123456"`: a decimal Unix-seconds epoch, optionally
//! followed by a fractional microsecond suffix joined by a literal `.`.
//! Within one channel these strings are unique and monotonically assigned,
//! which is what makes them usable both as pagination cursors and as sort
//! keys.
//!
//! The fraction is informational only — day bucketing works on whole
//! seconds. The instant is converted to the process **local** time zone
//! before any date component is extracted, so day boundaries are local-time
//! boundaries, not UTC.
//!
//! # Example
//!
//! ```rust
//! use mpdump::timestamp::parse_slack_ts;
//!
//! let instant = parse_slack_ts("1610000000.000200")?.unwrap();
//! assert_eq!(instant.timestamp(), 1_610_000_000);
//!
//! // An empty string means "no timestamp", not an error.
//! assert!(parse_slack_ts("")?.is_none());
//! # Ok::<(), mpdump::MpdumpError>(())
//! ```

use chrono::{DateTime, Datelike, Local, TimeZone};

use crate::error::{MpdumpError, Result};

/// Parses a Slack timestamp string into a local-time instant.
///
/// Returns `Ok(None)` for an empty string (the "no timestamp" sentinel).
///
/// # Errors
///
/// Returns [`MpdumpError::Timestamp`] when the string contains more than
/// one `.`, or when the integer part does not parse as a base-10 integer.
/// A malformed timestamp is a data-integrity problem: callers abort the
/// export rather than skip the record.
pub fn parse_slack_ts(ts: &str) -> Result<Option<DateTime<Local>>> {
    if ts.is_empty() {
        return Ok(None);
    }

    let seconds = match ts.split_once('.') {
        None => ts,
        // Only the part before the first `.` matters; the fraction is
        // discarded for bucketing.
        Some((seconds, fraction)) if !fraction.contains('.') => seconds,
        Some(_) => return Err(malformed(ts)),
    };

    let epoch: i64 = seconds.parse().map_err(|_| malformed(ts))?;

    Local
        .timestamp_opt(epoch, 0)
        .single()
        .map(Some)
        .ok_or_else(|| malformed(ts))
}

/// The day-file name for a local instant: `YYYY-MM-DD.json`.
///
/// Month and day are zero-padded, so files sort lexicographically in
/// chronological order.
///
/// # Example
///
/// ```rust
/// use chrono::{Local, TimeZone};
/// use mpdump::timestamp::day_filename;
///
/// let instant = Local.with_ymd_and_hms(2020, 1, 2, 9, 30, 0).unwrap();
/// assert_eq!(day_filename(&instant), "2020-01-02.json");
/// ```
pub fn day_filename(instant: &DateTime<Local>) -> String {
    format!(
        "{:04}-{:02}-{:02}.json",
        instant.year(),
        instant.month(),
        instant.day()
    )
}

fn malformed(input: &str) -> MpdumpError {
    MpdumpError::Timestamp {
        input: input.to_string(),
    }
}
