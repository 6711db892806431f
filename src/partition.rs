//! Chronological partitioning of a channel's history into day buckets.
//!
//! The fetcher hands over an accumulation whose order across pages is
//! meaningless. This module re-sorts it into forward chronological order
//! and splits the ordered stream into one [`DayBucket`] per local calendar
//! day, each keyed by its `YYYY-MM-DD.json` filename.
//!
//! Invariants:
//! - the union of all buckets, in emission order, equals the input set in
//!   ascending-timestamp order
//! - no message appears in two buckets
//! - no bucket spans more than one calendar day (local time)
//! - buckets are emitted in ascending date order
//!
//! # Example
//!
//! ```rust
//! use mpdump::Message;
//! use mpdump::partition::partition_by_day;
//!
//! let messages = vec![
//!     Message::new("1578009600"), // 2020-01-03 00:00 UTC
//!     Message::new("1577836800"), // 2020-01-01 00:00 UTC
//! ];
//!
//! let buckets = partition_by_day(messages)?;
//! assert_eq!(buckets.len(), 2);
//! # Ok::<(), mpdump::MpdumpError>(())
//! ```

use chrono::{DateTime, Local};

use crate::error::{MpdumpError, Result};
use crate::message::Message;
use crate::timestamp::day_filename;

/// The messages of one local calendar day, in ascending timestamp order,
/// keyed by the day file they will be written to.
#[derive(Debug, Clone, PartialEq)]
pub struct DayBucket {
    /// Output filename, `YYYY-MM-DD.json`.
    pub filename: String,
    /// The day's messages, ascending by timestamp.
    pub messages: Vec<Message>,
}

/// Sorts `messages` ascending by timestamp and groups contiguous runs by
/// local calendar day.
///
/// The sort is stable, so messages with equal instants keep their original
/// relative order — a defensive tie-break only, since timestamps within a
/// channel are unique.
///
/// # Errors
///
/// Returns [`MpdumpError::Timestamp`] when any message carries a malformed
/// or missing timestamp. A record that cannot be dated cannot be bucketed,
/// and skipping it would silently corrupt the export.
pub fn partition_by_day(messages: Vec<Message>) -> Result<Vec<DayBucket>> {
    let mut dated: Vec<(DateTime<Local>, Message)> = messages
        .into_iter()
        .map(|message| {
            let instant = message.local_instant()?.ok_or_else(|| MpdumpError::Timestamp {
                input: message.ts.clone(),
            })?;
            Ok((instant, message))
        })
        .collect::<Result<_>>()?;

    dated.sort_by(|a, b| a.0.cmp(&b.0));

    let mut buckets: Vec<DayBucket> = Vec::new();
    let mut current_filename = String::new();
    let mut current_messages: Vec<Message> = Vec::new();

    for (instant, message) in dated {
        let filename = day_filename(&instant);
        if filename != current_filename {
            flush(&mut buckets, &mut current_messages, &current_filename);
            current_filename = filename;
        }
        current_messages.push(message);
    }
    flush(&mut buckets, &mut current_messages, &current_filename);

    Ok(buckets)
}

/// Completes the current run as a bucket. A zero-length run is never
/// flushed, which also covers the initial no-current-day state.
fn flush(buckets: &mut Vec<DayBucket>, run: &mut Vec<Message>, filename: &str) {
    if run.is_empty() {
        return;
    }
    buckets.push(DayBucket {
        filename: filename.to_string(),
        messages: std::mem::take(run),
    });
}
