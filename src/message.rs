//! Core data types for a Slack export.
//!
//! This module provides [`Message`], the record every other module works
//! with, plus the [`Group`] channel descriptor and the [`HistoryPage`]
//! batch returned by the paginated history endpoint.
//!
//! # Verbatim payloads
//!
//! An export is a backup: whatever fields Slack attaches to a message
//! (user, text, reactions, attachments, subtype, ...) must come back out
//! byte-for-byte on serialization. `Message` therefore captures only the
//! one field the pipeline actually interprets — the `ts` timestamp string —
//! and folds everything else into a flattened [`serde_json::Map`] that is
//! carried through untouched.
//!
//! # Examples
//!
//! ```rust
//! use mpdump::Message;
//!
//! let msg: Message = serde_json::from_str(
//!     r#"{"ts": "1610000000.000100", "user": "U123", "text": "hello"}"#,
//! )?;
//!
//! assert_eq!(msg.ts(), "1610000000.000100");
//! assert_eq!(msg.payload["text"], "hello");
//! # Ok::<(), serde_json::Error>(())
//! ```

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::timestamp::parse_slack_ts;

/// One message as returned by the Slack history endpoint.
///
/// The `ts` string is the message identity: a decimal Unix epoch with an
/// optional fractional microsecond suffix, unique and monotonically
/// assigned within a channel. All other platform fields are preserved
/// verbatim in `payload` and round-trip through serialization unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// The Slack timestamp string identifying this message.
    #[serde(default)]
    pub ts: String,

    /// Every other platform-defined field, preserved verbatim.
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Message {
    /// Creates a message with the given timestamp and an empty payload.
    pub fn new(ts: impl Into<String>) -> Self {
        Self {
            ts: ts.into(),
            payload: Map::new(),
        }
    }

    /// Builder method to attach a payload field.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mpdump::Message;
    ///
    /// let msg = Message::new("1610000000").with_field("text", "hello");
    /// assert_eq!(msg.payload["text"], "hello");
    /// ```
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    /// Returns the raw timestamp string.
    pub fn ts(&self) -> &str {
        &self.ts
    }

    /// Parses the timestamp into a local-time instant.
    ///
    /// Returns `Ok(None)` when the message carries no timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`MpdumpError::Timestamp`](crate::MpdumpError::Timestamp)
    /// for a malformed timestamp string.
    pub fn local_instant(&self) -> Result<Option<DateTime<Local>>> {
        parse_slack_ts(&self.ts)
    }
}

/// A channel as returned by the group listing endpoint.
///
/// Only the fields the export pipeline needs are kept: the opaque channel
/// ID used for history requests and the display name used both for the
/// eligibility check (the `mpdm` prefix) and the on-disk directory name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Opaque channel ID (e.g. `G024BE91L`).
    pub id: String,
    /// Display name (e.g. `mpdm-alice--bob--carol-1`).
    pub name: String,
}

impl Group {
    /// Creates a group descriptor.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// One bounded batch from the history endpoint.
///
/// Messages arrive in strictly **descending** timestamp order (newest
/// first), so the last message in the batch carries the oldest timestamp —
/// which is exactly the pagination cursor for the next request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HistoryPage {
    /// The messages in this batch, newest first.
    pub messages: Vec<Message>,
    /// Whether older history remains beyond this batch.
    pub has_more: bool,
}

impl HistoryPage {
    /// Creates a page from messages and a continuation flag.
    pub fn new(messages: Vec<Message>, has_more: bool) -> Self {
        Self { messages, has_more }
    }

    /// The timestamp of the oldest message in the page, if any.
    ///
    /// Because pages are newest-first this is the last entry — the cursor
    /// for requesting the next older page.
    pub fn oldest_ts(&self) -> Option<&str> {
        self.messages.last().map(|m| m.ts())
    }
}
