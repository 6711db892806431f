//! # mpdump
//!
//! A Rust library and CLI for exporting multiparty direct messages (mpdm)
//! from Slack into per-day JSON files bundled as a zip archive.
//!
//! ## Overview
//!
//! Slack's history endpoint hands back bounded pages, newest first, with a
//! timestamp cursor for walking backwards. mpdump drains that feed one
//! channel at a time, re-sorts the accumulated history into forward
//! chronological order, splits it at local-midnight boundaries, and writes
//! one pretty-printed JSON file per calendar day — then bundles the whole
//! tree into a single timestamped archive.
//!
//! The pipeline is fully sequential by design: each pagination request's
//! cursor depends on the previous response, so there is nothing to fan
//! out. A run either completes or aborts on the first unrecoverable error;
//! there are no retries and no partial-channel recovery.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mpdump::api::SlackClient;
//! use mpdump::archive::archive_tree;
//! use mpdump::export::{ExportConfig, dump_groups};
//! use mpdump::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let client = SlackClient::new("xoxp-...")?;
//!     client.auth_test()?;
//!
//!     let workdir = tempfile::tempdir()?;
//!     let summary = dump_groups(&client, workdir.path(), &ExportConfig::default())?;
//!     println!("{} messages across {} files", summary.messages, summary.files);
//!
//!     archive_tree(workdir.path(), "dump_data".as_ref())?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`timestamp`] — Slack timestamp strings to local instants, day-file names
//! - [`message`] — [`Message`], [`Group`](message::Group),
//!   [`HistoryPage`](message::HistoryPage)
//! - [`api`] — the Web API client ([`SlackClient`](api::SlackClient)) and the
//!   [`HistorySource`](api::HistorySource) trait seam
//! - [`history`] — cursor-based pagination
//!   ([`fetch_full_history`](history::fetch_full_history))
//! - [`partition`] — day bucketing ([`partition_by_day`](partition::partition_by_day))
//! - [`output`] — escaped pretty-JSON day files
//! - [`export`] — the per-channel driver ([`dump_groups`](export::dump_groups))
//! - [`archive`] — the zip sink ([`archive_tree`](archive::archive_tree))
//! - [`cli`] — CLI types ([`Args`](cli::Args))
//! - [`error`] — unified error types ([`MpdumpError`], [`Result`])
//! - [`prelude`] — convenient re-exports

pub mod api;
pub mod archive;
pub mod cli;
pub mod error;
pub mod export;
pub mod history;
pub mod message;
pub mod output;
pub mod partition;
pub mod timestamp;

// Re-export the main types at the crate root for convenience
pub use error::{MpdumpError, Result};
pub use message::Message;

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use mpdump::prelude::*;
/// ```
pub mod prelude {
    // Core message types
    pub use crate::message::{Group, HistoryPage, Message};

    // Error types
    pub use crate::error::{MpdumpError, Result};

    // The API client and the seam the core consumes
    pub use crate::api::{HistorySource, SlackClient};

    // Pipeline stages
    pub use crate::export::{ExportConfig, ExportSummary, dump_groups};
    pub use crate::history::fetch_full_history;
    pub use crate::partition::{DayBucket, partition_by_day};

    // Output and archival
    pub use crate::archive::archive_tree;
    pub use crate::output::{to_slack_json, write_day_file};
}
