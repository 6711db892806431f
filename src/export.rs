//! The export driver: channels in, day files out.
//!
//! For every eligible channel — one whose name carries the multiparty
//! direct-message prefix — the driver fetches the complete history,
//! partitions it into day buckets, and writes one JSON file per bucket
//! under `private_channel/<channel-name>/`. Namespacing by the channel
//! type label and the display name keeps two channels with messages on
//! the same date from ever colliding.
//!
//! Channels yielding zero messages produce zero files and are skipped
//! silently. Processing is strictly sequential: one channel at a time,
//! fully fetched before partitioning, fully partitioned before writing.
//!
//! # Example
//!
//! ```rust,no_run
//! use mpdump::api::SlackClient;
//! use mpdump::export::{ExportConfig, dump_groups};
//!
//! let client = SlackClient::new("xoxp-...")?;
//! let summary = dump_groups(&client, "/tmp/export".as_ref(), &ExportConfig::default())?;
//! println!("{} files from {} channels", summary.files, summary.channels);
//! # Ok::<(), mpdump::MpdumpError>(())
//! ```

use std::path::Path;

use crate::api::HistorySource;
use crate::error::Result;
use crate::history::fetch_full_history;
use crate::message::Group;
use crate::output::write_day_file;
use crate::partition::partition_by_day;

/// The coarse channel-type label namespacing every export path.
///
/// mpdm groups are a flavor of private channel, and that is the directory
/// Slack's own export format files them under.
pub const GROUP_CHANNEL_TYPE: &str = "private_channel";

/// Export settings.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Channels are eligible when their name starts with this prefix.
    pub prefix: String,
    /// Messages requested per history page.
    pub page_size: u32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            prefix: "mpdm".to_string(),
            page_size: 1000,
        }
    }
}

/// What an export run produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Eligible channels that yielded at least one message.
    pub channels: usize,
    /// Day files written.
    pub files: usize,
    /// Messages exported.
    pub messages: usize,
}

/// Exports every eligible group into a day-file tree under `root`.
///
/// Lists all groups once, filters by name prefix, and runs the
/// fetch/partition/write pipeline per channel.
///
/// # Errors
///
/// The first error — listing, fetching, timestamp parsing, or writing —
/// aborts the whole export. Files already written for prior channels
/// remain on disk; there is no per-channel isolation.
pub fn dump_groups<S: HistorySource>(
    source: &S,
    root: &Path,
    config: &ExportConfig,
) -> Result<ExportSummary> {
    let groups = source.list_groups()?;

    let mut summary = ExportSummary::default();
    for group in groups.iter().filter(|g| g.name.starts_with(&config.prefix)) {
        let written = dump_channel(source, root, group, config)?;
        if written.files > 0 {
            summary.channels += 1;
            summary.files += written.files;
            summary.messages += written.messages;
        }
    }

    Ok(summary)
}

struct ChannelOutcome {
    files: usize,
    messages: usize,
}

/// Fetch, partition, and write one channel. Returns what was written;
/// a channel with no history writes nothing.
fn dump_channel<S: HistorySource>(
    source: &S,
    root: &Path,
    group: &Group,
    config: &ExportConfig,
) -> Result<ChannelOutcome> {
    let messages = fetch_full_history(source, &group.id, config.page_size)?;
    if messages.is_empty() {
        return Ok(ChannelOutcome {
            files: 0,
            messages: 0,
        });
    }

    let total = messages.len();
    let buckets = partition_by_day(messages)?;

    let channel_path = Path::new(GROUP_CHANNEL_TYPE).join(&group.name);
    for bucket in &buckets {
        write_day_file(root, &channel_path, &bucket.filename, &bucket.messages)?;
    }

    Ok(ChannelOutcome {
        files: buckets.len(),
        messages: total,
    })
}
