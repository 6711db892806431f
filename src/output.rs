//! Day-file serialization and writing.
//!
//! Each [`DayBucket`](crate::partition::DayBucket) becomes one pretty
//! printed JSON array on disk. The serialized text gets Slack's escaping
//! convention applied afterwards, so the files match what the platform's
//! own exporter produces:
//!
//! | Serialized | Written |
//! |------------|---------|
//! | `\u003c` | `<` |
//! | `\u003e` | `>` |
//! | `\u0026` | `&` |
//! | `/` | `\/` |
//!
//! `serde_json` leaves `<`, `>`, and `&` unescaped in the first place, so
//! the first three substitutions only undo escapes that arrived inside
//! verbatim payload text. The `/` substitution always applies.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::Serializer;
use serde_json::ser::PrettyFormatter;

use crate::error::Result;
use crate::message::Message;

/// Serializes messages as a four-space-indented JSON array with Slack's
/// escaping convention applied.
///
/// # Example
///
/// ```rust
/// use mpdump::Message;
/// use mpdump::output::to_slack_json;
///
/// let messages = vec![Message::new("1610000000").with_field("text", "a/b")];
/// let json = to_slack_json(&messages)?;
/// assert!(json.contains(r"a\/b"));
/// # Ok::<(), mpdump::MpdumpError>(())
/// ```
pub fn to_slack_json(messages: &[Message]) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    messages.serialize(&mut serializer)?;

    let json = String::from_utf8(buf)?
        .replace("\\u003c", "<")
        .replace("\\u003e", ">")
        .replace("\\u0026", "&")
        .replace('/', "\\/");

    Ok(json)
}

/// Reverses the escaping convention, yielding plain JSON again.
///
/// Round-trip helper: `undo_slack_escapes(to_slack_json(m))` parses back
/// to exactly the structured content that went in.
pub fn undo_slack_escapes(json: &str) -> String {
    json.replace("\\/", "/")
}

/// Writes one day bucket under `root/channel_path/filename`.
///
/// Creates the channel directory as needed. A call with an empty message
/// list or a blank path component is silently ignored — the driver never
/// issues one, and an empty file must never appear on disk.
///
/// # Errors
///
/// Returns [`MpdumpError::Io`](crate::MpdumpError::Io) when the directory
/// or file cannot be written.
pub fn write_day_file(
    root: &Path,
    channel_path: &Path,
    filename: &str,
    messages: &[Message],
) -> Result<()> {
    if messages.is_empty()
        || root.as_os_str().is_empty()
        || channel_path.as_os_str().is_empty()
        || filename.is_empty()
    {
        return Ok(());
    }

    let dir = root.join(channel_path);
    fs::create_dir_all(&dir)?;

    let json = to_slack_json(messages)?;
    fs::write(dir.join(filename), json)?;
    Ok(())
}
