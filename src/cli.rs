//! Command-line interface definition using clap.
//!
//! This module defines [`Args`], the CLI argument structure. The token can
//! come from `--token` or the `SLACK_API_TOKEN` environment variable; it
//! is deliberately optional at the parser level so the binary can report a
//! missing credential as a configuration error with its own exit status
//! instead of a generic usage error.

use clap::Parser;

/// Export multiparty direct messages (mpdm) from Slack into per-day
/// JSON files bundled as a zip archive.
#[derive(Parser, Debug, Clone)]
#[command(name = "mpdump")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    mpdump --token xoxp-1234-...
    SLACK_API_TOKEN=xoxp-1234-... mpdump
    mpdump -t xoxp-1234-... -o backups
    mpdump -t xoxp-1234-... --prefix mpdm --page-size 500")]
pub struct Args {
    /// Slack API token (see: https://api.slack.com/web)
    #[arg(short, long, env = "SLACK_API_TOKEN", value_name = "TOKEN")]
    pub token: Option<String>,

    /// Directory receiving the final archive
    #[arg(short, long, default_value = "dump_data", value_name = "DIR")]
    pub output: String,

    /// Only channels whose name starts with this prefix are exported
    #[arg(long, default_value = "mpdm", value_name = "PREFIX")]
    pub prefix: String,

    /// Messages requested per history page
    #[arg(long, default_value_t = 1000, value_name = "N")]
    pub page_size: u32,
}
