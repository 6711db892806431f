//! # mpdump CLI
//!
//! Command-line interface for the mpdump library.

use std::fs;
use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser;

use mpdump::api::SlackClient;
use mpdump::archive::archive_tree;
use mpdump::cli::Args;
use mpdump::export::{ExportConfig, dump_groups};
use mpdump::{MpdumpError, Result};

fn main() {
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {e}");
        process::exit(e.exit_code());
    }
}

fn run(args: &Args) -> Result<()> {
    let total_start = Instant::now();

    let token = args
        .token
        .as_deref()
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            MpdumpError::Config(
                "the token flag is required (pass --token or set SLACK_API_TOKEN)".to_string(),
            )
        })?;

    println!("📦 mpdump v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("💾 Output:  {}", args.output);
    println!("🔖 Prefix:  {}", args.prefix);

    let output_dir = Path::new(&args.output);
    fs::create_dir_all(output_dir)?;

    let client = SlackClient::new(token)?;
    let identity = client
        .auth_test()
        .map_err(|e| MpdumpError::Config(format!("the token you used is not valid ({e})")))?;
    if let Some(team) = identity.team {
        println!("🔑 Team:    {team}");
    }
    println!();

    // The day-file tree is built in a scratch directory; only the zip
    // lands in the output directory.
    let workdir = tempfile::tempdir()?;

    println!("⏳ Exporting group history...");
    let config = ExportConfig {
        prefix: args.prefix.clone(),
        page_size: args.page_size,
    };
    let summary = dump_groups(&client, workdir.path(), &config)?;
    println!(
        "   {} messages from {} channels across {} day files",
        summary.messages, summary.channels, summary.files
    );

    println!("🗜️  Archiving...");
    let archive_path = archive_tree(workdir.path(), output_dir)?;

    let total_time = total_start.elapsed();
    println!();
    println!("✅ Done! Archive saved to {}", archive_path.display());
    println!("⚡ Total time: {:.2}s", total_time.as_secs_f64());

    Ok(())
}
