//! EPG schedule extractor
//! Scans XMLTV guide documents and emits per-day channel schedules as JSON.

use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::Utc;
use clap::Parser;
use tracing::{info, warn};

mod channels;
mod config;
mod error;
mod guide;
mod models;
mod schedule;

use config::ScrapeConfig;
use schedule::DayLabel;

#[derive(Parser)]
#[command(
    name = "epg_schedule",
    about = "Extract today/tomorrow channel schedules from XMLTV guides"
)]
struct Cli {
    /// Guide documents (.xml or .xml.gz), highest priority first
    sources: Vec<PathBuf>,
    /// JSON config file; flags given here override its values
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Channel list file, one `id, display name` per line
    #[arg(long)]
    channels: Option<PathBuf>,
    /// Fixed UTC offset of the target timezone, e.g. +0700
    #[arg(short, long)]
    timezone: Option<String>,
    /// Write the schedule here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Pretty-print the emitted JSON
    #[arg(long)]
    pretty: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let mut cfg = match &cli.config {
        Some(path) => ScrapeConfig::load(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => ScrapeConfig::default(),
    };
    if !cli.sources.is_empty() {
        cfg.sources = cli.sources;
    }
    if let Some(path) = cli.channels {
        cfg.channel_list = path;
    }
    if let Some(tz) = cli.timezone {
        cfg.timezone = tz;
    }
    if let Some(path) = cli.output {
        cfg.output = Some(path);
    }

    if cfg.sources.is_empty() {
        bail!("no guide sources given (pass paths as arguments or set `sources` in the config)");
    }

    let tz = schedule::parse_zone_offset(&cfg.timezone)?;

    let targets = channels::load_channel_list(&cfg.channel_list)
        .with_context(|| format!("reading channel list {}", cfg.channel_list.display()))?;
    if targets.is_empty() {
        bail!(
            "channel list {} has no usable entries",
            cfg.channel_list.display()
        );
    }

    // One `now` snapshot drives every window in the run.
    let now = Utc::now().with_timezone(&tz);
    let windows = schedule::build_windows(now, &DayLabel::ALL);
    for window in &windows {
        info!(
            "window {}: {} ({} to {})",
            window.label.key(),
            window.local_date,
            window.start,
            window.end
        );
    }

    let mut sources = Vec::new();
    for path in &cfg.sources {
        match guide::load_file(path) {
            Ok(data) => {
                info!(
                    "loaded {}: {} channels, {} programmes, {} xml errors",
                    path.display(),
                    data.channels.len(),
                    data.program_count(),
                    data.xml_errors
                );
                sources.push(data);
            }
            Err(err) => warn!("skipping source: {err}"),
        }
    }
    if sources.is_empty() {
        bail!("no guide source yielded any data");
    }

    let (days, report) = schedule::assemble(&sources, &targets, &windows);

    let json = if cli.pretty {
        serde_json::to_string_pretty(&days)?
    } else {
        serde_json::to_string(&days)?
    };
    match &cfg.output {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("writing schedule to {}", path.display()))?;
            info!("schedule written to {}", path.display());
        }
        None => println!("{json}"),
    }

    info!(
        "run complete: {} channels written, {} unresolved, {} empty, {} malformed timestamps",
        report.written_channels,
        report.unresolved_channels,
        report.empty_channels,
        report.malformed_timestamps
    );

    Ok(())
}
