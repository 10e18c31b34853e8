//! CLI entry point for the IPTV checker.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use iptv_checker::probe::FEED_TIMEOUT_SECS;
use iptv_checker::{
    Config, HttpClient, ValidationEngine, aggregate_feeds, parse_playlist, shuffle_entries,
    write_playlist,
};
use tracing::{debug, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");
    info!("IPTV checker starting");

    let config = Config::load(&args.config)?;

    // Stage 1: aggregate the configured feeds into the merged document,
    // unless we are re-checking an existing one.
    if args.check_only {
        info!(source = %args.source.display(), "check-only mode, skipping feed aggregation");
    } else {
        config.require_sources()?;
        let feed_client = HttpClient::with_timeout(Duration::from_secs(FEED_TIMEOUT_SECS));
        aggregate_feeds(&feed_client, &config.sources, &args.source).await?;
    }

    // Stage 2: parse the merged document. A missing document is fatal and
    // must leave the output file untouched.
    let document = std::fs::read_to_string(&args.source)
        .with_context(|| format!("failed to read merged playlist {}", args.source.display()))?;
    let mut entries = parse_playlist(&document);
    info!(entries = entries.len(), "parsed merged playlist");

    // Stage 3: shuffle so concurrent probes spread across hosts, then
    // validate in batches under the bounded worker pool.
    shuffle_entries(&mut entries);

    let engine = ValidationEngine::new(usize::from(args.concurrency), usize::from(args.batch_size))?;
    let probe_client = HttpClient::with_timeout(Duration::from_secs(args.timeout));
    let report = engine.validate(&probe_client, entries).await?;

    // Stage 4: write the survivors back in original document order.
    write_playlist(&args.output, &report.valid)?;

    info!(
        checked = report.stats.checked(),
        valid = report.stats.valid(),
        output = %args.output.display(),
        "task finished"
    );

    Ok(())
}
