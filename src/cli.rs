//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use iptv_checker::probe::PROBE_TIMEOUT_SECS;
use iptv_checker::{DEFAULT_BATCH_SIZE, DEFAULT_CONCURRENCY};

/// Validate IPTV playlists and keep only live streams.
///
/// Downloads the configured feeds into one merged playlist, probes every
/// stream URL concurrently, and writes a cleaned playlist containing only
/// the live entries in their original order.
#[derive(Parser, Debug)]
#[command(name = "iptv-checker")]
#[command(author, version, about)]
pub struct Args {
    /// Path to the JSON config file with the feed mapping
    #[arg(long, default_value = "config.json")]
    pub config: PathBuf,

    /// Path of the merged source playlist
    #[arg(long, default_value = "source.m3u")]
    pub source: PathBuf,

    /// Path of the cleaned output playlist
    #[arg(long, default_value = "valid.m3u")]
    pub output: PathBuf,

    /// Skip feed aggregation and validate an existing merged playlist
    #[arg(long)]
    pub check_only: bool,

    /// Maximum concurrent probes (1-64)
    #[arg(short = 'c', long, default_value_t = DEFAULT_CONCURRENCY as u8, value_parser = clap::value_parser!(u8).range(1..=64))]
    pub concurrency: u8,

    /// Entries probed per batch (1-10000)
    #[arg(short = 'b', long, default_value_t = DEFAULT_BATCH_SIZE as u16, value_parser = clap::value_parser!(u16).range(1..=10000))]
    pub batch_size: u16,

    /// Per-request probe timeout in seconds (1-300)
    #[arg(short = 't', long, default_value_t = PROBE_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..=300))]
    pub timeout: u64,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_args_parses_successfully() {
        let args = Args::try_parse_from(["iptv-checker"]).unwrap();
        assert_eq!(args.config, PathBuf::from("config.json"));
        assert_eq!(args.source, PathBuf::from("source.m3u"));
        assert_eq!(args.output, PathBuf::from("valid.m3u"));
        assert!(!args.check_only);
        assert_eq!(args.concurrency, 8); // DEFAULT_CONCURRENCY
        assert_eq!(args.batch_size, 100); // DEFAULT_BATCH_SIZE
        assert_eq!(args.timeout, 8); // PROBE_TIMEOUT_SECS
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);
    }

    #[test]
    fn test_cli_check_only_flag() {
        let args = Args::try_parse_from(["iptv-checker", "--check-only"]).unwrap();
        assert!(args.check_only);
    }

    #[test]
    fn test_cli_path_overrides() {
        let args = Args::try_parse_from([
            "iptv-checker",
            "--config",
            "/tmp/c.json",
            "--source",
            "/tmp/s.m3u",
            "--output",
            "/tmp/v.m3u",
        ])
        .unwrap();
        assert_eq!(args.config, PathBuf::from("/tmp/c.json"));
        assert_eq!(args.source, PathBuf::from("/tmp/s.m3u"));
        assert_eq!(args.output, PathBuf::from("/tmp/v.m3u"));
    }

    #[test]
    fn test_cli_concurrency_bounds() {
        let args = Args::try_parse_from(["iptv-checker", "-c", "1"]).unwrap();
        assert_eq!(args.concurrency, 1);

        let args = Args::try_parse_from(["iptv-checker", "-c", "64"]).unwrap();
        assert_eq!(args.concurrency, 64);

        let result = Args::try_parse_from(["iptv-checker", "-c", "0"]);
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::ValueValidation
        );

        let result = Args::try_parse_from(["iptv-checker", "-c", "65"]);
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::ValueValidation
        );
    }

    #[test]
    fn test_cli_batch_size_bounds() {
        let args = Args::try_parse_from(["iptv-checker", "-b", "1"]).unwrap();
        assert_eq!(args.batch_size, 1);

        let result = Args::try_parse_from(["iptv-checker", "-b", "0"]);
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::ValueValidation
        );
    }

    #[test]
    fn test_cli_timeout_flag() {
        let args = Args::try_parse_from(["iptv-checker", "-t", "30"]).unwrap();
        assert_eq!(args.timeout, 30);

        let result = Args::try_parse_from(["iptv-checker", "-t", "0"]);
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::ValueValidation
        );
    }

    #[test]
    fn test_cli_verbose_flag_increments_count() {
        let args = Args::try_parse_from(["iptv-checker", "-v"]).unwrap();
        assert_eq!(args.verbose, 1);

        let args = Args::try_parse_from(["iptv-checker", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_cli_quiet_flag_sets_quiet() {
        let args = Args::try_parse_from(["iptv-checker", "-q"]).unwrap();
        assert!(args.quiet);
    }

    #[test]
    fn test_cli_invalid_flag_returns_error() {
        let result = Args::try_parse_from(["iptv-checker", "--invalid-flag"]);
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::UnknownArgument
        );
    }
}
