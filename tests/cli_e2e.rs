//! End-to-end CLI tests for the iptv-checker binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds a command rooted in a scratch directory with explicit paths and
/// no inherited env-var config.
fn checker_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("iptv-checker").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("IPTV_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

/// Test that --help displays usage information and exits with code 0.
#[test]
fn test_binary_help_displays_usage() {
    let mut cmd = Command::cargo_bin("iptv-checker").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Validate IPTV playlists"));
}

/// Test that --version displays version and exits with code 0.
#[test]
fn test_binary_version_displays_version() {
    let mut cmd = Command::cargo_bin("iptv-checker").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("iptv-checker"));
}

/// Test that invalid flags cause non-zero exit.
#[test]
fn test_binary_invalid_flag_returns_error() {
    let mut cmd = Command::cargo_bin("iptv-checker").unwrap();
    cmd.arg("--invalid-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

/// An empty feed mapping aborts before parsing or probing, and the output
/// document is never created or modified.
#[test]
fn test_empty_sources_aborts_without_output() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.json"), r#"{"sources": {}}"#).unwrap();

    checker_cmd(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no sources configured"));

    assert!(
        !dir.path().join("valid.m3u").exists(),
        "aborted run must not create the output document"
    );
    assert!(
        !dir.path().join("source.m3u").exists(),
        "aborted run must not create the merged document"
    );
}

/// In check-only mode, a missing merged document is fatal and leaves no
/// output behind.
#[test]
fn test_check_only_missing_source_aborts() {
    let dir = TempDir::new().unwrap();

    checker_cmd(&dir)
        .arg("--check-only")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read merged playlist"));

    assert!(!dir.path().join("valid.m3u").exists());
}

/// Full run: aggregate one feed from a mock server, probe its stream, and
/// write the cleaned playlist.
#[test]
fn test_full_run_writes_cleaned_playlist() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let server = rt.block_on(async {
        let server = MockServer::start().await;

        let feed = format!(
            "#EXTM3U\n#EXTINF:-1 group-title=\"Upstream\",CNN\n{}/live\n",
            server.uri()
        );
        Mock::given(method("GET"))
            .and(path("/feed.m3u"))
            .respond_with(ResponseTemplate::new(200).set_body_string(feed))
            .mount(&server)
            .await;

        Mock::given(method("HEAD"))
            .and(path("/live"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/live"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x47u8; 500]))
            .mount(&server)
            .await;

        server
    });

    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.json"),
        format!(r#"{{"sources": {{"News": "{}/feed.m3u"}}}}"#, server.uri()),
    )
    .unwrap();

    checker_cmd(&dir).assert().success();

    // The merged document carries the configured category as the group.
    let merged = std::fs::read_to_string(dir.path().join("source.m3u")).unwrap();
    assert!(merged.contains("#EXTINF:-1 group-title=\"News\",CNN"));

    let cleaned = std::fs::read_to_string(dir.path().join("valid.m3u")).unwrap();
    assert_eq!(
        cleaned,
        format!(
            "#EXTM3U\n#EXTINF:-1 group-title=\"News\",CNN\n{}/live\n",
            server.uri()
        )
    );
}

/// Check-only mode validates an existing merged document without needing
/// any configured sources.
#[test]
fn test_check_only_validates_existing_document() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let server = rt.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/live"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/live"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x47u8; 500]))
            .mount(&server)
            .await;
        Mock::given(path("/dead"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        server
    });

    let dir = TempDir::new().unwrap();
    let merged = format!(
        "#EXTM3U\n\
         #EXTINF:-1 group-title=\"News\",Live\n{uri}/live\n\
         #EXTINF:-1 group-title=\"News\",Dead\n{uri}/dead\n",
        uri = server.uri()
    );
    std::fs::write(dir.path().join("source.m3u"), merged).unwrap();

    checker_cmd(&dir).arg("--check-only").assert().success();

    let cleaned = std::fs::read_to_string(dir.path().join("valid.m3u")).unwrap();
    assert_eq!(
        cleaned,
        format!(
            "#EXTM3U\n#EXTINF:-1 group-title=\"News\",Live\n{}/live\n",
            server.uri()
        )
    );
}
