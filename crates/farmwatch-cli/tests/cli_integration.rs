//! CLI Integration Tests
//!
//! These tests run the `farmwatch` binary and check its output and exit
//! codes. Feed requests go to a local mock server.
//!
//! ```
//! cargo test --package farmwatch-cli --test cli_integration
//! ```

#![allow(clippy::unwrap_used)]

use std::path::Path;
use std::process::{Command, Output};

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Get path to the farmwatch binary
fn get_binary_path() -> String {
    env!("CARGO_BIN_EXE_farmwatch").to_string()
}

/// Run farmwatch with a clean environment and an isolated config file.
fn run_farmwatch(config: &Path, args: &[&str]) -> Output {
    Command::new(get_binary_path())
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("FARMWATCH_CHANNEL_ID")
        .env_remove("FARMWATCH_READ_API_KEY")
        .env_remove("FARMWATCH_BASE_URL")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to run farmwatch binary")
}

const FEED: &str = r#"{
    "channel": {"id": 3066267, "name": "Farm"},
    "feeds": [{
        "created_at": "2024-01-01T10:00:00Z",
        "entry_id": 7,
        "field1": "25", "field2": "22", "field3": "50", "field4": "1"
    }]
}"#;

// =============================================================================
// Help and Version Tests
// =============================================================================

#[test]
fn test_help_command() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_farmwatch(&dir.path().join("config.toml"), &["--help"]);

    assert!(output.status.success(), "Help should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("farmwatch"), "Help should name the binary");
    assert!(stdout.contains("read"), "Help should list read command");
    assert!(stdout.contains("watch"), "Help should list watch command");
    assert!(stdout.contains("config"), "Help should list config command");
}

#[test]
fn test_version_command() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_farmwatch(&dir.path().join("config.toml"), &["--version"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_read_help_lists_formats() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_farmwatch(&dir.path().join("config.toml"), &["read", "--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--format"));
    assert!(stdout.contains("json"));
}

// =============================================================================
// Config Tests
// =============================================================================

#[test]
fn test_config_path_uses_override() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("custom.toml");
    let output = run_farmwatch(&config, &["config", "path"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), config.display().to_string());
}

#[test]
fn test_config_init_then_show_masks_key() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("farmwatch").join("config.toml");

    let output = run_farmwatch(&config, &["config", "init"]);
    assert!(output.status.success());
    assert!(config.exists());

    let output = run_farmwatch(&config, &["config", "init"]);
    assert!(!output.status.success(), "Init should refuse to overwrite");

    std::fs::write(
        &config,
        "channel_id = \"3066267\"\nread_api_key = \"SECRETKEY123\"\n",
    )
    .unwrap();
    let output = run_farmwatch(&config, &["config", "show"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("3066267"));
    assert!(!stdout.contains("SECRETKEY123"));
}

#[test]
fn test_read_without_channel_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_farmwatch(&dir.path().join("missing.toml"), &["read"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("channel id"), "stderr was: {stderr}");
}

#[test]
fn test_read_without_key_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_farmwatch(
        &dir.path().join("missing.toml"),
        &["--channel", "3066267", "read"],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("read API key"), "stderr was: {stderr}");
}

// =============================================================================
// Read Tests (mock server)
// =============================================================================

async fn feed_server(body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/channels/3066267/feeds.json"))
        .and(query_param("api_key", "SECRETKEY123"))
        .and(query_param("results", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;
    server
}

async fn read_against(server: &MockServer, extra: &[&str]) -> Output {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("missing.toml");
    let mut args = vec![
        "--channel".to_string(),
        "3066267".to_string(),
        "--api-key".to_string(),
        "SECRETKEY123".to_string(),
        "--base-url".to_string(),
        server.uri(),
        "read".to_string(),
    ];
    args.extend(extra.iter().map(|s| s.to_string()));

    tokio::task::spawn_blocking(move || {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        run_farmwatch(&config, &args)
    })
    .await
    .unwrap()
}

#[tokio::test]
async fn test_read_text_output() {
    let server = feed_server(FEED).await;
    let output = read_against(&server, &[]).await;

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Soil Moisture"));
    assert!(stdout.contains("Critical"));
    assert!(stdout.contains("ACTIVE"));
    assert!(stdout.contains("Action Recommended"));
    assert!(!stdout.contains('\x1b'), "NO_COLOR output should have no escapes");
}

#[tokio::test]
async fn test_read_json_output() {
    let server = feed_server(FEED).await;
    let output = read_against(&server, &["--format", "json"]).await;

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["soil_moisture"]["status"], "Critical");
    assert_eq!(json["humidity"]["status"], "Optimal");
    assert_eq!(json["pump"], "Active");
    assert_eq!(json["summary"]["critical"], 1);
}

#[tokio::test]
async fn test_read_empty_channel_fails() {
    let server = feed_server(r#"{"channel": {"id": 3066267}, "feeds": []}"#).await;
    let output = read_against(&server, &[]).await;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no entries"), "stderr was: {stderr}");
}

#[tokio::test]
async fn test_read_http_error_hides_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_string(r#"{"error": "Bad key"}"#))
        .mount(&server)
        .await;
    let output = read_against(&server, &[]).await;

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("SECRETKEY123"), "stderr was: {stderr}");
}
