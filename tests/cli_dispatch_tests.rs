mod common;

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

use httpmock::prelude::*;

use common::{config_for, mock_named_counts, mock_region, mock_works};

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_genderscope")
}

fn unique_temp_path(name: &str, extension: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("genderscope-{name}-{stamp}.{extension}"))
}

/// Writes a config file pointing every service at `server`.
fn write_config(server: &MockServer, name: &str) -> PathBuf {
    let path = unique_temp_path(name, "yaml");
    let yaml = serde_yaml::to_string(&config_for(server)).expect("config should serialize");
    fs::write(&path, yaml).expect("config should write");
    path
}

fn run(args: &[&str], config: Option<&PathBuf>) -> Output {
    let mut command = Command::new(bin());
    command
        .args(args)
        .env_remove("GENDERSCOPE_CONFIG")
        .env_remove("GENDERSCOPE_WORKERS")
        .env_remove("GENDERSCOPE_BIND")
        .env("RUST_LOG", "off");
    if let Some(path) = config {
        command.env("GENDERSCOPE_CONFIG", path);
    }
    command.output().expect("binary should run")
}

#[test]
fn missing_command_prints_usage() {
    let output = run(&[], None);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: genderscope <serve|snapshot|export-csv|indicators>"));
}

#[test]
fn unknown_command_prints_usage() {
    let output = run(&["simulate"], None);

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn indicators_command_lists_catalog() {
    let output = run(&["indicators"], None);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "key\tcode\tlabel");
    assert_eq!(lines.len(), 22);
    assert!(lines[1].starts_with("female_population\tSP.POP.TOTL.FE.ZS\t"));
}

#[test]
fn export_csv_returns_usage_without_path() {
    let output = run(&["export-csv"], None);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: genderscope export-csv"));
}

#[test]
fn snapshot_emits_dashboard_json() {
    let server = MockServer::start();
    mock_region(&server);
    mock_named_counts(&server, 57, 1483);
    mock_works(&server);
    let config = write_config(&server, "snapshot");

    let output = run(&["snapshot", "--compact"], Some(&config));

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let payload: serde_json::Value =
        serde_json::from_str(&stdout).expect("snapshot should emit json");
    assert_eq!(payload["target_country"], "Ukraine");
    assert_eq!(payload["data"].as_object().map(|data| data.len()), Some(3));
    assert_eq!(payload["indicators"].as_array().map(Vec::len), Some(21));

    let _ = fs::remove_file(config);
}

#[test]
fn export_csv_writes_one_row_per_country() {
    let server = MockServer::start();
    mock_region(&server);
    let config = write_config(&server, "export");
    let csv_path = unique_temp_path("export", "csv");
    let csv_arg = csv_path.to_string_lossy().to_string();

    let output = run(&["export-csv", &csv_arg], Some(&config));

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("export complete: countries=3"));
    let written = fs::read_to_string(&csv_path).expect("csv should exist");
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("country,is_target,female_population"));
    assert!(lines.iter().any(|line| line.starts_with("Ukraine,true,53.6,")));

    let _ = fs::remove_file(config);
    let _ = fs::remove_file(csv_path);
}

#[test]
fn invalid_worker_override_is_a_config_error() {
    let output = Command::new(bin())
        .arg("snapshot")
        .env_remove("GENDERSCOPE_CONFIG")
        .env("GENDERSCOPE_WORKERS", "many")
        .output()
        .expect("binary should run");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("config error"));
    assert!(stderr.contains("GENDERSCOPE_WORKERS"));
}
