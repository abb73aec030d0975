//! CLI integration tests

use std::process::{Command, Output};

/// Run the built binary with an isolated home directory
fn hxc(args: &[&str]) -> Output {
    let home = tempfile::tempdir().expect("Failed to create temp home");
    Command::new(env!("CARGO_BIN_EXE_hxc"))
        .args(args)
        .env("HOME", home.path())
        .env_remove("HEXACRAFT_API_URL")
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to execute command")
}

/// Test that the CLI shows help
#[test]
fn test_cli_help() {
    let output = hxc(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI help should succeed");
    assert!(stdout.contains("HexaCraft"), "Should show app name");
    assert!(stdout.contains("plans"), "Should show plans command");
    assert!(stdout.contains("recommend"), "Should show recommend command");
    assert!(stdout.contains("faqs"), "Should show faqs command");
    assert!(stdout.contains("contact"), "Should show contact command");
    assert!(stdout.contains("health"), "Should show health command");
}

/// Test that the CLI shows version
#[test]
fn test_cli_version() {
    let output = hxc(&["--version"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI version should succeed");
    assert!(stdout.contains("hxc"), "Should show binary name");
}

/// Test recommend subcommand help
#[test]
fn test_recommend_help() {
    let output = hxc(&["recommend", "--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "recommend help should succeed");
    assert!(stdout.contains("--players"), "Should show players option");
    assert!(stdout.contains("--server-type"), "Should show server-type option");
    assert!(stdout.contains("--tier"), "Should show tier option");
    assert!(stdout.contains("--offline"), "Should show offline option");
}

/// Offline recommendations never touch the network
#[test]
fn test_offline_recommend_json() {
    let output = hxc(&[
        "--format",
        "json",
        "recommend",
        "--players",
        "50",
        "--server-type",
        "modded",
        "--tier",
        "performance",
        "--offline",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "offline recommend should succeed");
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("Should print JSON");
    assert_eq!(json["recommended_ram"], 14);
    assert_eq!(json["recommended_cpu"], 100);
    assert_eq!(json["required_cpu"], 110);
    assert_eq!(json["suggested_plan"], "Performance Redstone");
    assert_eq!(json["price"], 320);
}

#[test]
fn test_offline_recommend_table_overflow() {
    let output = hxc(&[
        "recommend",
        "-p",
        "500",
        "-s",
        "heavy_plugins",
        "--offline",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "offline recommend should succeed");
    assert!(stdout.contains("Netherite"), "Should name the largest plan");
    assert!(stdout.contains("exceed"), "Should warn about overflow");
}

#[test]
fn test_unknown_server_type_rejected() {
    let output = hxc(&[
        "recommend",
        "--players",
        "10",
        "--server-type",
        "survival",
        "--offline",
    ]);

    assert!(!output.status.success(), "unknown server type should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("survival"), "Should mention the bad value");
}

#[test]
fn test_non_positive_players_rejected() {
    let output = hxc(&[
        "recommend",
        "--players",
        "-5",
        "--server-type",
        "vanilla",
        "--offline",
    ]);

    assert!(!output.status.success(), "negative players should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid input"), "Should explain the failure");
}
