#![cfg(feature = "cli")]

use std::process::{Command, Output};
use tempfile::TempDir;

fn run_cli(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dog-morning"))
        .args(args)
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn test_missing_config_file_exits_with_system_code() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(&dir, &["-c", "/nonexistent/morning.toml"]);

    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("❌"));
    assert!(stderr.contains("💡 Check that the config file and output directory exist"));
}

#[test]
fn test_malformed_config_file_reports_configuration_error() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("morning.toml");
    std::fs::write(&config_path, "[email\nto = 3").unwrap();

    let output = run_cli(&dir, &["-c", config_path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("TOML parsing error"));
    assert!(stderr.contains("💡 Review the TOML config"));
}
