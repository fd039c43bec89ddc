//! Tests for the offline CLI subcommands.
//!
//! None of these need credentials or network access.

use std::io::Write;
use std::process::{Command, Stdio};

const BIN: &str = env!("CARGO_BIN_EXE_transcript-relay");

fn write_config() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[channels]
default = "C_DEFAULT"

[[channels.routes]]
pattern = "Weekly Sync"
channel = "C_WEEKLY"

[[channels.routes]]
pattern = "Weekly Sync - Marketing"
channel = "C_MARKETING"
"#
    )
    .unwrap();
    file
}

fn resolve(config: &tempfile::NamedTempFile, title: &str) -> String {
    let output = Command::new(BIN)
        .arg("--config")
        .arg(config.path())
        .args(["resolve", title])
        .output()
        .expect("Failed to run command");

    assert!(output.status.success(), "Command failed: {:?}", output);
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

#[test]
fn test_resolve_uses_config_table() {
    let config = write_config();

    assert_eq!(resolve(&config, "Weekly Sync - Marketing"), "C_MARKETING");
    assert_eq!(resolve(&config, "[ONLINE] Weekly Sync #12"), "C_WEEKLY");
    assert_eq!(resolve(&config, "Random Standup"), "C_DEFAULT");
}

#[test]
fn test_channels_lists_routes_in_order() {
    let config = write_config();

    let output = Command::new(BIN)
        .arg("--config")
        .arg(config.path())
        .arg("channels")
        .output()
        .expect("Failed to run command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let weekly = stdout.find("Weekly Sync -> C_WEEKLY").unwrap();
    let marketing = stdout.find("Weekly Sync - Marketing -> C_MARKETING").unwrap();
    assert!(weekly < marketing);
    assert!(stdout.contains("default -> C_DEFAULT"));
}

#[test]
fn test_config_without_default_channel_fails() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[[channels.routes]]\npattern = \"a\"\nchannel = \"C_A\"").unwrap();

    let output = Command::new(BIN)
        .arg("--config")
        .arg(file.path())
        .args(["resolve", "a"])
        .output()
        .expect("Failed to run command");

    assert!(!output.status.success());
}

#[test]
fn test_sanitize_reads_stdin() {
    let mut child = Command::new(BIN)
        .arg("sanitize")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Failed to run command");

    child
        .stdin
        .take()
        .unwrap()
        .write_all("🚀 *4. ネクストアクション*\n• Ken：資料作成 :memo: 🎉".as_bytes())
        .unwrap();

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "🚀 *4. ネクストアクション*\n• Ken：資料作成  "
    );
}

#[test]
fn test_version() {
    let output = Command::new(BIN).arg("version").output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("transcript-relay "));
}
