//! Integration tests for the sealduel CLI
//!
//! These tests invoke the built binary and verify:
//! - Exit codes (0 = success, 1 = validation failure, 2 = I/O error)
//! - stdout/stderr output
//! - JSON output format

use std::path::PathBuf;
use std::process::Command;

// ── Helpers ───────────────────────────────────────────────

fn sealduel_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_sealduel"))
}

fn fixture_valid(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join(format!("../../tests/fixtures/submissions/valid/{}", name))
}

fn fixture_invalid(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join(format!("../../tests/fixtures/submissions/invalid/{}", name))
}

fn run_sealduel(args: &[&str]) -> std::process::Output {
    Command::new(sealduel_bin())
        .args(args)
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to execute sealduel")
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("should be valid JSON")
}

// ── Version ───────────────────────────────────────────────

#[test]
fn test_version_command() {
    let output = run_sealduel(&["version"]);
    assert!(output.status.success(), "version should exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("sealduel"));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_version_flag() {
    let output = run_sealduel(&["--version"]);
    assert!(output.status.success(), "--version should exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

// ── Validate ──────────────────────────────────────────────

#[test]
fn test_validate_embed_submission() {
    let output = run_sealduel(&["validate", fixture_valid("embed-url.js").to_str().unwrap()]);
    assert!(output.status.success(), "valid submission should exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("VlTo9Z94XQ0"), "should show extracted id");
    assert!(stdout.contains("8,600,000"), "should show formatted count");
    assert!(stdout.contains("passed"));
}

#[test]
fn test_validate_placeholder_fails() {
    let output = run_sealduel(&["validate", fixture_invalid("placeholder.js").to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1), "placeholder should exit 1");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("placeholder_id"), "stderr: {}", stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Accepted id formats"));
}

#[test]
fn test_validate_nonexistent_file() {
    let output = run_sealduel(&["validate", "nonexistent.js"]);
    assert_eq!(output.status.code(), Some(2), "missing file should exit 2");
}

#[test]
fn test_validate_json_valid() {
    let output = run_sealduel(&[
        "validate",
        "--json",
        fixture_valid("short-url-underscores.js").to_str().unwrap(),
    ]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["valid"], true);
    assert_eq!(json["errors"], 0);
    assert_eq!(json["video_id"], "dQw4w9WgXcQ");
    assert_eq!(json["shape"], "short_link");
    assert_eq!(json["view_count"], 12_000_000);
}

#[test]
fn test_validate_json_accumulates_errors() {
    let output = run_sealduel(&[
        "validate",
        "--json",
        fixture_invalid("bad-id-and-count.js").to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(1));
    let json = stdout_json(&output);
    assert_eq!(json["valid"], false);
    assert_eq!(json["errors"], 2);
    assert_eq!(json["diagnostics"][0]["kind"], "invalid_video_id");
    assert_eq!(json["diagnostics"][1]["kind"], "invalid_view_count");
}

#[test]
fn test_validate_missing_count() {
    let output = run_sealduel(&[
        "validate",
        "--json",
        fixture_invalid("missing-count.js").to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(1));
    let json = stdout_json(&output);
    assert_eq!(json["diagnostics"][0]["kind"], "missing_field");
    assert_eq!(json["diagnostics"][0]["field"], "studentViewCount");
}

#[test]
fn test_validate_quiet_valid() {
    let output = run_sealduel(&[
        "--quiet",
        "validate",
        fixture_valid("embed-url.js").to_str().unwrap(),
    ]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty(), "quiet mode should produce no stdout");
}

// ── Normalize ─────────────────────────────────────────────

#[test]
fn test_normalize_watch_url() {
    let output = run_sealduel(&["normalize", "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "dQw4w9WgXcQ");
}

#[test]
fn test_normalize_placeholder_absent() {
    let output = run_sealduel(&["normalize", "YOUR_ID_HERE"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_normalize_twelve_chars_absent() {
    let output = run_sealduel(&["normalize", "https://youtu.be/dQw4w9WgXcQx"]);
    assert_eq!(output.status.code(), Some(1));
}

// ── Compare ───────────────────────────────────────────────

#[test]
fn test_compare_json_strong_showing() {
    let output = run_sealduel(&["compare", "8_600_000", "--json"]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["classification"], "strong_showing");
    assert_eq!(json["comparison"]["subject_percent"], 46);
    assert_eq!(json["comparison"]["reference_percent"], 54);
    assert_eq!(json["style"], "text-blue-400");
}

#[test]
fn test_compare_with_invalid_video_is_no_video() {
    let output = run_sealduel(&["compare", "12000000", "--video", "YOUR_ID_HERE", "--json"]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["classification"], "no_video");
}

#[test]
fn test_compare_zero_reference_rejected() {
    let output = run_sealduel(&["compare", "0", "--reference", "0"]);
    assert_eq!(output.status.code(), Some(1), "zero reference should exit 1");
}

#[test]
fn test_compare_rejects_negative_count() {
    let output = run_sealduel(&["compare", "--", "-5"]);
    assert!(!output.status.success());
}

#[test]
fn test_compare_human_output() {
    let output = run_sealduel(&["compare", "500000"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("10,000,000"));
    assert!(stdout.contains("undisputed champion"));
}

// ── Scoreboard ────────────────────────────────────────────

#[test]
fn test_scoreboard_json() {
    let output = run_sealduel(&[
        "scoreboard",
        "--json",
        fixture_valid("embed-url.js").to_str().unwrap(),
    ]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["subject"]["embed_url"], "https://www.youtube.com/embed/VlTo9Z94XQ0");
    assert_eq!(json["subject"]["percent_label"], "46%");
    assert_eq!(json["reference"]["views_label"], "10,000,000");
    assert_eq!(json["reveal_delay_ms"], 500);
}

#[test]
fn test_scoreboard_placeholder_renders_notice() {
    let output = run_sealduel(&["scoreboard", fixture_invalid("placeholder.js").to_str().unwrap()]);
    assert!(output.status.success(), "placeholder still renders a scoreboard");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("placeholder"));
    assert!(stdout.contains("text-yellow-300"));
}

#[test]
fn test_scoreboard_missing_field_fails() {
    let output = run_sealduel(&["scoreboard", fixture_invalid("missing-count.js").to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("studentViewCount"));
}

#[test]
fn test_scoreboard_determinism() {
    let path = fixture_valid("embed-url.js");
    let first = run_sealduel(&["scoreboard", "--json", path.to_str().unwrap()]);
    for _ in 0..5 {
        let output = run_sealduel(&["scoreboard", "--json", path.to_str().unwrap()]);
        assert_eq!(first.stdout, output.stdout, "scoreboard must be deterministic");
    }
}
