//! CLI integration tests
//!
//! Tests the command-line interface using assert_cmd

mod common;

use common::advisor_cmd;
use predicates::prelude::*;

// ─────────────────────────────────────────────────────────────────
// Help and Version Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_help_flag() {
    advisor_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Kosodate Advisor"))
        .stdout(predicate::str::contains("ask"))
        .stdout(predicate::str::contains("experts"))
        .stdout(predicate::str::contains("version"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_ask_help() {
    advisor_cmd()
        .arg("ask")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--expert"))
        .stdout(predicate::str::contains("--config"));
}

#[test]
fn test_version_command() {
    advisor_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("kosodate-advisor"))
        .stdout(predicate::str::contains("Build Information"))
        .stdout(predicate::str::contains("Git Hash"))
        .stdout(predicate::str::contains("Target"));
}

#[test]
fn test_short_version_flag() {
    advisor_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("advisor"));
}

// ─────────────────────────────────────────────────────────────────
// Experts Command Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_experts_lists_all_slugs() {
    advisor_cmd()
        .arg("experts")
        .assert()
        .success()
        .stdout(predicate::str::contains("stress"))
        .stdout(predicate::str::contains("nutrition"))
        .stdout(predicate::str::contains("sleep"))
        .stdout(predicate::str::contains("balance"))
        .stdout(predicate::str::contains("management"));
}

#[test]
fn test_experts_shows_japanese_names() {
    advisor_cmd()
        .arg("experts")
        .assert()
        .success()
        .stdout(predicate::str::contains("育児ストレス"))
        .stdout(predicate::str::contains("子どもの睡眠"));
}

// ─────────────────────────────────────────────────────────────────
// Config Command Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_config_show_default() {
    advisor_cmd()
        .arg("config")
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("[provider]"))
        .stdout(predicate::str::contains("[logging]"))
        .stdout(predicate::str::contains("base_url"))
        .stdout(predicate::str::contains("gpt-4o-mini"));
}

#[test]
fn test_config_validate_default() {
    // Default config should always be valid
    advisor_cmd()
        .arg("config")
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn test_config_validate_nonexistent_file() {
    advisor_cmd()
        .arg("config")
        .arg("validate")
        .arg("--config")
        .arg("/nonexistent/path/advisor.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found").or(predicate::str::contains("Error")));
}

#[test]
fn test_config_init_help() {
    advisor_cmd()
        .arg("config")
        .arg("init")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialize"))
        .stdout(predicate::str::contains("--path"))
        .stdout(predicate::str::contains("--force"));
}

// ─────────────────────────────────────────────────────────────────
// Ask Command Error Paths
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_ask_without_api_key_fails_with_config_exit_code() {
    advisor_cmd()
        .arg("ask")
        .arg("子どもが夜泣きします")
        .assert()
        .failure()
        .code(10)
        .stderr(predicate::str::contains("API key"));
}

#[test]
fn test_ask_empty_question_is_rejected() {
    advisor_cmd()
        .arg("ask")
        .arg("")
        .assert()
        .failure()
        .code(20)
        .stderr(predicate::str::contains("empty"));
}

#[test]
fn test_ask_whitespace_question_is_rejected() {
    advisor_cmd()
        .arg("ask")
        .arg("   \n\t ")
        .assert()
        .failure()
        .code(20);
}

#[test]
fn test_ask_unknown_expert_is_not_a_validation_error() {
    // An unknown expert falls back to an unframed question; with no API
    // key configured the failure is the missing key, not the expert name.
    advisor_cmd()
        .arg("ask")
        .arg("--expert")
        .arg("astrology")
        .arg("質問です")
        .assert()
        .failure()
        .code(10)
        .stderr(predicate::str::contains("API key"));
}

// ─────────────────────────────────────────────────────────────────
// Verbosity Flag Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_verbose_flag() {
    // -v should work without errors
    advisor_cmd().arg("-v").arg("version").assert().success();
}

#[test]
fn test_very_verbose_flag() {
    // -vv should work without errors
    advisor_cmd().arg("-vv").arg("version").assert().success();
}

#[test]
fn test_quiet_flag() {
    advisor_cmd().arg("--quiet").arg("version").assert().success();
}

// ─────────────────────────────────────────────────────────────────
// Error Handling Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_unknown_command() {
    advisor_cmd()
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_missing_subcommand() {
    // Running without any command should show help or error
    advisor_cmd().assert().failure();
}
