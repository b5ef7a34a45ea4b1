//! Configuration system tests
//!
//! Tests configuration loading, validation, and environment overrides
//! through the public CLI surface.

mod common;

use std::fs;

use common::{advisor_cmd, ConfigFixture};
use predicates::prelude::*;
use tempfile::TempDir;

// ─────────────────────────────────────────────────────────────────
// Valid Configuration Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_minimal_config() {
    let fixture = ConfigFixture::new();
    fixture.write_config(
        r#"
[provider]
model = "llama3"
"#,
    );

    // Partial tables fill in from defaults
    advisor_cmd()
        .arg("config")
        .arg("validate")
        .arg("--config")
        .arg(fixture.path())
        .assert()
        .success();
}

#[test]
fn test_full_config() {
    let fixture = ConfigFixture::new();
    fixture.write_config(
        r#"
[advisor]
default_expert = "sleep"

[provider]
base_url = "http://localhost:11434/v1"
api_key = ""
model = "llama3"
temperature = 0.7
timeout_secs = 30
max_retries = 1

[logging]
level = "debug"
file = "/tmp/advisor/advisor.log"
max_file_size_mb = 50
max_files = 3
json_format = false
"#,
    );

    advisor_cmd()
        .arg("config")
        .arg("validate")
        .arg("--config")
        .arg(fixture.path())
        .assert()
        .success();
}

// ─────────────────────────────────────────────────────────────────
// Invalid Configuration Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_invalid_base_url_scheme() {
    let fixture = ConfigFixture::new();
    fixture.write_config(
        r#"
[provider]
base_url = "ftp://example.com/v1"
"#,
    );

    advisor_cmd()
        .arg("config")
        .arg("validate")
        .arg("--config")
        .arg(fixture.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("base_url"));
}

#[test]
fn test_invalid_temperature() {
    let fixture = ConfigFixture::new();
    fixture.write_config(
        r#"
[provider]
temperature = 1.5
"#,
    );

    advisor_cmd()
        .arg("config")
        .arg("validate")
        .arg("--config")
        .arg(fixture.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("temperature"));
}

#[test]
fn test_invalid_log_level() {
    let fixture = ConfigFixture::new();
    fixture.write_config(
        r#"
[logging]
level = "invalid_level"
"#,
    );

    advisor_cmd()
        .arg("config")
        .arg("validate")
        .arg("--config")
        .arg(fixture.path())
        .assert()
        .failure();
}

#[test]
fn test_unknown_default_expert() {
    let fixture = ConfigFixture::new();
    fixture.write_config(
        r#"
[advisor]
default_expert = "astrology"
"#,
    );

    advisor_cmd()
        .arg("config")
        .arg("validate")
        .arg("--config")
        .arg(fixture.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown expert"));
}

#[test]
fn test_malformed_toml() {
    let fixture = ConfigFixture::new();
    fixture.write_config(
        r#"
[provider
model = "llama3"
"#,
    );

    advisor_cmd()
        .arg("config")
        .arg("validate")
        .arg("--config")
        .arg(fixture.path())
        .assert()
        .failure();
}

// ─────────────────────────────────────────────────────────────────
// Config Show Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_config_show_custom() {
    let fixture = ConfigFixture::new();
    fixture.write_config(
        r#"
[advisor]
default_expert = "nutrition"

[provider]
base_url = "http://localhost:11434/v1"
model = "llama3"
"#,
    );

    advisor_cmd()
        .arg("config")
        .arg("show")
        .arg("--config")
        .arg(fixture.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("nutrition"))
        .stdout(predicate::str::contains("http://localhost:11434/v1"))
        .stdout(predicate::str::contains("llama3"));
}

// ─────────────────────────────────────────────────────────────────
// Config Init Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_config_init_creates_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("new_advisor.toml");

    advisor_cmd()
        .arg("config")
        .arg("init")
        .arg("--path")
        .arg(config_path.to_str().unwrap())
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration file created"));

    // Verify file was created
    assert!(config_path.exists());

    // Verify the created config is valid
    advisor_cmd()
        .arg("config")
        .arg("validate")
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .assert()
        .success();
}

#[test]
fn test_config_init_refuses_overwrite() {
    let fixture = ConfigFixture::new();
    fixture.write_config("[advisor]\n");

    advisor_cmd()
        .arg("config")
        .arg("init")
        .arg("--path")
        .arg(fixture.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_config_init_force_overwrite() {
    let fixture = ConfigFixture::new();
    fixture.write_config("[advisor]\ndefault_expert = \"balance\"\n");

    advisor_cmd()
        .arg("config")
        .arg("init")
        .arg("--path")
        .arg(fixture.path())
        .arg("--force")
        .assert()
        .success();

    // The old setting is gone after the overwrite
    let content = fs::read_to_string(fixture.path()).unwrap();
    assert!(!content.contains("default_expert = \"balance\""));
}

// ─────────────────────────────────────────────────────────────────
// Environment Variable Override Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_env_override_model() {
    let fixture = ConfigFixture::new();
    fixture.write_config(
        r#"
[provider]
model = "from-file"
"#,
    );

    // Env var should override file
    advisor_cmd()
        .arg("config")
        .arg("show")
        .arg("--config")
        .arg(fixture.path())
        .env("ADVISOR_PROVIDER_MODEL", "from-env")
        .assert()
        .success()
        .stdout(predicate::str::contains("from-env"));
}

#[test]
fn test_env_override_default_expert_is_validated() {
    advisor_cmd()
        .arg("config")
        .arg("validate")
        .env("ADVISOR_DEFAULT_EXPERT", "astrology")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown expert"));
}

#[test]
fn test_openai_api_key_fallback() {
    advisor_cmd()
        .arg("config")
        .arg("show")
        .env("OPENAI_API_KEY", "sk-from-openai-var")
        .assert()
        .success()
        .stdout(predicate::str::contains("sk-from-openai-var"));
}

#[test]
fn test_advisor_key_wins_over_openai_key() {
    advisor_cmd()
        .arg("config")
        .arg("show")
        .env("OPENAI_API_KEY", "sk-from-openai-var")
        .env("ADVISOR_PROVIDER_API_KEY", "sk-from-advisor-var")
        .assert()
        .success()
        .stdout(predicate::str::contains("sk-from-advisor-var"))
        .stdout(predicate::str::contains("sk-from-openai-var").not());
}

// ─────────────────────────────────────────────────────────────────
// Path Expansion Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_tilde_expansion_in_log_file() {
    let fixture = ConfigFixture::new();
    fixture.write_config(
        r#"
[logging]
file = "~/advisor/logs/advisor.log"
"#,
    );

    let output = advisor_cmd()
        .arg("config")
        .arg("show")
        .arg("--config")
        .arg(fixture.path())
        .assert()
        .success();

    // Tilde should be expanded away in the rendered config
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    assert!(!stdout.contains("file = \"~"));
}
