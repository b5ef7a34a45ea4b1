//! Common test utilities and fixtures
//!
//! This module provides shared test infrastructure

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// Get a command for the advisor binary with a clean environment
///
/// Host environment variables are stripped so a developer's real API key
/// or overrides cannot leak into the tests.
pub fn advisor_cmd() -> Command {
    let mut cmd = Command::cargo_bin("advisor").unwrap();
    cmd.env_remove("OPENAI_API_KEY")
        .env_remove("ADVISOR_PROVIDER_API_KEY")
        .env_remove("ADVISOR_PROVIDER_BASE_URL")
        .env_remove("ADVISOR_PROVIDER_MODEL")
        .env_remove("ADVISOR_PROVIDER_TEMPERATURE")
        .env_remove("ADVISOR_DEFAULT_EXPERT")
        .env_remove("ADVISOR_EXPERT")
        .env_remove("ADVISOR_CONFIG")
        .env_remove("ADVISOR_LOG_LEVEL")
        .env_remove("ADVISOR_LOG_FILE")
        .env_remove("ADVISOR_LOG_JSON")
        .env_remove("RUST_LOG");
    cmd
}

/// Test fixture holding a config file in a temporary directory
pub struct ConfigFixture {
    temp_dir: TempDir,
    config_path: PathBuf,
}

impl ConfigFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("advisor.toml");
        Self {
            temp_dir,
            config_path,
        }
    }

    pub fn write_config(&self, content: &str) {
        fs::write(&self.config_path, content).unwrap();
    }

    pub fn path(&self) -> &str {
        self.config_path.to_str().unwrap()
    }
}
