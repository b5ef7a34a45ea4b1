//! Configuration system for the advisor CLI
//!
//! Supports multiple configuration sources with the following precedence (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables (ADVISOR_* prefix, plus OPENAI_API_KEY)
//! 3. Configuration file (TOML)
//! 4. Default values

use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::persona::PersonaId;
use crate::provider::ProviderSettings;

/// Main advisor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    /// Advisor behavior settings
    pub advisor: AdvisorSettings,

    /// Chat provider settings
    pub provider: ProviderSettings,

    /// Logging configuration
    pub logging: LoggingSettings,
}

/// Advisor behavior settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AdvisorSettings {
    /// Expert used when `ask` is run without --expert
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_expert: Option<String>,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level: trace, debug, info, warn, error
    pub level: String,

    /// Log file path (empty = no file logging)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Maximum log file size in MB before rotation
    pub max_file_size_mb: u64,

    /// Number of rotated log files to keep
    pub max_files: u32,

    /// Enable JSON formatted logging
    pub json_format: bool,
}

// Default implementations

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            advisor: AdvisorSettings::default(),
            provider: ProviderSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            max_file_size_mb: 100,
            max_files: 5,
            json_format: false,
        }
    }
}

impl AdvisorConfig {
    /// Load configuration from file with environment variable overrides
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut config = Self::default();

        // 1. Load from config file if it exists
        let config_file = Self::find_config_file(config_path)?;
        if let Some(path) = config_file {
            debug!(path = %path.display(), "Loading configuration file");
            let content = fs::read_to_string(&path).map_err(|e| Error::ConfigNotFound {
                path: path.clone(),
                source: Some(e),
            })?;
            config = toml::from_str(&content).map_err(|e| Error::ConfigParse {
                message: format!("{}: {}", path.display(), e),
                source: Some(e),
            })?;
            info!(path = %path.display(), "Configuration loaded from file");
        }

        // 2. Apply environment variable overrides
        config.apply_env_overrides();

        // 3. Expand paths
        config.expand_paths();

        // 4. Validate
        config.validate()?;

        Ok(config)
    }

    /// Find the configuration file to use
    fn find_config_file(explicit_path: Option<&str>) -> Result<Option<PathBuf>> {
        // If explicit path provided, use it (error if not found)
        if let Some(path) = explicit_path {
            let expanded = shellexpand::tilde(path);
            let path = PathBuf::from(expanded.as_ref());
            if path.exists() {
                return Ok(Some(path));
            } else {
                return Err(Error::config_not_found(path));
            }
        }

        // Search in standard locations
        let search_paths = [
            // Current directory
            PathBuf::from("advisor.toml"),
            PathBuf::from("config.toml"),
            // User config directory
            dirs::config_dir()
                .map(|p| p.join("advisor").join("advisor.toml"))
                .unwrap_or_default(),
            // Home directory
            dirs::home_dir()
                .map(|p| p.join(".advisor").join("advisor.toml"))
                .unwrap_or_default(),
            // System config (Linux)
            PathBuf::from("/etc/advisor/advisor.toml"),
        ];

        for path in &search_paths {
            if path.exists() {
                debug!(path = %path.display(), "Found configuration file");
                return Ok(Some(path.clone()));
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(None)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // Advisor settings
        if let Ok(val) = std::env::var("ADVISOR_DEFAULT_EXPERT") {
            self.advisor.default_expert = Some(val);
        }

        // Provider settings
        if let Ok(val) = std::env::var("ADVISOR_PROVIDER_BASE_URL") {
            self.provider.base_url = val;
        }
        if let Ok(val) = std::env::var("ADVISOR_PROVIDER_API_KEY") {
            self.provider.api_key = val;
        } else if self.provider.api_key.is_empty() {
            // The conventional variable works too when no advisor-specific
            // key is set anywhere.
            if let Ok(val) = std::env::var("OPENAI_API_KEY") {
                self.provider.api_key = val;
            }
        }
        if let Ok(val) = std::env::var("ADVISOR_PROVIDER_MODEL") {
            self.provider.model = val;
        }
        if let Ok(val) = std::env::var("ADVISOR_PROVIDER_TEMPERATURE") {
            if let Ok(n) = val.parse() {
                self.provider.temperature = n;
            }
        }
        if let Ok(val) = std::env::var("ADVISOR_PROVIDER_TIMEOUT_SECS") {
            if let Ok(n) = val.parse() {
                self.provider.timeout_secs = n;
            }
        }
        if let Ok(val) = std::env::var("ADVISOR_PROVIDER_MAX_RETRIES") {
            if let Ok(n) = val.parse() {
                self.provider.max_retries = n;
            }
        }

        // Logging settings
        if let Ok(val) = std::env::var("ADVISOR_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = std::env::var("ADVISOR_LOG_FILE") {
            self.logging.file = Some(val);
        }
        if let Ok(val) = std::env::var("ADVISOR_LOG_JSON") {
            self.logging.json_format = val.to_lowercase() == "true" || val == "1";
        }
    }

    /// Expand ~ and other path variables
    fn expand_paths(&mut self) {
        if let Some(ref file) = self.logging.file {
            self.logging.file = Some(expand_path(file));
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        // Validate provider base URL
        if self.provider.base_url.is_empty() {
            return Err(Error::config_field_invalid(
                "provider.base_url",
                "Provider base_url cannot be empty",
            ));
        }
        if !self.provider.base_url.starts_with("http://")
            && !self.provider.base_url.starts_with("https://")
        {
            return Err(Error::config_field_invalid(
                "provider.base_url",
                "Provider base_url must start with http:// or https://",
            ));
        }

        // Validate temperature range
        if !(0.0..=1.0).contains(&self.provider.temperature) {
            return Err(Error::config_field_invalid(
                "provider.temperature",
                format!(
                    "temperature must be between 0.0 and 1.0, got {}",
                    self.provider.temperature
                ),
            ));
        }

        // Validate log level
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(Error::config_field_invalid(
                "logging.level",
                format!(
                    "Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    valid_levels.join(", ")
                ),
            ));
        }

        // Validate default expert, when set
        if let Some(ref expert) = self.advisor.default_expert {
            if PersonaId::from_str(expert).is_err() {
                return Err(Error::UnknownExpert {
                    name: expert.clone(),
                    valid: "stress, nutrition, sleep, balance, management".to_string(),
                });
            }
        }

        Ok(())
    }

    /// The expert slug used when none is given on the command line
    pub fn default_expert(&self) -> &str {
        self.advisor.default_expert.as_deref().unwrap_or("stress")
    }
}

/// Expand ~ and environment variables in paths
fn expand_path(path: &str) -> String {
    shellexpand::full(path)
        .unwrap_or_else(|_| std::borrow::Cow::Borrowed(path))
        .into_owned()
}

/// Initialize a new configuration file
pub fn init_config(path: Option<&str>, force: bool) -> Result<()> {
    let config_path = path
        .map(|p| PathBuf::from(expand_path(p)))
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".advisor")
                .join("advisor.toml")
        });

    // Check if file exists
    if config_path.exists() && !force {
        return Err(Error::config_validation(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            config_path.display()
        )));
    }

    // Create parent directories
    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }

    // Generate default config with comments
    let config_content = generate_default_config();

    // Write the file
    fs::write(&config_path, config_content)?;

    println!("Configuration file created: {}", config_path.display());
    Ok(())
}

/// Generate default configuration content with comments
fn generate_default_config() -> String {
    r#"# Advisor Configuration

[advisor]
# Expert used when `ask` is run without --expert
# (stress, nutrition, sleep, balance, management)
# default_expert = "stress"

[provider]
# OpenAI-compatible API base URL (OpenAI, Ollama, vLLM, LM Studio, etc.)
base_url = "https://api.openai.com/v1"

# API key (leave empty to use ADVISOR_PROVIDER_API_KEY or OPENAI_API_KEY)
api_key = ""

# Model identifier
model = "gpt-4o-mini"

# Sampling temperature (0.0 - 1.0)
temperature = 0.5

# Request timeout in seconds
timeout_secs = 60

# Maximum retries on transient failures
max_retries = 2

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log file path (comment out to disable file logging)
# file = "~/.advisor/logs/advisor.log"

# Maximum log file size in MB before rotation
max_file_size_mb = 100

# Number of rotated log files to keep
max_files = 5

# Enable JSON formatted logging
json_format = false
"#
    .to_string()
}
