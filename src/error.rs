//! Error types for the advisor CLI
//!
//! Provides structured error handling with:
//! - Numeric error codes for machine parsing
//! - User-friendly messages with suggestions
//! - Error context and chaining
//! - Exit codes for CLI

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for advisor operations
pub type Result<T> = std::result::Result<T, Error>;

/// Numeric error codes for machine parsing and documentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ErrorCode {
    // Configuration errors (1xx)
    ConfigNotFound = 100,
    ConfigParseError = 101,
    ConfigValidation = 102,
    MissingApiKey = 103,

    // Validation errors (2xx)
    EmptyQuestion = 200,
    UnknownExpert = 201,

    // Template/registry errors (3xx)
    TemplateMissingPlaceholder = 300,
    DuplicatePersona = 301,

    // Provider errors (4xx)
    ProviderRequest = 400,
    ProviderTimeout = 401,
    ProviderAuth = 402,
    ProviderMalformed = 403,

    // Internal errors (9xx)
    IoError = 900,
    TomlError = 901,
    InternalError = 910,
}

impl ErrorCode {
    /// Get the string code (e.g., "E100")
    pub fn as_str(&self) -> String {
        format!("E{}", *self as u16)
    }

    /// Get the exit code for CLI (maps to 1-125 range)
    pub fn exit_code(&self) -> i32 {
        match *self as u16 {
            100..=199 => 10, // Config errors
            200..=299 => 20, // Validation errors
            300..=399 => 30, // Template/registry errors
            400..=499 => 40, // Provider errors
            900..=999 => 90, // Internal errors
            _ => 1,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for the advisor
#[derive(Error, Debug)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Configuration parse error
    #[error("Failed to parse configuration: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<toml::de::Error>,
    },

    /// Configuration validation error
    #[error("Configuration validation failed: {message}")]
    ConfigValidation { message: String, field: Option<String> },

    /// No API key available for the provider
    #[error("No API key configured for the chat provider")]
    MissingApiKey,

    // ─────────────────────────────────────────────────────────────
    // Validation Errors
    // ─────────────────────────────────────────────────────────────

    /// Question is empty or whitespace-only
    #[error("Question is empty")]
    EmptyQuestion,

    /// Expert slug does not name a known persona
    #[error("Unknown expert '{name}'. Valid: {valid}")]
    UnknownExpert { name: String, valid: String },

    // ─────────────────────────────────────────────────────────────
    // Template/Registry Errors
    // ─────────────────────────────────────────────────────────────

    /// Template lacks the required question placeholder
    #[error("Template for '{persona}' is missing the {{question}} placeholder")]
    TemplateMissingPlaceholder { persona: String },

    /// Two registry entries share the same persona id
    #[error("Duplicate persona '{persona}' in registry")]
    DuplicatePersona { persona: String },

    // ─────────────────────────────────────────────────────────────
    // Provider Errors
    // ─────────────────────────────────────────────────────────────

    /// Provider request failed (transport or non-2xx status)
    #[error("Provider request failed: {message}")]
    ProviderRequest { message: String, retryable: bool },

    /// Provider request timed out
    #[error("Provider request to {url} timed out after {timeout_secs}s")]
    ProviderTimeout { url: String, timeout_secs: u64 },

    /// Provider rejected the credentials
    #[error("Provider authentication failed: {message}")]
    ProviderAuth { message: String },

    /// Provider returned a response the client could not use
    #[error("Provider returned a malformed response: {message}")]
    ProviderMalformed { message: String },

    // ─────────────────────────────────────────────────────────────
    // Internal Errors
    // ─────────────────────────────────────────────────────────────

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    Toml(#[from] toml::ser::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    // ─────────────────────────────────────────────────────────────
    // Error Classification
    // ─────────────────────────────────────────────────────────────

    /// Get the numeric error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::ConfigNotFound { .. } => ErrorCode::ConfigNotFound,
            Error::ConfigParse { .. } => ErrorCode::ConfigParseError,
            Error::ConfigValidation { .. } => ErrorCode::ConfigValidation,
            Error::MissingApiKey => ErrorCode::MissingApiKey,

            Error::EmptyQuestion => ErrorCode::EmptyQuestion,
            Error::UnknownExpert { .. } => ErrorCode::UnknownExpert,

            Error::TemplateMissingPlaceholder { .. } => ErrorCode::TemplateMissingPlaceholder,
            Error::DuplicatePersona { .. } => ErrorCode::DuplicatePersona,

            Error::ProviderRequest { .. } => ErrorCode::ProviderRequest,
            Error::ProviderTimeout { .. } => ErrorCode::ProviderTimeout,
            Error::ProviderAuth { .. } => ErrorCode::ProviderAuth,
            Error::ProviderMalformed { .. } => ErrorCode::ProviderMalformed,

            Error::Io(_) => ErrorCode::IoError,
            Error::Toml(_) => ErrorCode::TomlError,
            Error::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::ProviderRequest { retryable, .. } => *retryable,
            Error::ProviderTimeout { .. } => true,
            Error::Io(_) => true,
            _ => false,
        }
    }

    /// Get the exit code for CLI
    pub fn exit_code(&self) -> i32 {
        self.code().exit_code()
    }

    // ─────────────────────────────────────────────────────────────
    // User-Friendly Messages
    // ─────────────────────────────────────────────────────────────

    /// Get a user-friendly suggestion for how to fix this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Error::ConfigNotFound { .. } => Some(
                "Run 'advisor config init' to create a default configuration file."
            ),
            Error::ConfigParse { .. } => Some(
                "Check your configuration file syntax. Run 'advisor config validate' to see details."
            ),
            Error::ConfigValidation { .. } => Some(
                "Review the configuration file and fix the invalid values. Run 'advisor config show' to see the effective configuration."
            ),
            Error::MissingApiKey => Some(
                "Set ADVISOR_PROVIDER_API_KEY or OPENAI_API_KEY, or add 'api_key' to the [provider] section of your config file."
            ),

            Error::EmptyQuestion => Some(
                "Provide a non-empty question, e.g. advisor ask \"...\"."
            ),
            Error::UnknownExpert { .. } => Some(
                "Run 'advisor experts' to list the available experts."
            ),

            Error::ProviderAuth { .. } => Some(
                "Verify the API key is valid for the configured base_url."
            ),
            Error::ProviderTimeout { .. } => Some(
                "The provider may be slow or unreachable. Increase 'timeout_secs' in the [provider] section or check your network."
            ),
            Error::ProviderRequest { retryable: true, .. } => Some(
                "This looks transient. Try again in a moment."
            ),
            Error::ProviderMalformed { .. } => Some(
                "The configured base_url may not be an OpenAI-compatible endpoint. Check the [provider] section."
            ),

            _ => None,
        }
    }

    /// Format the error for terminal display with colors
    pub fn format_for_terminal(&self) -> String {
        let code = self.code();
        let suggestion = self.suggestion();

        let mut output = format!(
            "\x1b[31mError [{}]\x1b[0m: {}\n",
            code.as_str(),
            self
        );

        if let Some(hint) = suggestion {
            output.push_str(&format!("\n\x1b[33mHint\x1b[0m: {}\n", hint));
        }

        output
    }

    /// Format the error for logging (no colors)
    pub fn format_for_log(&self) -> String {
        let code = self.code();
        format!("[{}] {}", code.as_str(), self)
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Constructors (for ergonomic error creation)
// ─────────────────────────────────────────────────────────────────

impl Error {
    /// Create a config not found error
    pub fn config_not_found(path: impl Into<PathBuf>) -> Self {
        Error::ConfigNotFound {
            path: path.into(),
            source: None,
        }
    }

    /// Create a config parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Error::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create a config validation error
    pub fn config_validation(message: impl Into<String>) -> Self {
        Error::ConfigValidation {
            message: message.into(),
            field: None,
        }
    }

    /// Create a config validation error with field name
    pub fn config_field_invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::ConfigValidation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a retryable provider request error
    pub fn provider_retryable(message: impl Into<String>) -> Self {
        Error::ProviderRequest {
            message: message.into(),
            retryable: true,
        }
    }

    /// Create a non-retryable provider request error
    pub fn provider_request(message: impl Into<String>) -> Self {
        Error::ProviderRequest {
            message: message.into(),
            retryable: false,
        }
    }

    /// Create a provider auth error
    pub fn provider_auth(message: impl Into<String>) -> Self {
        Error::ProviderAuth {
            message: message.into(),
        }
    }

    /// Create a provider malformed-response error
    pub fn provider_malformed(message: impl Into<String>) -> Self {
        Error::ProviderMalformed {
            message: message.into(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
