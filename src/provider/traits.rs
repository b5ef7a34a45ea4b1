//! Provider trait definitions
//!
//! Defines the core ChatProvider trait that all providers must implement.

use async_trait::async_trait;

use crate::error::Result;

// ─────────────────────────────────────────────────────────────────
// Provider Health
// ─────────────────────────────────────────────────────────────────

/// Health status of a provider
#[derive(Debug, Clone)]
pub struct ProviderHealth {
    /// Whether the provider endpoint is reachable
    pub operational: bool,

    /// Any error message
    pub error: Option<String>,
}

impl Default for ProviderHealth {
    fn default() -> Self {
        Self {
            operational: true,
            error: None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// ChatProvider Trait
// ─────────────────────────────────────────────────────────────────

/// Core trait for chat completion providers
///
/// All providers (OpenAI-compatible HTTP, mock) implement this trait.
/// The trait is object-safe for dynamic dispatch.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Get the provider name (e.g., "openai", "mock")
    fn name(&self) -> &'static str;

    /// Send one rendered prompt and return the answer text
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Check whether the provider endpoint is reachable
    async fn health_check(&self) -> Result<ProviderHealth>;
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
