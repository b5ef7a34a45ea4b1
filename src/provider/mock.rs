//! Mock provider for testing
//!
//! Provides a mock implementation of ChatProvider for unit testing.

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::{Error, Result};

use super::{ChatProvider, ProviderHealth};

// ─────────────────────────────────────────────────────────────────
// Mock Provider Configuration
// ─────────────────────────────────────────────────────────────────

/// Configuration for mock provider behavior
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    /// Fixed response text (for deterministic testing). When unset, the
    /// provider echoes the prompt back.
    pub fixed_response: Option<String>,

    /// Fail every generate call with this message
    pub fail_generate: Option<String>,

    /// Report the provider as down in health checks
    pub fail_health: bool,
}

// ─────────────────────────────────────────────────────────────────
// Mock Provider
// ─────────────────────────────────────────────────────────────────

/// Mock implementation of ChatProvider for testing
pub struct MockProvider {
    config: MockConfig,
    received_prompts: RwLock<Vec<String>>,
    generate_calls: RwLock<u32>,
}

impl MockProvider {
    /// Create a mock that echoes prompts back
    pub fn new() -> Self {
        Self::with_config(MockConfig::default())
    }

    /// Create a mock with a fixed response
    pub fn with_response(response: impl Into<String>) -> Self {
        Self::with_config(MockConfig {
            fixed_response: Some(response.into()),
            ..Default::default()
        })
    }

    /// Create a mock that fails every generate call
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_config(MockConfig {
            fail_generate: Some(message.into()),
            ..Default::default()
        })
    }

    /// Create a mock with custom configuration
    pub fn with_config(config: MockConfig) -> Self {
        Self {
            config,
            received_prompts: RwLock::new(Vec::new()),
            generate_calls: RwLock::new(0),
        }
    }

    /// Prompts received by generate, in call order
    pub fn received_prompts(&self) -> Vec<String> {
        self.received_prompts.read().clone()
    }

    /// The last prompt received, if any
    pub fn last_prompt(&self) -> Option<String> {
        self.received_prompts.read().last().cloned()
    }

    /// Number of generate calls made
    pub fn generate_calls(&self) -> u32 {
        *self.generate_calls.read()
    }

    /// Reset recorded prompts and counters
    pub fn reset(&self) {
        self.received_prompts.write().clear();
        *self.generate_calls.write() = 0;
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        *self.generate_calls.write() += 1;
        self.received_prompts.write().push(prompt.to_string());

        if let Some(ref message) = self.config.fail_generate {
            return Err(Error::provider_request(message.clone()));
        }

        match self.config.fixed_response {
            Some(ref fixed) => Ok(fixed.clone()),
            None => Ok(prompt.to_string()),
        }
    }

    async fn health_check(&self) -> Result<ProviderHealth> {
        if self.config.fail_health {
            Ok(ProviderHealth {
                operational: false,
                error: Some("mock provider marked down".to_string()),
            })
        } else {
            Ok(ProviderHealth::default())
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
