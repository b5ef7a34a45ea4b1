//! OpenAI-compatible API provider
//!
//! Implements ChatProvider by making HTTP calls to any OpenAI-compatible
//! chat-completions endpoint (OpenAI, Ollama, vLLM, LM Studio, etc.).

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

use super::{ChatProvider, ProviderHealth};

// ─────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────

/// Configuration for the OpenAI-compatible provider
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// API base URL (e.g., "https://api.openai.com/v1", "http://localhost:11434/v1")
    pub base_url: String,

    /// API key (empty string for local servers like Ollama)
    pub api_key: String,

    /// Model to use (e.g., "gpt-4o-mini", "llama3")
    pub model: String,

    /// Sampling temperature, between 0.0 and 1.0
    pub temperature: f32,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Maximum retries on transient errors
    pub max_retries: u32,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.5,
            timeout_secs: 60,
            max_retries: 2,
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// API types (request/response)
// ─────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

// ─────────────────────────────────────────────────────────────────
// OpenAI Provider
// ─────────────────────────────────────────────────────────────────

/// OpenAI-compatible chat-completions provider
pub struct OpenAiProvider {
    settings: ProviderSettings,
    client: Client,
    total_requests: RwLock<u64>,
}

impl OpenAiProvider {
    /// Create a new provider with the given settings
    pub fn new(settings: ProviderSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            base_url = %settings.base_url,
            model = %settings.model,
            "OpenAI-compatible provider created"
        );

        Ok(Self {
            settings,
            client,
            total_requests: RwLock::new(0),
        })
    }

    /// Total chat-completion requests that returned successfully
    pub fn total_requests(&self) -> u64 {
        *self.total_requests.read()
    }

    /// Build the authorization header value (if API key is set)
    fn auth_header(&self) -> Option<String> {
        if self.settings.api_key.is_empty() {
            None
        } else {
            Some(format!("Bearer {}", self.settings.api_key))
        }
    }

    /// Make a chat completion request with retry logic
    async fn chat_completion(&self, prompt: &str) -> Result<String> {
        if self.settings.api_key.is_empty() {
            return Err(Error::MissingApiKey);
        }

        let request_body = ChatCompletionRequest {
            model: self.settings.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: self.settings.temperature,
        };

        let url = format!("{}/chat/completions", self.settings.base_url);
        let mut last_error: Option<Error> = None;

        for attempt in 0..=self.settings.max_retries {
            if attempt > 0 {
                let backoff = Duration::from_millis(500 * 2u64.pow(attempt - 1));
                debug!(attempt, ?backoff, "Retrying after error");
                tokio::time::sleep(backoff).await;
            }

            let mut req = self.client.post(&url).json(&request_body);
            if let Some(ref auth) = self.auth_header() {
                req = req.header("Authorization", auth);
            }

            match req.send().await {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        match response.json::<ChatCompletionResponse>().await {
                            Ok(parsed) => {
                                let choice = parsed.choices.first().ok_or_else(|| {
                                    Error::provider_malformed("No choices in API response")
                                })?;

                                let text =
                                    choice.message.content.clone().ok_or_else(|| {
                                        Error::provider_malformed(
                                            "Choice has no message content",
                                        )
                                    })?;

                                *self.total_requests.write() += 1;
                                debug!(
                                    total = self.total_requests(),
                                    answer_chars = text.chars().count(),
                                    "Chat completion succeeded"
                                );
                                return Ok(text);
                            }
                            Err(e) => {
                                return Err(Error::provider_malformed(format!(
                                    "Failed to parse API response: {}",
                                    e
                                )));
                            }
                        }
                    } else if status.as_u16() == 401 || status.as_u16() == 403 {
                        let body = response.text().await.unwrap_or_default();
                        return Err(Error::provider_auth(format!(
                            "API error {}: {}",
                            status, body
                        )));
                    } else if status.as_u16() == 429 || status.is_server_error() {
                        // Retryable error
                        let body = response.text().await.unwrap_or_default();
                        warn!(status = %status, attempt, "Retryable API error: {}", body);
                        last_error = Some(Error::provider_retryable(format!(
                            "API error {}: {}",
                            status, body
                        )));
                    } else {
                        // Non-retryable error
                        let body = response.text().await.unwrap_or_default();
                        return Err(Error::provider_request(format!(
                            "API error {}: {}",
                            status, body
                        )));
                    }
                }
                Err(e) => {
                    if e.is_timeout() {
                        warn!(attempt, error = %e, "Request timed out");
                        last_error = Some(Error::ProviderTimeout {
                            url: url.clone(),
                            timeout_secs: self.settings.timeout_secs,
                        });
                    } else if e.is_connect() {
                        warn!(attempt, error = %e, "Retryable connection error");
                        last_error =
                            Some(Error::provider_retryable(format!("Connection error: {}", e)));
                    } else {
                        return Err(Error::provider_request(format!("Request error: {}", e)));
                    }
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| Error::provider_request("All retry attempts exhausted")))
    }
}

#[async_trait]
impl ChatProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        self.chat_completion(prompt).await
    }

    async fn health_check(&self) -> Result<ProviderHealth> {
        let url = format!("{}/models", self.settings.base_url);
        let mut req = self.client.get(&url);
        if let Some(ref auth) = self.auth_header() {
            req = req.header("Authorization", auth);
        }

        match req.send().await {
            Ok(resp) if resp.status().is_success() => Ok(ProviderHealth {
                operational: true,
                error: None,
            }),
            Ok(resp) => Ok(ProviderHealth {
                operational: false,
                error: Some(format!("API returned status {}", resp.status())),
            }),
            Err(e) => Ok(ProviderHealth {
                operational: false,
                error: Some(format!("Connection failed: {}", e)),
            }),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
