//! Query service — orchestrates one question/answer round trip.
//!
//! Validates the question, resolves the persona, renders the prompt, and
//! makes the single provider call. No retries and no timeout enforcement
//! here; the provider owns its own transport policy.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::persona::{PersonaId, PersonaRegistry};
use crate::prompt::{render_prompt, IDENTITY_TEMPLATE};
use crate::provider::ChatProvider;

// ─────────────────────────────────────────────────────────────────
// Answer
// ─────────────────────────────────────────────────────────────────

/// Result of one successful query.
#[derive(Debug, Clone)]
pub struct Answer {
    /// The provider's answer text, unmodified.
    pub text: String,

    /// The persona the answer was framed as, when one matched.
    pub persona: Option<PersonaId>,

    /// True when the expert name did not match and the question was sent
    /// without persona framing.
    pub fallback_used: bool,

    /// Provider name that produced the answer.
    pub provider: &'static str,

    /// Wall-clock time spent in the provider call.
    pub elapsed: Duration,
}

// ─────────────────────────────────────────────────────────────────
// ExpertQueryService
// ─────────────────────────────────────────────────────────────────

/// Runs expert queries against a provider using the persona registry.
pub struct ExpertQueryService<'a> {
    registry: &'a PersonaRegistry,
    provider: &'a dyn ChatProvider,
}

impl<'a> ExpertQueryService<'a> {
    pub fn new(registry: &'a PersonaRegistry, provider: &'a dyn ChatProvider) -> Self {
        Self { registry, provider }
    }

    /// Answer `question` as the expert named by `expert_name`.
    ///
    /// An empty or whitespace-only question is rejected. An unknown expert
    /// name does not fail the query: the question is sent without persona
    /// framing and the answer is flagged with `fallback_used`.
    pub async fn ask(&self, question: &str, expert_name: &str) -> Result<Answer> {
        if question.trim().is_empty() {
            return Err(Error::EmptyQuestion);
        }

        let (template, persona) = match self.registry.find(expert_name) {
            Some(p) => (p.template, Some(p.id)),
            None => {
                warn!(
                    expert = %expert_name,
                    valid = %self.registry.valid_slugs(),
                    "Unknown expert, answering without persona framing"
                );
                (IDENTITY_TEMPLATE, None)
            }
        };

        let prompt = render_prompt(template, question);
        debug!(
            expert = %expert_name,
            prompt_chars = prompt.chars().count(),
            "Sending prompt to provider"
        );

        let start = Instant::now();
        let text = self.provider.generate(&prompt).await?;
        let elapsed = start.elapsed();

        info!(
            provider = self.provider.name(),
            expert = %expert_name,
            fallback = persona.is_none(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Query answered"
        );

        Ok(Answer {
            text,
            persona,
            fallback_used: persona.is_none(),
            provider: self.provider.name(),
            elapsed,
        })
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::provider::MockProvider;

    fn registry() -> PersonaRegistry {
        PersonaRegistry::builtin().unwrap()
    }

    #[tokio::test]
    async fn test_empty_question_rejected() {
        let registry = registry();
        let mock = MockProvider::new();
        let service = ExpertQueryService::new(&registry, &mock);

        let err = service.ask("", "sleep").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::EmptyQuestion);

        let err = service.ask("   \n\t", "stress").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::EmptyQuestion);

        // The provider was never called.
        assert_eq!(mock.generate_calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_question_rejected_for_unknown_expert_too() {
        let registry = registry();
        let mock = MockProvider::new();
        let service = ExpertQueryService::new(&registry, &mock);

        let err = service.ask("  ", "astrology").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::EmptyQuestion);
    }

    #[tokio::test]
    async fn test_known_expert_prompt_carries_framing_and_question() {
        let registry = registry();
        let mock = MockProvider::with_response("早めに就寝させましょう");
        let service = ExpertQueryService::new(&registry, &mock);

        let answer = service.ask("子どもが夜泣きします", "sleep").await.unwrap();

        let prompt = mock.last_prompt().unwrap();
        assert!(prompt.contains("睡眠習慣に詳しい専門家"));
        assert!(prompt.contains("質問：子どもが夜泣きします"));

        assert_eq!(answer.text, "早めに就寝させましょう");
        assert_eq!(answer.persona, Some(PersonaId::Sleep));
        assert!(!answer.fallback_used);
        assert_eq!(answer.provider, "mock");
    }

    #[tokio::test]
    async fn test_unknown_expert_falls_back_to_raw_question() {
        let registry = registry();
        let mock = MockProvider::with_response("答えです");
        let service = ExpertQueryService::new(&registry, &mock);

        let answer = service.ask("質問です", "astrology").await.unwrap();

        // Prompt is exactly the raw question, no framing.
        assert_eq!(mock.last_prompt().as_deref(), Some("質問です"));
        assert!(answer.fallback_used);
        assert!(answer.persona.is_none());
        assert_eq!(answer.text, "答えです");
    }

    #[tokio::test]
    async fn test_answer_text_not_post_processed() {
        let registry = registry();
        let mock = MockProvider::with_response("  前後の空白も 改行も\nそのまま  ");
        let service = ExpertQueryService::new(&registry, &mock);

        let answer = service.ask("質問", "nutrition").await.unwrap();
        assert_eq!(answer.text, "  前後の空白も 改行も\nそのまま  ");
    }

    #[tokio::test]
    async fn test_provider_failure_preserves_message() {
        let registry = registry();
        let mock = MockProvider::failing("rate limited by upstream");
        let service = ExpertQueryService::new(&registry, &mock);

        let err = service.ask("質問", "balance").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::ProviderRequest);
        assert!(err.to_string().contains("rate limited by upstream"));
    }

    #[tokio::test]
    async fn test_one_provider_call_per_ask() {
        let registry = registry();
        let mock = MockProvider::new();
        let service = ExpertQueryService::new(&registry, &mock);

        service.ask("一つ目", "stress").await.unwrap();
        service.ask("二つ目", "management").await.unwrap();
        assert_eq!(mock.generate_calls(), 2);
    }

    #[tokio::test]
    async fn test_same_inputs_render_same_prompt() {
        let registry = registry();
        let mock = MockProvider::new();
        let service = ExpertQueryService::new(&registry, &mock);

        service.ask("好き嫌いが多い", "nutrition").await.unwrap();
        service.ask("好き嫌いが多い", "nutrition").await.unwrap();

        let prompts = mock.received_prompts();
        assert_eq!(prompts[0], prompts[1]);
    }
}
