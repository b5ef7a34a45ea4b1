//! Prompt rendering — fills a persona template with the user's question.

/// Placeholder substituted with the user's question.
pub const QUESTION_PLACEHOLDER: &str = "{question}";

/// Identity template used when no persona framing applies. The question is
/// sent to the provider as-is.
pub const IDENTITY_TEMPLATE: &str = "{question}";

/// Replace the `{question}` placeholder in `template` with `question`.
///
/// The question is substituted verbatim, without escaping or truncation. A
/// template without the placeholder renders to itself unchanged. Registry
/// templates are validated at construction, so that case only arises for
/// templates supplied from elsewhere.
pub fn render_prompt(template: &str, question: &str) -> String {
    template.replace(QUESTION_PLACEHOLDER, question)
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
