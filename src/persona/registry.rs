//! Builtin persona registry — the fixed table of expert personas.
//!
//! The table is embedded in the binary and validated once at construction:
//! duplicate ids and templates without a `{question}` placeholder are rejected
//! before the first query runs.

use crate::error::{Error, Result};
use crate::prompt::QUESTION_PLACEHOLDER;

use super::types::{Persona, PersonaId};

// ─────────────────────────────────────────────────────────────────
// Builtin templates
// ─────────────────────────────────────────────────────────────────

const STRESS_TEMPLATE: &str = "\
あなたは親の育児ストレスを軽減するための専門家です。
育児疲れやストレス管理に関する実践的なアドバイスを提供します。
親自身の心身の健康を保つための方法を教えます。

質問：{question}
";

const NUTRITION_TEMPLATE: &str = "\
あなたは子どもの栄養に詳しいアドバイザーです。
子どもの健康な発育を支える食事や栄養バランスについてアドバイスを提供します。
食事の習慣や偏食に関する質問にも丁寧に答えます。

質問：{question}
";

const SLEEP_TEMPLATE: &str = "\
あなたは子どもの睡眠習慣に詳しい専門家です。
子どもの夜泣きや睡眠不足に関する解決策を提供し、健全な睡眠を促すためのアドバイスを行います。
親が子どもの睡眠問題に対処できるようサポートします。

質問：{question}
";

const BALANCE_TEMPLATE: &str = "\
あなたは働く親のための育児と仕事の両立に詳しいアドバイザーです。
仕事と育児のバランスを保つための実践的なアドバイスを提供し、時間管理や家族とのコミュニケーションをサポートします。

質問：{question}
";

const MANAGEMENT_TEMPLATE: &str = "\
あなたは経営に詳しいアドバイザーです。
企業経営に役立つ情報を提供し、サポートします。

質問：{question}
";

const BUILTIN_PERSONAS: &[Persona] = &[
    Persona {
        id: PersonaId::Stress,
        description: "親の育児ストレスを軽減するための専門家です",
        template: STRESS_TEMPLATE,
    },
    Persona {
        id: PersonaId::Nutrition,
        description: "子どもの栄養に詳しい専門家です",
        template: NUTRITION_TEMPLATE,
    },
    Persona {
        id: PersonaId::Sleep,
        description: "子どもの睡眠習慣に詳しい専門家です",
        template: SLEEP_TEMPLATE,
    },
    Persona {
        id: PersonaId::Balance,
        description: "働く親のための育児と仕事の両立に詳しい専門家です",
        template: BALANCE_TEMPLATE,
    },
    Persona {
        id: PersonaId::Management,
        description: "経営の専門家です",
        template: MANAGEMENT_TEMPLATE,
    },
];

// ─────────────────────────────────────────────────────────────────
// Registry
// ─────────────────────────────────────────────────────────────────

/// Ordered, validated collection of expert personas.
///
/// Construct once at startup and pass by reference to the query service.
#[derive(Debug, Clone)]
pub struct PersonaRegistry {
    personas: Vec<Persona>,
}

impl PersonaRegistry {
    /// Build the registry from the builtin table.
    ///
    /// Fails if two entries share an id or a template lacks the
    /// `{question}` placeholder. Both conditions are bugs in the table, so
    /// they surface before any query is attempted.
    pub fn builtin() -> Result<Self> {
        Self::from_personas(BUILTIN_PERSONAS.to_vec())
    }

    fn from_personas(personas: Vec<Persona>) -> Result<Self> {
        for (i, persona) in personas.iter().enumerate() {
            if personas[..i].iter().any(|p| p.id == persona.id) {
                return Err(Error::DuplicatePersona {
                    persona: persona.slug().to_string(),
                });
            }
            if !persona.template.contains(QUESTION_PLACEHOLDER) {
                return Err(Error::TemplateMissingPlaceholder {
                    persona: persona.slug().to_string(),
                });
            }
        }
        Ok(Self { personas })
    }

    /// All personas in display order.
    pub fn all(&self) -> &[Persona] {
        &self.personas
    }

    /// Look up a persona by slug.
    pub fn find(&self, name: &str) -> Option<&Persona> {
        self.personas.iter().find(|p| p.slug() == name)
    }

    /// Comma-separated list of valid slugs, for error messages.
    pub fn valid_slugs(&self) -> String {
        self.personas
            .iter()
            .map(|p| p.slug())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
