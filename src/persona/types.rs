//! Core types for the persona system.
//!
//! Personas define the expert role the advisor answers as: the description
//! shown in listings and the prompt template filled with the user's question.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────
// Persona Id
// ─────────────────────────────────────────────────────────────────

/// The five expert roles the advisor can answer as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PersonaId {
    /// Parenting stress expert.
    Stress,
    /// Child nutrition advisor.
    Nutrition,
    /// Child sleep habits expert.
    Sleep,
    /// Work-life balance advisor for working parents.
    Balance,
    /// Business management advisor.
    Management,
}

impl PersonaId {
    /// Slug used in CLI args and config files.
    pub fn slug(&self) -> &'static str {
        match self {
            PersonaId::Stress => "stress",
            PersonaId::Nutrition => "nutrition",
            PersonaId::Sleep => "sleep",
            PersonaId::Balance => "balance",
            PersonaId::Management => "management",
        }
    }

    /// Human-readable display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            PersonaId::Stress => "育児ストレス",
            PersonaId::Nutrition => "子どもの栄養",
            PersonaId::Sleep => "子どもの睡眠",
            PersonaId::Balance => "仕事と育児の両立",
            PersonaId::Management => "経営",
        }
    }

    /// All persona ids in display order.
    pub fn all() -> &'static [PersonaId] {
        &[
            PersonaId::Stress,
            PersonaId::Nutrition,
            PersonaId::Sleep,
            PersonaId::Balance,
            PersonaId::Management,
        ]
    }
}

impl fmt::Display for PersonaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl FromStr for PersonaId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stress" => Ok(PersonaId::Stress),
            "nutrition" => Ok(PersonaId::Nutrition),
            "sleep" => Ok(PersonaId::Sleep),
            "balance" => Ok(PersonaId::Balance),
            "management" => Ok(PersonaId::Management),
            _ => Err(format!(
                "Unknown expert '{}'. Valid: stress, nutrition, sleep, balance, management",
                s
            )),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Persona
// ─────────────────────────────────────────────────────────────────

/// A single expert persona: id, listing description, and prompt template.
///
/// Instances are created once from the builtin table and never mutated.
/// The template carries exactly one `{question}` placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Persona {
    /// Which expert this is.
    pub id: PersonaId,

    /// Short description shown in `advisor experts`.
    pub description: &'static str,

    /// Prompt template with a `{question}` placeholder.
    pub template: &'static str,
}

impl Persona {
    /// Slug of this persona's id.
    pub fn slug(&self) -> &'static str {
        self.id.slug()
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
