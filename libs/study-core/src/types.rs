//! Core types for the study deck engine.

use serde::{Deserialize, Serialize};

/// Question style a card was generated as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Mcq,
    Saq,
}

impl Default for QuestionType {
    fn default() -> Self {
        Self::Mcq
    }
}

impl QuestionType {
    /// Get the question type as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mcq => "mcq",
            Self::Saq => "saq",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "mcq" => Some(Self::Mcq),
            "saq" => Some(Self::Saq),
            _ => None,
        }
    }
}

/// One study question, either generated this session or loaded from the
/// library.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    /// Durable identifier; present only once the card has been persisted.
    pub id: Option<i64>,
    pub question: String,
    pub explanation: Option<String>,
    pub kind: CardKind,
}

impl Card {
    pub fn question_type(&self) -> QuestionType {
        match self.kind {
            CardKind::Choice(_) => QuestionType::Mcq,
            CardKind::Free(_) => QuestionType::Saq,
        }
    }
}

/// Type-specific answer data. The variant decides which fields are
/// authoritative when resolving the displayed answer.
#[derive(Debug, Clone, PartialEq)]
pub enum CardKind {
    /// Multiple choice: ordered options indexed by letter.
    Choice(ChoiceAnswer),
    /// Short answer: free text that may live under one of several legacy
    /// field names.
    Free(FreeAnswer),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChoiceAnswer {
    /// Ordered option texts; index 0 is choice A.
    pub options: Vec<String>,
    /// Single uppercase letter indexing into `options`.
    pub answer_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FreeAnswer {
    pub answer: Option<String>,
    pub model_answer: Option<String>,
    pub correct_answer: Option<String>,
    pub response: Option<String>,
}

/// A named, persisted deck container.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: i64,
    pub title: String,
}

/// One correctness judgment against a persisted card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressRecord {
    pub card_id: i64,
    pub correct: bool,
}
