//! Core study-session engine shared by the studydeck client.
//!
//! Provides:
//! - Card data model (choice vs free-text variants)
//! - Canonical answer resolution for the reveal side of a card
//! - Deck navigation and the study-session state machine
//! - Normalization of raw generation output into cards

pub mod answer;
pub mod deck;
pub mod error;
pub mod normalize;
pub mod session;
pub mod types;

pub use answer::{
    resolve_answer, resolve_answer_with, FreeAnswerField, FREE_ANSWER_PRIORITY, NO_ANSWER,
};
pub use deck::Deck;
pub use error::EmptyDeckError;
pub use normalize::{normalize_question, normalize_questions, RawQuestion};
pub use session::{GradeOutcome, SessionState, SessionTally, StudySession};
pub use types::{
    Card, CardKind, ChoiceAnswer, Document, FreeAnswer, ProgressRecord, QuestionType,
};
