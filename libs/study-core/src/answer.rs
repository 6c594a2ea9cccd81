//! Canonical answer resolution for the reveal side of a card.

use crate::types::{Card, CardKind, ChoiceAnswer, FreeAnswer};

/// Shown when a card carries no usable answer data.
pub const NO_ANSWER: &str = "No answer provided.";

/// Candidate fields a free-text answer may live under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreeAnswerField {
    Answer,
    ModelAnswer,
    CorrectAnswer,
    Response,
}

/// Default lookup order for free-text answers. The generation service is
/// supposed to emit `answer`, but older responses used the other names.
pub const FREE_ANSWER_PRIORITY: [FreeAnswerField; 4] = [
    FreeAnswerField::Answer,
    FreeAnswerField::ModelAnswer,
    FreeAnswerField::CorrectAnswer,
    FreeAnswerField::Response,
];

/// Resolve the canonical displayed answer for a card.
///
/// Total: malformed or missing data yields [`NO_ANSWER`] rather than an
/// error.
pub fn resolve_answer(card: &Card) -> String {
    resolve_answer_with(card, &FREE_ANSWER_PRIORITY)
}

/// Resolve with an explicit free-answer field priority.
pub fn resolve_answer_with(card: &Card, priority: &[FreeAnswerField]) -> String {
    match &card.kind {
        CardKind::Choice(choice) => resolve_choice(choice),
        CardKind::Free(free) => resolve_free(free, priority),
    }
}

fn resolve_choice(choice: &ChoiceAnswer) -> String {
    let Some(key) = choice.answer_key.as_deref() else {
        return NO_ANSWER.to_string();
    };

    // The key must be exactly one uppercase letter.
    let mut chars = key.chars();
    let (Some(letter), None) = (chars.next(), chars.next()) else {
        return NO_ANSWER.to_string();
    };
    if !letter.is_ascii_uppercase() {
        return NO_ANSWER.to_string();
    }

    let index = (letter as u8 - b'A') as usize;
    let Some(option) = choice.options.get(index) else {
        return NO_ANSWER.to_string();
    };

    let cleaned = strip_option_label(option);
    if cleaned.is_empty() {
        return NO_ANSWER.to_string();
    }

    format!("{letter}. {cleaned}")
}

fn resolve_free(free: &FreeAnswer, priority: &[FreeAnswerField]) -> String {
    for field in priority {
        let candidate = match field {
            FreeAnswerField::Answer => free.answer.as_deref(),
            FreeAnswerField::ModelAnswer => free.model_answer.as_deref(),
            FreeAnswerField::CorrectAnswer => free.correct_answer.as_deref(),
            FreeAnswerField::Response => free.response.as_deref(),
        };
        if let Some(text) = candidate {
            if !text.is_empty() {
                return text.to_string();
            }
        }
    }
    NO_ANSWER.to_string()
}

/// Strip a leading `"B) "` / `"b."` / `"C - "` style label from an option so
/// the resolved answer is not double-labelled.
fn strip_option_label(option: &str) -> &str {
    let rest = option.trim_start();

    let Some(letter) = rest.chars().next() else {
        return option;
    };
    if !matches!(letter.to_ascii_uppercase(), 'A'..='D') {
        return option;
    }

    let rest = rest[letter.len_utf8()..].trim_start();
    let Some(delim) = rest.chars().next() else {
        return option;
    };
    if !matches!(delim, ')' | '.' | ':' | '-') {
        return option;
    }

    rest[delim.len_utf8()..].trim_start()
}
