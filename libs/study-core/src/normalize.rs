//! Normalization of loosely-shaped generation output into cards.
//!
//! The generation service returns question objects whose fields vary by
//! question type and by how well the model followed its instructions. Nothing
//! downstream of this module handles partial shapes: a raw question always
//! becomes a well-formed [`Card`], with missing fields degraded to empty.

use serde::Deserialize;

use crate::types::{Card, CardKind, ChoiceAnswer, FreeAnswer, QuestionType};

/// One question as the generation service returns it: every field optional,
/// unknown fields ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawQuestion {
    #[serde(rename = "type")]
    pub question_type: Option<String>,
    pub question: Option<String>,
    pub options: Option<Vec<String>>,
    pub correct_answer: Option<String>,
    pub answer: Option<String>,
    pub model_answer: Option<String>,
    pub response: Option<String>,
    pub explanation: Option<String>,
}

/// Map one raw question into a card, falling back to `requested` when the
/// item does not carry a recognizable type tag of its own.
pub fn normalize_question(raw: RawQuestion, requested: QuestionType) -> Card {
    let tag = raw
        .question_type
        .as_deref()
        .and_then(QuestionType::from_str)
        .unwrap_or(requested);

    let kind = match tag {
        QuestionType::Mcq => CardKind::Choice(ChoiceAnswer {
            options: raw.options.unwrap_or_default(),
            answer_key: raw.correct_answer,
        }),
        QuestionType::Saq => CardKind::Free(FreeAnswer {
            answer: raw.answer,
            model_answer: raw.model_answer,
            correct_answer: raw.correct_answer,
            response: raw.response,
        }),
    };

    Card {
        id: None,
        question: raw.question.unwrap_or_default(),
        explanation: raw.explanation.filter(|text| !text.is_empty()),
        kind,
    }
}

/// Normalize a whole generation batch. An empty or absent `questions`
/// sequence is an empty deck, not an error.
pub fn normalize_questions(raw: Vec<RawQuestion>, requested: QuestionType) -> Vec<Card> {
    raw.into_iter()
        .map(|question| normalize_question(question, requested))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn type_tag_defaults_to_requested() {
        let card = normalize_question(RawQuestion::default(), QuestionType::Saq);
        assert_eq!(card.question_type(), QuestionType::Saq);
        assert_eq!(card.question, "");
        assert_eq!(card.id, None);
    }

    #[test]
    fn unknown_type_tag_defaults_to_requested() {
        let raw = RawQuestion {
            question_type: Some("essay".to_string()),
            ..RawQuestion::default()
        };
        let card = normalize_question(raw, QuestionType::Mcq);
        assert_eq!(card.question_type(), QuestionType::Mcq);
    }

    #[test]
    fn own_type_tag_wins_over_requested() {
        let raw = RawQuestion {
            question_type: Some("saq".to_string()),
            answer: Some("free text".to_string()),
            ..RawQuestion::default()
        };
        let card = normalize_question(raw, QuestionType::Mcq);
        assert_eq!(card.question_type(), QuestionType::Saq);
    }

    #[test]
    fn choice_fields_mapped() {
        let raw = RawQuestion {
            question_type: Some("mcq".to_string()),
            question: Some("Capital of France?".to_string()),
            options: Some(vec!["Paris".to_string(), "Lyon".to_string()]),
            correct_answer: Some("A".to_string()),
            explanation: Some("It is.".to_string()),
            ..RawQuestion::default()
        };
        let card = normalize_question(raw, QuestionType::Mcq);
        match &card.kind {
            CardKind::Choice(choice) => {
                assert_eq!(choice.options, vec!["Paris", "Lyon"]);
                assert_eq!(choice.answer_key.as_deref(), Some("A"));
            }
            CardKind::Free(_) => panic!("expected a choice card"),
        }
        assert_eq!(card.explanation.as_deref(), Some("It is."));
    }

    #[test]
    fn missing_options_become_empty() {
        let raw = RawQuestion {
            question_type: Some("mcq".to_string()),
            question: Some("q".to_string()),
            ..RawQuestion::default()
        };
        let card = normalize_question(raw, QuestionType::Mcq);
        match &card.kind {
            CardKind::Choice(choice) => assert!(choice.options.is_empty()),
            CardKind::Free(_) => panic!("expected a choice card"),
        }
    }

    #[test]
    fn empty_explanation_dropped() {
        let raw = RawQuestion {
            explanation: Some(String::new()),
            ..RawQuestion::default()
        };
        let card = normalize_question(raw, QuestionType::Saq);
        assert_eq!(card.explanation, None);
    }

    #[test]
    fn free_fallback_fields_survive_normalization() {
        let raw = RawQuestion {
            question_type: Some("saq".to_string()),
            model_answer: Some("42".to_string()),
            correct_answer: Some("also 42".to_string()),
            ..RawQuestion::default()
        };
        let card = normalize_question(raw, QuestionType::Saq);
        match &card.kind {
            CardKind::Free(free) => {
                assert_eq!(free.answer, None);
                assert_eq!(free.model_answer.as_deref(), Some("42"));
                assert_eq!(free.correct_answer.as_deref(), Some("also 42"));
            }
            CardKind::Choice(_) => panic!("expected a free card"),
        }
    }

    #[test]
    fn empty_batch_is_empty_deck() {
        let cards = normalize_questions(Vec::new(), QuestionType::Mcq);
        assert!(cards.is_empty());
    }
}
