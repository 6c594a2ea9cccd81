//! HTTP gateway to the question-generation and library service.
//!
//! All operations surface failures synchronously as [`ApiError`]; nothing
//! here retries. The service's wire shapes stay private to this module and
//! convert at the boundary into `study_core` types.

use std::path::PathBuf;

use reqwest::multipart;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use study_core::{
    normalize_questions, Card, CardKind, ChoiceAnswer, Document, FreeAnswer, QuestionType,
    RawQuestion,
};

/// Question counts the generator offers.
pub const OFFERED_COUNTS: [u32; 4] = [5, 10, 15, 20];

/// Transport errors. The server's own message is carried when it sent one.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("server error ({status}): {message}")]
    Backend { status: u16, message: String },

    #[error("parse error: {0}")]
    Parse(String),
}

/// Caller-supplied input rejected before any request is made.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("missing file: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("count must be one of 5, 10, 15 or 20 (got {0})")]
    UnsupportedCount(u32),
}

/// A validated question-generation request.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub file: PathBuf,
    pub question_type: QuestionType,
    pub count: u32,
}

impl GenerationRequest {
    /// Validate the source file and requested count.
    pub fn new(
        file: impl Into<PathBuf>,
        question_type: QuestionType,
        count: u32,
    ) -> Result<Self, ValidationError> {
        let file = file.into();
        if !file.is_file() {
            return Err(ValidationError::MissingFile(file));
        }
        if !OFFERED_COUNTS.contains(&count) {
            return Err(ValidationError::UnsupportedCount(count));
        }
        Ok(Self {
            file,
            question_type,
            count,
        })
    }
}

// === Wire types ===

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    questions: Vec<serde_json::Value>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct DocumentCreateRequest<'a> {
    title: &'a str,
}

/// A saved deck as the library lists it.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentRecord {
    pub id: i64,
    pub title: String,
    pub created_at: String,
}

impl DocumentRecord {
    pub fn into_document(self) -> Document {
        Document {
            id: self.id,
            title: self.title,
        }
    }
}

#[derive(Debug, Serialize)]
struct CardsAttachRequest {
    cards: Vec<CardPayload>,
}

#[derive(Debug, Serialize)]
struct CardPayload {
    #[serde(rename = "type")]
    question_type: QuestionType,
    question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    correct_answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    explanation: Option<String>,
}

impl CardPayload {
    fn from_card(card: &Card) -> Self {
        match &card.kind {
            CardKind::Choice(choice) => Self {
                question_type: QuestionType::Mcq,
                question: card.question.clone(),
                options: Some(choice.options.clone()),
                correct_answer: choice.answer_key.clone(),
                answer: None,
                explanation: card.explanation.clone(),
            },
            CardKind::Free(free) => Self {
                question_type: QuestionType::Saq,
                question: card.question.clone(),
                options: None,
                correct_answer: free.correct_answer.clone(),
                answer: free.answer.clone(),
                explanation: card.explanation.clone(),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct CardRecord {
    id: i64,
    #[allow(dead_code)]
    document_id: i64,
    #[serde(rename = "type")]
    question_type: QuestionType,
    question: String,
    #[serde(default)]
    options: Option<Vec<String>>,
    #[serde(default)]
    correct_answer: Option<String>,
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    explanation: Option<String>,
}

impl CardRecord {
    fn into_card(self) -> Card {
        let kind = match self.question_type {
            QuestionType::Mcq => CardKind::Choice(ChoiceAnswer {
                options: self.options.unwrap_or_default(),
                answer_key: self.correct_answer,
            }),
            QuestionType::Saq => CardKind::Free(FreeAnswer {
                answer: self.answer,
                model_answer: None,
                correct_answer: self.correct_answer,
                response: None,
            }),
        };
        Card {
            id: Some(self.id),
            question: self.question,
            explanation: self.explanation.filter(|text| !text.is_empty()),
            kind,
        }
    }
}

#[derive(Debug, Serialize)]
struct ProgressRequest {
    card_id: i64,
    correct: bool,
}

#[derive(Debug, Serialize)]
struct ExplainRequest<'a> {
    question: &'a str,
    correct_answer: &'a str,
}

#[derive(Debug, Deserialize)]
struct ExplainResponse {
    explanation: String,
}

/// Client for the studydeck service.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Generate study questions from a document.
    ///
    /// A success body may still carry an `error` note alongside no questions;
    /// the note is logged and the empty batch returned as-is.
    pub async fn generate_questions(
        &self,
        request: &GenerationRequest,
    ) -> Result<Vec<Card>, ApiError> {
        let url = format!("{}/generate-questions", self.base_url);

        let bytes = tokio::fs::read(&request.file)
            .await
            .map_err(|e| ApiError::Network(format!("reading {}: {e}", request.file.display())))?;
        let file_name = request
            .file
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload.pdf")
            .to_string();

        let form = multipart::Form::new()
            .part("file", multipart::Part::bytes(bytes).file_name(file_name))
            .text("question_type", request.question_type.as_str())
            .text("count", request.count.to_string());

        let resp = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let resp = check_status(resp, "question generation failed").await?;

        let body: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        if let Some(note) = body.error.filter(|note| !note.is_empty()) {
            tracing::warn!("generation service reported: {note}");
        }

        // Lenient per-question decode: one malformed item degrades to an
        // all-absent question instead of failing the batch.
        let raw: Vec<RawQuestion> = body
            .questions
            .into_iter()
            .map(|value| serde_json::from_value(value).unwrap_or_default())
            .collect();

        Ok(normalize_questions(raw, request.question_type))
    }

    /// Create a library document to hold a saved deck.
    pub async fn create_document(&self, title: &str) -> Result<DocumentRecord, ApiError> {
        let url = format!("{}/documents", self.base_url);

        let resp = self
            .client
            .post(&url)
            .json(&DocumentCreateRequest { title })
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let resp = check_status(resp, "could not create the document").await?;

        resp.json().await.map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Attach generated cards to a document. The returned cards carry durable
    /// ids and preserve the input order.
    pub async fn attach_cards(
        &self,
        document_id: i64,
        cards: &[Card],
    ) -> Result<Vec<Card>, ApiError> {
        let url = format!("{}/documents/{document_id}/cards", self.base_url);
        let request = CardsAttachRequest {
            cards: cards.iter().map(CardPayload::from_card).collect(),
        };

        let resp = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let resp = check_status(resp, "could not save the cards").await?;

        let records: Vec<CardRecord> = resp
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        Ok(records.into_iter().map(CardRecord::into_card).collect())
    }

    /// List saved decks. An empty library is a normal result, not an error.
    pub async fn list_documents(&self) -> Result<Vec<DocumentRecord>, ApiError> {
        let url = format!("{}/documents", self.base_url);

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let resp = check_status(resp, "could not load the library").await?;

        resp.json().await.map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Fetch the persisted cards of a saved deck.
    pub async fn fetch_cards(&self, document_id: i64) -> Result<Vec<Card>, ApiError> {
        let url = format!("{}/documents/{document_id}/cards", self.base_url);

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let resp = check_status(resp, "could not load the deck").await?;

        let records: Vec<CardRecord> = resp
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        Ok(records.into_iter().map(CardRecord::into_card).collect())
    }

    /// Record one correctness judgment against a persisted card. The response
    /// body is ignored beyond success.
    pub async fn report_progress(&self, card_id: i64, correct: bool) -> Result<(), ApiError> {
        let url = format!("{}/progress", self.base_url);

        let resp = self
            .client
            .post(&url)
            .json(&ProgressRequest { card_id, correct })
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        check_status(resp, "could not record progress").await?;
        Ok(())
    }

    /// Ask the service to explain why an answer is correct.
    pub async fn explain(&self, question: &str, correct_answer: &str) -> Result<String, ApiError> {
        let url = format!("{}/explain-question", self.base_url);

        let resp = self
            .client
            .post(&url)
            .json(&ExplainRequest {
                question,
                correct_answer,
            })
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let resp = check_status(resp, "could not fetch an explanation").await?;

        let body: ExplainResponse = resp
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        Ok(body.explanation)
    }
}

/// Uniform non-2xx handling: the body text is the message, with an
/// operation-specific fallback when the body is empty.
async fn check_status(
    resp: reqwest::Response,
    fallback: &str,
) -> Result<reqwest::Response, ApiError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    let message = if body.trim().is_empty() {
        fallback.to_string()
    } else {
        body
    };
    Err(ApiError::Backend { status, message })
}
