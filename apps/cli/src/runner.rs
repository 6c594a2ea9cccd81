//! Async shell around the study-session state machine.
//!
//! Grading applies the pure state transition first and only then issues the
//! progress report on its own task, so a slow or failing write can never
//! block or roll back the session.

use std::sync::Arc;

use async_trait::async_trait;

use study_core::{GradeOutcome, SessionState, StudySession};

use crate::api::{ApiClient, ApiError};

/// Destination for fire-and-forget progress reports.
#[async_trait]
pub trait ProgressReporter: Send + Sync + 'static {
    async fn report_progress(&self, card_id: i64, correct: bool) -> Result<(), ApiError>;
}

#[async_trait]
impl ProgressReporter for ApiClient {
    async fn report_progress(&self, card_id: i64, correct: bool) -> Result<(), ApiError> {
        ApiClient::report_progress(self, card_id, correct).await
    }
}

/// Drives one study session against a progress reporter.
pub struct StudyRunner<R: ProgressReporter> {
    session: StudySession,
    reporter: Arc<R>,
}

impl<R: ProgressReporter> StudyRunner<R> {
    pub fn new(session: StudySession, reporter: Arc<R>) -> Self {
        Self { session, reporter }
    }

    pub fn session(&self) -> &StudySession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut StudySession {
        &mut self.session
    }

    /// Grade the current card. The transition completes synchronously; a
    /// failed progress write is logged and dropped, never surfaced here.
    pub fn grade(&mut self, correct: bool) -> SessionState {
        let GradeOutcome { progress, state } = self.session.grade(correct);

        if let Some(record) = progress {
            let reporter = Arc::clone(&self.reporter);
            tokio::spawn(async move {
                if let Err(err) = reporter.report_progress(record.card_id, record.correct).await {
                    tracing::warn!(card_id = record.card_id, "progress report dropped: {err}");
                }
            });
        }

        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use study_core::{Card, CardKind, Deck, FreeAnswer};

    struct RecordingReporter {
        calls: Mutex<Vec<(i64, bool)>>,
        fail: bool,
    }

    impl RecordingReporter {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                fail,
            })
        }
    }

    #[async_trait]
    impl ProgressReporter for RecordingReporter {
        async fn report_progress(&self, card_id: i64, correct: bool) -> Result<(), ApiError> {
            self.calls.lock().unwrap().push((card_id, correct));
            if self.fail {
                return Err(ApiError::Network("connection refused".to_string()));
            }
            Ok(())
        }
    }

    fn runner(ids: &[Option<i64>], reporter: Arc<RecordingReporter>) -> StudyRunner<RecordingReporter> {
        let cards = ids
            .iter()
            .map(|id| Card {
                id: *id,
                question: "q".to_string(),
                explanation: None,
                kind: CardKind::Free(FreeAnswer::default()),
            })
            .collect();
        StudyRunner::new(StudySession::new(Deck::new(cards)).unwrap(), reporter)
    }

    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn failed_report_does_not_block_finishing() {
        let reporter = RecordingReporter::new(true);
        let mut runner = runner(&[Some(1)], Arc::clone(&reporter));

        let state = runner.grade(true);
        assert_eq!(state, SessionState::Finished);

        settle().await;
        assert_eq!(reporter.calls.lock().unwrap().as_slice(), &[(1, true)]);
    }

    #[tokio::test]
    async fn ephemeral_cards_report_nothing() {
        let reporter = RecordingReporter::new(false);
        let mut runner = runner(&[None, None], Arc::clone(&reporter));

        runner.grade(true);
        let state = runner.grade(false);
        assert_eq!(state, SessionState::Finished);

        settle().await;
        assert!(reporter.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn each_grade_reports_its_card() {
        let reporter = RecordingReporter::new(false);
        let mut runner = runner(&[Some(1), Some(2), Some(3)], Arc::clone(&reporter));

        assert_eq!(runner.grade(true), SessionState::Active);
        assert_eq!(runner.grade(false), SessionState::Active);
        assert_eq!(runner.grade(true), SessionState::Finished);

        settle().await;
        let mut calls = reporter.calls.lock().unwrap().clone();
        calls.sort();
        assert_eq!(calls, vec![(1, true), (2, false), (3, true)]);
    }
}
