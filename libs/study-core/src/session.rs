//! Study-session state machine.
//!
//! A session drives one pass over a deck. Navigation and grading are
//! decoupled: the user may browse freely, but only grading moves the session
//! toward its finished state, and grading the last card is the only way to
//! get there.

use crate::deck::Deck;
use crate::error::EmptyDeckError;
use crate::types::{Card, ProgressRecord};

/// Session lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Finished,
}

/// Result of grading the current card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradeOutcome {
    /// Progress to report when the graded card is persisted.
    pub progress: Option<ProgressRecord>,
    /// Session state after the transition.
    pub state: SessionState,
}

/// Running tally for the current pass, shown in the finished view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionTally {
    pub graded: usize,
    pub correct: usize,
}

/// One study pass over a non-empty deck.
pub struct StudySession {
    deck: Deck,
    state: SessionState,
    tally: SessionTally,
}

impl StudySession {
    /// Start a session over a non-empty deck.
    pub fn new(deck: Deck) -> Result<Self, EmptyDeckError> {
        if deck.is_empty() {
            return Err(EmptyDeckError);
        }
        Ok(Self {
            deck,
            state: SessionState::Active,
            tally: SessionTally::default(),
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == SessionState::Finished
    }

    /// Card under the cursor. The deck is non-empty by construction.
    pub fn current_card(&self) -> &Card {
        &self.deck.cards()[self.deck.cursor()]
    }

    pub fn position(&self) -> (usize, usize) {
        self.deck.position()
    }

    pub fn is_first(&self) -> bool {
        self.deck.is_first()
    }

    pub fn is_last(&self) -> bool {
        self.deck.is_last()
    }

    pub fn tally(&self) -> SessionTally {
        self.tally
    }

    /// Manual forward navigation; no state change, clamped at the end.
    pub fn advance(&mut self) {
        if self.state == SessionState::Active {
            self.deck.advance();
        }
    }

    /// Manual backward navigation; no state change, clamped at the start.
    pub fn retreat(&mut self) {
        if self.state == SessionState::Active {
            self.deck.retreat();
        }
    }

    /// Grade the current card and move the session forward.
    ///
    /// Grading the last card finishes the session whether or not the card is
    /// persisted; otherwise the cursor advances. A finished session ignores
    /// further grading.
    pub fn grade(&mut self, correct: bool) -> GradeOutcome {
        if self.state == SessionState::Finished {
            return GradeOutcome {
                progress: None,
                state: self.state,
            };
        }

        let progress = self
            .current_card()
            .id
            .map(|card_id| ProgressRecord { card_id, correct });

        self.tally.graded += 1;
        if correct {
            self.tally.correct += 1;
        }

        if self.deck.is_last() {
            self.state = SessionState::Finished;
        } else {
            self.deck.advance();
        }

        GradeOutcome {
            progress,
            state: self.state,
        }
    }

    /// Return a finished session to the first card for another pass. Progress
    /// already reported stays reported; nothing is re-issued or undone.
    pub fn restart(&mut self) {
        if self.state != SessionState::Finished {
            return;
        }
        self.deck.rewind();
        self.tally = SessionTally::default();
        self.state = SessionState::Active;
    }
}
