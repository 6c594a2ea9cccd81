//! Ordered deck of cards with a navigation cursor.

use crate::error::EmptyDeckError;
use crate::types::Card;

/// An ordered card sequence studied front to back.
///
/// The card set is fixed for the life of the deck; only the cursor moves.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    cursor: usize,
}

impl Deck {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Card under the cursor.
    pub fn current(&self) -> Result<&Card, EmptyDeckError> {
        self.cards.get(self.cursor).ok_or(EmptyDeckError)
    }

    /// Move forward one card, clamped at the end.
    pub fn advance(&mut self) {
        self.cursor = (self.cursor + 1).min(self.cards.len().saturating_sub(1));
    }

    /// Move back one card, clamped at the start.
    pub fn retreat(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn is_first(&self) -> bool {
        self.cursor == 0
    }

    pub fn is_last(&self) -> bool {
        self.cursor + 1 >= self.cards.len()
    }

    /// Reset the cursor to the first card.
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    /// 1-based position for a "question N of M" indicator.
    pub fn position(&self) -> (usize, usize) {
        (self.cursor + 1, self.cards.len())
    }
}
