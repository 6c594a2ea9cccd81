//! Error types for study-core.

use thiserror::Error;

/// A deck or session operation required at least one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("deck has no cards")]
pub struct EmptyDeckError;
