//! Command handlers for the studydeck CLI.

pub mod generate;
pub mod library;
pub mod study;
