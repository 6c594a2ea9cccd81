//! Generate a deck from a document, optionally saving it to the library.

use std::path::Path;

use anyhow::{Context, Result};

use study_core::QuestionType;

use crate::api::{ApiClient, GenerationRequest};
use crate::commands::study;

pub async fn run(
    client: &ApiClient,
    file: &Path,
    kind: QuestionType,
    count: u32,
    save: bool,
    title: Option<String>,
) -> Result<()> {
    let request = GenerationRequest::new(file, kind, count)?;

    println!(
        "Generating {count} {} questions from {}...",
        kind.as_str().to_uppercase(),
        file.display()
    );
    let cards = client
        .generate_questions(&request)
        .await
        .context("question generation failed")?;

    if cards.is_empty() {
        println!("No questions could be generated from this document.");
        return Ok(());
    }
    println!("Generated {} questions.", cards.len());

    let cards = if save {
        let title = deck_title(title, file);
        let document = client
            .create_document(&title)
            .await
            .context("could not save the deck")?
            .into_document();
        let persisted = client
            .attach_cards(document.id, &cards)
            .await
            .context("could not save the deck")?;
        println!(
            "Saved {} cards to \"{}\" (deck {}).",
            persisted.len(),
            document.title,
            document.id
        );
        persisted
    } else {
        cards
    };

    study::run_deck(client, cards).await
}

/// User-supplied title, else the source file name, else a placeholder.
fn deck_title(title: Option<String>, file: &Path) -> String {
    title
        .filter(|t| !t.trim().is_empty())
        .or_else(|| {
            file.file_stem()
                .and_then(|stem| stem.to_str())
                .map(|stem| stem.to_string())
        })
        .unwrap_or_else(|| "Untitled deck".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_title_wins() {
        let title = deck_title(Some("My deck".to_string()), Path::new("notes.pdf"));
        assert_eq!(title, "My deck");
    }

    #[test]
    fn blank_title_falls_back_to_file_stem() {
        let title = deck_title(Some("   ".to_string()), Path::new("/tmp/biology-notes.pdf"));
        assert_eq!(title, "biology-notes");
    }

    #[test]
    fn no_usable_name_gets_placeholder() {
        let title = deck_title(None, Path::new(""));
        assert_eq!(title, "Untitled deck");
    }
}
