//! Interactive terminal study loop.
//!
//! Navigation and grading are separate: the user can browse the deck freely,
//! but only grading the last card ends the session.

use std::io::Write as _;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use study_core::{
    resolve_answer, Card, CardKind, Deck, EmptyDeckError, StudySession,
};

use crate::api::{ApiClient, ApiError};
use crate::runner::StudyRunner;

/// Study a saved deck from the library.
pub async fn run_saved(client: &ApiClient, document_id: i64) -> Result<()> {
    let cards = client
        .fetch_cards(document_id)
        .await
        .context("failed to load the deck")?;
    run_deck(client, cards).await
}

/// Drive the study loop over an already-loaded card list.
pub async fn run_deck(client: &ApiClient, cards: Vec<Card>) -> Result<()> {
    let session = match StudySession::new(Deck::new(cards)) {
        Ok(session) => session,
        Err(EmptyDeckError) => {
            println!("No cards found. Generate some questions first.");
            return Ok(());
        }
    };

    let mut runner = StudyRunner::new(session, Arc::new(client.clone()));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        if runner.session().is_finished() {
            println!("{}", render_finished(runner.session()));
            let Some(input) = prompt(&mut lines, "[r]estart · [q]uit > ").await? else {
                return Ok(());
            };
            match input.as_str() {
                "r" => runner.session_mut().restart(),
                "q" => return Ok(()),
                _ => {}
            }
            continue;
        }

        println!("{}", render_front(runner.session().current_card(), runner.session().position()));
        let Some(input) = prompt(&mut lines, "[enter] reveal · [n]ext · [p]rev · [q]uit > ").await?
        else {
            return Ok(());
        };

        match input.as_str() {
            "" => {
                let card = runner.session().current_card().clone();
                println!("{}", render_back(&card));

                loop {
                    let Some(input) =
                        prompt(&mut lines, "got it? [y]es · [n]o · [e]xplain · [q]uit > ").await?
                    else {
                        return Ok(());
                    };
                    match input.as_str() {
                        "y" => {
                            runner.grade(true);
                            break;
                        }
                        "n" => {
                            runner.grade(false);
                            break;
                        }
                        "e" => match fetch_explanation(client, &card).await {
                            Ok(text) => println!("\n{text}"),
                            Err(err) => println!("Could not fetch an explanation: {err}"),
                        },
                        "q" => return Ok(()),
                        _ => {}
                    }
                }
            }
            "n" => runner.session_mut().advance(),
            "p" => runner.session_mut().retreat(),
            "q" => return Ok(()),
            _ => {}
        }
    }
}

async fn prompt(lines: &mut Lines<BufReader<Stdin>>, text: &str) -> Result<Option<String>> {
    print!("{text}");
    std::io::stdout().flush().ok();
    let line = lines.next_line().await.context("reading input")?;
    Ok(line.map(|line| line.trim().to_lowercase()))
}

/// Reuse the card's own explanation when it has one; otherwise ask the
/// service for a fresh one.
async fn fetch_explanation(client: &ApiClient, card: &Card) -> Result<String, ApiError> {
    if let Some(explanation) = &card.explanation {
        return Ok(explanation.clone());
    }
    client.explain(&card.question, &resolve_answer(card)).await
}

fn render_front(card: &Card, position: (usize, usize)) -> String {
    let (current, total) = position;
    let mut out = format!(
        "\n[{}] Question {current}/{total}\n{}",
        card.question_type().as_str().to_uppercase(),
        card.question
    );
    if let CardKind::Choice(choice) = &card.kind {
        for (index, option) in choice.options.iter().enumerate() {
            let letter = char::from(b'A' + index.min(25) as u8);
            out.push_str(&format!("\n  {letter}. {option}"));
        }
    }
    out
}

fn render_back(card: &Card) -> String {
    let mut out = format!("\nAnswer: {}", resolve_answer(card));
    if let Some(explanation) = &card.explanation {
        out.push_str(&format!("\nExplanation: {explanation}"));
    }
    out
}

fn render_finished(session: &StudySession) -> String {
    let tally = session.tally();
    format!(
        "\nDeck finished: {} of {} graded cards correct.",
        tally.correct, tally.graded
    )
}
