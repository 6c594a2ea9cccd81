//! Command-line interface to studydeck.
//!
//! Upload a document to generate a question deck, save decks to the library,
//! and study them with per-card progress reporting.

mod api;
mod commands;
mod runner;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use study_core::QuestionType;

use crate::api::ApiClient;

const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Parser)]
#[command(
    name = "studydeck",
    version,
    about = "Generate and study question decks from your documents"
)]
struct Cli {
    /// Base URL of the studydeck service (also: STUDYDECK_API_URL).
    #[arg(long)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate study questions from a document and study them.
    Generate {
        /// Source document (PDF).
        file: PathBuf,

        /// Question style to generate.
        #[arg(long, default_value = "mcq", value_parser = parse_question_type)]
        kind: QuestionType,

        /// How many questions to request (5, 10, 15 or 20).
        #[arg(long, default_value_t = 5)]
        count: u32,

        /// Save the generated deck to the library before studying.
        #[arg(long)]
        save: bool,

        /// Title for the saved deck; defaults to the file name.
        #[arg(long)]
        title: Option<String>,
    },

    /// List saved decks in the library.
    Library,

    /// Study a saved deck from the library.
    Study {
        /// Id of the saved deck, as shown by `studydeck library`.
        document_id: i64,
    },
}

fn parse_question_type(s: &str) -> Result<QuestionType, String> {
    QuestionType::from_str(s).ok_or_else(|| format!("expected mcq or saq, got {s:?}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let api_url = cli
        .api_url
        .or_else(|| std::env::var("STUDYDECK_API_URL").ok())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let client = ApiClient::new(api_url);

    match cli.command {
        Command::Generate {
            file,
            kind,
            count,
            save,
            title,
        } => commands::generate::run(&client, &file, kind, count, save, title).await,
        Command::Library => commands::library::run(&client).await,
        Command::Study { document_id } => commands::study::run_saved(&client, document_id).await,
    }
}
