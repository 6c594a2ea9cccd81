//! Library listing.

use anyhow::{Context, Result};

use crate::api::{ApiClient, DocumentRecord};

pub async fn run(client: &ApiClient) -> Result<()> {
    let documents = client
        .list_documents()
        .await
        .context("failed to load the library")?;
    println!("{}", render_library(&documents));
    Ok(())
}

fn render_library(documents: &[DocumentRecord]) -> String {
    if documents.is_empty() {
        return "No saved decks yet. Generate questions with `studydeck generate --save`."
            .to_string();
    }

    let mut out = String::from("Saved decks:");
    for document in documents {
        out.push_str(&format!(
            "\n  {:>4}  {}  ({})",
            document.id,
            document.title,
            format_created(&document.created_at)
        ));
    }
    out
}

/// The server sends ISO-8601 timestamps, with or without an offset.
fn format_created(raw: &str) -> String {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return dt.format("%Y-%m-%d").to_string();
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_library_is_not_an_error() {
        assert_eq!(
            render_library(&[]),
            "No saved decks yet. Generate questions with `studydeck generate --save`."
        );
    }

    #[test]
    fn lists_documents_with_dates() {
        let documents = vec![
            DocumentRecord {
                id: 2,
                title: "Biology".to_string(),
                created_at: "2026-02-01T09:30:00".to_string(),
            },
            DocumentRecord {
                id: 15,
                title: "History".to_string(),
                created_at: "2026-03-04T10:00:00+00:00".to_string(),
            },
        ];
        let rendered = render_library(&documents);
        assert_eq!(
            rendered,
            "Saved decks:\n     2  Biology  (2026-02-01)\n    15  History  (2026-03-04)"
        );
    }

    #[test]
    fn unparseable_timestamp_shown_raw() {
        assert_eq!(format_created("yesterday"), "yesterday");
    }

    #[test]
    fn fractional_seconds_accepted() {
        assert_eq!(format_created("2026-02-01T09:30:00.123456"), "2026-02-01");
    }
}
