//! Plain-text and JSON output for CLI commands.

use serde::Serialize;

use crate::models::{Book, IngestionLog, Reservation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// One line per record
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// One-line rendering of a record for text output.
pub trait Summary {
    fn summary(&self) -> String;
}

impl Summary for Book {
    fn summary(&self) -> String {
        let year = self
            .original_publication_year
            .map(|y| format!(" ({})", y))
            .unwrap_or_default();
        let rating = self
            .average_rating
            .map(|r| format!("  ★ {:.2}", r))
            .unwrap_or_default();
        let state = if self.reserved { "  [reserved]" } else { "" };
        format!(
            "#{:<6} {}{} by {}{}{}",
            self.id,
            self.title,
            year,
            self.authors_line(),
            rating,
            state
        )
    }
}

impl Summary for Reservation {
    fn summary(&self) -> String {
        format!(
            "#{:<6} book {:<6} {:<9} {} <{}> since {}",
            self.id,
            self.book.id(),
            format!("{:?}", self.status).to_lowercase(),
            self.name,
            self.email,
            self.reserved_at.format("%Y-%m-%d")
        )
    }
}

impl Summary for IngestionLog {
    fn summary(&self) -> String {
        let errors = match self.errors.as_deref() {
            Some(e) if !e.is_empty() => " (with errors)",
            _ => "",
        };
        format!(
            "{}  {}: {} records{}",
            self.ingested_at.format("%Y-%m-%d %H:%M"),
            self.filename,
            self.records_processed,
            errors
        )
    }
}

pub fn print_list<T: Serialize + Summary>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            if items.is_empty() {
                println!("No results found.");
            }
            for item in items {
                println!("{}", item.summary());
            }
        }
        OutputFormat::Json => print_json(items),
    }
}

pub fn print_item<T: Serialize + std::fmt::Debug>(item: &T, format: OutputFormat) {
    match format {
        OutputFormat::Text => println!("{:#?}", item),
        OutputFormat::Json => print_json(item),
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    let json = serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string());
    println!("{}", json);
}

pub fn print_success(msg: &str) {
    println!("✓ {}", msg);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Author;

    #[test]
    fn book_summary_line() {
        let book = Book {
            id: 42,
            title: "Dune".to_string(),
            original_title: None,
            authors: vec![Author {
                name: "Frank Herbert".to_string(),
            }],
            isbn: None,
            isbn13: None,
            average_rating: Some(4.25),
            ratings_count: None,
            original_publication_year: Some(1965),
            image_url: None,
            small_image_url: None,
            language_code: None,
            goodreads_book_id: None,
            reserved: true,
        };
        let line = book.summary();
        assert!(line.starts_with("#42"));
        assert!(line.contains("Dune (1965) by Frank Herbert"));
        assert!(line.contains("4.25"));
        assert!(line.ends_with("[reserved]"));
    }
}
