//! Command-line surface: login, browse, edit, reserve and upload.

pub mod output;

use std::error::Error;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use self::output::{print_item, print_json, print_list, print_success, OutputFormat};
use crate::api::UploadError;
use crate::config::{load_config, print_schema};
use crate::gateway::GatewayError;
use crate::models::{
    BookQuery, BookUpdate, CreateReservation, ReservationFilter, ReservationStatus,
    ReservationUpdate,
};
use crate::state::AppState;
use crate::utils::logger::init_logging;

#[derive(Debug, Parser)]
#[command(name = "bookshelf", version, about = "Browse, edit and reserve books in the catalog")]
pub struct Cli {
    /// Path to the YAML configuration file
    #[arg(long, short, global = true, default_value = "./config.yaml", env = "BOOKSHELF_CONFIG")]
    pub config: PathBuf,

    /// Output format
    #[arg(long, short, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and store the token pair
    Login {
        #[arg(long, short)]
        username: String,
        #[arg(long, short, env = "BOOKSHELF_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored tokens
    Logout,
    /// Show whether a login is stored
    Status,
    /// Catalog records
    #[command(subcommand)]
    Books(BooksCommand),
    /// Reservations of catalog records
    #[command(subcommand)]
    Reservations(ReservationsCommand),
    /// Upload a CSV file of books for ingestion
    Upload { file: PathBuf },
    /// List past CSV ingestion runs
    IngestionLogs,
    /// Configuration helpers
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Debug, Subcommand)]
pub enum BooksCommand {
    /// List books, following pagination
    List {
        #[arg(long, short)]
        search: Option<String>,
        /// Field to order by, e.g. `title` or `-average_rating`
        #[arg(long)]
        ordering: Option<String>,
        /// all, reserved or available
        #[arg(long, default_value = "all")]
        filter: ReservationFilter,
        /// Stop after this many books
        #[arg(long, default_value_t = 50)]
        limit: usize,
    },
    /// Show one book
    Show { id: u64 },
    /// Edit fields of a book; unspecified fields keep their current value
    Update {
        id: u64,
        #[command(flatten)]
        fields: BookFields,
    },
}

#[derive(Debug, Args)]
pub struct BookFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub original_title: Option<String>,
    /// Comma-separated author names
    #[arg(long)]
    pub authors: Option<String>,
    #[arg(long)]
    pub isbn: Option<String>,
    #[arg(long)]
    pub isbn13: Option<String>,
    #[arg(long)]
    pub year: Option<i32>,
    #[arg(long)]
    pub language: Option<String>,
    #[arg(long)]
    pub image_url: Option<String>,
}

impl BookFields {
    fn apply(self, update: &mut BookUpdate) {
        if let Some(title) = self.title {
            update.title = title;
        }
        if let Some(authors) = self.authors {
            update.authors_input = authors;
        }
        update.original_title = self.original_title.or(update.original_title.take());
        update.isbn = self.isbn.or(update.isbn.take());
        update.isbn13 = self.isbn13.or(update.isbn13.take());
        update.original_publication_year = self.year.or(update.original_publication_year);
        update.language_code = self.language.or(update.language_code.take());
        update.image_url = self.image_url.or(update.image_url.take());
    }
}

#[derive(Debug, Subcommand)]
pub enum ReservationsCommand {
    /// List reservations (admin only)
    List {
        /// Only reservations of this book
        #[arg(long)]
        book: Option<u64>,
    },
    /// Reserve a book
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        book: u64,
    },
    /// Change a reservation
    Update {
        id: u64,
        /// reserved, returned or canceled
        #[arg(long)]
        status: Option<ReservationStatus>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Delete a reservation
    Delete { id: u64 },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the JSON schema of the configuration file
    Schema,
}

impl Cli {
    pub async fn execute(self) -> Result<(), Box<dyn Error>> {
        if let Command::Config(ConfigCommand::Schema) = self.command {
            print_schema()?;
            return Ok(());
        }

        let config = load_config(&self.config)?;
        init_logging(&config.logging)?;
        let state = crate::startup::init(config)?;
        run(state, self.command, self.output).await
    }
}

async fn run(state: AppState, command: Command, output: OutputFormat) -> Result<(), Box<dyn Error>> {
    let api = &state.api;
    match command {
        Command::Login { username, password } => {
            state.session.login(&username, &password).await?;
            print_success(&format!("Logged in as {}", username));
        }
        Command::Logout => {
            state.session.logout().await?;
            print_success("Logged out");
        }
        Command::Status => {
            let logged_in = state.session.is_authenticated().await?;
            match output {
                OutputFormat::Json => print_json(&serde_json::json!({
                    "authenticated": logged_in,
                    "persistent_store": state.store.is_persistent(),
                    "api": state.config.api.base_url,
                })),
                OutputFormat::Text if logged_in => println!("Logged in to {}", state.config.api.base_url),
                OutputFormat::Text => println!("Not logged in"),
            }
        }
        Command::Books(BooksCommand::List {
            search,
            ordering,
            filter,
            limit,
        }) => {
            let mut pager = api.book_pager(BookQuery {
                search,
                ordering,
                reservation: filter,
            });
            pager.fetch_all(Some(limit)).await?;
            let total = pager.total_count();
            let more = pager.has_next_page();
            let mut books = pager.into_books();
            books.truncate(limit);
            print_list(&books, output);
            if output == OutputFormat::Text && more {
                println!(
                    "... showing {} of {} books",
                    books.len(),
                    total.unwrap_or_default()
                );
            }
        }
        Command::Books(BooksCommand::Show { id }) => {
            print_item(&api.get_book(id).await?, output);
        }
        Command::Books(BooksCommand::Update { id, fields }) => {
            let current = api.get_book(id).await?;
            let mut update = BookUpdate::from(&current);
            fields.apply(&mut update);
            let saved = api.update_book(id, &update).await?;
            print_item(&saved, output);
        }
        Command::Reservations(ReservationsCommand::List { book }) => {
            let page = match book {
                Some(book_id) => api.list_reservations_for_book(book_id).await?,
                None => api.list_reservations().await?,
            };
            print_list(&page.results, output);
        }
        Command::Reservations(ReservationsCommand::Create { name, email, book }) => {
            let resp = api
                .create_reservation(&CreateReservation { name, email, book })
                .await?;
            print_success(&resp.message);
        }
        Command::Reservations(ReservationsCommand::Update {
            id,
            status,
            name,
            email,
        }) => {
            let update = ReservationUpdate {
                name,
                email,
                book: None,
                status,
            };
            print_item(&api.update_reservation(id, &update).await?, output);
        }
        Command::Reservations(ReservationsCommand::Delete { id }) => {
            api.delete_reservation(id).await?;
            print_success(&format!("Deleted reservation {}", id));
        }
        Command::Upload { file } => {
            let resp = api.upload_csv_file(&file).await?;
            print_success(&resp.message);
        }
        Command::IngestionLogs => {
            print_list(&api.list_ingestion_logs().await?.results, output);
        }
        Command::Config(ConfigCommand::Schema) => print_schema()?,
    }
    Ok(())
}

/// Whether `err` means the stored login is gone or was never there.
pub fn needs_login(err: &(dyn Error + 'static)) -> bool {
    if let Some(e) = err.downcast_ref::<GatewayError>() {
        return e.requires_login();
    }
    if let Some(UploadError::Gateway(e)) = err.downcast_ref::<UploadError>() {
        return e.requires_login();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_book_list_flags() {
        let cli = Cli::try_parse_from([
            "bookshelf",
            "books",
            "list",
            "--search",
            "dune",
            "--filter",
            "available",
            "--limit",
            "10",
        ])
        .unwrap();
        match cli.command {
            Command::Books(BooksCommand::List {
                search,
                filter,
                limit,
                ..
            }) => {
                assert_eq!(search.as_deref(), Some("dune"));
                assert_eq!(filter, ReservationFilter::Available);
                assert_eq!(limit, 10);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn rejects_unknown_reservation_status() {
        let parsed = Cli::try_parse_from([
            "bookshelf",
            "reservations",
            "update",
            "3",
            "--status",
            "lost",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn book_fields_override_only_given_values() {
        let mut update = BookUpdate {
            title: "Emma".to_string(),
            authors_input: "Jane Austen".to_string(),
            isbn: Some("123".to_string()),
            ..Default::default()
        };
        BookFields {
            title: None,
            original_title: None,
            authors: Some("Jane Austen, Anon".to_string()),
            isbn: None,
            isbn13: None,
            year: Some(1815),
            language: None,
            image_url: None,
        }
        .apply(&mut update);

        assert_eq!(update.title, "Emma");
        assert_eq!(update.authors_input, "Jane Austen, Anon");
        assert_eq!(update.isbn.as_deref(), Some("123"));
        assert_eq!(update.original_publication_year, Some(1815));
    }

    #[test]
    fn refresh_failure_needs_login() {
        let err: Box<dyn Error> = Box::new(GatewayError::Refresh(crate::auth::AuthError::Transport(
            "refused".to_string(),
        )));
        assert!(needs_login(err.as_ref()));
    }
}
