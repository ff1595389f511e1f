use bookshelf::cli::{needs_login, Cli};
use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = cli.execute().await {
        eprintln!("Error: {}", e);
        if needs_login(e.as_ref()) {
            eprintln!("Run `bookshelf login` to sign in again.");
        }
        std::process::exit(1);
    }
}
