//! Reframe CLI - Workplace wellness journal
//!
//! Usage:
//!   reframe init                 Initialize database
//!   reframe analyze "TEXT"       Analyze and save a journal entry
//!   reframe insights             Show aggregate insights
//!   reframe serve --port 3000    Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db),
        Commands::Analyze { text, file, json } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_analyze(&db, text, file.as_deref(), json)
        }
        Commands::Entries { limit } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_entries(&db, limit)
        }
        Commands::Insights => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_insights(&db)
        }
        Commands::Complete { entry_id, action } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_complete(&db, entry_id, &action)
        }
        Commands::Serve {
            port,
            host,
            static_dir,
        } => commands::cmd_serve(&cli.db, &host, port, static_dir.as_deref()).await,
        Commands::Status => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_status(&db)
        }
    }
}
