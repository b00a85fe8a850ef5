//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Reframe - Workplace wellness journal with language insight
#[derive(Parser)]
#[command(name = "reframe")]
#[command(about = "Journal analyzer for workplace wellness", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "reframe.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Analyze a journal entry and save it
    Analyze {
        /// Entry text (reads stdin when neither TEXT nor --file is given)
        text: Option<String>,

        /// Read the entry from a file instead
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Print the saved entry as JSON instead of the summary
        #[arg(long)]
        json: bool,
    },

    /// List recent entries
    Entries {
        /// Maximum entries to show
        #[arg(short, long, default_value = "20")]
        limit: i64,
    },

    /// Show aggregate insights over the entry history
    Insights,

    /// Mark an action step from an entry's plan as done
    Complete {
        /// Entry id
        entry_id: i64,

        /// Action text exactly as it appears on the plan
        action: String,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Directory containing static files to serve (e.g., client/dist)
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },

    /// Show database status
    Status,
}
