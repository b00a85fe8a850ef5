//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `cmd_init` - Initialize the database
//! - `cmd_serve` - Start the web server
//! - `cmd_status` - Show database status

use std::path::Path;

use anyhow::{Context, Result};
use reframe_core::db::Database;

/// Open the journal database, running migrations if needed
pub fn open_db(db_path: &Path) -> Result<Database> {
    Database::new(&db_path.to_string_lossy()).context("Failed to open database")
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let _db = open_db(db_path)?;

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Write an entry: reframe analyze \"How the day went...\"");
    println!("  2. Start web UI: reframe serve");

    Ok(())
}

pub async fn cmd_serve(
    db_path: &Path,
    host: &str,
    port: u16,
    static_dir: Option<&Path>,
) -> Result<()> {
    let db = open_db(db_path)?;

    println!("🚀 Starting Reframe server...");
    println!("   Database: {}", db.path());
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }

    let static_dir = static_dir.map(|p| p.to_string_lossy().into_owned());
    reframe_server::serve(db, host, port, static_dir.as_deref()).await
}

pub fn cmd_status(db: &Database) -> Result<()> {
    let count = db.entry_count()?;
    let entries = db.list_entries(None)?;

    println!("📊 Reframe Status");
    println!("   ─────────────────────────────");
    println!("   Database: {}", db.path());
    println!("   Entries: {}", count);

    if entries.len() as i64 != count {
        println!(
            "   ⚠️  {} row(s) no longer decode and are skipped",
            count - entries.len() as i64
        );
    }

    if !entries.is_empty() {
        let sum: i64 = entries.iter().map(|e| e.sentiment_score).sum();
        let average = sum as f64 / entries.len() as f64;
        println!("   Average score: {:.1}/10", average);
        println!(
            "   Latest entry: {}",
            entries[0].created_at.format("%Y-%m-%d %H:%M")
        );
    }

    Ok(())
}
