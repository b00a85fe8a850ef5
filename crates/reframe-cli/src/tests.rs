//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use reframe_core::db::Database;
use reframe_core::Analyzer;

use crate::commands;

fn setup_test_db() -> Database {
    Database::in_memory().unwrap()
}

/// Analyze and insert an entry directly, returning its id
fn add_entry(db: &Database, text: &str) -> i64 {
    let analyzer = Analyzer::builtin();
    let analyzed = analyzer.analyze(text).unwrap();
    db.insert_entry(text, &analyzed).unwrap().id
}

// ========== Init Command Tests ==========

#[test]
fn test_cmd_init_creates_database() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("journal.db");

    let result = commands::cmd_init(&path);
    assert!(result.is_ok());
    assert!(path.exists());

    // Reopening is fine; migrations are idempotent
    assert!(commands::open_db(&path).is_ok());
}

// ========== Analyze Command Tests ==========

#[test]
fn test_cmd_analyze_with_text() {
    let db = setup_test_db();
    let result = commands::cmd_analyze(
        &db,
        Some("I finished the report today and my manager praised the work.".to_string()),
        None,
        false,
    );
    assert!(result.is_ok());
    assert_eq!(db.entry_count().unwrap(), 1);

    let entries = db.list_entries(None).unwrap();
    assert!(entries[0].tags.iter().any(|t| t.as_str() == "achievement"));
}

#[test]
fn test_cmd_analyze_json_output() {
    let db = setup_test_db();
    let result = commands::cmd_analyze(
        &db,
        Some("A quiet day of focused work on the parser.".to_string()),
        None,
        true,
    );
    assert!(result.is_ok());
}

#[test]
fn test_cmd_analyze_rejects_short_text() {
    let db = setup_test_db();
    let result = commands::cmd_analyze(&db, Some("meh".to_string()), None, false);
    assert!(result.is_err());
    assert_eq!(db.entry_count().unwrap(), 0);
}

#[test]
fn test_cmd_analyze_from_file() {
    let db = setup_test_db();
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("entry.txt");
    std::fs::write(&path, "Wrote the entry in a file, fairly ordinary day.").unwrap();

    let result = commands::cmd_analyze(&db, None, Some(path.as_path()), false);
    assert!(result.is_ok());
    assert_eq!(db.entry_count().unwrap(), 1);
}

// ========== Entries / Insights Command Tests ==========

#[test]
fn test_cmd_entries_runs_on_empty_and_filled_db() {
    let db = setup_test_db();
    assert!(commands::cmd_entries(&db, 20).is_ok());

    add_entry(&db, "Deadline pressure all day, totally swamped by the backlog.");
    add_entry(&db, "Shipped the release and the team celebrated together.");
    assert!(commands::cmd_entries(&db, 20).is_ok());
}

#[test]
fn test_cmd_insights_runs() {
    let db = setup_test_db();
    add_entry(&db, "My boss probably hates me after that meeting went badly.");
    add_entry(&db, "Still convinced everyone hates me after today's standup.");
    assert!(commands::cmd_insights(&db).is_ok());
}

// ========== Complete Command Tests ==========

#[test]
fn test_cmd_complete() {
    let db = setup_test_db();
    let id = add_entry(&db, "I always overcommit and the workload piles up.");

    let step = db
        .get_entry(id)
        .unwrap()
        .unwrap()
        .analysis
        .actionable_steps[0]
        .clone();

    assert!(commands::cmd_complete(&db, id, &step).is_ok());
    assert!(commands::cmd_complete(&db, id, "not a real step").is_err());

    let entry = db.get_entry(id).unwrap().unwrap();
    assert_eq!(entry.completed_actions, vec![step]);
}

// ========== Status Command Tests ==========

#[test]
fn test_cmd_status() {
    let db = setup_test_db();
    assert!(commands::cmd_status(&db).is_ok());

    add_entry(&db, "Ordinary day, cleaned up the test suite a little.");
    assert!(commands::cmd_status(&db).is_ok());
}
