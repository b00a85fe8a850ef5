//! Journal entry operations
//!
//! Entries are immutable once inserted; only action-completion rows are
//! added afterwards. History reads are best-effort: a row whose analysis
//! no longer parses is logged and skipped so one bad row never poisons the
//! aggregate computation.

use rusqlite::{params, Row};
use tracing::warn;

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{Analysis, Entry, EntryAnalysis, PatternCounters, Tag};

/// Raw column values for one entry row, before JSON decoding
struct RawEntry {
    id: i64,
    entry: String,
    analysis: String,
    sentiment_score: i64,
    tags: String,
    patterns: String,
    created_at: String,
}

impl RawEntry {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            entry: row.get(1)?,
            analysis: row.get(2)?,
            sentiment_score: row.get(3)?,
            tags: row.get(4)?,
            patterns: row.get(5)?,
            created_at: row.get(6)?,
        })
    }

    fn decode(self, completed_actions: Vec<String>) -> Result<Entry> {
        if !(1..=10).contains(&self.sentiment_score) {
            return Err(Error::CorruptHistory(format!(
                "entry {} has sentiment score {}",
                self.id, self.sentiment_score
            )));
        }
        let analysis: Analysis = serde_json::from_str(&self.analysis)
            .map_err(|e| Error::CorruptHistory(format!("entry {} analysis: {}", self.id, e)))?;
        let tags: Vec<Tag> = serde_json::from_str(&self.tags)
            .map_err(|e| Error::CorruptHistory(format!("entry {} tags: {}", self.id, e)))?;
        let patterns: PatternCounters = serde_json::from_str(&self.patterns)
            .map_err(|e| Error::CorruptHistory(format!("entry {} patterns: {}", self.id, e)))?;

        Ok(Entry {
            id: self.id,
            entry: self.entry,
            analysis,
            sentiment_score: self.sentiment_score,
            tags,
            patterns,
            created_at: parse_datetime(&self.created_at),
            completed_actions,
        })
    }
}

const ENTRY_COLUMNS: &str =
    "id, entry, analysis, sentiment_score, tags, patterns, created_at";

impl Database {
    /// Persist a new entry with its analysis
    pub fn insert_entry(&self, text: &str, analyzed: &EntryAnalysis) -> Result<Entry> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO entries (entry, analysis, sentiment_score, tags, patterns)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                text,
                serde_json::to_string(&analyzed.analysis)?,
                analyzed.sentiment_score,
                serde_json::to_string(&analyzed.tags)?,
                serde_json::to_string(&analyzed.patterns)?,
            ],
        )?;
        let id = conn.last_insert_rowid();
        drop(conn);

        self.get_entry(id)?
            .ok_or_else(|| Error::NotFound(format!("entry {}", id)))
    }

    /// Fetch one entry by id
    pub fn get_entry(&self, id: i64) -> Result<Option<Entry>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM entries WHERE id = ?1",
            ENTRY_COLUMNS
        ))?;
        let raw = stmt
            .query_row(params![id], RawEntry::from_row)
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                other => Err(other),
            })?;
        drop(stmt);
        drop(conn);

        match raw {
            Some(raw) => {
                let actions = self.completed_actions(id)?;
                raw.decode(actions).map(Some)
            }
            None => Ok(None),
        }
    }

    /// List entries, newest first, skipping corrupt rows
    pub fn list_entries(&self, limit: Option<i64>) -> Result<Vec<Entry>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM entries ORDER BY created_at DESC, id DESC LIMIT ?1",
            ENTRY_COLUMNS
        ))?;
        let raws: Vec<RawEntry> = stmt
            .query_map(params![limit.unwrap_or(-1)], RawEntry::from_row)?
            .collect::<rusqlite::Result<_>>()?;
        drop(stmt);
        drop(conn);

        let mut entries = Vec::with_capacity(raws.len());
        for raw in raws {
            let id = raw.id;
            let actions = self.completed_actions(id)?;
            match raw.decode(actions) {
                Ok(entry) => entries.push(entry),
                Err(e) => warn!(id, error = %e, "Skipping corrupt entry row"),
            }
        }
        Ok(entries)
    }

    /// Number of entry rows (including ones that no longer decode)
    pub fn entry_count(&self) -> Result<i64> {
        let conn = self.conn()?;
        Ok(conn.query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))?)
    }

    /// Mark an action step from an entry's plan as completed
    ///
    /// The action must be one of the steps on that entry's plan; marking the
    /// same action twice is a no-op.
    pub fn complete_action(&self, entry_id: i64, action: &str) -> Result<()> {
        let entry = self
            .get_entry(entry_id)?
            .ok_or_else(|| Error::NotFound(format!("entry {}", entry_id)))?;
        if !entry
            .analysis
            .actionable_steps
            .iter()
            .any(|step| step == action)
        {
            return Err(Error::InvalidInput(format!(
                "action is not on entry {}'s plan",
                entry_id
            )));
        }

        let conn = self.conn()?;
        conn.execute(
            "INSERT OR IGNORE INTO completed_actions (entry_id, action) VALUES (?1, ?2)",
            params![entry_id, action],
        )?;
        Ok(())
    }

    /// Completed action steps for one entry, oldest first
    pub fn completed_actions(&self, entry_id: i64) -> Result<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT action FROM completed_actions WHERE entry_id = ?1 ORDER BY completed_at, id",
        )?;
        let actions = stmt
            .query_map(params![entry_id], |row| row.get(0))?
            .collect::<rusqlite::Result<_>>()?;
        Ok(actions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::Analyzer;

    fn setup() -> (Database, Analyzer) {
        (Database::in_memory().unwrap(), Analyzer::builtin())
    }

    #[test]
    fn test_insert_and_list_round_trip() {
        let (db, analyzer) = setup();
        let text = "My coworker helped me fix the build, and I finished the migration.";
        let analyzed = analyzer.analyze(text).unwrap();
        let entry = db.insert_entry(text, &analyzed).unwrap();

        assert_eq!(entry.entry, text);
        assert_eq!(entry.sentiment_score, analyzed.sentiment_score);
        assert_eq!(entry.tags, analyzed.tags);
        assert_eq!(entry.analysis, analyzed.analysis);
        assert!(entry.completed_actions.is_empty());

        let listed = db.list_entries(None).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, entry.id);
    }

    #[test]
    fn test_list_newest_first_with_limit() {
        let (db, analyzer) = setup();
        for text in [
            "First entry of the week, fairly ordinary day overall.",
            "Second entry of the week, another ordinary day here.",
            "Third entry of the week, closing out a calm stretch.",
        ] {
            let analyzed = analyzer.analyze(text).unwrap();
            db.insert_entry(text, &analyzed).unwrap();
        }

        let listed = db.list_entries(Some(2)).unwrap();
        assert_eq!(listed.len(), 2);
        // Same-timestamp rows fall back to id ordering
        assert!(listed[0].id > listed[1].id);
    }

    #[test]
    fn test_corrupt_row_is_skipped() {
        let (db, analyzer) = setup();
        let text = "A perfectly healthy entry written before the bad row.";
        let analyzed = analyzer.analyze(text).unwrap();
        db.insert_entry(text, &analyzed).unwrap();

        // Hand-insert a row whose analysis column is not valid JSON
        let conn = db.conn().unwrap();
        conn.execute(
            "INSERT INTO entries (entry, analysis, sentiment_score, tags, patterns)
             VALUES ('broken row that should be ignored', 'not json', 5, '[]', '{}')",
            [],
        )
        .unwrap();
        drop(conn);

        assert_eq!(db.entry_count().unwrap(), 2);
        let listed = db.list_entries(None).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].entry, text);
    }

    #[test]
    fn test_out_of_range_score_is_corrupt() {
        let (db, _) = setup();
        let conn = db.conn().unwrap();
        conn.execute(
            "INSERT INTO entries (entry, analysis, sentiment_score, tags, patterns)
             VALUES ('score went sideways somewhere', '{}', 42, '[]', '{}')",
            [],
        )
        .unwrap();
        drop(conn);

        assert!(db.list_entries(None).unwrap().is_empty());
    }

    #[test]
    fn test_complete_action_tracking() {
        let (db, analyzer) = setup();
        let text = "I always put things off and the backlog keeps growing.";
        let analyzed = analyzer.analyze(text).unwrap();
        let entry = db.insert_entry(text, &analyzed).unwrap();

        let step = entry.analysis.actionable_steps[0].clone();
        db.complete_action(entry.id, &step).unwrap();
        // Idempotent
        db.complete_action(entry.id, &step).unwrap();

        let reloaded = db.get_entry(entry.id).unwrap().unwrap();
        assert_eq!(reloaded.completed_actions, vec![step]);
    }

    #[test]
    fn test_complete_action_validates() {
        let (db, analyzer) = setup();
        let text = "Ordinary day, some code review and a quiet afternoon.";
        let analyzed = analyzer.analyze(text).unwrap();
        let entry = db.insert_entry(text, &analyzed).unwrap();

        assert!(matches!(
            db.complete_action(entry.id, "made-up action"),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            db.complete_action(entry.id + 100, "whatever"),
            Err(Error::NotFound(_))
        ));
    }
}
