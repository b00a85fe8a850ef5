//! Journal command implementations
//!
//! `cmd_analyze` runs the analyzer and persists the entry; the others read
//! back entries, insights, and action-completion state.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use reframe_core::db::Database;
use reframe_core::{Analyzer, Entry};

pub fn cmd_analyze(
    db: &Database,
    text: Option<String>,
    file: Option<&Path>,
    json: bool,
) -> Result<()> {
    let text = match (text, file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        (None, None) => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read entry from stdin")?;
            buf
        }
    };

    let analyzer = Analyzer::builtin();
    let analyzed = analyzer.analyze(&text)?;
    let entry = db.insert_entry(text.trim(), &analyzed)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entry)?);
        return Ok(());
    }

    println!(
        "📝 Entry #{} saved (score {}/10)",
        entry.id, entry.sentiment_score
    );
    println!("   Tags: {}", join_tags(&entry));

    let language = &entry.analysis.language_patterns;
    if !language.absolute_terms.is_empty() {
        println!("   💬 Absolute language: {}", language.absolute_terms.join(", "));
        for reframe in &language.suggested_reframes {
            println!("      ↳ {}", reframe);
        }
    }
    if !language.modal_operators.is_empty() {
        println!("   💬 Modal operators: {}", language.modal_operators.join(", "));
    }

    let cognitive = &entry.analysis.cognitive_patterns;
    if !cognitive.distortions.is_empty() {
        let names: Vec<&str> = cognitive.distortions.iter().map(|d| d.as_str()).collect();
        println!("   🧠 Patterns: {}", names.join(", "));
        for example in &cognitive.examples {
            println!("      “{}”", example);
        }
    }

    if !entry.analysis.achievements.is_empty() {
        println!("   🏆 Achievements:");
        for achievement in &entry.analysis.achievements {
            println!("      - {}", achievement);
        }
    }

    let relationships = &entry.analysis.relationships;
    for suggestion in &relationships.suggestions {
        println!("   🤝 {}", suggestion);
    }

    println!("   ✨ Action plan:");
    for step in &entry.analysis.actionable_steps {
        println!("      - {}", step);
    }

    Ok(())
}

pub fn cmd_entries(db: &Database, limit: i64) -> Result<()> {
    let entries = db.list_entries(Some(limit))?;

    if entries.is_empty() {
        println!("No entries yet. Write one with: reframe analyze \"...\"");
        return Ok(());
    }

    println!("📖 Recent entries");
    println!("   ─────────────────────────────");
    for entry in &entries {
        let done = entry.completed_actions.len();
        let total = entry.analysis.actionable_steps.len();
        println!(
            "   #{:<4} {}  {:>2}/10  [{}]  actions {}/{}",
            entry.id,
            entry.created_at.format("%Y-%m-%d"),
            entry.sentiment_score,
            join_tags(entry),
            done,
            total,
        );
        println!("         {}", truncate(&entry.entry, 70));
    }

    Ok(())
}

pub fn cmd_insights(db: &Database) -> Result<()> {
    let entries = db.list_entries(None)?;
    let analyzer = Analyzer::builtin();
    let insights = analyzer.build_insights(&entries);

    println!("🧘 Wellness Insights");
    println!("   ─────────────────────────────");
    println!(
        "   Mood: {:.1}/10 ({})",
        insights.sentiment.average, insights.sentiment.trend
    );
    println!(
        "   Positive days: {}   Challenging days: {}",
        insights.sentiment.positive_days, insights.sentiment.challenging_days
    );
    println!(
        "   Entries with absolute language: {}",
        insights.patterns.absolute_language
    );
    println!(
        "   Entries with negative framing: {}",
        insights.patterns.negative_framing
    );
    println!(
        "   Entries with achievements: {}",
        insights.patterns.achievements
    );

    if !insights.tags.is_empty() {
        let tags: Vec<String> = insights
            .tags
            .iter()
            .map(|(tag, count)| format!("{} ({})", tag, count))
            .collect();
        println!("   Topics: {}", tags.join(", "));
    }

    if !insights.common_themes.is_empty() {
        println!();
        println!("   Recurring themes:");
        for theme in &insights.common_themes {
            println!("   - {} [{}]", theme.theme, theme.frequency);
            println!("     {}", theme.suggestion);
        }
    }

    Ok(())
}

pub fn cmd_complete(db: &Database, entry_id: i64, action: &str) -> Result<()> {
    db.complete_action(entry_id, action)?;
    println!("✅ Marked as done on entry #{}", entry_id);
    Ok(())
}

fn join_tags(entry: &Entry) -> String {
    entry
        .tags
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let prefix: String = text.chars().take(max).collect();
        format!("{}…", prefix.trim_end())
    }
}
