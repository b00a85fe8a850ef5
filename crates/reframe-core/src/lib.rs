//! Reframe Core Library
//!
//! Shared functionality for the Reframe workplace wellness journal:
//! - Journal entry analyzer: absolute-language scan, cognitive distortion
//!   classification, relationship/achievement extraction, sentiment scoring,
//!   tagging, and action plans
//! - Aggregate insight builder over a user's entry history
//! - Lexicon and rule tables as immutable, injectable configuration
//! - SQLite persistence for entries and action-completion tracking

pub mod analyze;
pub mod db;
pub mod error;
pub mod insights;
pub mod lexicon;
pub mod models;

mod text;

pub use analyze::{Analyzer, MIN_ENTRY_LEN};
pub use db::Database;
pub use error::{Error, Result};
pub use insights::InsightBuilder;
pub use lexicon::Lexicon;
pub use models::{
    Analysis, ChallengeKind, CognitivePatterns, CommonTheme, Distortion, Entry, EntryAnalysis,
    Insights, LanguagePatterns, PatternCounters, PatternSummary, RelationshipPatterns,
    SentimentSummary, Tag, ThemeFrequency, Trend,
};
