//! Domain models for Reframe

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Journal entry tags
///
/// The fixed tag vocabulary for entries. Tag assignment rules live in the
/// analyzer; `Growth` is the fallback so an entry's tag set is never empty.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    Workload,
    Relationships,
    Achievement,
    Stress,
    Growth,
    Challenge,
    Success,
}

impl Tag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Workload => "workload",
            Self::Relationships => "relationships",
            Self::Achievement => "achievement",
            Self::Stress => "stress",
            Self::Growth => "growth",
            Self::Challenge => "challenge",
            Self::Success => "success",
        }
    }

    /// All tags, in canonical order
    pub fn all() -> [Tag; 7] {
        [
            Self::Workload,
            Self::Relationships,
            Self::Achievement,
            Self::Stress,
            Self::Growth,
            Self::Challenge,
            Self::Success,
        ]
    }
}

impl std::str::FromStr for Tag {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "workload" => Ok(Self::Workload),
            "relationships" => Ok(Self::Relationships),
            "achievement" => Ok(Self::Achievement),
            "stress" => Ok(Self::Stress),
            "growth" => Ok(Self::Growth),
            "challenge" => Ok(Self::Challenge),
            "success" => Ok(Self::Success),
            _ => Err(format!("Unknown tag: {}", s)),
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Cognitive distortion categories detected by the classifier
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Distortion {
    Catastrophizing,
    MindReading,
    DiscountingPositives,
    Overgeneralization,
}

impl Distortion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Catastrophizing => "catastrophizing",
            Self::MindReading => "mind-reading",
            Self::DiscountingPositives => "discounting-positives",
            Self::Overgeneralization => "overgeneralization",
        }
    }
}

impl std::str::FromStr for Distortion {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "catastrophizing" => Ok(Self::Catastrophizing),
            "mind-reading" => Ok(Self::MindReading),
            "discounting-positives" => Ok(Self::DiscountingPositives),
            "overgeneralization" => Ok(Self::Overgeneralization),
            _ => Err(format!("Unknown distortion: {}", s)),
        }
    }
}

impl std::fmt::Display for Distortion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Categories of challenging workplace interactions
///
/// Each category maps to one coaching suggestion and can recur across
/// entries as a common theme.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ChallengeKind {
    Conflict,
    FeelingUnheard,
    Criticism,
}

impl ChallengeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Conflict => "conflict",
            Self::FeelingUnheard => "feeling-unheard",
            Self::Criticism => "criticism",
        }
    }
}

impl std::fmt::Display for ChallengeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-entry pattern hit counters, persisted alongside the entry so
/// aggregate insights never have to re-scan raw text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternCounters {
    pub absolute_language: u32,
    pub negative_framing: u32,
    pub discounting_positives: u32,
    pub mind_reading: u32,
    pub achievements: u32,
}

/// Absolute-language and modal-operator findings for one entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguagePatterns {
    /// Matched surface forms, first-occurrence order, deduplicated
    pub absolute_terms: Vec<String>,
    /// One suggested rewrite per distinct absolute term
    pub suggested_reframes: Vec<String>,
    /// Matched modal operators ("should", "must", "have to", ...)
    pub modal_operators: Vec<String>,
}

/// Cognitive distortion findings for one entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CognitivePatterns {
    /// Categories with at least one hit, ordered by first appearance
    pub distortions: Vec<Distortion>,
    /// Verbatim trimmed sentences supporting the detections, source order
    pub examples: Vec<String>,
}

/// Workplace relationship findings for one entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipPatterns {
    pub positive_interactions: Vec<String>,
    pub challenging_interactions: Vec<String>,
    /// One coaching suggestion per distinct challenge category detected;
    /// empty unless `challenging_interactions` is non-empty
    pub suggestions: Vec<String>,
}

/// Structured analysis of one journal entry
///
/// Every field is always present; "nothing detected" is an empty collection,
/// never a missing field, so consumers only ever check emptiness.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub language_patterns: LanguagePatterns,
    pub cognitive_patterns: CognitivePatterns,
    pub relationships: RelationshipPatterns,
    /// Clause-level snippets recognized as self-reported accomplishments
    pub achievements: Vec<String>,
    /// Suggested next actions, ordered by the fixed priority table
    pub actionable_steps: Vec<String>,
}

/// The analyzer's full output for one entry, before persistence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryAnalysis {
    pub analysis: Analysis,
    /// Integer in [1, 10]
    pub sentiment_score: i64,
    /// Never empty (`growth` is the fallback)
    pub tags: Vec<Tag>,
    pub patterns: PatternCounters,
}

/// A persisted journal entry
///
/// Immutable once created, except for linked action-completion tracking.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: i64,
    pub entry: String,
    pub analysis: Analysis,
    pub sentiment_score: i64,
    pub tags: Vec<Tag>,
    pub patterns: PatternCounters,
    pub created_at: DateTime<Utc>,
    /// Action steps from this entry's plan the user has marked done
    pub completed_actions: Vec<String>,
}

/// Directional change in sentiment across a user's entry history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Improving => "improving",
            Self::Declining => "declining",
            Self::Stable => "stable",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How often a theme recurs across the entry history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeFrequency {
    Low,
    Medium,
    High,
}

impl ThemeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for ThemeFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sentiment rollup across the entry history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentSummary {
    /// Mean sentiment score, rounded to 1 decimal
    pub average: f64,
    /// Entries with score >= 7
    pub positive_days: u32,
    /// Entries with score <= 4
    pub challenging_days: u32,
    pub trend: Trend,
}

/// Counts of entries where each pattern category fired at least once
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternSummary {
    pub absolute_language: u32,
    pub negative_framing: u32,
    pub achievements: u32,
}

/// A distortion or challenge category recurring across entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonTheme {
    pub theme: String,
    pub frequency: ThemeFrequency,
    pub suggestion: String,
}

/// Aggregate insights over a user's full entry history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    pub sentiment: SentimentSummary,
    pub patterns: PatternSummary,
    /// Entry count per tag across the history
    pub tags: BTreeMap<Tag, u32>,
    pub common_themes: Vec<CommonTheme>,
}
