//! Aggregate insight builder
//!
//! Rolls a user's entry history up into [`Insights`]: sentiment average and
//! trend, pattern counts, tag frequencies, and recurring themes. Best-effort
//! over well-formed entries: a corrupt row (bad score, empty text) is logged
//! and excluded rather than failing the whole computation. All ratios divide
//! by the direct count of well-formed entries.

use std::collections::BTreeMap;

use tracing::warn;

use crate::analyze::{Analyzer, MIN_ENTRY_LEN};
use crate::models::{
    ChallengeKind, CommonTheme, Distortion, Entry, Insights, PatternSummary, SentimentSummary,
    ThemeFrequency, Trend,
};

/// Builds aggregate insights over an entry history
///
/// Thresholds are fields so tests can pin them down; defaults match the
/// product behavior.
pub struct InsightBuilder<'a> {
    analyzer: &'a Analyzer,
    /// Scores at or above this count as positive days (default 7)
    positive_cutoff: i64,
    /// Scores at or below this count as challenging days (default 4)
    challenging_cutoff: i64,
    /// Recent-vs-earliest mean difference before the trend moves (default 0.5)
    trend_threshold: f64,
    /// Entries a theme must recur in before it is reported (default 2)
    theme_min_entries: u32,
}

/// Theme identity: a distortion category or a challenge category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum ThemeKey {
    Distortion(Distortion),
    Challenge(ChallengeKind),
}

impl ThemeKey {
    fn name(&self) -> &'static str {
        match self {
            Self::Distortion(d) => d.as_str(),
            Self::Challenge(k) => k.as_str(),
        }
    }
}

impl<'a> InsightBuilder<'a> {
    pub fn new(analyzer: &'a Analyzer) -> Self {
        Self {
            analyzer,
            positive_cutoff: 7,
            challenging_cutoff: 4,
            trend_threshold: 0.5,
            theme_min_entries: 2,
        }
    }

    /// Compute insights over the full history
    ///
    /// The history may arrive in either direction; entries are sorted by
    /// `created_at` here rather than trusting storage order.
    pub fn build(&self, entries: &[Entry]) -> Insights {
        let mut well_formed: Vec<&Entry> = entries
            .iter()
            .filter(|entry| match check_well_formed(entry) {
                Ok(()) => true,
                Err(reason) => {
                    warn!(id = entry.id, reason, "Skipping corrupt history entry");
                    false
                }
            })
            .collect();
        well_formed.sort_by_key(|entry| entry.created_at);

        let total = well_formed.len();
        let scores: Vec<i64> = well_formed.iter().map(|e| e.sentiment_score).collect();

        let average = if total == 0 {
            0.0
        } else {
            (mean(&scores) * 10.0).round() / 10.0
        };
        let positive_days = scores
            .iter()
            .filter(|&&s| s >= self.positive_cutoff)
            .count() as u32;
        let challenging_days = scores
            .iter()
            .filter(|&&s| s <= self.challenging_cutoff)
            .count() as u32;

        let mut patterns = PatternSummary::default();
        let mut tags = BTreeMap::new();
        let mut theme_counts: BTreeMap<ThemeKey, u32> = BTreeMap::new();
        for entry in &well_formed {
            if entry.patterns.absolute_language > 0 {
                patterns.absolute_language += 1;
            }
            if entry.patterns.negative_framing > 0 {
                patterns.negative_framing += 1;
            }
            if entry.patterns.achievements > 0 {
                patterns.achievements += 1;
            }
            for tag in &entry.tags {
                *tags.entry(*tag).or_insert(0) += 1;
            }
            for key in self.entry_themes(entry) {
                *theme_counts.entry(key).or_insert(0) += 1;
            }
        }

        Insights {
            sentiment: SentimentSummary {
                average,
                positive_days,
                challenging_days,
                trend: self.trend(&scores),
            },
            patterns,
            tags,
            common_themes: self.common_themes(&theme_counts, total),
        }
    }

    /// Distinct theme keys present in one entry
    fn entry_themes(&self, entry: &Entry) -> Vec<ThemeKey> {
        let mut keys: Vec<ThemeKey> = entry
            .analysis
            .cognitive_patterns
            .distortions
            .iter()
            .map(|d| ThemeKey::Distortion(*d))
            .collect();
        // Challenge categories are recovered by re-scanning the persisted
        // snippets with the same lexicon that produced them.
        for snippet in &entry.analysis.relationships.challenging_interactions {
            for kind in self.analyzer.challenge_kinds_in(snippet) {
                keys.push(ThemeKey::Challenge(kind));
            }
        }
        keys.sort();
        keys.dedup();
        keys
    }

    /// Compare the most recent third of entries against the earliest third
    fn trend(&self, scores: &[i64]) -> Trend {
        let third = scores.len() / 3;
        if third == 0 {
            return Trend::Stable;
        }
        let earliest = mean(&scores[..third]);
        let recent = mean(&scores[scores.len() - third..]);
        let delta = recent - earliest;
        if delta > self.trend_threshold {
            Trend::Improving
        } else if delta < -self.trend_threshold {
            Trend::Declining
        } else {
            Trend::Stable
        }
    }

    fn common_themes(&self, counts: &BTreeMap<ThemeKey, u32>, total: usize) -> Vec<CommonTheme> {
        if total == 0 {
            return Vec::new();
        }
        let mut themes: Vec<(u32, CommonTheme)> = counts
            .iter()
            .filter(|(_, &count)| count >= self.theme_min_entries)
            .map(|(key, &count)| {
                let ratio = count as f64 / total as f64;
                let frequency = if ratio < 0.25 {
                    ThemeFrequency::Low
                } else if ratio <= 0.5 {
                    ThemeFrequency::Medium
                } else {
                    ThemeFrequency::High
                };
                (
                    count,
                    CommonTheme {
                        theme: key.name().to_string(),
                        frequency,
                        suggestion: self.theme_suggestion(*key),
                    },
                )
            })
            .collect();
        themes.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.theme.cmp(&b.1.theme)));
        themes.into_iter().map(|(_, theme)| theme).collect()
    }

    fn theme_suggestion(&self, key: ThemeKey) -> String {
        let lexicon = self.analyzer.lexicon();
        let template = match key {
            ThemeKey::Distortion(d) => lexicon
                .distortions
                .iter()
                .find(|rule| rule.category == d)
                .map(|rule| rule.theme_suggestion.clone()),
            ThemeKey::Challenge(k) => lexicon
                .challenges
                .iter()
                .find(|rule| rule.kind == k)
                .map(|rule| rule.theme_suggestion.clone()),
        };
        template.unwrap_or_else(|| {
            format!(
                "'{}' comes up in several entries; worth a closer look.",
                key.name()
            )
        })
    }
}

impl Analyzer {
    /// Aggregate insights over an entry history with default thresholds
    pub fn build_insights(&self, entries: &[Entry]) -> Insights {
        InsightBuilder::new(self).build(entries)
    }
}

fn check_well_formed(entry: &Entry) -> std::result::Result<(), String> {
    if !(1..=10).contains(&entry.sentiment_score) {
        return Err(format!("sentiment score {} out of range", entry.sentiment_score));
    }
    if entry.entry.trim().len() < MIN_ENTRY_LEN {
        return Err("entry text missing or too short".to_string());
    }
    Ok(())
}

fn mean(scores: &[i64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().sum::<i64>() as f64 / scores.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Analysis, PatternCounters, Tag};
    use chrono::{TimeZone, Utc};

    fn entry(id: i64, score: i64, day: u32) -> Entry {
        Entry {
            id,
            entry: "A plain but valid journal entry text.".to_string(),
            analysis: Analysis::default(),
            sentiment_score: score,
            tags: vec![Tag::Growth],
            patterns: PatternCounters::default(),
            created_at: Utc.with_ymd_and_hms(2026, 3, day, 9, 0, 0).unwrap(),
            completed_actions: vec![],
        }
    }

    fn analyzer() -> Analyzer {
        Analyzer::builtin()
    }

    #[test]
    fn test_trend_improving() {
        let history = vec![entry(1, 3, 1), entry(2, 3, 2), entry(3, 8, 3), entry(4, 8, 4)];
        let analyzer = analyzer();
        let insights = analyzer.build_insights(&history);
        assert_eq!(insights.sentiment.trend, Trend::Improving);
    }

    #[test]
    fn test_trend_declining_and_order_independence() {
        // Same entries, handed over newest-first; the builder must sort.
        let history = vec![entry(4, 2, 4), entry(3, 3, 3), entry(2, 8, 2), entry(1, 9, 1)];
        let analyzer = analyzer();
        let insights = analyzer.build_insights(&history);
        assert_eq!(insights.sentiment.trend, Trend::Declining);
    }

    #[test]
    fn test_trend_stable_under_three_entries() {
        let analyzer = analyzer();
        let insights = analyzer.build_insights(&[entry(1, 2, 1), entry(2, 9, 2)]);
        assert_eq!(insights.sentiment.trend, Trend::Stable);
    }

    #[test]
    fn test_sentiment_summary() {
        let history = vec![entry(1, 3, 1), entry(2, 4, 2), entry(3, 7, 3), entry(4, 9, 4)];
        let analyzer = analyzer();
        let insights = analyzer.build_insights(&history);
        // (3 + 4 + 7 + 9) / 4 = 5.75 -> 5.8
        assert_eq!(insights.sentiment.average, 5.8);
        assert_eq!(insights.sentiment.positive_days, 2);
        assert_eq!(insights.sentiment.challenging_days, 2);
    }

    #[test]
    fn test_tag_frequencies() {
        let mut history: Vec<Entry> = (1..=5).map(|i| entry(i as i64, 5, i as u32)).collect();
        for e in history.iter_mut().take(3) {
            e.tags = vec![Tag::Workload];
        }
        let analyzer = analyzer();
        let insights = analyzer.build_insights(&history);
        assert_eq!(insights.tags.get(&Tag::Workload), Some(&3));
        assert_eq!(insights.tags.get(&Tag::Growth), Some(&2));
    }

    #[test]
    fn test_theme_requires_recurrence() {
        let mut history = vec![entry(1, 5, 1), entry(2, 5, 2), entry(3, 5, 3)];
        history[0].analysis.cognitive_patterns.distortions = vec![Distortion::MindReading];
        history[1].analysis.cognitive_patterns.distortions =
            vec![Distortion::MindReading, Distortion::Catastrophizing];
        let analyzer = analyzer();
        let insights = analyzer.build_insights(&history);

        assert_eq!(insights.common_themes.len(), 1);
        let theme = &insights.common_themes[0];
        assert_eq!(theme.theme, "mind-reading");
        // 2 of 3 entries: > 50% is high
        assert_eq!(theme.frequency, ThemeFrequency::High);
        assert!(!theme.suggestion.is_empty());
    }

    #[test]
    fn test_challenge_theme_from_snippets() {
        let mut history = vec![entry(1, 5, 1), entry(2, 5, 2)];
        for e in &mut history {
            e.analysis.relationships.challenging_interactions =
                vec!["The meeting turned into an argument".to_string()];
        }
        let analyzer = analyzer();
        let insights = analyzer.build_insights(&history);
        assert!(insights
            .common_themes
            .iter()
            .any(|t| t.theme == "conflict"));
    }

    #[test]
    fn test_corrupt_entries_excluded() {
        let mut history = vec![entry(1, 6, 1), entry(2, 6, 2)];
        let mut corrupt = entry(3, 99, 3);
        corrupt.sentiment_score = 99;
        history.push(corrupt);
        let mut empty_text = entry(4, 5, 4);
        empty_text.entry = "  ".to_string();
        history.push(empty_text);

        let analyzer = analyzer();
        let insights = analyzer.build_insights(&history);
        assert_eq!(insights.sentiment.average, 6.0);
        assert_eq!(insights.tags.get(&Tag::Growth), Some(&2));
    }

    #[test]
    fn test_pattern_counts_count_entries_not_hits() {
        let mut history = vec![entry(1, 5, 1), entry(2, 5, 2), entry(3, 5, 3)];
        history[0].patterns.absolute_language = 4;
        history[1].patterns.absolute_language = 1;
        history[1].patterns.achievements = 2;
        let analyzer = analyzer();
        let insights = analyzer.build_insights(&history);
        assert_eq!(insights.patterns.absolute_language, 2);
        assert_eq!(insights.patterns.achievements, 1);
        assert_eq!(insights.patterns.negative_framing, 0);
    }

    #[test]
    fn test_empty_history() {
        let analyzer = analyzer();
        let insights = analyzer.build_insights(&[]);
        assert_eq!(insights.sentiment.average, 0.0);
        assert_eq!(insights.sentiment.trend, Trend::Stable);
        assert!(insights.tags.is_empty());
        assert!(insights.common_themes.is_empty());
    }
}
