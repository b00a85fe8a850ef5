//! Sentiment scoring and tag assignment
//!
//! The score is a deterministic function of keyword density plus bonuses:
//! baseline 5, +1 per positive keyword and -1 per negative keyword (each
//! capped at 3), +1 when achievements are present, -1 when distortions are,
//! clamped to [1, 10]. Tag rules run in a fixed order and `growth` is the
//! fallback, so the tag set is never empty.

use crate::models::{CognitivePatterns, Tag};

use super::relationships::RelationshipScan;
use super::CompiledLexicon;

pub(crate) struct ScoreResult {
    pub sentiment_score: i64,
    pub tags: Vec<Tag>,
    pub negative_hits: u32,
}

const BASELINE_SCORE: i64 = 5;
const KEYWORD_CAP: i64 = 3;

pub(crate) fn score_and_tag(
    text: &str,
    cognitive: &CognitivePatterns,
    relationships: &RelationshipScan,
    lex: &CompiledLexicon,
) -> ScoreResult {
    let positive_hits: u32 = lex.positive.iter().map(|m| m.count(text) as u32).sum();
    let negative_hits: u32 = lex.negative.iter().map(|m| m.count(text) as u32).sum();

    let mut score = BASELINE_SCORE;
    score += (positive_hits as i64).min(KEYWORD_CAP);
    score -= (negative_hits as i64).min(KEYWORD_CAP);
    if !relationships.achievements.is_empty() {
        score += 1;
    }
    if !cognitive.distortions.is_empty() {
        score -= 1;
    }
    let sentiment_score = score.clamp(1, 10);

    let mut tags = Vec::new();
    if lex.workload.iter().any(|m| m.is_match(text)) {
        tags.push(Tag::Workload);
    }
    if !relationships.patterns.positive_interactions.is_empty()
        || !relationships.patterns.challenging_interactions.is_empty()
    {
        tags.push(Tag::Relationships);
    }
    if !relationships.achievements.is_empty() {
        tags.push(Tag::Achievement);
    }
    if !cognitive.distortions.is_empty() || negative_hits > 0 {
        tags.push(Tag::Stress);
    }
    if !relationships.patterns.challenging_interactions.is_empty() {
        tags.push(Tag::Challenge);
    }
    if positive_hits >= 2 && negative_hits == 0 {
        tags.push(Tag::Success);
    }
    if tags.is_empty() {
        tags.push(Tag::Growth);
    }

    ScoreResult {
        sentiment_score,
        tags,
        negative_hits,
    }
}

#[cfg(test)]
mod tests {
    use super::super::{distortions, relationships};
    use super::*;
    use crate::lexicon::Lexicon;

    fn run(text: &str) -> ScoreResult {
        let lex = CompiledLexicon::compile(Lexicon::builtin()).unwrap();
        let cognitive = distortions::classify(text, &lex);
        let relations = relationships::extract(text, &lex);
        score_and_tag(text, &cognitive.patterns, &relations, &lex)
    }

    #[test]
    fn test_negative_entry_scores_low() {
        let result = run("I always mess up and everyone hates me, but I finished the report early.");
        // 5 - 2 negatives + 1 achievement - 1 distortion
        assert_eq!(result.sentiment_score, 3);
        assert!(result.tags.contains(&Tag::Stress));
        assert!(result.tags.contains(&Tag::Achievement));
    }

    #[test]
    fn test_positive_entry_gets_success_tag() {
        let result = run("Great day, I felt productive and proud of the refactor.");
        assert!(result.sentiment_score >= 7);
        assert!(result.tags.contains(&Tag::Success));
    }

    #[test]
    fn test_score_clamped_at_floor() {
        let result = run(
            "Terrible, awful, horrible week. I'm exhausted and overwhelmed, \
             everything is ruined and I can't handle it.",
        );
        assert_eq!(result.sentiment_score, 1);
    }

    #[test]
    fn test_workload_tag() {
        let result = run("The deadline moved up and my backlog keeps growing.");
        assert!(result.tags.contains(&Tag::Workload));
    }

    #[test]
    fn test_growth_fallback() {
        let result = run("Spent the afternoon reading design documents quietly.");
        assert_eq!(result.tags, vec![Tag::Growth]);
    }
}
