//! Workplace relationship and achievement extractor
//!
//! Sentences mentioning a workplace-relationship noun are classified as
//! positive or challenging by sentiment keyword co-occurrence (both can
//! apply). Achievements are clause-level: a clause containing an
//! accomplishment verb counts unless the verb is negated shortly before it.

use crate::models::{ChallengeKind, RelationshipPatterns};
use crate::text;

use super::CompiledLexicon;

pub(crate) struct RelationshipScan {
    pub patterns: RelationshipPatterns,
    pub achievements: Vec<String>,
    /// Distinct challenge categories detected, in rule-table order
    pub challenge_kinds: Vec<ChallengeKind>,
}

pub(crate) fn extract(text: &str, lex: &CompiledLexicon) -> RelationshipScan {
    let mut positive_interactions = Vec::new();
    let mut challenging_interactions = Vec::new();
    let mut kinds: Vec<ChallengeKind> = Vec::new();
    let mut achievements = Vec::new();

    for sentence in text::sentences(text) {
        if lex.relationship_nouns.iter().any(|m| m.is_match(sentence)) {
            if lex
                .relationship_positive
                .iter()
                .any(|m| m.is_match(sentence))
            {
                positive_interactions.push(sentence.to_string());
            }

            let mut challenging = false;
            for (kind, matchers) in &lex.challenges {
                if matchers.iter().any(|m| m.is_match(sentence)) {
                    challenging = true;
                    if !kinds.contains(kind) {
                        kinds.push(*kind);
                    }
                }
            }
            if challenging {
                challenging_interactions.push(sentence.to_string());
            }
        }

        for clause in text::clauses(sentence) {
            if is_achievement(&clause, lex) && !achievements.contains(&clause) {
                achievements.push(clause);
            }
        }
    }

    // Rule-table order keeps suggestion output deterministic
    kinds.sort();
    let suggestions: Vec<String> = if challenging_interactions.is_empty() {
        Vec::new()
    } else {
        lex.lexicon
            .challenges
            .iter()
            .filter(|rule| kinds.contains(&rule.kind))
            .map(|rule| rule.suggestion.clone())
            .collect()
    };

    RelationshipScan {
        patterns: RelationshipPatterns {
            positive_interactions,
            challenging_interactions,
            suggestions,
        },
        achievements,
        challenge_kinds: kinds,
    }
}

/// Clause-level achievement check with the negation guard
fn is_achievement(clause: &str, lex: &CompiledLexicon) -> bool {
    let tokens = text::tokens(clause);
    tokens.iter().enumerate().any(|(index, token)| {
        lex.lexicon.achievement_verbs.iter().any(|verb| verb == token)
            && !text::negated_before(
                &tokens,
                index,
                &lex.lexicon.negators,
                lex.lexicon.negation_window,
            )
    })
}
