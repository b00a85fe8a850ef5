//! Journal entry analyzer
//!
//! A pure, synchronous pipeline over one entry's text:
//! language scan -> distortion classification -> relationship/achievement
//! extraction -> scoring and tagging -> action plan. No I/O, no shared
//! mutable state; identical input always produces identical output, so the
//! analyzer is trivially safe to share across requests.

mod actions;
mod distortions;
mod language;
mod relationships;
mod scoring;

use tracing::debug;

use crate::error::{Error, Result};
use crate::lexicon::Lexicon;
use crate::models::{ChallengeKind, Distortion, EntryAnalysis, PatternCounters};
use crate::text::{compile_all, PhraseMatcher};

/// Minimum entry length after trimming
pub const MIN_ENTRY_LEN: usize = 10;

/// Lexicon with all matchers compiled, built once per analyzer
pub(crate) struct CompiledLexicon {
    pub lexicon: Lexicon,
    /// (matcher, softened replacement) per absolute term
    pub absolute: Vec<(PhraseMatcher, Option<String>)>,
    pub modals: Vec<PhraseMatcher>,
    pub distortions: Vec<(Distortion, Vec<PhraseMatcher>)>,
    pub positive: Vec<PhraseMatcher>,
    pub negative: Vec<PhraseMatcher>,
    pub relationship_nouns: Vec<PhraseMatcher>,
    pub relationship_positive: Vec<PhraseMatcher>,
    pub challenges: Vec<(ChallengeKind, Vec<PhraseMatcher>)>,
    pub workload: Vec<PhraseMatcher>,
}

impl CompiledLexicon {
    fn compile(lexicon: Lexicon) -> Result<Self> {
        let absolute = lexicon
            .absolute_terms
            .iter()
            .map(|t| Ok((PhraseMatcher::new(&t.term)?, t.softened.clone())))
            .collect::<Result<Vec<_>>>()?;
        let distortions = lexicon
            .distortions
            .iter()
            .map(|rule| Ok((rule.category, compile_all(&rule.phrases)?)))
            .collect::<Result<Vec<_>>>()?;
        let challenges = lexicon
            .challenges
            .iter()
            .map(|rule| Ok((rule.kind, compile_all(&rule.keywords)?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            absolute,
            modals: compile_all(&lexicon.modal_operators)?,
            distortions,
            positive: compile_all(&lexicon.positive_words)?,
            negative: compile_all(&lexicon.negative_words)?,
            relationship_nouns: compile_all(&lexicon.relationship_nouns)?,
            relationship_positive: compile_all(&lexicon.relationship_positive)?,
            challenges,
            workload: compile_all(&lexicon.workload_terms)?,
            lexicon,
        })
    }
}

/// The journal insight engine
///
/// Holds the compiled lexicon; construct once at startup and share. Custom
/// lexicons can be injected through [`Analyzer::new`] (tests do this to pin
/// down matching behavior).
pub struct Analyzer {
    compiled: CompiledLexicon,
}

impl Analyzer {
    /// Build an analyzer from a lexicon, compiling all matchers
    pub fn new(lexicon: Lexicon) -> Result<Self> {
        Ok(Self {
            compiled: CompiledLexicon::compile(lexicon)?,
        })
    }

    /// Analyzer over the built-in lexicon
    pub fn builtin() -> Self {
        Self::new(Lexicon::builtin()).expect("builtin lexicon compiles")
    }

    /// The lexicon this analyzer was built from
    pub fn lexicon(&self) -> &Lexicon {
        &self.compiled.lexicon
    }

    /// Analyze one entry's text
    ///
    /// Rejects empty or too-short text with [`Error::InvalidInput`] before
    /// doing any work; a valid entry with no detected patterns yields a
    /// fully-populated result whose collections are simply empty.
    pub fn analyze(&self, text: &str) -> Result<EntryAnalysis> {
        let text = text.trim();
        if text.len() < MIN_ENTRY_LEN {
            return Err(Error::InvalidInput(format!(
                "Journal entry must be at least {} characters",
                MIN_ENTRY_LEN
            )));
        }

        let language = language::scan(text, &self.compiled);
        let distortion_scan = distortions::classify(text, &self.compiled);
        let relationship_scan = relationships::extract(text, &self.compiled);
        let score = scoring::score_and_tag(
            text,
            &distortion_scan.patterns,
            &relationship_scan,
            &self.compiled,
        );
        let actionable_steps = actions::generate(
            &language.patterns,
            &distortion_scan.patterns,
            &relationship_scan.patterns,
            &self.compiled.lexicon.actions,
        );

        let patterns = PatternCounters {
            absolute_language: language.hits,
            negative_framing: score.negative_hits,
            discounting_positives: distortion_scan.discounting_hits,
            mind_reading: distortion_scan.mind_reading_hits,
            achievements: relationship_scan.achievements.len() as u32,
        };

        debug!(
            score = score.sentiment_score,
            tags = ?score.tags,
            absolute = patterns.absolute_language,
            achievements = patterns.achievements,
            "Entry analyzed"
        );

        Ok(EntryAnalysis {
            analysis: crate::models::Analysis {
                language_patterns: language.patterns,
                cognitive_patterns: distortion_scan.patterns,
                relationships: relationship_scan.patterns,
                achievements: relationship_scan.achievements,
                actionable_steps,
            },
            sentiment_score: score.sentiment_score,
            tags: score.tags,
            patterns,
        })
    }

    /// Challenge categories present in a snippet, in rule-table order
    ///
    /// Used by the aggregate builder to recover theme categories from
    /// persisted challenging-interaction snippets without widening the
    /// stored analysis shape.
    pub(crate) fn challenge_kinds_in(&self, snippet: &str) -> Vec<ChallengeKind> {
        self.compiled
            .challenges
            .iter()
            .filter(|(_, matchers)| matchers.iter().any(|m| m.is_match(snippet)))
            .map(|(kind, _)| *kind)
            .collect()
    }
}
