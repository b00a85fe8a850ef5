//! Text segmentation and whole-word matching helpers
//!
//! The analyzer works sentence-by-sentence (clause-by-clause for
//! achievements) with case-insensitive whole-word matching, so all the
//! boundary handling lives here rather than in the individual scanners.

use regex::Regex;

use crate::error::Result;

/// Split text into trimmed, non-empty sentences
pub(crate) fn sentences(text: &str) -> Vec<&str> {
    text.split(['.', '!', '?', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Split a sentence into clauses, stripping leading coordinating conjunctions
///
/// "I messed up, but I finished the report" yields
/// ["I messed up", "I finished the report"].
pub(crate) fn clauses(sentence: &str) -> Vec<String> {
    sentence
        .split([',', ';', ':'])
        .map(strip_leading_conjunction)
        .filter(|s| !s.is_empty())
        .collect()
}

fn strip_leading_conjunction(clause: &str) -> String {
    let trimmed = clause.trim();
    for conj in ["but ", "and ", "yet ", "so "] {
        match trimmed.get(..conj.len()) {
            Some(prefix) if prefix.eq_ignore_ascii_case(conj) && trimmed.len() > conj.len() => {
                return trimmed[conj.len()..].trim_start().to_string();
            }
            _ => {}
        }
    }
    trimmed.to_string()
}

/// Lowercased word tokens with surrounding punctuation stripped
///
/// Apostrophes are kept so contractions ("didn't") stay single tokens.
pub(crate) fn tokens(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|word| {
            word.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
                .to_lowercase()
        })
        .filter(|word| !word.is_empty())
        .collect()
}

/// True when one of `negators` appears within `window` tokens before `index`
pub(crate) fn negated_before(
    tokens: &[String],
    index: usize,
    negators: &[String],
    window: usize,
) -> bool {
    let start = index.saturating_sub(window);
    tokens[start..index]
        .iter()
        .any(|token| negators.iter().any(|negator| negator == token))
}

/// A case-insensitive whole-word matcher for one term or phrase
///
/// Compiled once per lexicon entry; multi-word phrases match across
/// whitespace exactly as written.
#[derive(Debug)]
pub(crate) struct PhraseMatcher {
    re: Regex,
}

impl PhraseMatcher {
    pub fn new(term: &str) -> Result<Self> {
        let re = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(term)))?;
        Ok(Self { re })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.re.is_match(text)
    }

    /// First match in `text`, if any
    pub fn find<'t>(&self, text: &'t str) -> Option<regex::Match<'t>> {
        self.re.find(text)
    }

    /// Number of occurrences in `text`
    pub fn count(&self, text: &str) -> usize {
        self.re.find_iter(text).count()
    }

    /// Replace the first occurrence in `text` with `replacement`
    pub fn replace_first(&self, text: &str, replacement: &str) -> String {
        self.re.replace(text, replacement).into_owned()
    }
}

/// Compile a list of lexicon terms into matchers
pub(crate) fn compile_all(terms: &[String]) -> Result<Vec<PhraseMatcher>> {
    terms.iter().map(|t| PhraseMatcher::new(t)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentence_split() {
        let text = "Rough day. The deadline moved!  Why me?\nTomorrow is open";
        assert_eq!(
            sentences(text),
            vec!["Rough day", "The deadline moved", "Why me", "Tomorrow is open"]
        );
        assert!(sentences("   ").is_empty());
    }

    #[test]
    fn test_clause_split_strips_conjunctions() {
        let split = clauses("I always mess up, but I finished the report early");
        assert_eq!(split, vec!["I always mess up", "I finished the report early"]);
    }

    #[test]
    fn test_tokens_keep_contractions() {
        assert_eq!(
            tokens("I didn't finish it."),
            vec!["i", "didn't", "finish", "it"]
        );
    }

    #[test]
    fn test_negated_before_window() {
        let toks = tokens("today i didn't quite finish the report");
        let finish = toks.iter().position(|t| t == "finish").unwrap();
        let negators = vec!["didn't".to_string()];
        assert!(negated_before(&toks, finish, &negators, 3));
        // Outside the window the negator no longer applies
        assert!(!negated_before(&toks, finish, &negators, 1));
    }

    #[test]
    fn test_phrase_matcher_whole_word() {
        let m = PhraseMatcher::new("no one").unwrap();
        assert!(m.is_match("No one listens"));
        assert!(!m.is_match("none of it"));

        let all = PhraseMatcher::new("always").unwrap();
        assert!(!all.is_match("hallways"));
        assert_eq!(all.count("Always late, always tired"), 2);
    }

    #[test]
    fn test_replace_first_preserves_rest() {
        let m = PhraseMatcher::new("always").unwrap();
        assert_eq!(
            m.replace_first("I always always slip", "often"),
            "I often always slip"
        );
    }
}
