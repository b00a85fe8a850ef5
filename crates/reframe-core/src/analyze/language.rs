//! Absolute-language and modal-operator scanner

use crate::models::LanguagePatterns;
use crate::text;

use super::CompiledLexicon;

pub(crate) struct LanguageScan {
    pub patterns: LanguagePatterns,
    /// Total absolute-term occurrences across the text
    pub hits: u32,
}

/// Scan for absolute-language terms and modal operators
///
/// Surface forms are recorded once per term, in first-occurrence order.
/// Each matched absolute term gets one suggested reframe built from the
/// sentence containing its first occurrence.
pub(crate) fn scan(text: &str, lex: &CompiledLexicon) -> LanguageScan {
    let sentences = text::sentences(text);

    // First occurrence of each absolute term, ordered by position in text
    let mut found: Vec<(usize, String, usize)> = Vec::new(); // (offset, surface, lexicon index)
    let mut hits = 0u32;
    for (idx, (matcher, _)) in lex.absolute.iter().enumerate() {
        hits += matcher.count(text) as u32;
        if let Some(m) = matcher.find(text) {
            found.push((m.start(), m.as_str().to_string(), idx));
        }
    }
    found.sort();

    let mut absolute_terms = Vec::with_capacity(found.len());
    let mut suggested_reframes = Vec::with_capacity(found.len());
    for (_, surface, idx) in found {
        let (matcher, softened) = &lex.absolute[idx];
        let sentence = sentences.iter().find(|s| matcher.is_match(s)).copied();
        let reframe = match (sentence, softened) {
            (Some(sentence), Some(softened)) => format!(
                "Instead of \"{}\", try \"{}\"",
                sentence,
                matcher.replace_first(sentence, softened)
            ),
            (Some(sentence), None) => format!(
                "Try restating \"{}\" without \"{}\" to leave room for exceptions",
                sentence, surface
            ),
            (None, _) => format!(
                "Notice where \"{}\" shows up; absolute words often hide exceptions",
                surface
            ),
        };
        absolute_terms.push(surface);
        suggested_reframes.push(reframe);
    }

    let mut modal_found: Vec<(usize, String)> = lex
        .modals
        .iter()
        .filter_map(|m| m.find(text).map(|hit| (hit.start(), hit.as_str().to_string())))
        .collect();
    modal_found.sort();
    let modal_operators = modal_found.into_iter().map(|(_, surface)| surface).collect();

    LanguageScan {
        patterns: LanguagePatterns {
            absolute_terms,
            suggested_reframes,
            modal_operators,
        },
        hits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::Lexicon;

    fn lex() -> CompiledLexicon {
        CompiledLexicon::compile(Lexicon::builtin()).unwrap()
    }

    #[test]
    fn test_first_occurrence_order_deduplicated() {
        let scan = scan(
            "I never rest because I never stop. I always push too hard.",
            &lex(),
        );
        assert_eq!(scan.patterns.absolute_terms, vec!["never", "always"]);
        // Three occurrences counted even though "never" is listed once
        assert_eq!(scan.hits, 3);
    }

    #[test]
    fn test_reframe_substitutes_softened_quantifier() {
        let scan = scan("I always miss the morning standup.", &lex());
        assert_eq!(scan.patterns.suggested_reframes.len(), 1);
        assert!(scan.patterns.suggested_reframes[0]
            .contains("I often miss the morning standup"));
    }

    #[test]
    fn test_generic_reframe_without_substitution() {
        // "all the time" has no softened replacement in the builtin lexicon
        let scan = scan("The printer jams all the time around here.", &lex());
        assert_eq!(scan.patterns.absolute_terms, vec!["all the time"]);
        assert!(scan.patterns.suggested_reframes[0].contains("all the time"));
    }

    #[test]
    fn test_modal_operators_in_occurrence_order() {
        let scan = scan("I should say no, but I must deliver and I have to stay.", &lex());
        assert_eq!(
            scan.patterns.modal_operators,
            vec!["should", "must", "have to"]
        );
    }

    #[test]
    fn test_empty_text_yields_empty_sets() {
        let scan = scan("", &lex());
        assert!(scan.patterns.absolute_terms.is_empty());
        assert!(scan.patterns.suggested_reframes.is_empty());
        assert!(scan.patterns.modal_operators.is_empty());
        assert_eq!(scan.hits, 0);
    }

    #[test]
    fn test_case_insensitive_whole_word() {
        let scan = scan("Always the hallways are crowded.", &lex());
        // "Always" matches, "hallways" does not
        assert_eq!(scan.patterns.absolute_terms, vec!["Always"]);
    }
}
