//! Cognitive distortion classifier
//!
//! Fixed taxonomy, per-category phrase rules evaluated sentence by sentence.
//! A sentence matching several categories counts for all of them; the
//! category list is ordered by first appearance in the text and the examples
//! are the verbatim trimmed sentences, deduplicated, in source order.

use crate::models::{CognitivePatterns, Distortion};
use crate::text;

use super::CompiledLexicon;

pub(crate) struct DistortionScan {
    pub patterns: CognitivePatterns,
    pub discounting_hits: u32,
    pub mind_reading_hits: u32,
}

pub(crate) fn classify(text: &str, lex: &CompiledLexicon) -> DistortionScan {
    let mut distortions: Vec<Distortion> = Vec::new();
    let mut examples: Vec<String> = Vec::new();

    for sentence in text::sentences(text) {
        let mut sentence_matched = false;
        for (category, matchers) in &lex.distortions {
            if matchers.iter().any(|m| m.is_match(sentence)) {
                if !distortions.contains(category) {
                    distortions.push(*category);
                }
                sentence_matched = true;
            }
        }
        if sentence_matched && !examples.iter().any(|e| e == sentence) {
            examples.push(sentence.to_string());
        }
    }

    let count_for = |category: Distortion| -> u32 {
        lex.distortions
            .iter()
            .filter(|(c, _)| *c == category)
            .flat_map(|(_, matchers)| matchers.iter())
            .map(|m| m.count(text) as u32)
            .sum()
    };

    DistortionScan {
        patterns: CognitivePatterns {
            distortions,
            examples,
        },
        discounting_hits: count_for(Distortion::DiscountingPositives),
        mind_reading_hits: count_for(Distortion::MindReading),
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
    fn test_categories_ordered_by_first_appearance() {
        let scan = classify(
            "My boss probably hates me. This project is a disaster.",
            &lex(),
        );
        assert_eq!(
            scan.patterns.distortions,
            vec![Distortion::MindReading, Distortion::Catastrophizing]
        );
        assert_eq!(
            scan.patterns.examples,
            vec![
                "My boss probably hates me",
                "This project is a disaster"
            ]
        );
    }

    #[test]
    fn test_sentence_attributed_to_all_matching_categories() {
        let scan = classify("Everyone thinks my work is a disaster.", &lex());
        assert!(scan
            .patterns
            .distortions
            .contains(&Distortion::MindReading));
        assert!(scan
            .patterns
            .distortions
            .contains(&Distortion::Catastrophizing));
        // One sentence, one example
        assert_eq!(scan.patterns.examples.len(), 1);
    }

    #[test]
    fn test_overgeneralization_on_absolute_words() {
        let scan = classify("I never get the interesting tickets.", &lex());
        assert_eq!(
            scan.patterns.distortions,
            vec![Distortion::Overgeneralization]
        );
    }

    #[test]
    fn test_hit_counters() {
        let scan = classify(
            "It was just luck, it doesn't count. They think I slack off.",
            &lex(),
        );
        assert_eq!(scan.discounting_hits, 2);
        assert_eq!(scan.mind_reading_hits, 1);
    }

    #[test]
    fn test_clean_text_has_no_distortions() {
        let scan = classify("Wrapped up planning and took a walk at lunch.", &lex());
        assert!(scan.patterns.distortions.is_empty());
        assert!(scan.patterns.examples.is_empty());
    }
}
