//! Action-step generator
//!
//! Maps the fired pattern categories to an ordered plan via a fixed priority
//! table: language reframing, then journaling practice, then communication
//! practice, with a mindfulness step always appended last. Output order
//! follows the table, not detection order.
//!
//! Contract: downstream presentation classifies each step purely by
//! substring (see `ActionTable`), so the emitted strings must keep their
//! classification keywords literally. The templates live in the lexicon;
//! this module only decides which of them fire.

use crate::lexicon::ActionTable;
use crate::models::{CognitivePatterns, LanguagePatterns, RelationshipPatterns};

pub(crate) fn generate(
    language: &LanguagePatterns,
    cognitive: &CognitivePatterns,
    relationships: &RelationshipPatterns,
    actions: &ActionTable,
) -> Vec<String> {
    let mut steps = Vec::new();
    if !language.absolute_terms.is_empty() {
        steps.push(actions.reframing.clone());
    }
    if !cognitive.distortions.is_empty() {
        steps.push(actions.journaling.clone());
    }
    if !relationships.challenging_interactions.is_empty() {
        steps.push(actions.communication.clone());
    }
    // Universal fallback; also guarantees the plan is never empty
    steps.push(actions.mindfulness.clone());
    steps
}
