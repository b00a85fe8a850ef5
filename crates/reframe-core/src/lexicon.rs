//! Lexicon and rule tables for the journal analyzer
//!
//! Everything the analyzer matches against lives here: absolute-language
//! terms and their softened replacements, modal operators, distortion phrase
//! rules, relationship and achievement keywords, and the fixed templates for
//! coaching suggestions and action steps. The tables are immutable data
//! built once at startup and injected into [`crate::analyze::Analyzer`], so
//! tests can substitute custom lexicons.

use crate::models::{ChallengeKind, Distortion};

/// An absolute-language term and its optional softened replacement
#[derive(Debug, Clone)]
pub struct AbsoluteTerm {
    pub term: String,
    /// Softened quantifier substituted into the sentence for the reframe.
    /// `None` falls back to the generic reframe template.
    pub softened: Option<String>,
}

/// Phrase rules and the recurring-theme template for one distortion category
#[derive(Debug, Clone)]
pub struct DistortionRule {
    pub category: Distortion,
    pub phrases: Vec<String>,
    /// Suggestion shown when this category recurs across entries
    pub theme_suggestion: String,
}

/// Keywords, per-entry coaching suggestion, and recurring-theme template for
/// one category of challenging interaction
#[derive(Debug, Clone)]
pub struct ChallengeRule {
    pub kind: ChallengeKind,
    pub keywords: Vec<String>,
    pub suggestion: String,
    pub theme_suggestion: String,
}

/// Action-step templates, ordered by the generator's priority table
///
/// Downstream presentation classifies steps by substring: the reframing step
/// must contain "language" and "reframe" literally, the journaling step
/// "journal" and "record", the communication step "meeting" and "talk", the
/// mindfulness step "breath" and "mindful". Those keywords are part of the
/// output contract; keep them when editing the templates.
#[derive(Debug, Clone)]
pub struct ActionTable {
    pub reframing: String,
    pub journaling: String,
    pub communication: String,
    pub mindfulness: String,
}

/// The full rule set consumed by the analyzer
#[derive(Debug, Clone)]
pub struct Lexicon {
    pub absolute_terms: Vec<AbsoluteTerm>,
    pub modal_operators: Vec<String>,
    pub distortions: Vec<DistortionRule>,
    /// Words that negate an accomplishment verb when they appear shortly
    /// before it ("didn't finish", "almost completed")
    pub negators: Vec<String>,
    /// Token distance the negation check looks back
    pub negation_window: usize,
    pub positive_words: Vec<String>,
    pub negative_words: Vec<String>,
    /// Nouns that mark a sentence as being about a workplace relationship
    pub relationship_nouns: Vec<String>,
    pub relationship_positive: Vec<String>,
    pub challenges: Vec<ChallengeRule>,
    pub achievement_verbs: Vec<String>,
    pub workload_terms: Vec<String>,
    pub actions: ActionTable,
}

fn strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

const ABSOLUTE_TERMS: &[(&str, Option<&str>)] = &[
    ("always", Some("often")),
    ("never", Some("rarely")),
    ("everyone", Some("some people")),
    ("no one", Some("few people")),
    ("nobody", Some("few people")),
    ("everything", Some("much of it")),
    ("nothing", Some("little")),
    ("completely", Some("largely")),
    ("totally", Some("mostly")),
    ("impossible", Some("difficult")),
    ("every time", Some("sometimes")),
    ("all the time", None),
];

const MODAL_OPERATORS: &[&str] = &["must", "should", "have to", "need to", "ought to"];

const CATASTROPHIZING: &[&str] = &[
    "disaster",
    "catastrophe",
    "ruined",
    "worst thing",
    "never recover",
    "falling apart",
    "end of the world",
    "can't handle",
    "going to fail",
];

const MIND_READING: &[&str] = &[
    "they think",
    "he thinks",
    "she thinks",
    "everyone thinks",
    "they must think",
    "hates me",
    "hate me",
    "doesn't like me",
    "no one likes me",
    "they believe",
];

const DISCOUNTING_POSITIVES: &[&str] = &[
    "just luck",
    "only luck",
    "doesn't count",
    "didn't count",
    "anyone could have",
    "not a big deal",
    "no big deal",
    "only because",
    "just a fluke",
];

const OVERGENERALIZATION: &[&str] =
    &["always", "never", "every time", "nothing ever", "all the time"];

const NEGATORS: &[&str] = &[
    "not", "no", "never", "didn't", "don't", "doesn't", "haven't", "hasn't", "hadn't", "wasn't",
    "weren't", "couldn't", "can't", "won't", "wouldn't", "barely", "hardly", "almost", "failed",
    "without",
];

const POSITIVE_WORDS: &[&str] = &[
    "good",
    "great",
    "happy",
    "glad",
    "proud",
    "excited",
    "grateful",
    "thankful",
    "enjoyed",
    "fun",
    "calm",
    "productive",
    "energized",
    "confident",
    "supported",
    "helped",
    "appreciated",
    "praised",
    "went well",
    "progress",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad",
    "awful",
    "terrible",
    "horrible",
    "stressed",
    "stressful",
    "overwhelmed",
    "exhausted",
    "frustrated",
    "frustrating",
    "angry",
    "anxious",
    "worried",
    "sad",
    "upset",
    "hate",
    "hates",
    "hated",
    "failure",
    "failed",
    "mess up",
    "messed up",
    "miserable",
    "dreading",
];

const RELATIONSHIP_NOUNS: &[&str] = &[
    "coworker",
    "coworkers",
    "colleague",
    "colleagues",
    "manager",
    "managers",
    "boss",
    "team",
    "teammate",
    "teammates",
    "meeting",
    "meetings",
    "client",
    "clients",
    "supervisor",
];

const RELATIONSHIP_POSITIVE: &[&str] = &[
    "helped",
    "supported",
    "thanked",
    "appreciated",
    "praised",
    "complimented",
    "collaborated",
    "encouraged",
    "friendly",
    "great",
    "went well",
    "kind",
];

const CONFLICT_KEYWORDS: &[&str] = &[
    "argument",
    "argued",
    "conflict",
    "disagreement",
    "disagreed",
    "yelled",
    "shouted",
    "fight",
    "tension",
    "clashed",
];

const UNHEARD_KEYWORDS: &[&str] = &[
    "ignored",
    "dismissed",
    "interrupted",
    "overlooked",
    "unheard",
    "sidelined",
    "talked over",
    "excluded",
];

const CRITICISM_KEYWORDS: &[&str] = &[
    "criticized",
    "criticised",
    "blamed",
    "called out",
    "scolded",
    "belittled",
    "undermined",
    "picked apart",
];

const ACHIEVEMENT_VERBS: &[&str] = &[
    "finished",
    "completed",
    "succeeded",
    "praised",
    "accomplished",
    "achieved",
    "delivered",
    "solved",
    "shipped",
    "resolved",
    "won",
    "fixed",
];

const WORKLOAD_TERMS: &[&str] = &[
    "deadline",
    "deadlines",
    "workload",
    "overtime",
    "overloaded",
    "backlog",
    "swamped",
    "overbooked",
    "too many meetings",
];

impl Lexicon {
    /// The built-in rule set
    pub fn builtin() -> Self {
        Self {
            absolute_terms: ABSOLUTE_TERMS
                .iter()
                .map(|(term, softened)| AbsoluteTerm {
                    term: term.to_string(),
                    softened: softened.map(|s| s.to_string()),
                })
                .collect(),
            modal_operators: strings(MODAL_OPERATORS),
            distortions: vec![
                DistortionRule {
                    category: Distortion::Catastrophizing,
                    phrases: strings(CATASTROPHIZING),
                    theme_suggestion: "Catastrophizing appears across several entries. When a \
                                       worst-case thought shows up, write the most likely outcome \
                                       next to it and compare the two in a week."
                        .to_string(),
                },
                DistortionRule {
                    category: Distortion::MindReading,
                    phrases: strings(MIND_READING),
                    theme_suggestion: "Mind-reading keeps coming up. Before assuming what a \
                                       colleague thinks, note one piece of actual evidence, or \
                                       ask them directly."
                        .to_string(),
                },
                DistortionRule {
                    category: Distortion::DiscountingPositives,
                    phrases: strings(DISCOUNTING_POSITIVES),
                    theme_suggestion: "You often discount your wins. Re-read last week's \
                                       achievements before writing a new entry so they stay \
                                       visible."
                        .to_string(),
                },
                DistortionRule {
                    category: Distortion::Overgeneralization,
                    phrases: strings(OVERGENERALIZATION),
                    theme_suggestion: "Absolute words like 'always' and 'never' recur in your \
                                       entries. Count the real exceptions; they are usually there."
                        .to_string(),
                },
            ],
            negators: strings(NEGATORS),
            negation_window: 3,
            positive_words: strings(POSITIVE_WORDS),
            negative_words: strings(NEGATIVE_WORDS),
            relationship_nouns: strings(RELATIONSHIP_NOUNS),
            relationship_positive: strings(RELATIONSHIP_POSITIVE),
            challenges: vec![
                ChallengeRule {
                    kind: ChallengeKind::Conflict,
                    keywords: strings(CONFLICT_KEYWORDS),
                    suggestion: "Write down the one outcome you want from the situation and open \
                                 your next conversation with the goal you both share."
                        .to_string(),
                    theme_suggestion: "Conflict shows up in several entries. Pick one low-stakes \
                                       conversation this week to practice stating your view \
                                       early, before frustration builds."
                        .to_string(),
                },
                ChallengeRule {
                    kind: ChallengeKind::FeelingUnheard,
                    keywords: strings(UNHEARD_KEYWORDS),
                    suggestion: "The next time you are talked over, try 'I'd like to finish this \
                                 thought', and follow up in writing so your point is on record."
                        .to_string(),
                    theme_suggestion: "Feeling unheard comes up repeatedly. Book a short \
                                       one-on-one with the person involved and agree on how input \
                                       gets collected in meetings."
                        .to_string(),
                },
                ChallengeRule {
                    kind: ChallengeKind::Criticism,
                    keywords: strings(CRITICISM_KEYWORDS),
                    suggestion: "Separate the useful kernel from the delivery: note one concrete \
                                 change you could make and one part of the criticism you disagree \
                                 with."
                        .to_string(),
                    theme_suggestion: "Criticism is a recurring theme. Ask for feedback in a \
                                       structured form (keep/change) so it arrives as information \
                                       rather than judgment."
                        .to_string(),
                },
            ],
            achievement_verbs: strings(ACHIEVEMENT_VERBS),
            workload_terms: strings(WORKLOAD_TERMS),
            actions: ActionTable {
                reframing: "Practice one language reframe each day: pick a sentence with an \
                            absolute word and rewrite it with a softer quantifier."
                    .to_string(),
                journaling: "Keep a balanced-thinking journal: record the situation, the \
                             automatic thought, and a fairer alternative each evening."
                    .to_string(),
                communication: "Before your next difficult meeting, talk through your main point \
                                out loud and decide on one question to ask."
                    .to_string(),
                mindfulness: "Take two minutes of mindful breathing before you start work: in \
                              for four counts, out for four."
                    .to_string(),
            },
        }
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::builtin()
    }
}
