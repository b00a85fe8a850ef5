//! Request handlers

mod journal;

pub use journal::{analyze_entry, complete_action, get_insights, health, list_entries};
