//! Command implementations

mod core;
mod journal;

pub use self::core::{cmd_init, cmd_serve, cmd_status, open_db};
pub use self::journal::{cmd_analyze, cmd_complete, cmd_entries, cmd_insights};
