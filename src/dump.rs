//! Read-only export of captured entries for debugging.
//!
//! Dumps route through an injectable handler rather than any built-in
//! formatter, so tests can capture exactly what would be exported. The
//! default handler pretty-prints the entries as JSON to stderr; the
//! forget counter appears under the exported name
//! `times_channel_has_been_forgotten_at_time_of_writing_log`.

use std::sync::Arc;

use crate::entry::LogEntry;
use crate::types::Level;

/// Handler invoked with the exported entries of a dump operation.
pub type DumpHandler = Arc<dyn Fn(&[LogEntry]) + Send + Sync>;

/// Handler used until one is injected: pretty-printed JSON on stderr.
pub fn default_handler() -> DumpHandler {
    Arc::new(|entries: &[LogEntry]| {
        if let Ok(json) = serde_json::to_string_pretty(entries) {
            eprintln!("{json}");
        }
    })
}

/// Entries retained by an optional level filter, order preserved.
pub fn filter_level(entries: Vec<LogEntry>, level: Option<&Level>) -> Vec<LogEntry> {
    match level {
        Some(level) => entries
            .into_iter()
            .filter(|entry| entry.level == *level)
            .collect(),
        None => entries,
    }
}
