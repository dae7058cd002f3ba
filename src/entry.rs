//! Captured log entry and context types.

use serde::{Deserialize, Serialize};

use crate::types::Level;

/// Ordered key/value context attached to log entries.
///
/// Keys are unique; insertion order is significant and preserved (the
/// `preserve_order` feature of `serde_json` backs this map with an ordered
/// implementation).
pub type Context = serde_json::Map<String, serde_json::Value>;

/// One captured log event, immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Severity the entry was logged with.
    pub level: Level,
    /// Message text, coerced to a string at write time.
    pub message: String,
    /// Channel context merged with the call-site context, call-site wins.
    pub context: Context,
    /// How many times the channel had been forgotten strictly before this
    /// entry was appended.
    #[serde(rename = "times_channel_has_been_forgotten_at_time_of_writing_log")]
    pub times_forgotten: u64,
    /// Canonical name of the channel the entry was appended to.
    pub channel: String,
}
