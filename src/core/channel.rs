use crate::entry::{Context, LogEntry};
use crate::types::Level;

/// Append-only record of everything logged to one channel identity, plus
/// the channel's context store and forget counter.
#[derive(Debug, Clone)]
pub struct ChannelLog {
    name: String,
    entries: Vec<LogEntry>,
    times_forgotten: u64,
    context: Context,
}

impl ChannelLog {
    /// Empty log for the given canonical channel name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
            times_forgotten: 0,
            context: Context::new(),
        }
    }

    /// Canonical channel name stamped onto every entry.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Captured entries in append order.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// How many times this channel has been forgotten so far.
    pub fn times_forgotten(&self) -> u64 {
        self.times_forgotten
    }

    /// Snapshot of the channel's current context store.
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Appends an entry, merging the context store with the call-site
    /// context (call-site keys win) and stamping the current forget count.
    pub fn append(&mut self, level: Level, message: String, context: Context) {
        let mut merged = self.context.clone();
        for (key, value) in context {
            merged.insert(key, value);
        }

        self.entries.push(LogEntry {
            level,
            message,
            context: merged,
            times_forgotten: self.times_forgotten,
            channel: self.name.clone(),
        });
    }

    /// Increments the forget counter. Past entries keep the counter value
    /// they were stamped with; nothing is cleared.
    pub fn forget(&mut self) {
        self.times_forgotten += 1;
    }

    /// Merges `context` into the store additively; later keys override
    /// earlier ones.
    pub fn merge_context(&mut self, context: Context) {
        for (key, value) in context {
            self.context.insert(key, value);
        }
    }

    /// Clears the context store entirely.
    pub fn clear_context(&mut self) {
        self.context.clear();
    }
}
