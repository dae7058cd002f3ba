use hashbrown::HashMap;

use crate::core::channel::ChannelLog;

/// Identity of a channel log within the registry.
///
/// Plain channels and stacks are disjoint namespaces: the tag carries the
/// distinction, so a plain channel literally named `"a.b"` never collides
/// with the stack built from members `["a", "b"]`, even though both
/// canonicalize to the string `a.b`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChannelKey {
    /// A plain (or on-demand) channel resolved by name.
    Channel(String),
    /// A composite stack resolved by its canonical name.
    Stack(String),
}

impl ChannelKey {
    /// Key for a stack built from `members` with an optional label.
    ///
    /// Canonical name: members deduplicated by value, sorted ascending,
    /// joined with `.`; a label prepends `Stack:<label>.`.
    pub fn stack<S: AsRef<str>>(members: &[S], label: Option<&str>) -> Self {
        let mut names: Vec<&str> = members.iter().map(AsRef::as_ref).collect();
        names.sort_unstable();
        names.dedup();
        let joined = names.join(".");

        match label {
            Some(label) => Self::Stack(format!("Stack:{label}.{joined}")),
            None => Self::Stack(joined),
        }
    }

    /// Canonical name stamped onto entries logged through this identity.
    pub fn canonical_name(&self) -> &str {
        match self {
            Self::Channel(name) | Self::Stack(name) => name,
        }
    }
}

/// Process-wide mapping from channel identity to its [`ChannelLog`].
///
/// Logs live in a slot vector ordered by first resolution; the index maps
/// each key to its slot, so the same key always resolves to the same log
/// for the lifetime of the fake.
#[derive(Debug, Default)]
pub struct Registry {
    logs: Vec<ChannelLog>,
    keys: Vec<ChannelKey>,
    index: HashMap<ChannelKey, usize>,
}

impl Registry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves `key` to its slot, lazily creating the channel log on
    /// first resolution. Never fails.
    pub fn resolve(&mut self, key: ChannelKey) -> usize {
        if let Some(&slot) = self.index.get(&key) {
            return slot;
        }

        let slot = self.logs.len();
        self.logs.push(ChannelLog::new(key.canonical_name()));
        self.keys.push(key.clone());
        self.index.insert(key, slot);
        slot
    }

    /// Log at `slot`. Panics on an out-of-range slot, which cannot be
    /// produced through [`Registry::resolve`].
    pub fn get(&self, slot: usize) -> &ChannelLog {
        &self.logs[slot]
    }

    /// Mutable log at `slot`.
    pub fn get_mut(&mut self, slot: usize) -> &mut ChannelLog {
        &mut self.logs[slot]
    }

    /// Channel logs in first-resolution order.
    pub fn iter(&self) -> impl Iterator<Item = &ChannelLog> {
        self.logs.iter()
    }

    /// Keys and logs in first-resolution order.
    pub fn iter_with_keys(&self) -> impl Iterator<Item = (&ChannelKey, &ChannelLog)> {
        self.keys.iter().zip(self.logs.iter())
    }

    /// Number of channels resolved so far.
    pub fn len(&self) -> usize {
        self.logs.len()
    }

    /// True when no channel has been resolved yet.
    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }
}
