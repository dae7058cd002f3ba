//! Configuration collaborator for default-channel resolution.

use std::sync::Arc;

use parking_lot::Mutex;

/// Channel name used when no default is configured.
pub const NULL_CHANNEL: &str = "null";

/// Shared handle to the single setting the fake consults: the default
/// channel name.
///
/// Cloning yields another handle to the same underlying setting, so a test
/// can keep a clone, hand one to
/// [`LogFake::with_config`](crate::fake::LogFake::with_config), and observe
/// writes made through `set_default_driver`.
#[derive(Debug, Clone)]
pub struct FakeConfig {
    default: Arc<Mutex<Option<String>>>,
}

impl FakeConfig {
    /// Config with an explicit default channel name.
    pub fn new(default: Option<impl Into<String>>) -> Self {
        Self {
            default: Arc::new(Mutex::new(default.map(Into::into))),
        }
    }

    /// Currently configured default channel name, if any.
    pub fn default_channel(&self) -> Option<String> {
        self.default.lock().clone()
    }

    /// Default channel name to resolve, falling back to [`NULL_CHANNEL`]
    /// when the setting is absent.
    pub fn resolved_default(&self) -> String {
        self.default
            .lock()
            .clone()
            .unwrap_or_else(|| NULL_CHANNEL.to_string())
    }

    /// Overwrites the default channel name.
    pub fn set_default_channel(&self, name: Option<impl Into<String>>) {
        *self.default.lock() = name.map(Into::into);
    }
}

impl Default for FakeConfig {
    /// Starts with `"stack"` as the default channel name.
    fn default() -> Self {
        Self::new(Some("stack"))
    }
}
