//! Public handle layer: the root fake and per-channel handles.

/// Channel and stack handle implementation.
pub mod channel;

use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::FakeConfig;
use crate::core::registry::{ChannelKey, Registry};
use crate::dump::{self, DumpHandler};
use crate::entry::{Context, LogEntry};
use crate::error::AssertionError;
use crate::types::Level;

pub use channel::ChannelFake;

use channel::HandleKind;

pub(crate) const MSG_DUMP_ALL_FROM_CHANNEL: &str =
    "LogFake::dump_all() should not be called from a channel.";
pub(crate) const MSG_DD_FROM_CHANNEL: &str = "`dd()` should not be called from a channel.";
pub(crate) const MSG_DD_ALL_FROM_CHANNEL: &str = "`dd_all()` should not be called from a channel.";
pub(crate) const MSG_STACK_CONTEXT: &str = "Cannot call [stack(...).assert_current_context(...)] as stack contexts are reset each time they are resolved.";

/// Collaborator interface for log-event dispatch.
///
/// The fake accepts a dispatcher and hands it back on request but never
/// dispatches anything through it: no log-written events fire.
pub trait EventDispatcher: Send + Sync {
    /// Would be invoked with each written entry by a real backend.
    fn dispatch(&self, entry: &LogEntry);
}

pub(crate) struct FakeInner {
    pub(crate) registry: Registry,
    pub(crate) dump_handler: DumpHandler,
    pub(crate) dispatcher: Option<Arc<dyn EventDispatcher>>,
}

/// The root of the fake: channel/stack registry plus the full logging and
/// assertion surface of the *default* channel.
///
/// Logging and assertion calls made directly on the root are proxied to
/// the default channel, which is re-resolved from the configuration
/// collaborator on every call. Cloning yields another handle to the same
/// shared registry.
///
/// ```
/// use logfake::LogFake;
///
/// let log = LogFake::new();
/// log.info("order shipped");
/// log.assert_logged("info")?;
/// log.channel("payments").assert_nothing_logged()?;
/// # Ok::<(), logfake::AssertionError>(())
/// ```
#[derive(Clone)]
pub struct LogFake {
    inner: Arc<Mutex<FakeInner>>,
    config: FakeConfig,
}

impl PartialEq for LogFake {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl std::fmt::Debug for LogFake {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogFake")
            .field("channels", &self.inner.lock().registry.len())
            .finish_non_exhaustive()
    }
}

impl Default for LogFake {
    fn default() -> Self {
        Self::new()
    }
}

impl LogFake {
    /// Fake with the default configuration (default channel `"stack"`).
    pub fn new() -> Self {
        Self::with_config(FakeConfig::default())
    }

    /// Fake reading its default channel name from `config`.
    ///
    /// The config handle is shared: writes made through
    /// [`LogFake::set_default_driver`] are visible to other clones of it.
    pub fn with_config(config: FakeConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeInner {
                registry: Registry::new(),
                dump_handler: dump::default_handler(),
                dispatcher: None,
            })),
            config,
        }
    }

    /// Handle to the shared configuration collaborator.
    pub fn config(&self) -> FakeConfig {
        self.config.clone()
    }

    // --- resolution --------------------------------------------------

    /// Resolves (lazily creating) the plain channel `name`.
    pub fn channel(&self, name: impl Into<String>) -> ChannelFake {
        self.resolve(ChannelKey::Channel(name.into()), HandleKind::Channel)
    }

    /// Alias for [`LogFake::channel`]; same identity, same log.
    pub fn driver(&self, name: impl Into<String>) -> ChannelFake {
        self.channel(name)
    }

    /// Handle to the current default channel.
    pub fn logger(&self) -> ChannelFake {
        self.default_channel()
    }

    /// Resolves (lazily creating) the stack built from `members` with an
    /// optional label.
    ///
    /// Member names are deduplicated and sorted, so any permutation of the
    /// same set resolves to the same identity. Each resolution clears the
    /// stack's context store: stack contexts are rebuilt fresh every time.
    pub fn stack<S: AsRef<str>>(&self, members: &[S], label: Option<&str>) -> ChannelFake {
        let key = ChannelKey::stack(members, label);
        let mut inner = self.inner.lock();
        let slot = inner.registry.resolve(key);
        inner.registry.get_mut(slot).clear_context();
        drop(inner);
        ChannelFake::new(Arc::clone(&self.inner), slot, HandleKind::Stack)
    }

    /// Resolves the fixed on-demand channel, ignoring `config` entirely:
    /// the fake does not interpret on-demand driver configuration.
    pub fn build(&self, _config: serde_json::Value) -> ChannelFake {
        self.channel("ondemand")
    }

    // --- registry operations -----------------------------------------

    /// Increments the forget counter of the plain channel `name`,
    /// resolving it first if needed. Captured entries are untouched.
    pub fn forget_channel(&self, name: impl Into<String>) {
        self.forget(ChannelKey::Channel(name.into()));
    }

    /// Increments the forget counter of the stack identity built from
    /// `members` and `label`, resolving it first if needed.
    pub fn forget_stack<S: AsRef<str>>(&self, members: &[S], label: Option<&str>) {
        self.forget(ChannelKey::stack(members, label));
    }

    /// Every channel resolved so far, as `(canonical name, handle)` pairs
    /// in first-resolution order.
    pub fn get_channels(&self) -> Vec<(String, ChannelFake)> {
        let inner = self.inner.lock();
        inner
            .registry
            .iter_with_keys()
            .enumerate()
            .map(|(slot, (key, log))| {
                let kind = match key {
                    ChannelKey::Channel(_) => HandleKind::Channel,
                    ChannelKey::Stack(_) => HandleKind::Stack,
                };
                (
                    log.name().to_string(),
                    ChannelFake::new(Arc::clone(&self.inner), slot, kind),
                )
            })
            .collect()
    }

    /// Every captured entry across every resolved channel, concatenated in
    /// channel-resolution order then per-channel append order.
    pub fn all_logs(&self) -> Vec<LogEntry> {
        let inner = self.inner.lock();
        inner
            .registry
            .iter()
            .flat_map(|log| log.entries().iter().cloned())
            .collect()
    }

    /// Writes the default channel name consulted by unspecified-channel
    /// resolution.
    pub fn set_default_driver(&self, name: impl Into<String>) {
        self.config.set_default_channel(Some(name));
    }

    // --- collaborator stubs ------------------------------------------

    /// Accepts a log-written listener and ignores it: the fake never
    /// emits events.
    pub fn listen(&self, _listener: impl Fn(&LogEntry) + Send + Sync + 'static) {}

    /// Accepts a custom driver extension and ignores it: every channel is
    /// faked regardless of driver.
    pub fn extend(&self, _driver: impl Into<String>, _factory: impl Fn(&serde_json::Value) + Send + Sync + 'static) {}

    /// Stores a dispatcher without ever dispatching through it.
    pub fn set_event_dispatcher(&self, dispatcher: Arc<dyn EventDispatcher>) {
        self.inner.lock().dispatcher = Some(dispatcher);
    }

    /// The dispatcher last stored, if any.
    pub fn get_event_dispatcher(&self) -> Option<Arc<dyn EventDispatcher>> {
        self.inner.lock().dispatcher.clone()
    }

    // --- dump --------------------------------------------------------

    /// Injects the handler every dump operation routes through.
    pub fn set_dump_handler(&self, handler: impl Fn(&[LogEntry]) + Send + Sync + 'static) {
        self.inner.lock().dump_handler = Arc::new(handler);
    }

    /// Exports the default channel's entries through the dump handler,
    /// optionally filtered by level; returns the default channel handle
    /// for chaining.
    pub fn dump(&self, level: Option<Level>) -> ChannelFake {
        let channel = self.default_channel();
        channel.dump(level);
        channel
    }

    /// Exports every channel's entries, in [`LogFake::all_logs`] order,
    /// through the dump handler; chainable. Only callable at the root.
    pub fn dump_all(&self, level: Option<Level>) -> &Self {
        let (handler, entries) = {
            let inner = self.inner.lock();
            let entries = inner
                .registry
                .iter()
                .flat_map(|log| log.entries().iter().cloned())
                .collect();
            (Arc::clone(&inner.dump_handler), entries)
        };
        handler(&dump::filter_level(entries, level.as_ref()));
        self
    }

    /// Exports the default channel's entries, then terminates the process.
    pub fn dd(&self, level: Option<Level>) -> ! {
        self.dump(level);
        std::process::exit(1);
    }

    /// Exports every channel's entries, then terminates the process.
    pub fn dd_all(&self, level: Option<Level>) -> ! {
        self.dump_all(level);
        std::process::exit(1);
    }

    // --- default-channel proxies -------------------------------------

    /// Logs at [`Level::Emergency`] on the default channel.
    pub fn emergency(&self, message: impl ToString) {
        self.default_channel().emergency(message);
    }

    /// Logs at [`Level::Alert`] on the default channel.
    pub fn alert(&self, message: impl ToString) {
        self.default_channel().alert(message);
    }

    /// Logs at [`Level::Critical`] on the default channel.
    pub fn critical(&self, message: impl ToString) {
        self.default_channel().critical(message);
    }

    /// Logs at [`Level::Error`] on the default channel.
    pub fn error(&self, message: impl ToString) {
        self.default_channel().error(message);
    }

    /// Logs at [`Level::Warning`] on the default channel.
    pub fn warning(&self, message: impl ToString) {
        self.default_channel().warning(message);
    }

    /// Logs at [`Level::Notice`] on the default channel.
    pub fn notice(&self, message: impl ToString) {
        self.default_channel().notice(message);
    }

    /// Logs at [`Level::Info`] on the default channel.
    pub fn info(&self, message: impl ToString) {
        self.default_channel().info(message);
    }

    /// Logs at [`Level::Debug`] on the default channel.
    pub fn debug(&self, message: impl ToString) {
        self.default_channel().debug(message);
    }

    /// Logs at any level on the default channel.
    pub fn log(&self, level: impl Into<Level>, message: impl ToString, context: Context) {
        self.default_channel().log(level, message, context);
    }

    /// Alias for [`LogFake::log`].
    pub fn write(&self, level: impl Into<Level>, message: impl ToString, context: Context) {
        self.default_channel().write(level, message, context);
    }

    /// Merges `context` into the default channel's context store.
    pub fn with_context(&self, context: Context) -> ChannelFake {
        let channel = self.default_channel();
        channel.with_context(context);
        channel
    }

    /// Clears the default channel's context store.
    pub fn without_context(&self) -> ChannelFake {
        let channel = self.default_channel();
        channel.without_context();
        channel
    }

    /// Snapshot of the default channel's context store.
    pub fn current_context(&self) -> Context {
        self.default_channel().current_context()
    }

    /// Entries logged at `level` on the default channel.
    pub fn logged(&self, level: impl Into<Level>) -> Vec<LogEntry> {
        self.default_channel().logged(level)
    }

    /// Entries at `level` on the default channel satisfying `predicate`.
    pub fn logged_where(
        &self,
        level: impl Into<Level>,
        predicate: impl FnMut(&str, &Context, u64) -> bool,
    ) -> Vec<LogEntry> {
        self.default_channel().logged_where(level, predicate)
    }

    /// [`ChannelFake::assert_logged`] on the default channel.
    pub fn assert_logged(&self, level: impl Into<Level>) -> Result<(), AssertionError> {
        self.default_channel().assert_logged(level)
    }

    /// [`ChannelFake::assert_logged_where`] on the default channel.
    pub fn assert_logged_where(
        &self,
        level: impl Into<Level>,
        predicate: impl FnMut(&str, &Context, u64) -> bool,
    ) -> Result<(), AssertionError> {
        self.default_channel().assert_logged_where(level, predicate)
    }

    /// [`ChannelFake::assert_logged_times`] on the default channel.
    pub fn assert_logged_times(
        &self,
        level: impl Into<Level>,
        times: usize,
    ) -> Result<(), AssertionError> {
        self.default_channel().assert_logged_times(level, times)
    }

    /// [`ChannelFake::assert_logged_times_where`] on the default channel.
    pub fn assert_logged_times_where(
        &self,
        level: impl Into<Level>,
        times: usize,
        predicate: impl FnMut(&str, &Context, u64) -> bool,
    ) -> Result<(), AssertionError> {
        self.default_channel()
            .assert_logged_times_where(level, times, predicate)
    }

    /// [`ChannelFake::assert_not_logged`] on the default channel.
    pub fn assert_not_logged(&self, level: impl Into<Level>) -> Result<(), AssertionError> {
        self.default_channel().assert_not_logged(level)
    }

    /// [`ChannelFake::assert_not_logged_where`] on the default channel.
    pub fn assert_not_logged_where(
        &self,
        level: impl Into<Level>,
        predicate: impl FnMut(&str, &Context, u64) -> bool,
    ) -> Result<(), AssertionError> {
        self.default_channel().assert_not_logged_where(level, predicate)
    }

    /// [`ChannelFake::assert_nothing_logged`] on the default channel.
    pub fn assert_nothing_logged(&self) -> Result<(), AssertionError> {
        self.default_channel().assert_nothing_logged()
    }

    /// [`ChannelFake::assert_logged_message`] on the default channel.
    pub fn assert_logged_message(
        &self,
        level: impl Into<Level>,
        message: &str,
    ) -> Result<(), AssertionError> {
        self.default_channel().assert_logged_message(level, message)
    }

    /// [`ChannelFake::assert_forgotten`] on the default channel.
    pub fn assert_forgotten(&self) -> Result<(), AssertionError> {
        self.default_channel().assert_forgotten()
    }

    /// [`ChannelFake::assert_forgotten_times`] on the default channel.
    pub fn assert_forgotten_times(&self, times: u64) -> Result<(), AssertionError> {
        self.default_channel().assert_forgotten_times(times)
    }

    /// [`ChannelFake::assert_not_forgotten`] on the default channel.
    pub fn assert_not_forgotten(&self) -> Result<(), AssertionError> {
        self.default_channel().assert_not_forgotten()
    }

    /// [`ChannelFake::assert_current_context`] on the default channel.
    pub fn assert_current_context(&self, expected: &Context) -> Result<(), AssertionError> {
        self.default_channel().assert_current_context(expected)
    }

    // --- internals ---------------------------------------------------

    fn default_channel(&self) -> ChannelFake {
        self.channel(self.config.resolved_default())
    }

    fn resolve(&self, key: ChannelKey, kind: HandleKind) -> ChannelFake {
        let slot = self.inner.lock().registry.resolve(key);
        ChannelFake::new(Arc::clone(&self.inner), slot, kind)
    }

    fn forget(&self, key: ChannelKey) {
        let mut inner = self.inner.lock();
        let slot = inner.registry.resolve(key);
        inner.registry.get_mut(slot).forget();
    }
}
