use std::sync::Arc;

use parking_lot::Mutex;

use crate::assertions;
use crate::dump;
use crate::entry::{Context, LogEntry};
use crate::error::AssertionError;
use crate::types::Level;

use super::{FakeInner, MSG_DD_ALL_FROM_CHANNEL, MSG_DD_FROM_CHANNEL, MSG_DUMP_ALL_FROM_CHANNEL, MSG_STACK_CONTEXT};

/// Whether a handle points at a plain channel or a composite stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HandleKind {
    Channel,
    Stack,
}

/// Handle to one channel (or stack) log owned by a
/// [`LogFake`](super::LogFake).
///
/// Handles are cheap clones of a slot reference into the fake's registry,
/// never copies of the log itself: every handle resolved for the same
/// canonical identity reads and writes the same underlying records.
/// Two handles compare equal exactly when they refer to the same slot of
/// the same fake instance.
#[derive(Clone)]
pub struct ChannelFake {
    inner: Arc<Mutex<FakeInner>>,
    slot: usize,
    kind: HandleKind,
}

impl PartialEq for ChannelFake {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner) && self.slot == other.slot
    }
}

impl std::fmt::Debug for ChannelFake {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelFake")
            .field("slot", &self.slot)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl ChannelFake {
    pub(crate) fn new(inner: Arc<Mutex<FakeInner>>, slot: usize, kind: HandleKind) -> Self {
        Self { inner, slot, kind }
    }

    // --- logging -----------------------------------------------------

    /// Logs at [`Level::Emergency`] with no call-site context.
    pub fn emergency(&self, message: impl ToString) {
        self.log(Level::Emergency, message, Context::new());
    }

    /// Logs at [`Level::Alert`] with no call-site context.
    pub fn alert(&self, message: impl ToString) {
        self.log(Level::Alert, message, Context::new());
    }

    /// Logs at [`Level::Critical`] with no call-site context.
    pub fn critical(&self, message: impl ToString) {
        self.log(Level::Critical, message, Context::new());
    }

    /// Logs at [`Level::Error`] with no call-site context.
    pub fn error(&self, message: impl ToString) {
        self.log(Level::Error, message, Context::new());
    }

    /// Logs at [`Level::Warning`] with no call-site context.
    pub fn warning(&self, message: impl ToString) {
        self.log(Level::Warning, message, Context::new());
    }

    /// Logs at [`Level::Notice`] with no call-site context.
    pub fn notice(&self, message: impl ToString) {
        self.log(Level::Notice, message, Context::new());
    }

    /// Logs at [`Level::Info`] with no call-site context.
    pub fn info(&self, message: impl ToString) {
        self.log(Level::Info, message, Context::new());
    }

    /// Logs at [`Level::Debug`] with no call-site context.
    pub fn debug(&self, message: impl ToString) {
        self.log(Level::Debug, message, Context::new());
    }

    /// Appends an entry at any level, fixed or custom.
    ///
    /// The message is coerced to a string, the channel's context store is
    /// merged with `context` (call-site keys win), and the entry is
    /// stamped with the canonical channel name and the current forget
    /// count. Never fails.
    pub fn log(&self, level: impl Into<Level>, message: impl ToString, context: Context) {
        let level = level.into();
        let message = message.to_string();
        let mut inner = self.inner.lock();
        inner.registry.get_mut(self.slot).append(level, message, context);
    }

    /// Alias for [`ChannelFake::log`].
    pub fn write(&self, level: impl Into<Level>, message: impl ToString, context: Context) {
        self.log(level, message, context);
    }

    // --- context store -----------------------------------------------

    /// Merges `context` into the channel's context store; chainable.
    pub fn with_context(&self, context: Context) -> &Self {
        self.inner.lock().registry.get_mut(self.slot).merge_context(context);
        self
    }

    /// Clears the channel's context store; chainable.
    pub fn without_context(&self) -> &Self {
        self.inner.lock().registry.get_mut(self.slot).clear_context();
        self
    }

    /// Snapshot of the channel's current context store.
    pub fn current_context(&self) -> Context {
        self.inner.lock().registry.get(self.slot).context().clone()
    }

    // --- inspection --------------------------------------------------

    /// Canonical name of the channel this handle points at.
    pub fn name(&self) -> String {
        self.inner.lock().registry.get(self.slot).name().to_string()
    }

    /// Snapshot of every entry captured by this channel, in append order.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.inner.lock().registry.get(self.slot).entries().to_vec()
    }

    /// Current value of the channel's forget counter.
    pub fn times_forgotten(&self) -> u64 {
        self.inner.lock().registry.get(self.slot).times_forgotten()
    }

    /// Entries logged at `level`, in append order.
    pub fn logged(&self, level: impl Into<Level>) -> Vec<LogEntry> {
        let level = level.into();
        let entries = self.entries();
        assertions::logged(&entries, &level).into_iter().cloned().collect()
    }

    /// Entries logged at `level` for which `predicate` returns `true`.
    ///
    /// The predicate receives the message, the merged context, and the
    /// forget count stamped at write time.
    pub fn logged_where(
        &self,
        level: impl Into<Level>,
        predicate: impl FnMut(&str, &Context, u64) -> bool,
    ) -> Vec<LogEntry> {
        let level = level.into();
        let entries = self.entries();
        assertions::logged_where(&entries, &level, predicate)
            .into_iter()
            .cloned()
            .collect()
    }

    // --- assertions --------------------------------------------------

    /// Asserts that at least one entry was logged at `level`.
    pub fn assert_logged(&self, level: impl Into<Level>) -> Result<(), AssertionError> {
        let level = level.into();
        assertions::assert_logged(&self.name(), &self.entries(), &level)
    }

    /// Asserts that at least one entry at `level` satisfies `predicate`.
    pub fn assert_logged_where(
        &self,
        level: impl Into<Level>,
        predicate: impl FnMut(&str, &Context, u64) -> bool,
    ) -> Result<(), AssertionError> {
        let level = level.into();
        assertions::assert_logged_where(&self.name(), &self.entries(), &level, predicate)
    }

    /// Asserts that exactly `times` entries were logged at `level`.
    pub fn assert_logged_times(
        &self,
        level: impl Into<Level>,
        times: usize,
    ) -> Result<(), AssertionError> {
        let level = level.into();
        assertions::assert_logged_times(&self.name(), &self.entries(), &level, times)
    }

    /// Asserts that exactly `times` entries at `level` satisfy
    /// `predicate`.
    pub fn assert_logged_times_where(
        &self,
        level: impl Into<Level>,
        times: usize,
        predicate: impl FnMut(&str, &Context, u64) -> bool,
    ) -> Result<(), AssertionError> {
        let level = level.into();
        assertions::assert_logged_times_where(&self.name(), &self.entries(), &level, times, predicate)
    }

    /// Asserts that no entry was logged at `level`.
    pub fn assert_not_logged(&self, level: impl Into<Level>) -> Result<(), AssertionError> {
        let level = level.into();
        assertions::assert_not_logged(&self.name(), &self.entries(), &level)
    }

    /// Asserts that no entry at `level` satisfies `predicate`.
    pub fn assert_not_logged_where(
        &self,
        level: impl Into<Level>,
        predicate: impl FnMut(&str, &Context, u64) -> bool,
    ) -> Result<(), AssertionError> {
        let level = level.into();
        assertions::assert_not_logged_where(&self.name(), &self.entries(), &level, predicate)
    }

    /// Asserts that the channel captured no entries at all.
    pub fn assert_nothing_logged(&self) -> Result<(), AssertionError> {
        assertions::assert_nothing_logged(&self.name(), &self.entries())
    }

    /// Asserts that an entry at `level` carries exactly `message`.
    pub fn assert_logged_message(
        &self,
        level: impl Into<Level>,
        message: &str,
    ) -> Result<(), AssertionError> {
        let level = level.into();
        assertions::assert_logged_message(&self.name(), &self.entries(), &level, message)
    }

    /// Asserts that the channel has been forgotten exactly once.
    pub fn assert_forgotten(&self) -> Result<(), AssertionError> {
        self.assert_forgotten_times(1)
    }

    /// Asserts that the channel has been forgotten exactly `times` times.
    pub fn assert_forgotten_times(&self, times: u64) -> Result<(), AssertionError> {
        assertions::assert_forgotten_times(&self.name(), times, self.times_forgotten())
    }

    /// Asserts that the channel has never been forgotten.
    pub fn assert_not_forgotten(&self) -> Result<(), AssertionError> {
        self.assert_forgotten_times(0)
    }

    /// Asserts that the channel's context store equals `expected`.
    ///
    /// # Panics
    ///
    /// On a stack handle: stack contexts are cleared every time the stack
    /// is resolved, so they can never accumulate state worth asserting on.
    /// Calling this on a stack is programmer misuse, not a failing
    /// assertion.
    pub fn assert_current_context(&self, expected: &Context) -> Result<(), AssertionError> {
        if self.kind == HandleKind::Stack {
            panic!("{MSG_STACK_CONTEXT}");
        }

        assertions::assert_current_context(&self.name(), expected, &self.current_context())
    }

    // --- dump --------------------------------------------------------

    /// Exports this channel's entries, optionally filtered by level,
    /// through the fake's dump handler; chainable.
    pub fn dump(&self, level: Option<Level>) -> &Self {
        let (handler, entries) = {
            let inner = self.inner.lock();
            (
                Arc::clone(&inner.dump_handler),
                inner.registry.get(self.slot).entries().to_vec(),
            )
        };
        handler(&dump::filter_level(entries, level.as_ref()));
        self
    }

    /// Cross-channel export is only meaningful at the registry root.
    ///
    /// # Panics
    ///
    /// Always; calling this from a channel or stack handle is programmer
    /// misuse.
    pub fn dump_all(&self, _level: Option<Level>) -> &Self {
        panic!("{MSG_DUMP_ALL_FROM_CHANNEL}");
    }

    /// Terminating dumps are only available at the registry root.
    ///
    /// # Panics
    ///
    /// Always; calling this from a channel or stack handle is programmer
    /// misuse.
    pub fn dd(&self, _level: Option<Level>) -> ! {
        panic!("{MSG_DD_FROM_CHANNEL}");
    }

    /// Terminating cross-channel dumps are only available at the registry
    /// root.
    ///
    /// # Panics
    ///
    /// Always; calling this from a channel or stack handle is programmer
    /// misuse.
    pub fn dd_all(&self, _level: Option<Level>) -> ! {
        panic!("{MSG_DD_ALL_FROM_CHANNEL}");
    }
}
