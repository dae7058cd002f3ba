//! Process-wide binding of a fake as the active logger.
//!
//! The binding is an explicit factory plus teardown guard: the fake never
//! reaches into ambient state itself. Application code under test asks
//! [`current`] for "the logger" and transparently receives the bound fake.

use parking_lot::RwLock;

use crate::fake::LogFake;

static CURRENT: RwLock<Option<LogFake>> = RwLock::new(None);

/// Clears the process-wide binding when dropped.
#[must_use = "dropping the guard immediately unbinds the fake"]
pub struct BindGuard {
    _private: (),
}

impl Drop for BindGuard {
    fn drop(&mut self) {
        *CURRENT.write() = None;
    }
}

/// Creates a fresh fake and installs it as the process-wide logger.
///
/// Returns the fake together with the teardown guard; the binding lasts
/// until the guard is dropped.
pub fn bind() -> (LogFake, BindGuard) {
    let fake = LogFake::new();
    let guard = bind_existing(fake.clone());
    (fake, guard)
}

/// Installs an existing fake as the process-wide logger, replacing any
/// previous binding.
pub fn bind_existing(fake: LogFake) -> BindGuard {
    *CURRENT.write() = Some(fake);
    BindGuard { _private: () }
}

/// The currently bound fake, if any.
pub fn current() -> Option<LogFake> {
    CURRENT.read().clone()
}
