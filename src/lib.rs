//! In-memory log-capture test double with channel, stack, and assertion
//! support.
//!
//! Callers write to named channels (or composite stacks of channels)
//! exactly as they would against a real logging facade; nothing is
//! persisted or transported anywhere. Test code then asserts on what was
//! captured: existence, exact counts, negation, and predicate-filtered
//! queries, each failing with a precise literal message.
//!
//! # Examples
//!
//! Default-channel logging and assertions:
//! ```
//! use logfake::LogFake;
//!
//! let log = LogFake::new();
//! log.assert_nothing_logged()?;
//!
//! log.info("user created");
//! log.assert_logged("info")?;
//! log.assert_logged_times("info", 1)?;
//! log.assert_not_logged("error")?;
//! # Ok::<(), logfake::AssertionError>(())
//! ```
//!
//! Stacks canonicalize order-independently and stay separate from plain
//! channels:
//! ```
//! use logfake::LogFake;
//!
//! let log = LogFake::new();
//! log.stack(&["c", "b", "a"], Some("name")).info("deploy finished");
//!
//! let stack = log.stack(&["a", "c", "b"], Some("name"));
//! stack.assert_logged("info")?;
//! assert_eq!(stack.name(), "Stack:name.a.b.c");
//! # Ok::<(), logfake::AssertionError>(())
//! ```
//!
//! Forgetting a channel stamps later entries without clearing history:
//! ```
//! use logfake::LogFake;
//!
//! let log = LogFake::new();
//! log.channel("jobs").info("first");
//! log.forget_channel("jobs");
//! log.channel("jobs").info("second");
//!
//! let counts: Vec<u64> = log
//!     .channel("jobs")
//!     .logged("info")
//!     .iter()
//!     .map(|entry| entry.times_forgotten)
//!     .collect();
//! assert_eq!(counts, [0, 1]);
//! ```
#![deny(missing_docs)]

/// Stateless assertion engine over captured entries.
pub mod assertions;
/// Configuration collaborator for default-channel resolution.
pub mod config;
/// Channel logs and the channel registry.
pub mod core;
/// Dump handler injection and level filtering.
pub mod dump;
/// Captured entry and context types.
pub mod entry;
/// Assertion failure taxonomy.
pub mod error;
/// Process-wide binding of a fake as the active logger.
pub mod facade;
/// Root fake and channel handles.
pub mod fake;
/// Severity levels.
pub mod types;

pub use config::FakeConfig;
pub use entry::{Context, LogEntry};
pub use error::AssertionError;
pub use fake::{ChannelFake, EventDispatcher, LogFake};
pub use types::Level;
