//! In-memory capture engine: channel logs and the channel registry.

/// Per-channel append-only log, forget counter, and context store.
pub mod channel;
/// Channel identity keys and the key-to-log registry.
pub mod registry;
