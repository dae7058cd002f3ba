//! Assertion failure taxonomy.
//!
//! Failed assertions are ordinary values: every `assert_*` method returns
//! `Result<(), AssertionError>` so tests can propagate them with `?` or
//! match on the exact failure. Programmer misuse (calling `dump_all` or a
//! terminating dump from a non-root handle, asserting current context on a
//! stack) is a distinct, fatal taxonomy and panics with a fixed message
//! instead of producing one of these variants.

use thiserror::Error;

use crate::types::Level;

/// A failed assertion over a channel's captured entries.
///
/// The `Display` output of each variant is the literal failure message for
/// that assertion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssertionError {
    /// No captured entry matched an `assert_logged` query.
    #[error("An expected log with level [{level}] was not logged in the [{channel}] channel.")]
    NotLogged {
        /// Queried level.
        level: Level,
        /// Canonical channel name.
        channel: String,
    },

    /// The matching-entry count differed from the expected count.
    #[error(
        "A log with level [{level}] was logged [{actual}] times instead of an expected [{expected}] times in the [{channel}] channel."
    )]
    LoggedTimesMismatch {
        /// Queried level.
        level: Level,
        /// Expected number of matches.
        expected: usize,
        /// Actual number of matches.
        actual: usize,
        /// Canonical channel name.
        channel: String,
    },

    /// An `assert_not_logged` query found matching entries.
    #[error(
        "An unexpected log with level [{level}] was logged [{actual}] times in the [{channel}] channel."
    )]
    UnexpectedlyLogged {
        /// Queried level.
        level: Level,
        /// Number of matches found.
        actual: usize,
        /// Canonical channel name.
        channel: String,
    },

    /// `assert_nothing_logged` found entries in the channel.
    #[error("Found [{actual}] logs in the [{channel}] channel. Expected to find [0].")]
    SomethingLogged {
        /// Number of entries in the channel.
        actual: usize,
        /// Canonical channel name.
        channel: String,
    },

    /// The channel's forget counter differed from the expected value.
    #[error(
        "Expected the [{channel}] channel to be forgotten [{expected}] times. It was forgotten [{actual}] times."
    )]
    ForgottenTimesMismatch {
        /// Expected forget count.
        expected: u64,
        /// Actual forget count.
        actual: u64,
        /// Canonical channel name.
        channel: String,
    },

    /// The channel's current context store differed from the expected map.
    #[error(
        "Expected the current context of the [{channel}] channel to be [{expected}]. Found [{actual}] instead."
    )]
    CurrentContextMismatch {
        /// Expected context, JSON-encoded.
        expected: String,
        /// Actual context, JSON-encoded.
        actual: String,
        /// Canonical channel name.
        channel: String,
    },
}
