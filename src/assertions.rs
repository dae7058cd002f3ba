//! Stateless assertion engine over captured entries.
//!
//! Every function here is a pure read: it takes the channel's canonical
//! name and a slice of its captured entries and either returns the
//! matching entries or a [`AssertionError`] describing the failure. The
//! handle types in [`crate::fake`] delegate to these on snapshots of the
//! shared state, so user predicates never run under the registry lock.
//!
//! A predicate receives `(message, context, times_forgotten_at_write)` and
//! returns a strict `bool`; an entry matches a `(level, predicate)` query
//! when its level equals the queried level and the predicate, if present,
//! returns `true`.

use crate::entry::{Context, LogEntry};
use crate::error::AssertionError;
use crate::types::Level;

fn matching<'a>(
    entries: &'a [LogEntry],
    level: &Level,
    mut predicate: Option<&mut dyn FnMut(&str, &Context, u64) -> bool>,
) -> Vec<&'a LogEntry> {
    entries
        .iter()
        .filter(|entry| {
            entry.level == *level
                && predicate
                    .as_mut()
                    .is_none_or(|p| p(&entry.message, &entry.context, entry.times_forgotten))
        })
        .collect()
}

/// Entries logged at `level`, in append order.
pub fn logged<'a>(entries: &'a [LogEntry], level: &Level) -> Vec<&'a LogEntry> {
    matching(entries, level, None)
}

/// Entries logged at `level` for which `predicate` returns `true`.
pub fn logged_where<'a>(
    entries: &'a [LogEntry],
    level: &Level,
    mut predicate: impl FnMut(&str, &Context, u64) -> bool,
) -> Vec<&'a LogEntry> {
    matching(entries, level, Some(&mut predicate))
}

/// Fails unless at least one entry was logged at `level`.
pub fn assert_logged(
    channel: &str,
    entries: &[LogEntry],
    level: &Level,
) -> Result<(), AssertionError> {
    not_logged_failure(channel, level, logged(entries, level).len())
}

/// Fails unless at least one entry at `level` satisfies `predicate`.
pub fn assert_logged_where(
    channel: &str,
    entries: &[LogEntry],
    level: &Level,
    predicate: impl FnMut(&str, &Context, u64) -> bool,
) -> Result<(), AssertionError> {
    not_logged_failure(channel, level, logged_where(entries, level, predicate).len())
}

/// Fails unless exactly `times` entries were logged at `level`.
pub fn assert_logged_times(
    channel: &str,
    entries: &[LogEntry],
    level: &Level,
    times: usize,
) -> Result<(), AssertionError> {
    times_failure(channel, level, times, logged(entries, level).len())
}

/// Fails unless exactly `times` entries at `level` satisfy `predicate`.
pub fn assert_logged_times_where(
    channel: &str,
    entries: &[LogEntry],
    level: &Level,
    times: usize,
    predicate: impl FnMut(&str, &Context, u64) -> bool,
) -> Result<(), AssertionError> {
    times_failure(
        channel,
        level,
        times,
        logged_where(entries, level, predicate).len(),
    )
}

/// Fails if any entry was logged at `level`.
pub fn assert_not_logged(
    channel: &str,
    entries: &[LogEntry],
    level: &Level,
) -> Result<(), AssertionError> {
    unexpected_failure(channel, level, logged(entries, level).len())
}

/// Fails if any entry at `level` satisfies `predicate`.
pub fn assert_not_logged_where(
    channel: &str,
    entries: &[LogEntry],
    level: &Level,
    predicate: impl FnMut(&str, &Context, u64) -> bool,
) -> Result<(), AssertionError> {
    unexpected_failure(channel, level, logged_where(entries, level, predicate).len())
}

/// Fails if the channel captured any entries at all, regardless of level.
pub fn assert_nothing_logged(channel: &str, entries: &[LogEntry]) -> Result<(), AssertionError> {
    if entries.is_empty() {
        return Ok(());
    }

    Err(AssertionError::SomethingLogged {
        actual: entries.len(),
        channel: channel.to_string(),
    })
}

/// Fails unless an entry at `level` carries exactly `message`.
pub fn assert_logged_message(
    channel: &str,
    entries: &[LogEntry],
    level: &Level,
    message: &str,
) -> Result<(), AssertionError> {
    assert_logged_where(channel, entries, level, |logged_message, _, _| {
        logged_message == message
    })
}

/// Fails unless the channel's forget counter equals `expected`.
pub fn assert_forgotten_times(
    channel: &str,
    expected: u64,
    actual: u64,
) -> Result<(), AssertionError> {
    if actual == expected {
        return Ok(());
    }

    Err(AssertionError::ForgottenTimesMismatch {
        expected,
        actual,
        channel: channel.to_string(),
    })
}

/// Fails unless the channel's context store equals `expected`.
pub fn assert_current_context(
    channel: &str,
    expected: &Context,
    actual: &Context,
) -> Result<(), AssertionError> {
    if actual == expected {
        return Ok(());
    }

    Err(AssertionError::CurrentContextMismatch {
        expected: serde_json::Value::Object(expected.clone()).to_string(),
        actual: serde_json::Value::Object(actual.clone()).to_string(),
        channel: channel.to_string(),
    })
}

fn not_logged_failure(channel: &str, level: &Level, count: usize) -> Result<(), AssertionError> {
    if count > 0 {
        return Ok(());
    }

    Err(AssertionError::NotLogged {
        level: level.clone(),
        channel: channel.to_string(),
    })
}

fn times_failure(
    channel: &str,
    level: &Level,
    expected: usize,
    actual: usize,
) -> Result<(), AssertionError> {
    if actual == expected {
        return Ok(());
    }

    Err(AssertionError::LoggedTimesMismatch {
        level: level.clone(),
        expected,
        actual,
        channel: channel.to_string(),
    })
}

fn unexpected_failure(channel: &str, level: &Level, actual: usize) -> Result<(), AssertionError> {
    if actual == 0 {
        return Ok(());
    }

    Err(AssertionError::UnexpectedlyLogged {
        level: level.clone(),
        actual,
        channel: channel.to_string(),
    })
}
