// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// The roster moved on since it was read.
    VersionConflict {
        work_order: String,
        expected: u64,
        actual: u64,
    },
    /// The requested event was not found.
    EventNotFound(i64),
    /// A lock was poisoned by a panicking writer.
    LockPoisoned(String),
    /// The sample roster could not be built.
    FixtureError(String),
    /// An unrecognised data source name.
    UnknownDataSource(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VersionConflict {
                work_order,
                expected,
                actual,
            } => write!(
                f,
                "Roster for work order {work_order} changed concurrently (expected version {expected}, found {actual})"
            ),
            Self::EventNotFound(id) => write!(f, "Event not found: {id}"),
            Self::LockPoisoned(what) => write!(f, "Lock poisoned: {what}"),
            Self::FixtureError(msg) => write!(f, "Fixture error: {msg}"),
            Self::UnknownDataSource(name) => {
                write!(f, "Unknown data source '{name}': expected 'live' or 'fixture'")
            }
        }
    }
}

impl std::error::Error for PersistenceError {}

impl<T> From<std::sync::PoisonError<T>> for PersistenceError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        Self::LockPoisoned(err.to_string())
    }
}
