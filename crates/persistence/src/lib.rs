// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for work-order team rosters.
//!
//! Rosters are held in memory, one per work order, behind a read/write
//! lock. Writers use optimistic concurrency: a transition is computed
//! against a snapshot outside any lock, and `commit` only swaps it in if
//! the stored version is still the one the snapshot was read at.
//!
//! Every commit appends the transition's audit event to a single
//! append-only log, under the same write lock, so the log order matches
//! the commit order.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod data_source;
mod error;
mod fixtures;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use time::OffsetDateTime;
use tracing::{debug, info, warn};
use wo_team::{Roster, TransitionResult};
use wo_team_audit::AuditEvent;
use wo_team_domain::WorkOrderId;

pub use data_source::DataSource;
pub use error::PersistenceError;
pub use fixtures::{FIXTURE_DATE, sample_roster};

/// A committed audit event and when it was recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// The event, with `event_id` set.
    pub event: AuditEvent,
    /// Wall-clock commit time.
    pub recorded_at: OffsetDateTime,
}

#[derive(Debug, Default)]
struct Store {
    rosters: HashMap<WorkOrderId, Roster>,
    audit_log: Vec<AuditRecord>,
}

/// The operations the api layer needs from a roster store.
///
/// `Persistence` is the production implementation.
pub trait RosterStore {
    /// Returns a snapshot of the current roster for `work_order`.
    ///
    /// # Errors
    ///
    /// Returns an error if the roster cannot be read.
    fn load_roster(&self, work_order: &WorkOrderId) -> Result<Roster, PersistenceError>;

    /// Commits a transition computed against `expected_version`.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::VersionConflict` if the roster has moved on.
    fn commit(
        &self,
        expected_version: u64,
        result: &TransitionResult,
    ) -> Result<AuditEvent, PersistenceError>;

    /// Returns the audit records for `work_order`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be read.
    fn audit_timeline(&self, work_order: &WorkOrderId)
    -> Result<Vec<AuditRecord>, PersistenceError>;

    /// Retrieves an audit record by event id.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::EventNotFound` if no such event exists.
    fn get_audit_event(&self, event_id: i64) -> Result<AuditRecord, PersistenceError>;

    /// Lists work orders with at least one commit.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn work_orders(&self) -> Result<Vec<WorkOrderId>, PersistenceError>;
}

/// In-memory roster store and audit log.
///
/// Shared between request handlers behind an `Arc`. All methods take
/// `&self`; locking is internal and never held across calls.
#[derive(Debug)]
pub struct Persistence {
    data_source: DataSource,
    store: RwLock<Store>,
}

impl Persistence {
    /// Creates an empty store.
    #[must_use]
    pub fn new(data_source: DataSource) -> Self {
        Self {
            data_source,
            store: RwLock::new(Store::default()),
        }
    }

    /// Returns the configured data source.
    #[must_use]
    pub const fn data_source(&self) -> DataSource {
        self.data_source
    }

    /// The roster a work order has before its first commit.
    fn initial_roster(&self, work_order: &WorkOrderId) -> Result<Roster, PersistenceError> {
        match self.data_source {
            DataSource::Live => Ok(Roster::new(work_order.clone())),
            DataSource::Fixture => sample_roster(work_order),
        }
    }

    /// Returns a snapshot of the current roster for `work_order`.
    ///
    /// A work order with no commits yet yields its initial roster.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned or the sample roster cannot
    /// be built.
    pub fn load_roster(&self, work_order: &WorkOrderId) -> Result<Roster, PersistenceError> {
        let stored: Option<Roster> = {
            let store = self.store.read()?;
            store.rosters.get(work_order).cloned()
        };
        match stored {
            Some(roster) => Ok(roster),
            None => {
                debug!(
                    work_order = %work_order,
                    source = %self.data_source,
                    "No commits yet; using initial roster"
                );
                self.initial_roster(work_order)
            }
        }
    }

    /// Commits a transition computed against the roster at `expected_version`.
    ///
    /// # Returns
    ///
    /// The committed audit event, with its `event_id` assigned.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::VersionConflict` if another writer has
    /// committed since the snapshot was read. Nothing is written in that case.
    pub fn commit(
        &self,
        expected_version: u64,
        result: &TransitionResult,
    ) -> Result<AuditEvent, PersistenceError> {
        let work_order: &WorkOrderId = &result.new_roster.work_order;
        let known: bool = self.store.read()?.rosters.contains_key(work_order);
        let initial_version: u64 = if known {
            0
        } else {
            self.initial_roster(work_order)?.version
        };

        let mut store = self.store.write()?;
        let actual: u64 = store
            .rosters
            .get(work_order)
            .map_or(initial_version, |current| current.version);
        if actual != expected_version {
            warn!(
                work_order = %work_order,
                expected = expected_version,
                actual,
                "Rejected commit on stale roster"
            );
            return Err(PersistenceError::VersionConflict {
                work_order: work_order.to_string(),
                expected: expected_version,
                actual,
            });
        }

        let event_id: i64 = i64::try_from(store.audit_log.len())
            .unwrap_or(i64::MAX)
            .saturating_add(1);
        let event: AuditEvent = result.audit_event.with_event_id(event_id);
        store
            .rosters
            .insert(work_order.clone(), result.new_roster.clone());
        store.audit_log.push(AuditRecord {
            event: event.clone(),
            recorded_at: OffsetDateTime::now_utc(),
        });

        info!(
            work_order = %work_order,
            event_id,
            version = result.new_roster.version,
            action = %event.action.name,
            "Committed roster transition"
        );
        Ok(event)
    }

    /// Returns the audit records for `work_order`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn audit_timeline(
        &self,
        work_order: &WorkOrderId,
    ) -> Result<Vec<AuditRecord>, PersistenceError> {
        let store = self.store.read()?;
        Ok(store
            .audit_log
            .iter()
            .filter(|r| &r.event.work_order == work_order)
            .cloned()
            .collect())
    }

    /// Retrieves an audit record by event id.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::EventNotFound` if no such event exists.
    pub fn get_audit_event(&self, event_id: i64) -> Result<AuditRecord, PersistenceError> {
        let store = self.store.read()?;
        store
            .audit_log
            .iter()
            .find(|r| r.event.event_id == Some(event_id))
            .cloned()
            .ok_or(PersistenceError::EventNotFound(event_id))
    }

    /// Lists work orders with at least one commit, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn work_orders(&self) -> Result<Vec<WorkOrderId>, PersistenceError> {
        let store = self.store.read()?;
        let mut ids: Vec<WorkOrderId> = store.rosters.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}

impl RosterStore for Persistence {
    fn load_roster(&self, work_order: &WorkOrderId) -> Result<Roster, PersistenceError> {
        Self::load_roster(self, work_order)
    }

    fn commit(
        &self,
        expected_version: u64,
        result: &TransitionResult,
    ) -> Result<AuditEvent, PersistenceError> {
        Self::commit(self, expected_version, result)
    }

    fn audit_timeline(
        &self,
        work_order: &WorkOrderId,
    ) -> Result<Vec<AuditRecord>, PersistenceError> {
        Self::audit_timeline(self, work_order)
    }

    fn get_audit_event(&self, event_id: i64) -> Result<AuditRecord, PersistenceError> {
        Self::get_audit_event(self, event_id)
    }

    fn work_orders(&self) -> Result<Vec<WorkOrderId>, PersistenceError> {
        Self::work_orders(self)
    }
}
