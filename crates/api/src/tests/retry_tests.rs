// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    TODAY, WO, add_request, create_live_store, create_test_actor, create_test_cause,
};
use crate::{ApiError, MAX_COMMIT_ATTEMPTS, add_member, get_roster};
use std::sync::atomic::{AtomicU32, Ordering};
use wo_team::{Command, Roster, TransitionResult, apply};
use wo_team_audit::{Actor, AuditEvent, Cause};
use wo_team_domain::{ContactInfo, EmployeeId, MemberDraft, Role, WorkOrderId};
use wo_team_persistence::{AuditRecord, Persistence, PersistenceError, RosterStore};

/// Store whose first `conflicts` commits fail as if another writer won.
struct ContendedStore {
    inner: Persistence,
    conflicts: AtomicU32,
    commit_calls: AtomicU32,
}

impl ContendedStore {
    fn new(conflicts: u32) -> Self {
        Self {
            inner: create_live_store(),
            conflicts: AtomicU32::new(conflicts),
            commit_calls: AtomicU32::new(0),
        }
    }
}

impl RosterStore for ContendedStore {
    fn load_roster(&self, work_order: &WorkOrderId) -> Result<Roster, PersistenceError> {
        self.inner.load_roster(work_order)
    }

    fn commit(
        &self,
        expected_version: u64,
        result: &TransitionResult,
    ) -> Result<AuditEvent, PersistenceError> {
        self.commit_calls.fetch_add(1, Ordering::SeqCst);
        let remaining = self.conflicts.load(Ordering::SeqCst);
        if remaining > 0 {
            self.conflicts.store(remaining - 1, Ordering::SeqCst);
            return Err(PersistenceError::VersionConflict {
                work_order: result.new_roster.work_order.to_string(),
                expected: expected_version,
                actual: expected_version + 1,
            });
        }
        self.inner.commit(expected_version, result)
    }

    fn audit_timeline(
        &self,
        work_order: &WorkOrderId,
    ) -> Result<Vec<AuditRecord>, PersistenceError> {
        self.inner.audit_timeline(work_order)
    }

    fn get_audit_event(&self, event_id: i64) -> Result<AuditRecord, PersistenceError> {
        self.inner.get_audit_event(event_id)
    }

    fn work_orders(&self) -> Result<Vec<WorkOrderId>, PersistenceError> {
        self.inner.work_orders()
    }
}

/// Store where a competing head is committed just before the first write lands.
struct RacingStore {
    inner: Persistence,
    raced: AtomicU32,
}

impl RosterStore for RacingStore {
    fn load_roster(&self, work_order: &WorkOrderId) -> Result<Roster, PersistenceError> {
        self.inner.load_roster(work_order)
    }

    fn commit(
        &self,
        expected_version: u64,
        result: &TransitionResult,
    ) -> Result<AuditEvent, PersistenceError> {
        if self.raced.fetch_add(1, Ordering::SeqCst) == 0 {
            let work_order = &result.new_roster.work_order;
            let current = self.inner.load_roster(work_order)?;
            let competing = apply(
                &current,
                Command::AddMember {
                    draft: MemberDraft {
                        employee_id: Some(EmployeeId::new("H9")),
                        name: String::from("Helga"),
                        role: Role::StateOrProjectHead,
                        contact: ContactInfo::default(),
                        salary: 150_000,
                        assignment_start_date: None,
                        reporting_to: None,
                    },
                },
                Actor::new(String::from("other-approver"), String::from("user")),
                Cause::new(String::from("race"), String::from("Competing write")),
                TODAY,
            )
            .unwrap();
            self.inner.commit(current.version, &competing)?;
        }
        self.inner.commit(expected_version, result)
    }

    fn audit_timeline(
        &self,
        work_order: &WorkOrderId,
    ) -> Result<Vec<AuditRecord>, PersistenceError> {
        self.inner.audit_timeline(work_order)
    }

    fn get_audit_event(&self, event_id: i64) -> Result<AuditRecord, PersistenceError> {
        self.inner.get_audit_event(event_id)
    }

    fn work_orders(&self) -> Result<Vec<WorkOrderId>, PersistenceError> {
        self.inner.work_orders()
    }
}

#[test]
fn test_write_succeeds_after_transient_conflicts() {
    let store = ContendedStore::new(MAX_COMMIT_ATTEMPTS - 1);

    let response = add_member(
        &store,
        WO,
        add_request("H1", "Hana", "state_or_project_head", None),
        &create_test_actor(),
        &create_test_cause(),
        TODAY,
    )
    .unwrap();

    assert_eq!(response.version, 1);
    assert_eq!(store.commit_calls.load(Ordering::SeqCst), MAX_COMMIT_ATTEMPTS);
}

#[test]
fn test_write_reports_conflict_when_retries_are_exhausted() {
    let store = ContendedStore::new(MAX_COMMIT_ATTEMPTS);

    let err = add_member(
        &store,
        WO,
        add_request("H1", "Hana", "state_or_project_head", None),
        &create_test_actor(),
        &create_test_cause(),
        TODAY,
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::Conflict { .. }));
    assert_eq!(store.commit_calls.load(Ordering::SeqCst), MAX_COMMIT_ATTEMPTS);
    assert!(get_roster(&store.inner, WO, None).unwrap().members.is_empty());
}

#[test]
fn test_retry_revalidates_against_the_winning_write() {
    let store = RacingStore {
        inner: create_live_store(),
        raced: AtomicU32::new(0),
    };

    let err = add_member(
        &store,
        WO,
        add_request("H1", "Hana", "state_or_project_head", None),
        &create_test_actor(),
        &create_test_cause(),
        TODAY,
    )
    .unwrap_err();

    assert!(
        matches!(err, ApiError::DomainRuleViolation { ref rule, .. } if rule == "root_occupied")
    );
    let roster = get_roster(&store.inner, WO, None).unwrap();
    assert_eq!(roster.members.len(), 1);
    assert_eq!(roster.members[0].employee_id, EmployeeId::new("H9"));
}
