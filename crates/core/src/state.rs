// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use wo_team_audit::{AuditEvent, StateSnapshot};
use wo_team_domain::{
    AssignmentHistory, EmployeeId, MemberStatus, Role, TeamMember, WorkOrderId,
};

/// The complete roster of one work order.
///
/// A roster is an immutable snapshot. Transitions produce a new roster with
/// `version` incremented; the previous snapshot is never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    /// The work order this roster belongs to.
    pub work_order: WorkOrderId,
    /// Every assignment record, in creation order, all statuses included.
    pub members: Vec<TeamMember>,
    /// The replacement ledger, in append order.
    pub history: Vec<AssignmentHistory>,
    /// Incremented on every successful transition.
    pub version: u64,
}

impl Roster {
    /// Creates an empty roster at version 0.
    #[must_use]
    pub const fn new(work_order: WorkOrderId) -> Self {
        Self {
            work_order,
            members: Vec::new(),
            history: Vec::new(),
            version: 0,
        }
    }

    /// Returns the record with the given assignment id.
    #[must_use]
    pub fn member(&self, member_id: i64) -> Option<&TeamMember> {
        self.members.iter().find(|m| m.member_id == member_id)
    }

    /// Returns the ledger entries for one position, oldest first.
    #[must_use]
    pub fn history_for_role(&self, role: Role) -> Vec<&AssignmentHistory> {
        self.history.iter().filter(|h| h.role == role).collect()
    }

    fn count_with_status(&self, status: MemberStatus) -> usize {
        self.members.iter().filter(|m| m.status == status).count()
    }

    /// Converts the roster to a snapshot for audit purposes.
    #[must_use]
    pub fn to_snapshot(&self) -> StateSnapshot {
        StateSnapshot::new(format!(
            "work_order={},version={},active={},pending={},removed={},history={}",
            self.work_order,
            self.version,
            self.count_with_status(MemberStatus::Active),
            self.count_with_status(MemberStatus::PendingApproval),
            self.count_with_status(MemberStatus::Removed),
            self.history.len()
        ))
    }

    pub(crate) fn next_member_id(&self) -> i64 {
        self.members.iter().map(|m| m.member_id).max().unwrap_or(0) + 1
    }

    pub(crate) fn next_history_id(&self) -> i64 {
        self.history.iter().map(|h| h.history_id).max().unwrap_or(0) + 1
    }

    /// Picks the lowest unused `EMP-nnnnn` id at or above the roster size.
    ///
    /// Ids held by removed records are skipped too.
    pub(crate) fn generate_employee_id(&self) -> EmployeeId {
        let mut sequence: u64 = u64::try_from(self.members.len())
            .unwrap_or(u64::MAX)
            .saturating_add(1);
        loop {
            let candidate: EmployeeId = EmployeeId::generated(sequence);
            if !self.members.iter().any(|m| m.employee_id == candidate) {
                return candidate;
            }
            sequence = sequence.saturating_add(1);
        }
    }

    pub(crate) fn member_mut(&mut self, member_id: i64) -> Option<&mut TeamMember> {
        self.members.iter_mut().find(|m| m.member_id == member_id)
    }
}

/// What a transition produced, for returning to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The added or updated record.
    Member(TeamMember),
    /// Both halves of a replacement and the ledger entry linking them.
    Replaced {
        /// The retired record, now `removed`.
        removed: TeamMember,
        /// The successor, `pending_approval`.
        created: TeamMember,
        /// The ledger entry written.
        history: AssignmentHistory,
    },
}

/// The result of a successful roster transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The roster after the transition.
    pub new_roster: Roster,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
    /// The records the caller asked about.
    pub outcome: TransitionOutcome,
}
