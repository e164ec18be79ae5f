// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use wo_team_domain::{EmployeeId, MemberDraft, SuccessorDraft};

/// A command represents caller intent as data only.
///
/// Commands are the only way to request roster changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Propose a new assignment. It starts as `pending_approval`.
    AddMember {
        /// The proposed assignment.
        draft: MemberDraft,
    },
    /// Approve a pending assignment.
    ApproveMember {
        /// The assignment to approve.
        member_id: i64,
    },
    /// Reject a pending assignment. No history entry is written.
    RejectMember {
        /// The assignment to reject.
        member_id: i64,
        /// Optional reason, recorded as the end reason.
        reason: Option<String>,
    },
    /// End a pending or active assignment.
    RemoveMember {
        /// The assignment to end.
        member_id: i64,
        /// Optional reason, recorded as the end reason.
        reason: Option<String>,
    },
    /// Retire an active member and install a pending successor in the same
    /// position, as one transition.
    ReplaceMember {
        /// The active assignment being replaced.
        member_id: i64,
        /// The successor. Role and reporting line are inherited.
        successor: SuccessorDraft,
        /// Why the member is being replaced.
        reason: String,
    },
    /// Move a member under a different superior.
    ReassignMember {
        /// The assignment to move.
        member_id: i64,
        /// The new superior's employee id.
        reporting_to: EmployeeId,
    },
}

impl Command {
    /// Returns the operation name recorded in audit events.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AddMember { .. } => "AddMember",
            Self::ApproveMember { .. } => "ApproveMember",
            Self::RejectMember { .. } => "RejectMember",
            Self::RemoveMember { .. } => "RemoveMember",
            Self::ReplaceMember { .. } => "ReplaceMember",
            Self::ReassignMember { .. } => "ReassignMember",
        }
    }
}
