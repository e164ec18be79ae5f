// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::member_status::MemberStatus;
use crate::role::Role;
use crate::types::EmployeeId;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The reporting link is missing, points at a removed or unknown
    /// member, or violates the role hierarchy policy.
    InvalidReportingLink {
        /// The role of the member being linked.
        role: Role,
        /// The superior employee id that was requested, if any.
        reporting_to: Option<EmployeeId>,
        /// Why the link was rejected.
        reason: String,
    },
    /// The requested status change is not in the allowed transition set.
    InvalidStatusTransition {
        /// The current status.
        from: MemberStatus,
        /// The requested status.
        to: MemberStatus,
        /// Why the transition was rejected.
        reason: String,
    },
    /// A replacement was attempted on a member that is not active.
    TargetNotActive {
        /// The assignment id of the target.
        member_id: i64,
        /// The target's current status.
        status: MemberStatus,
    },
    /// The employee id is already held by a non-removed member.
    DuplicateIdentity {
        /// The colliding employee id.
        employee_id: EmployeeId,
    },
    /// A role string did not name a known role.
    UnknownRole(String),
    /// A status string did not name a known status.
    UnknownStatus(String),
    /// No assignment with the given id exists in the roster.
    MemberNotFound {
        /// The requested assignment id.
        member_id: i64,
    },
    /// The top tier is already held by a non-removed member.
    RootOccupied {
        /// The employee id of the current holder.
        holder: EmployeeId,
    },
    /// The member still has non-removed subordinates.
    SubordinatesAssigned {
        /// The assignment id of the member.
        member_id: i64,
        /// How many non-removed members report to it.
        count: usize,
    },
    /// Member name is empty or invalid.
    InvalidName(String),
    /// Salary is out of range.
    InvalidSalary {
        /// The rejected salary.
        salary: u64,
        /// The maximum allowed monthly salary.
        max: u64,
    },
    /// Email or phone is malformed.
    InvalidContact {
        /// The offending field.
        field: &'static str,
        /// Description of the problem.
        reason: String,
    },
    /// Employee id is empty or malformed.
    InvalidEmployeeId(String),
    /// A replacement or removal reason is empty or invalid.
    InvalidReason(String),
    /// Work order identifier is empty or invalid.
    InvalidWorkOrder(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidReportingLink {
                role,
                reporting_to,
                reason,
            } => match reporting_to {
                Some(superior) => write!(
                    f,
                    "Invalid reporting link for {} to '{}': {reason}",
                    role.label(),
                    superior.value()
                ),
                None => write!(f, "Invalid reporting link for {}: {reason}", role.label()),
            },
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Cannot transition from {from} to {to}: {reason}")
            }
            Self::TargetNotActive { member_id, status } => {
                write!(
                    f,
                    "Member {member_id} cannot be replaced: status is {status}, expected active"
                )
            }
            Self::DuplicateIdentity { employee_id } => {
                write!(
                    f,
                    "Employee id '{}' is already assigned in this work order",
                    employee_id.value()
                )
            }
            Self::UnknownRole(role) => write!(f, "Unknown role: '{role}'"),
            Self::UnknownStatus(status) => write!(f, "Unknown status: '{status}'"),
            Self::MemberNotFound { member_id } => {
                write!(f, "Member {member_id} not found")
            }
            Self::RootOccupied { holder } => {
                write!(
                    f,
                    "The {} position is already held by '{}'",
                    Role::StateOrProjectHead.label(),
                    holder.value()
                )
            }
            Self::SubordinatesAssigned { member_id, count } => {
                write!(
                    f,
                    "Member {member_id} still has {count} subordinate(s); reassign them first"
                )
            }
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidSalary { salary, max } => {
                write!(f, "Invalid salary {salary}: must be at most {max}")
            }
            Self::InvalidContact { field, reason } => {
                write!(f, "Invalid {field}: {reason}")
            }
            Self::InvalidEmployeeId(msg) => write!(f, "Invalid employee id: {msg}"),
            Self::InvalidReason(msg) => write!(f, "Invalid reason: {msg}"),
            Self::InvalidWorkOrder(msg) => write!(f, "Invalid work order: {msg}"),
        }
    }
}

impl std::error::Error for DomainError {}
