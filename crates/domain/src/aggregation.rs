// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Aggregate views over a roster snapshot.
//!
//! Salary figures count `active` members only. Pending assignments are
//! reported as a separate awaiting-approval headcount and never enter a
//! salary total.

use crate::member_status::MemberStatus;
use crate::role::Role;
use crate::types::{EmployeeId, TeamMember};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Headcount and salary for one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSummary {
    /// The role.
    pub role: Role,
    /// Number of active members.
    pub active_count: usize,
    /// Number of members awaiting approval.
    pub awaiting_approval_count: usize,
    /// Sum of monthly salary over active members.
    pub active_monthly_salary: u64,
}

/// Roster-wide headcount and salary figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterSummary {
    /// One entry per role, in the fixed role sequence.
    pub by_role: Vec<RoleSummary>,
    /// Number of active members.
    pub active_headcount: usize,
    /// Number of members awaiting approval.
    pub awaiting_approval_headcount: usize,
    /// Number of ended assignments retained for audit.
    pub removed_count: usize,
    /// Sum of monthly salary over active members.
    pub total_active_monthly_salary: u64,
}

impl RosterSummary {
    /// Returns the entry for `role`.
    #[must_use]
    pub fn for_role(&self, role: Role) -> Option<&RoleSummary> {
        self.by_role.iter().find(|s| s.role == role)
    }
}

/// Computes per-role and total headcount and salary figures.
#[must_use]
pub fn summarize_roster(members: &[TeamMember]) -> RosterSummary {
    let mut by_role: Vec<RoleSummary> = Role::ALL
        .iter()
        .map(|&role| RoleSummary {
            role,
            active_count: 0,
            awaiting_approval_count: 0,
            active_monthly_salary: 0,
        })
        .collect();
    let mut removed_count: usize = 0;

    for member in members {
        let Some(entry) = by_role.iter_mut().find(|s| s.role == member.role) else {
            continue;
        };
        match member.status {
            MemberStatus::Active => {
                entry.active_count += 1;
                entry.active_monthly_salary += member.salary;
            }
            MemberStatus::PendingApproval => entry.awaiting_approval_count += 1,
            MemberStatus::Removed => removed_count += 1,
        }
    }

    RosterSummary {
        active_headcount: by_role.iter().map(|s| s.active_count).sum(),
        awaiting_approval_headcount: by_role.iter().map(|s| s.awaiting_approval_count).sum(),
        total_active_monthly_salary: by_role.iter().map(|s| s.active_monthly_salary).sum(),
        removed_count,
        by_role,
    }
}

/// Sum of monthly salary over active members.
#[must_use]
pub fn total_active_salary(members: &[TeamMember]) -> u64 {
    members
        .iter()
        .filter(|m| m.status == MemberStatus::Active)
        .map(|m| m.salary)
        .sum()
}

/// One row of the flattened org structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgStructureRow {
    /// Tier level, 1 for the top tier.
    pub level: u8,
    /// The role held.
    pub role: Role,
    /// The member's employee id.
    pub employee_id: EmployeeId,
    /// The member's name.
    pub employee_name: String,
    /// The member's status (active or pending).
    pub status: MemberStatus,
    /// The superior's name, if any.
    pub reports_to_name: Option<String>,
}

/// Flattens the non-removed roster into org structure rows.
///
/// Rows are ordered by level, then name, then employee id.
#[must_use]
pub fn flatten_org_structure(members: &[TeamMember]) -> Vec<OrgStructureRow> {
    let names: HashMap<&EmployeeId, &str> = members
        .iter()
        .filter(|m| m.is_live())
        .map(|m| (&m.employee_id, m.name.as_str()))
        .collect();

    let mut rows: Vec<OrgStructureRow> = members
        .iter()
        .filter(|m| m.is_live())
        .map(|m| OrgStructureRow {
            level: m.role.level(),
            role: m.role,
            employee_id: m.employee_id.clone(),
            employee_name: m.name.clone(),
            status: m.status,
            reports_to_name: m
                .reporting_to
                .as_ref()
                .and_then(|superior| names.get(superior))
                .map(|name| (*name).to_string()),
        })
        .collect();

    rows.sort_by(|a, b| {
        a.level
            .cmp(&b.level)
            .then_with(|| a.employee_name.cmp(&b.employee_name))
            .then_with(|| a.employee_id.cmp(&b.employee_id))
    });
    rows
}
