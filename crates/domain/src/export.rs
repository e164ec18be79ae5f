// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Content schema for roster exports.
//!
//! An export has three sections: roster rows, salary by role with a grand
//! total, and the org structure. Any renderer works from these sections
//! alone.

use crate::aggregation::{flatten_org_structure, summarize_roster};
use crate::member_status::MemberStatus;
use crate::role::Role;
use crate::types::{EmployeeId, TeamMember, WorkOrderId};
use serde::{Deserialize, Serialize};
use time::Date;

/// Placeholder for an absent superior in the org structure section.
pub const NO_SUPERIOR: &str = "-";

/// Which optional columns an export carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Include email and phone columns.
    pub include_contact: bool,
    /// Include the salary column in roster rows.
    pub include_salary: bool,
}

/// Section 1: one row per assignment record, any status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterExportRow {
    pub employee_id: EmployeeId,
    pub name: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<u64>,
    pub status: MemberStatus,
    pub reporting_to: Option<EmployeeId>,
    pub start_date: Date,
}

/// Section 2: active headcount and salary for one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryByRoleRow {
    pub role: Role,
    pub count: usize,
    pub total_monthly_salary: u64,
}

/// Section 3: one row of the org structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgExportRow {
    pub level: u8,
    pub role: Role,
    /// `"name (employee_id)"`.
    pub member: String,
    /// The superior's name, or `NO_SUPERIOR`.
    pub reports_to: String,
}

/// A complete roster export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterExport {
    pub work_order: WorkOrderId,
    pub options: ExportOptions,
    pub roster: Vec<RosterExportRow>,
    pub salary_by_role: Vec<SalaryByRoleRow>,
    pub grand_total_monthly_salary: u64,
    pub org_structure: Vec<OrgExportRow>,
}

/// Builds the export sections from a roster snapshot.
#[must_use]
pub fn build_export(
    work_order: &WorkOrderId,
    members: &[TeamMember],
    options: ExportOptions,
) -> RosterExport {
    let roster: Vec<RosterExportRow> = members
        .iter()
        .map(|m| RosterExportRow {
            employee_id: m.employee_id.clone(),
            name: m.name.clone(),
            role: m.role,
            email: m.contact.email.clone().filter(|_| options.include_contact),
            phone: m.contact.phone.clone().filter(|_| options.include_contact),
            salary: options.include_salary.then_some(m.salary),
            status: m.status,
            reporting_to: m.reporting_to.clone(),
            start_date: m.assignment_start_date,
        })
        .collect();

    let summary = summarize_roster(members);
    let salary_by_role: Vec<SalaryByRoleRow> = summary
        .by_role
        .iter()
        .map(|s| SalaryByRoleRow {
            role: s.role,
            count: s.active_count,
            total_monthly_salary: s.active_monthly_salary,
        })
        .collect();

    let org_structure: Vec<OrgExportRow> = flatten_org_structure(members)
        .into_iter()
        .map(|row| OrgExportRow {
            level: row.level,
            role: row.role,
            member: format!("{} ({})", row.employee_name, row.employee_id),
            reports_to: row
                .reports_to_name
                .unwrap_or_else(|| String::from(NO_SUPERIOR)),
        })
        .collect();

    RosterExport {
        work_order: work_order.clone(),
        options,
        roster,
        salary_by_role,
        grand_total_monthly_salary: summary.total_active_monthly_salary,
        org_structure,
    }
}
