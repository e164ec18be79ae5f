// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod aggregation;
mod error;
mod export;
mod hierarchy;
mod member_status;
mod role;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use aggregation::{
    OrgStructureRow, RoleSummary, RosterSummary, flatten_org_structure, summarize_roster,
    total_active_salary,
};
pub use export::{
    ExportOptions, NO_SUPERIOR, OrgExportRow, RosterExport, RosterExportRow, SalaryByRoleRow,
    build_export,
};
pub use hierarchy::{HierarchyNode, build_hierarchy, reporting_chain};
pub use member_status::MemberStatus;
pub use role::{Role, RoleHierarchyPolicy};

// Re-export public types
pub use error::DomainError;
pub use types::{
    AssignmentHistory, ContactInfo, EmployeeId, MemberDraft, SuccessorDraft, TeamMember,
    WorkOrderId,
};
pub use validation::{
    MAX_MONTHLY_SALARY, count_live_subordinates, validate_employee_id,
    validate_employee_id_unique, validate_member_fields, validate_no_live_subordinates,
    validate_reason, validate_reporting_link, validate_root_vacant,
};
