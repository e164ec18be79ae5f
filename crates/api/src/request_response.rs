// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use time::Date;
use wo_team_domain::{
    AssignmentHistory, HierarchyNode, MemberStatus, OrgStructureRow, Role, RosterSummary,
    TeamMember, WorkOrderId,
};
use wo_team_persistence::AuditRecord;

/// API request to propose a new assignment.
///
/// This DTO is distinct from domain types and represents the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddMemberRequest {
    /// Employee id. Generated when absent.
    pub employee_id: Option<String>,
    /// The member's name.
    pub name: String,
    /// The role, as its snake-case identifier.
    pub role: String,
    /// Email address.
    pub email: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Monthly salary.
    pub salary: u64,
    /// Start date. Defaults to the effective date.
    pub assignment_start_date: Option<Date>,
    /// Employee id of the superior.
    pub reporting_to: Option<String>,
}

/// API request to reject a pending assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RejectMemberRequest {
    /// Optional reason. Defaults to "Rejected".
    pub reason: Option<String>,
}

/// API request to end an assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoveMemberRequest {
    /// Optional reason recorded on the ended record.
    pub reason: Option<String>,
}

/// API request to replace an active member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceMemberRequest {
    /// Successor employee id. Generated when absent.
    pub employee_id: Option<String>,
    /// Successor name.
    pub name: String,
    /// Successor email address.
    pub email: Option<String>,
    /// Successor phone number.
    pub phone: Option<String>,
    /// Successor monthly salary.
    pub salary: u64,
    /// Successor start date. Defaults to the effective date.
    pub assignment_start_date: Option<Date>,
    /// Why the member is being replaced.
    pub reason: String,
}

/// API request to move a member under a different superior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReassignMemberRequest {
    /// Employee id of the new superior.
    pub reporting_to: String,
}

/// API response for a write that produced a single record.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MemberResponse {
    /// The work order.
    pub work_order: WorkOrderId,
    /// The record after the write.
    pub member: TeamMember,
    /// The roster version after the write.
    pub version: u64,
    /// The id of the committed audit event.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// API response for a successful replacement.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReplaceMemberResponse {
    /// The work order.
    pub work_order: WorkOrderId,
    /// The retired record.
    pub removed: TeamMember,
    /// The successor, awaiting approval.
    pub created: TeamMember,
    /// The ledger entry linking the two.
    pub history: AssignmentHistory,
    /// The roster version after the write.
    pub version: u64,
    /// The id of the committed audit event.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// API response listing every assignment record.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RosterResponse {
    pub work_order: WorkOrderId,
    pub version: u64,
    /// The status filter, if one was given.
    pub status: Option<MemberStatus>,
    /// Matching records. Without a filter this includes removed ones.
    pub members: Vec<TeamMember>,
}

/// API response carrying the reporting tree.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HierarchyResponse {
    pub work_order: WorkOrderId,
    pub version: u64,
    pub root: HierarchyNode,
}

/// API response listing replacement ledger entries.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HistoryResponse {
    pub work_order: WorkOrderId,
    /// The role filter, if one was given.
    pub role: Option<Role>,
    /// Entries in ledger order.
    pub entries: Vec<AssignmentHistory>,
}

/// API response carrying headcount and salary figures.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SummaryResponse {
    pub work_order: WorkOrderId,
    pub version: u64,
    pub summary: RosterSummary,
}

/// API response carrying the flattened org structure.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OrgStructureResponse {
    pub work_order: WorkOrderId,
    pub rows: Vec<OrgStructureRow>,
}

/// API response listing committed audit records.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AuditTimelineResponse {
    pub work_order: WorkOrderId,
    /// Records in commit order.
    pub events: Vec<AuditRecord>,
}

/// API response listing work orders with committed changes.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WorkOrdersResponse {
    /// Sorted work order ids.
    pub work_orders: Vec<WorkOrderId>,
}
