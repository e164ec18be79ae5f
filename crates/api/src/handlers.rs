// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Verb handlers for the roster API.
//!
//! Write handlers run a read-apply-commit cycle against a `RosterStore`.
//! The transition is computed against a snapshot with no lock held; if
//! another writer commits first the whole cycle is retried, up to
//! `MAX_COMMIT_ATTEMPTS` times.

use crate::AuthenticatedActor;
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    AddMemberRequest, AuditTimelineResponse, HierarchyResponse, HistoryResponse, MemberResponse,
    OrgStructureResponse, ReassignMemberRequest, RejectMemberRequest, RemoveMemberRequest,
    ReplaceMemberRequest, ReplaceMemberResponse, RosterResponse, SummaryResponse,
    WorkOrdersResponse,
};
use time::Date;
use tracing::{debug, error, info, warn};
use wo_team::{Command, Roster, TransitionOutcome, TransitionResult, apply};
use wo_team_audit::{AuditEvent, Cause};
use wo_team_domain::{
    AssignmentHistory, ContactInfo, EmployeeId, ExportOptions, MemberDraft, MemberStatus, Role,
    RosterExport, SuccessorDraft, TeamMember, WorkOrderId, build_export, build_hierarchy,
    flatten_org_structure, summarize_roster,
};
use wo_team_persistence::{AuditRecord, PersistenceError, RosterStore};

/// How many times a write is attempted before reporting a conflict.
pub const MAX_COMMIT_ATTEMPTS: u32 = 3;

/// Parses a work order id from a request path.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the id is malformed.
pub fn parse_work_order(value: &str) -> Result<WorkOrderId, ApiError> {
    WorkOrderId::new(value).map_err(|e| translate_domain_error(&e))
}

/// A blank optional id is treated as absent, like blank contact details.
fn optional_employee_id(value: Option<&str>) -> Option<EmployeeId> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(EmployeeId::new)
}

fn persistence_failure(err: &PersistenceError) -> ApiError {
    error!(error = %err, "Persistence error");
    translate_persistence_error(err)
}

fn load<S: RosterStore + ?Sized>(store: &S, work_order: &WorkOrderId) -> Result<Roster, ApiError> {
    store
        .load_roster(work_order)
        .map_err(|e| persistence_failure(&e))
}

/// Runs `command` against the latest roster and commits the result.
///
/// A version conflict reloads the roster and re-applies the command, so
/// validation always sees the state the write lands on.
fn apply_and_commit<S: RosterStore + ?Sized>(
    store: &S,
    work_order: &WorkOrderId,
    command: &Command,
    actor: &AuthenticatedActor,
    cause: &Cause,
    effective_date: Date,
) -> Result<(TransitionResult, AuditEvent), ApiError> {
    for attempt in 1..=MAX_COMMIT_ATTEMPTS {
        let roster: Roster = load(store, work_order)?;
        let result: TransitionResult = apply(
            &roster,
            command.clone(),
            actor.to_audit_actor(),
            cause.clone(),
            effective_date,
        )
        .map_err(|e| {
            warn!(
                work_order = %work_order,
                command = command.name(),
                error = %e,
                "Rejected roster command"
            );
            translate_core_error(&e)
        })?;

        match store.commit(roster.version, &result) {
            Ok(event) => return Ok((result, event)),
            Err(PersistenceError::VersionConflict { actual, .. }) => {
                warn!(
                    work_order = %work_order,
                    command = command.name(),
                    attempt,
                    expected = roster.version,
                    actual,
                    "Roster changed during write; retrying"
                );
            }
            Err(e) => return Err(persistence_failure(&e)),
        }
    }

    Err(ApiError::Conflict {
        message: format!(
            "Roster for work order {work_order} kept changing; gave up after {MAX_COMMIT_ATTEMPTS} attempts"
        ),
    })
}

fn member_outcome(outcome: TransitionOutcome) -> Result<TeamMember, ApiError> {
    match outcome {
        TransitionOutcome::Member(member) => Ok(member),
        TransitionOutcome::Replaced { .. } => Err(ApiError::Internal {
            message: String::from("Unexpected replacement outcome"),
        }),
    }
}

fn write_member<S: RosterStore + ?Sized>(
    store: &S,
    work_order: &str,
    command: Command,
    actor: &AuthenticatedActor,
    cause: &Cause,
    effective_date: Date,
    message: impl FnOnce(&TeamMember) -> String,
) -> Result<MemberResponse, ApiError> {
    let work_order: WorkOrderId = parse_work_order(work_order)?;
    info!(
        work_order = %work_order,
        actor_id = %actor.id,
        command = command.name(),
        "Handling roster write"
    );

    let (result, event) =
        apply_and_commit(store, &work_order, &command, actor, cause, effective_date)?;
    let version: u64 = result.new_roster.version;
    let member: TeamMember = member_outcome(result.outcome)?;
    let event_id: i64 = event.event_id.unwrap_or_default();

    info!(
        work_order = %work_order,
        member_id = member.member_id,
        employee_id = %member.employee_id,
        status = %member.status,
        event_id,
        "Roster write committed"
    );

    Ok(MemberResponse {
        message: message(&member),
        work_order,
        member,
        version,
        event_id,
    })
}

/// Proposes a new assignment. The member starts awaiting approval.
///
/// # Errors
///
/// Returns an error if:
/// - The work order id or any field is malformed
/// - The role is unknown
/// - The reporting link, root vacancy or identity rules are violated
/// - The roster kept changing across every attempt
pub fn add_member<S: RosterStore + ?Sized>(
    store: &S,
    work_order: &str,
    request: AddMemberRequest,
    actor: &AuthenticatedActor,
    cause: &Cause,
    effective_date: Date,
) -> Result<MemberResponse, ApiError> {
    let role: Role = Role::parse(&request.role).map_err(|e| translate_domain_error(&e))?;
    let draft: MemberDraft = MemberDraft {
        employee_id: optional_employee_id(request.employee_id.as_deref()),
        name: request.name,
        role,
        contact: ContactInfo::new(request.email, request.phone),
        salary: request.salary,
        assignment_start_date: request.assignment_start_date,
        reporting_to: optional_employee_id(request.reporting_to.as_deref()),
    };

    write_member(
        store,
        work_order,
        Command::AddMember { draft },
        actor,
        cause,
        effective_date,
        |m| {
            format!(
                "Added {} ({}) as {}, awaiting approval",
                m.name,
                m.employee_id,
                m.role.label()
            )
        },
    )
}

/// Approves a pending assignment.
///
/// # Errors
///
/// Returns an error if the member does not exist or is not pending.
pub fn approve_member<S: RosterStore + ?Sized>(
    store: &S,
    work_order: &str,
    member_id: i64,
    actor: &AuthenticatedActor,
    cause: &Cause,
    effective_date: Date,
) -> Result<MemberResponse, ApiError> {
    write_member(
        store,
        work_order,
        Command::ApproveMember { member_id },
        actor,
        cause,
        effective_date,
        |m| format!("Approved {} ({})", m.name, m.employee_id),
    )
}

/// Rejects a pending assignment. No history entry is written.
///
/// # Errors
///
/// Returns an error if the member does not exist, is not pending, or still
/// has subordinates.
pub fn reject_member<S: RosterStore + ?Sized>(
    store: &S,
    work_order: &str,
    member_id: i64,
    request: RejectMemberRequest,
    actor: &AuthenticatedActor,
    cause: &Cause,
    effective_date: Date,
) -> Result<MemberResponse, ApiError> {
    write_member(
        store,
        work_order,
        Command::RejectMember {
            member_id,
            reason: request.reason,
        },
        actor,
        cause,
        effective_date,
        |m| format!("Rejected {} ({})", m.name, m.employee_id),
    )
}

/// Ends an assignment.
///
/// # Errors
///
/// Returns an error if the member does not exist, is already removed, or
/// still has subordinates.
pub fn remove_member<S: RosterStore + ?Sized>(
    store: &S,
    work_order: &str,
    member_id: i64,
    request: RemoveMemberRequest,
    actor: &AuthenticatedActor,
    cause: &Cause,
    effective_date: Date,
) -> Result<MemberResponse, ApiError> {
    write_member(
        store,
        work_order,
        Command::RemoveMember {
            member_id,
            reason: request.reason,
        },
        actor,
        cause,
        effective_date,
        |m| format!("Removed {} ({})", m.name, m.employee_id),
    )
}

/// Moves a member under a different superior.
///
/// # Errors
///
/// Returns an error if the member does not exist or is removed, or the new
/// reporting link is invalid.
pub fn reassign_member<S: RosterStore + ?Sized>(
    store: &S,
    work_order: &str,
    member_id: i64,
    request: &ReassignMemberRequest,
    actor: &AuthenticatedActor,
    cause: &Cause,
    effective_date: Date,
) -> Result<MemberResponse, ApiError> {
    write_member(
        store,
        work_order,
        Command::ReassignMember {
            member_id,
            reporting_to: EmployeeId::new(&request.reporting_to),
        },
        actor,
        cause,
        effective_date,
        |m| {
            format!(
                "{} ({}) now reports to {}",
                m.name,
                m.employee_id,
                m.reporting_to
                    .as_ref()
                    .map_or_else(String::new, ToString::to_string)
            )
        },
    )
}

/// Replaces an active member with a successor in one transition.
///
/// # Errors
///
/// Returns an error if:
/// - The member does not exist
/// - The member is removed or not active
/// - The reason is blank or a successor field is malformed
/// - The successor's employee id is already in use
/// - The roster kept changing across every attempt
pub fn replace_member<S: RosterStore + ?Sized>(
    store: &S,
    work_order: &str,
    member_id: i64,
    request: ReplaceMemberRequest,
    actor: &AuthenticatedActor,
    cause: &Cause,
    effective_date: Date,
) -> Result<ReplaceMemberResponse, ApiError> {
    let work_order: WorkOrderId = parse_work_order(work_order)?;
    info!(
        work_order = %work_order,
        actor_id = %actor.id,
        member_id,
        "Handling replace_member request"
    );

    let command: Command = Command::ReplaceMember {
        member_id,
        successor: SuccessorDraft {
            employee_id: optional_employee_id(request.employee_id.as_deref()),
            name: request.name,
            contact: ContactInfo::new(request.email, request.phone),
            salary: request.salary,
            assignment_start_date: request.assignment_start_date,
        },
        reason: request.reason,
    };

    let (result, event) =
        apply_and_commit(store, &work_order, &command, actor, cause, effective_date)?;
    let version: u64 = result.new_roster.version;
    let TransitionOutcome::Replaced {
        removed,
        created,
        history,
    } = result.outcome
    else {
        return Err(ApiError::Internal {
            message: String::from("Unexpected outcome for replacement"),
        });
    };
    let event_id: i64 = event.event_id.unwrap_or_default();

    info!(
        work_order = %work_order,
        removed_id = removed.member_id,
        created_id = created.member_id,
        history_id = history.history_id,
        event_id,
        "Replacement committed"
    );

    Ok(ReplaceMemberResponse {
        message: format!(
            "Replaced {} with {} as {}, awaiting approval",
            removed.name,
            created.name,
            created.role.label()
        ),
        work_order,
        removed,
        created,
        history,
        version,
        event_id,
    })
}

/// Lists assignment records, including removed ones unless a status
/// filter excludes them.
///
/// # Errors
///
/// Returns an error if the work order id is malformed, the status is
/// unknown, or the store fails.
pub fn get_roster<S: RosterStore + ?Sized>(
    store: &S,
    work_order: &str,
    status: Option<&str>,
) -> Result<RosterResponse, ApiError> {
    let work_order: WorkOrderId = parse_work_order(work_order)?;
    let status: Option<MemberStatus> = status
        .map(MemberStatus::parse)
        .transpose()
        .map_err(|e| translate_domain_error(&e))?;
    let roster: Roster = load(store, &work_order)?;

    let members: Vec<TeamMember> = match status {
        Some(status) => roster
            .members
            .into_iter()
            .filter(|m| m.status == status)
            .collect(),
        None => roster.members,
    };
    debug!(work_order = %work_order, members = members.len(), "Read roster");

    Ok(RosterResponse {
        work_order,
        version: roster.version,
        status,
        members,
    })
}

/// Builds the reporting tree.
///
/// # Errors
///
/// Returns an error if the work order id is malformed or the store fails.
pub fn get_hierarchy<S: RosterStore + ?Sized>(
    store: &S,
    work_order: &str,
) -> Result<HierarchyResponse, ApiError> {
    let work_order: WorkOrderId = parse_work_order(work_order)?;
    let roster: Roster = load(store, &work_order)?;
    let root = build_hierarchy(&roster.members);
    debug!(
        work_order = %work_order,
        members = root.member_count(),
        vacant_root = root.is_vacant(),
        "Built hierarchy"
    );
    Ok(HierarchyResponse {
        work_order,
        version: roster.version,
        root,
    })
}

/// Lists the replacement ledger, optionally for one role.
///
/// # Errors
///
/// Returns an error if the work order id is malformed, the role is
/// unknown, or the store fails.
pub fn get_history<S: RosterStore + ?Sized>(
    store: &S,
    work_order: &str,
    role: Option<&str>,
) -> Result<HistoryResponse, ApiError> {
    let work_order: WorkOrderId = parse_work_order(work_order)?;
    let role: Option<Role> = role
        .map(Role::parse)
        .transpose()
        .map_err(|e| translate_domain_error(&e))?;
    let roster: Roster = load(store, &work_order)?;

    let entries: Vec<AssignmentHistory> = match role {
        Some(role) => roster.history_for_role(role).into_iter().cloned().collect(),
        None => roster.history,
    };
    debug!(work_order = %work_order, entries = entries.len(), "Read history");

    Ok(HistoryResponse {
        work_order,
        role,
        entries,
    })
}

/// Computes headcount and salary figures.
///
/// # Errors
///
/// Returns an error if the work order id is malformed or the store fails.
pub fn get_summary<S: RosterStore + ?Sized>(
    store: &S,
    work_order: &str,
) -> Result<SummaryResponse, ApiError> {
    let work_order: WorkOrderId = parse_work_order(work_order)?;
    let roster: Roster = load(store, &work_order)?;
    let summary = summarize_roster(&roster.members);
    debug!(
        work_order = %work_order,
        active = summary.active_headcount,
        pending = summary.awaiting_approval_headcount,
        "Computed summary"
    );
    Ok(SummaryResponse {
        work_order,
        version: roster.version,
        summary,
    })
}

/// Flattens the live roster into org structure rows.
///
/// # Errors
///
/// Returns an error if the work order id is malformed or the store fails.
pub fn get_org_structure<S: RosterStore + ?Sized>(
    store: &S,
    work_order: &str,
) -> Result<OrgStructureResponse, ApiError> {
    let work_order: WorkOrderId = parse_work_order(work_order)?;
    let roster: Roster = load(store, &work_order)?;
    let rows = flatten_org_structure(&roster.members);
    debug!(work_order = %work_order, rows = rows.len(), "Flattened org structure");
    Ok(OrgStructureResponse { work_order, rows })
}

/// Builds the three-section roster export.
///
/// # Errors
///
/// Returns an error if the work order id is malformed or the store fails.
pub fn export_roster<S: RosterStore + ?Sized>(
    store: &S,
    work_order: &str,
    options: ExportOptions,
) -> Result<RosterExport, ApiError> {
    let work_order: WorkOrderId = parse_work_order(work_order)?;
    let roster: Roster = load(store, &work_order)?;
    debug!(
        work_order = %work_order,
        include_contact = options.include_contact,
        include_salary = options.include_salary,
        "Building export"
    );
    Ok(build_export(&work_order, &roster.members, options))
}

/// Lists committed audit records for a work order.
///
/// # Errors
///
/// Returns an error if the work order id is malformed or the store fails.
pub fn get_audit_timeline<S: RosterStore + ?Sized>(
    store: &S,
    work_order: &str,
) -> Result<AuditTimelineResponse, ApiError> {
    let work_order: WorkOrderId = parse_work_order(work_order)?;
    let events: Vec<AuditRecord> = store
        .audit_timeline(&work_order)
        .map_err(|e| persistence_failure(&e))?;
    debug!(work_order = %work_order, events = events.len(), "Read audit timeline");
    Ok(AuditTimelineResponse { work_order, events })
}

/// Retrieves one committed audit record.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if no event has this id.
pub fn get_audit_event<S: RosterStore + ?Sized>(
    store: &S,
    event_id: i64,
) -> Result<AuditRecord, ApiError> {
    store.get_audit_event(event_id).map_err(|e| {
        if matches!(e, PersistenceError::EventNotFound(_)) {
            warn!(event_id, "Audit event not found");
            translate_persistence_error(&e)
        } else {
            persistence_failure(&e)
        }
    })
}

/// Lists work orders that have committed changes.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn list_work_orders<S: RosterStore + ?Sized>(
    store: &S,
) -> Result<WorkOrdersResponse, ApiError> {
    let work_orders: Vec<WorkOrderId> =
        store.work_orders().map_err(|e| persistence_failure(&e))?;
    debug!(count = work_orders.len(), "Listed work orders");
    Ok(WorkOrdersResponse { work_orders })
}
