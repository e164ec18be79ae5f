// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::find_member;
use crate::state::{Roster, TransitionOutcome, TransitionResult};
use time::Date;
use wo_team_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use wo_team_domain::{
    AssignmentHistory, DomainError, EmployeeId, MemberDraft, MemberStatus, SuccessorDraft,
    TeamMember, validate_employee_id, validate_employee_id_unique, validate_member_fields,
    validate_no_live_subordinates, validate_reason, validate_reporting_link, validate_root_vacant,
};

/// End reason recorded when a rejection carries none.
const DEFAULT_REJECT_REASON: &str = "Rejected";

/// Applies a command to a roster, producing a new roster and audit event.
///
/// Every rule is checked against the input snapshot before anything is
/// built, so a failed command leaves no partial state behind. On success
/// the new roster carries `version + 1`.
///
/// # Arguments
///
/// * `roster` - The current roster (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
/// * `effective_date` - The business date of the change
///
/// # Errors
///
/// Returns `CoreError::DomainViolation` if the command violates a roster
/// rule: a bad reporting link, a disallowed status transition, a replace
/// target that is not active, or a duplicate employee id.
pub fn apply(
    roster: &Roster,
    command: Command,
    actor: Actor,
    cause: Cause,
    effective_date: Date,
) -> Result<TransitionResult, CoreError> {
    let name: &'static str = command.name();
    let (mut new_roster, details, outcome) = match command {
        Command::AddMember { draft } => add_member(roster, draft, effective_date)?,
        Command::ApproveMember { member_id } => {
            approve_member(roster, member_id, &actor.id, effective_date)?
        }
        Command::RejectMember { member_id, reason } => {
            reject_member(roster, member_id, reason, effective_date)?
        }
        Command::RemoveMember { member_id, reason } => {
            remove_member(roster, member_id, reason, effective_date)?
        }
        Command::ReplaceMember {
            member_id,
            successor,
            reason,
        } => replace_member(roster, member_id, successor, &reason, effective_date)?,
        Command::ReassignMember {
            member_id,
            reporting_to,
        } => reassign_member(roster, member_id, &reporting_to)?,
    };
    new_roster.version = roster.version + 1;

    let before: StateSnapshot = roster.to_snapshot();
    let after: StateSnapshot = new_roster.to_snapshot();
    let action: Action = Action::new(String::from(name), Some(details));
    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        action,
        before,
        after,
        roster.work_order.clone(),
    );

    Ok(TransitionResult {
        new_roster,
        audit_event,
        outcome,
    })
}

type Applied = (Roster, String, TransitionOutcome);

/// Resolves the employee id for a new record, generating one if absent.
fn resolve_employee_id(
    roster: &Roster,
    requested: Option<EmployeeId>,
) -> Result<EmployeeId, DomainError> {
    let employee_id: EmployeeId = match requested {
        Some(id) => id,
        None => roster.generate_employee_id(),
    };
    validate_employee_id(&employee_id)?;
    validate_employee_id_unique(&employee_id, &roster.members)?;
    Ok(employee_id)
}

/// An assignment cannot end before it starts.
fn end_date_for(member: &TeamMember, effective_date: Date) -> Date {
    effective_date.max(member.assignment_start_date)
}

fn normalize_reason(reason: Option<String>) -> Option<String> {
    reason
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
}

fn add_member(
    roster: &Roster,
    draft: MemberDraft,
    effective_date: Date,
) -> Result<Applied, DomainError> {
    validate_member_fields(&draft.name, draft.salary, &draft.contact)?;
    validate_reporting_link(draft.role, draft.reporting_to.as_ref(), &roster.members)?;
    if draft.role.is_top_tier() {
        validate_root_vacant(&roster.members)?;
    }
    let employee_id: EmployeeId = resolve_employee_id(roster, draft.employee_id)?;

    let member: TeamMember = TeamMember {
        member_id: roster.next_member_id(),
        employee_id,
        name: draft.name.trim().to_string(),
        role: draft.role,
        contact: draft.contact,
        salary: draft.salary,
        assignment_start_date: draft.assignment_start_date.unwrap_or(effective_date),
        assignment_end_date: None,
        status: MemberStatus::PendingApproval,
        reporting_to: draft.reporting_to,
        approved_by: None,
        approved_date: None,
        end_reason: None,
    };

    let details: String = format!(
        "Added {} '{}' ({}) as member {}",
        member.role.label(),
        member.name,
        member.employee_id,
        member.member_id
    );
    let mut new_roster: Roster = roster.clone();
    new_roster.members.push(member.clone());
    Ok((new_roster, details, TransitionOutcome::Member(member)))
}

fn approve_member(
    roster: &Roster,
    member_id: i64,
    approver: &str,
    effective_date: Date,
) -> Result<Applied, DomainError> {
    let current: &TeamMember = find_member(roster, member_id)?;
    current.status.validate_transition(MemberStatus::Active)?;

    let mut new_roster: Roster = roster.clone();
    let member: &mut TeamMember = new_roster
        .member_mut(member_id)
        .ok_or(DomainError::MemberNotFound { member_id })?;
    member.status = MemberStatus::Active;
    member.approved_by = Some(approver.to_string());
    member.approved_date = Some(effective_date);
    let updated: TeamMember = member.clone();

    let details: String = format!("Approved member {member_id} '{}'", updated.name);
    Ok((new_roster, details, TransitionOutcome::Member(updated)))
}

fn reject_member(
    roster: &Roster,
    member_id: i64,
    reason: Option<String>,
    effective_date: Date,
) -> Result<Applied, DomainError> {
    let current: &TeamMember = find_member(roster, member_id)?;
    current.status.validate_transition(MemberStatus::Removed)?;
    if current.status == MemberStatus::Active {
        return Err(DomainError::InvalidStatusTransition {
            from: current.status,
            to: MemberStatus::Removed,
            reason: String::from("only pending assignments can be rejected"),
        });
    }
    validate_no_live_subordinates(current, &roster.members)?;

    let reason: String =
        normalize_reason(reason).unwrap_or_else(|| String::from(DEFAULT_REJECT_REASON));
    let (new_roster, updated) = end_assignment(roster, current, Some(reason), effective_date)?;
    let details: String = format!("Rejected member {member_id} '{}'", updated.name);
    Ok((new_roster, details, TransitionOutcome::Member(updated)))
}

fn remove_member(
    roster: &Roster,
    member_id: i64,
    reason: Option<String>,
    effective_date: Date,
) -> Result<Applied, DomainError> {
    let current: &TeamMember = find_member(roster, member_id)?;
    current.status.validate_transition(MemberStatus::Removed)?;
    validate_no_live_subordinates(current, &roster.members)?;

    let (new_roster, updated) =
        end_assignment(roster, current, normalize_reason(reason), effective_date)?;
    let details: String = format!("Removed member {member_id} '{}'", updated.name);
    Ok((new_roster, details, TransitionOutcome::Member(updated)))
}

fn end_assignment(
    roster: &Roster,
    current: &TeamMember,
    reason: Option<String>,
    effective_date: Date,
) -> Result<(Roster, TeamMember), DomainError> {
    let end_date: Date = end_date_for(current, effective_date);
    let member_id: i64 = current.member_id;

    let mut new_roster: Roster = roster.clone();
    let member: &mut TeamMember = new_roster
        .member_mut(member_id)
        .ok_or(DomainError::MemberNotFound { member_id })?;
    member.status = MemberStatus::Removed;
    member.assignment_end_date = Some(end_date);
    member.end_reason = reason;
    let updated: TeamMember = member.clone();
    Ok((new_roster, updated))
}

fn replace_member(
    roster: &Roster,
    member_id: i64,
    successor: SuccessorDraft,
    reason: &str,
    effective_date: Date,
) -> Result<Applied, DomainError> {
    let current: &TeamMember = find_member(roster, member_id)?;
    current.status.validate_transition(MemberStatus::Removed)?;
    if current.status != MemberStatus::Active {
        return Err(DomainError::TargetNotActive {
            member_id,
            status: current.status,
        });
    }
    validate_reason(reason)?;
    validate_member_fields(&successor.name, successor.salary, &successor.contact)?;
    let employee_id: EmployeeId = resolve_employee_id(roster, successor.employee_id)?;
    let reason: String = reason.trim().to_string();

    let end_date: Date = end_date_for(current, effective_date);
    let created: TeamMember = TeamMember {
        member_id: roster.next_member_id(),
        employee_id: employee_id.clone(),
        name: successor.name.trim().to_string(),
        role: current.role,
        contact: successor.contact,
        salary: successor.salary,
        assignment_start_date: successor.assignment_start_date.unwrap_or(effective_date),
        assignment_end_date: None,
        status: MemberStatus::PendingApproval,
        reporting_to: current.reporting_to.clone(),
        approved_by: None,
        approved_date: None,
        end_reason: None,
    };
    let history: AssignmentHistory = AssignmentHistory {
        history_id: roster.next_history_id(),
        member_id,
        employee_id: current.employee_id.clone(),
        employee_name: current.name.clone(),
        role: current.role,
        start_date: current.assignment_start_date,
        end_date,
        reason: reason.clone(),
        replaced_by: Some(created.member_id),
    };

    let mut new_roster: Roster = roster.clone();
    let mut removed: Option<TeamMember> = None;
    for member in &mut new_roster.members {
        if member.member_id == member_id {
            member.status = MemberStatus::Removed;
            member.assignment_end_date = Some(end_date);
            member.end_reason = Some(reason.clone());
            removed = Some(member.clone());
        } else if member.is_live() && member.reports_to(&current.employee_id) {
            member.reporting_to = Some(employee_id.clone());
        }
    }
    let removed: TeamMember = removed.ok_or(DomainError::MemberNotFound { member_id })?;
    new_roster.members.push(created.clone());
    new_roster.history.push(history.clone());

    let details: String = format!(
        "Replaced member {member_id} '{}' with member {} '{}': {reason}",
        removed.name, created.member_id, created.name
    );
    Ok((
        new_roster,
        details,
        TransitionOutcome::Replaced {
            removed,
            created,
            history,
        },
    ))
}

fn reassign_member(
    roster: &Roster,
    member_id: i64,
    reporting_to: &EmployeeId,
) -> Result<Applied, DomainError> {
    let current: &TeamMember = find_member(roster, member_id)?;
    if !current.is_live() {
        return Err(DomainError::InvalidStatusTransition {
            from: current.status,
            to: current.status,
            reason: String::from("removed assignments cannot be reassigned"),
        });
    }
    validate_reporting_link(current.role, Some(reporting_to), &roster.members)?;

    let mut new_roster: Roster = roster.clone();
    let member: &mut TeamMember = new_roster
        .member_mut(member_id)
        .ok_or(DomainError::MemberNotFound { member_id })?;
    member.reporting_to = Some(reporting_to.clone());
    let updated: TeamMember = member.clone();

    let details: String = format!(
        "Member {member_id} '{}' now reports to {reporting_to}",
        updated.name
    );
    Ok((new_roster, details, TransitionOutcome::Member(updated)))
}
