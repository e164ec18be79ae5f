// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    TODAY, create_active_chain, create_test_actor, create_test_cause, create_test_roster, draft,
    member_of, run,
};
use crate::{Command, CoreError, Roster, TransitionResult, apply};
use wo_team_domain::{DomainError, EmployeeId, MemberDraft, MemberStatus, Role, TeamMember};

fn try_add(roster: &Roster, draft: MemberDraft) -> Result<TransitionResult, CoreError> {
    apply(
        roster,
        Command::AddMember { draft },
        create_test_actor(),
        create_test_cause(),
        TODAY,
    )
}

#[test]
fn test_add_creates_pending_member() {
    let roster: Roster = create_test_roster();

    let result: TransitionResult = run(
        &roster,
        Command::AddMember {
            draft: draft("H1", "  Hana ", Role::StateOrProjectHead, None),
        },
    );
    let member: TeamMember = member_of(&result);

    assert_eq!(member.member_id, 1);
    assert_eq!(member.name, "Hana");
    assert_eq!(member.status, MemberStatus::PendingApproval);
    assert_eq!(member.assignment_start_date, TODAY);
    assert_eq!(member.assignment_end_date, None);
    assert_eq!(result.new_roster.members.len(), 1);
    assert_eq!(result.new_roster.version, 1);
}

#[test]
fn test_add_does_not_touch_input_roster() {
    let roster: Roster = create_test_roster();

    let _ = run(
        &roster,
        Command::AddMember {
            draft: draft("H1", "Hana", Role::StateOrProjectHead, None),
        },
    );

    assert!(roster.members.is_empty());
    assert_eq!(roster.version, 0);
}

#[test]
fn test_add_generates_employee_id_when_absent() {
    let roster: Roster = create_active_chain();
    let mut proposal: MemberDraft = draft("unused", "Ben", Role::Mobiliser, Some("M1"));
    proposal.employee_id = None;

    let result: TransitionResult = run(&roster, Command::AddMember { draft: proposal });

    assert_eq!(member_of(&result).employee_id, EmployeeId::new("EMP-00005"));
}

#[test]
fn test_add_rejects_second_root() {
    let roster: Roster = create_active_chain();

    let result = try_add(&roster, draft("H2", "Hugo", Role::StateOrProjectHead, None));

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::RootOccupied {
            holder: EmployeeId::new("H1"),
        }))
    );
}

#[test]
fn test_add_rejects_root_with_superior() {
    let roster: Roster = create_active_chain();

    let result = try_add(&roster, draft("H2", "Hugo", Role::StateOrProjectHead, Some("O1")));

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::InvalidReportingLink { .. }
        ))
    ));
}

#[test]
fn test_add_rejects_unknown_superior() {
    let roster: Roster = create_active_chain();

    let result = try_add(&roster, draft("B2", "Ben", Role::Mobiliser, Some("GHOST")));

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::InvalidReportingLink { .. }
        ))
    ));
}

#[test]
fn test_add_rejects_wrong_tier_superior() {
    let roster: Roster = create_active_chain();

    let result = try_add(&roster, draft("B2", "Ben", Role::Mobiliser, Some("O1")));

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::InvalidReportingLink { .. }
        ))
    ));
}

#[test]
fn test_add_rejects_duplicate_employee_id() {
    let roster: Roster = create_active_chain();

    let result = try_add(&roster, draft("b1", "Bola Again", Role::Mobiliser, Some("M1")));

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::DuplicateIdentity {
            employee_id: EmployeeId::new("B1"),
        }))
    );
}

#[test]
fn test_add_rejects_invalid_fields() {
    let roster: Roster = create_active_chain();
    let mut proposal: MemberDraft = draft("B2", "", Role::Mobiliser, Some("M1"));

    assert!(matches!(
        try_add(&roster, proposal.clone()),
        Err(CoreError::DomainViolation(DomainError::InvalidName(_)))
    ));

    proposal.name = String::from("Ben");
    proposal.employee_id = Some(EmployeeId::new("B 2"));
    assert!(matches!(
        try_add(&roster, proposal),
        Err(CoreError::DomainViolation(DomainError::InvalidEmployeeId(_)))
    ));
}

#[test]
fn test_add_under_pending_superior_is_allowed() {
    let roster: Roster = create_active_chain();
    let added: TransitionResult = run(
        &roster,
        Command::AddMember {
            draft: draft("C1", "Chen", Role::CentreManager, Some("H1")),
        },
    );

    let result: TransitionResult = run(
        &added.new_roster,
        Command::AddMember {
            draft: draft("M2", "Max", Role::MobilisationManager, Some("C1")),
        },
    );

    assert_eq!(member_of(&result).reporting_to, Some(EmployeeId::new("C1")));
}

#[test]
fn test_add_emits_audit_event() {
    let roster: Roster = create_test_roster();

    let result: TransitionResult = run(
        &roster,
        Command::AddMember {
            draft: draft("H1", "Hana", Role::StateOrProjectHead, None),
        },
    );

    assert_eq!(result.audit_event.action.name, "AddMember");
    assert_eq!(result.audit_event.actor, create_test_actor());
    assert_eq!(result.audit_event.work_order.value(), "WO-1");
    assert!(result.audit_event.before.data.contains("version=0"));
    assert!(result.audit_event.after.data.contains("pending=1"));
}

#[test]
fn test_failed_add_emits_nothing() {
    let roster: Roster = create_test_roster();

    let result = try_add(&roster, draft("O1", "Omar", Role::OperationManager, Some("H1")));

    assert!(result.is_err());
    assert!(roster.members.is_empty());
}
