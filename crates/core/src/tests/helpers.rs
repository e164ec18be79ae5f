// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Command, Roster, TransitionOutcome, TransitionResult, apply};
use time::Date;
use time::macros::date;
use wo_team_audit::{Actor, Cause};
use wo_team_domain::{
    ContactInfo, EmployeeId, MemberDraft, Role, SuccessorDraft, TeamMember, WorkOrderId,
};

pub const TODAY: Date = date!(2026 - 03 - 02);

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("supervisor-1"), String::from("user"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Roster update"))
}

pub fn create_test_roster() -> Roster {
    Roster::new(WorkOrderId::new("WO-1").unwrap())
}

pub fn draft(employee_id: &str, name: &str, role: Role, reporting_to: Option<&str>) -> MemberDraft {
    MemberDraft {
        employee_id: Some(EmployeeId::new(employee_id)),
        name: String::from(name),
        role,
        contact: ContactInfo::default(),
        salary: 50_000,
        assignment_start_date: None,
        reporting_to: reporting_to.map(EmployeeId::new),
    }
}

pub fn successor(employee_id: &str, name: &str, salary: u64) -> SuccessorDraft {
    SuccessorDraft {
        employee_id: Some(EmployeeId::new(employee_id)),
        name: String::from(name),
        contact: ContactInfo::default(),
        salary,
        assignment_start_date: None,
    }
}

pub fn run(roster: &Roster, command: Command) -> TransitionResult {
    apply(
        roster,
        command,
        create_test_actor(),
        create_test_cause(),
        TODAY,
    )
    .unwrap()
}

pub fn member_of(result: &TransitionResult) -> TeamMember {
    match &result.outcome {
        TransitionOutcome::Member(member) => member.clone(),
        TransitionOutcome::Replaced { created, .. } => created.clone(),
    }
}

/// Adds and approves a member, returning the new roster and its id.
pub fn add_active(roster: &Roster, draft: MemberDraft) -> (Roster, i64) {
    let added: TransitionResult = run(roster, Command::AddMember { draft });
    let member_id: i64 = member_of(&added).member_id;
    let approved: TransitionResult = run(&added.new_roster, Command::ApproveMember { member_id });
    (approved.new_roster, member_id)
}

/// Active head H1, operation manager O1, mobilisation manager M1, mobiliser B1.
pub fn create_active_chain() -> Roster {
    let roster: Roster = create_test_roster();
    let (roster, _) = add_active(&roster, draft("H1", "Hana", Role::StateOrProjectHead, None));
    let (roster, _) = add_active(&roster, draft("O1", "Omar", Role::OperationManager, Some("H1")));
    let (roster, _) = add_active(&roster, draft("M1", "Mia", Role::MobilisationManager, Some("O1")));
    let (roster, _) = add_active(&roster, draft("B1", "Bola", Role::Mobiliser, Some("M1")));
    roster
}

pub fn member_id_of(roster: &Roster, employee_id: &str) -> i64 {
    let employee_id: EmployeeId = EmployeeId::new(employee_id);
    roster
        .members
        .iter()
        .find(|m| m.is_live() && m.employee_id == employee_id)
        .unwrap()
        .member_id
}
