// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Built-in sample roster for the `Fixture` data source.
//!
//! The sample is produced by running ordinary commands through
//! `wo_team::apply`, so it satisfies every roster rule by construction.

use crate::error::PersistenceError;
use time::Date;
use time::macros::date;
use wo_team::{Command, Roster, apply};
use wo_team_audit::{Actor, Cause};
use wo_team_domain::{
    ContactInfo, EmployeeId, MemberDraft, Role, SuccessorDraft, WorkOrderId,
};

/// Business date used for every fixture transition.
pub const FIXTURE_DATE: Date = date!(2026 - 01 - 05);

struct SeedMember {
    employee_id: &'static str,
    name: &'static str,
    role: Role,
    reporting_to: Option<&'static str>,
    email: Option<&'static str>,
    phone: Option<&'static str>,
    salary: u64,
    approve: bool,
}

const SEED_MEMBERS: &[SeedMember] = &[
    SeedMember {
        employee_id: "EMP-10001",
        name: "Rajesh Kumar",
        role: Role::StateOrProjectHead,
        reporting_to: None,
        email: Some("rajesh.kumar@example.org"),
        phone: Some("+91 98450 10001"),
        salary: 180_000,
        approve: true,
    },
    SeedMember {
        employee_id: "EMP-10002",
        name: "Priya Sharma",
        role: Role::OperationManager,
        reporting_to: Some("EMP-10001"),
        email: Some("priya.sharma@example.org"),
        phone: Some("+91 98450 10002"),
        salary: 95_000,
        approve: true,
    },
    SeedMember {
        employee_id: "EMP-10003",
        name: "Arun Nair",
        role: Role::CentreManager,
        reporting_to: Some("EMP-10001"),
        email: Some("arun.nair@example.org"),
        phone: None,
        salary: 90_000,
        approve: true,
    },
    SeedMember {
        employee_id: "EMP-10004",
        name: "Meena Iyer",
        role: Role::MobilisationManager,
        reporting_to: Some("EMP-10002"),
        email: None,
        phone: Some("+91 98450 10004"),
        salary: 55_000,
        approve: true,
    },
    SeedMember {
        employee_id: "EMP-10005",
        name: "Suresh Patel",
        role: Role::MobilisationManager,
        reporting_to: Some("EMP-10003"),
        email: None,
        phone: None,
        salary: 52_000,
        approve: true,
    },
    SeedMember {
        employee_id: "EMP-10006",
        name: "Lakshmi Rao",
        role: Role::Mobiliser,
        reporting_to: Some("EMP-10004"),
        email: None,
        phone: Some("+91 98450 10006"),
        salary: 28_000,
        approve: true,
    },
    SeedMember {
        employee_id: "EMP-10007",
        name: "Vikram Singh",
        role: Role::Mobiliser,
        reporting_to: Some("EMP-10004"),
        email: None,
        phone: None,
        salary: 27_000,
        approve: true,
    },
    SeedMember {
        employee_id: "EMP-10008",
        name: "Anita Desai",
        role: Role::Mobiliser,
        reporting_to: Some("EMP-10005"),
        email: None,
        phone: None,
        salary: 26_000,
        approve: false,
    },
];

fn fixture_actor() -> Actor {
    Actor::new(String::from("fixture"), String::from("system"))
}

fn fixture_cause() -> Cause {
    Cause::new(String::from("fixture"), String::from("Sample roster"))
}

fn step(roster: &Roster, command: Command) -> Result<Roster, PersistenceError> {
    apply(
        roster,
        command,
        fixture_actor(),
        fixture_cause(),
        FIXTURE_DATE,
    )
    .map(|result| result.new_roster)
    .map_err(|err| PersistenceError::FixtureError(err.to_string()))
}

fn live_member_id(roster: &Roster, employee_id: &str) -> Result<i64, PersistenceError> {
    let employee_id: EmployeeId = EmployeeId::new(employee_id);
    roster
        .members
        .iter()
        .find(|m| m.is_live() && m.employee_id == employee_id)
        .map(|m| m.member_id)
        .ok_or_else(|| PersistenceError::FixtureError(format!("{employee_id} missing")))
}

/// Builds the sample roster for `work_order`.
///
/// The sample holds one of every role, a pending mobiliser, and one
/// completed replacement so the history ledger is not empty.
///
/// # Errors
///
/// Returns `PersistenceError::FixtureError` if a seed violates a roster rule.
pub fn sample_roster(work_order: &WorkOrderId) -> Result<Roster, PersistenceError> {
    let mut roster: Roster = Roster::new(work_order.clone());

    for seed in SEED_MEMBERS {
        let draft: MemberDraft = MemberDraft {
            employee_id: Some(EmployeeId::new(seed.employee_id)),
            name: String::from(seed.name),
            role: seed.role,
            contact: ContactInfo::new(
                seed.email.map(String::from),
                seed.phone.map(String::from),
            ),
            salary: seed.salary,
            assignment_start_date: Some(FIXTURE_DATE),
            reporting_to: seed.reporting_to.map(EmployeeId::new),
        };
        roster = step(&roster, Command::AddMember { draft })?;
        if seed.approve {
            let member_id: i64 = live_member_id(&roster, seed.employee_id)?;
            roster = step(&roster, Command::ApproveMember { member_id })?;
        }
    }

    let member_id: i64 = live_member_id(&roster, "EMP-10007")?;
    roster = step(
        &roster,
        Command::ReplaceMember {
            member_id,
            successor: SuccessorDraft {
                employee_id: Some(EmployeeId::new("EMP-10009")),
                name: String::from("Kavya Menon"),
                contact: ContactInfo::default(),
                salary: 27_500,
                assignment_start_date: Some(FIXTURE_DATE),
            },
            reason: String::from("Transferred to another district"),
        },
    )?;
    let member_id: i64 = live_member_id(&roster, "EMP-10009")?;
    roster = step(&roster, Command::ApproveMember { member_id })?;

    Ok(roster)
}
