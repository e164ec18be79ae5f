// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use time::Date;
use time::macros::date;
use wo_team::{Command, Roster, TransitionResult, apply};
use wo_team_audit::{Actor, Cause};
use wo_team_domain::{ContactInfo, EmployeeId, MemberDraft, Role, WorkOrderId};

pub const TODAY: Date = date!(2026 - 03 - 02);

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("test-actor"), String::from("user"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("test-cause"), String::from("Test operation"))
}

pub fn work_order(id: &str) -> WorkOrderId {
    WorkOrderId::new(id).unwrap()
}

pub fn add_head(roster: &Roster, employee_id: &str) -> TransitionResult {
    apply(
        roster,
        Command::AddMember {
            draft: MemberDraft {
                employee_id: Some(EmployeeId::new(employee_id)),
                name: String::from("Hana"),
                role: Role::StateOrProjectHead,
                contact: ContactInfo::default(),
                salary: 100_000,
                assignment_start_date: None,
                reporting_to: None,
            },
        },
        create_test_actor(),
        create_test_cause(),
        TODAY,
    )
    .unwrap()
}
