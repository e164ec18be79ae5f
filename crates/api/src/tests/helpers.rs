// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{AddMemberRequest, AuthenticatedActor, add_member, approve_member};
use time::Date;
use time::macros::date;
use wo_team_audit::Cause;
use wo_team_persistence::{DataSource, Persistence};

pub const TODAY: Date = date!(2026 - 03 - 02);
pub const WO: &str = "WO-100";

pub fn create_test_actor() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("approver-1"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("test-cause"), String::from("Test operation"))
}

pub fn create_live_store() -> Persistence {
    Persistence::new(DataSource::Live)
}

pub fn add_request(
    employee_id: &str,
    name: &str,
    role: &str,
    reporting_to: Option<&str>,
) -> AddMemberRequest {
    AddMemberRequest {
        employee_id: Some(employee_id.to_string()),
        name: name.to_string(),
        role: role.to_string(),
        email: None,
        phone: None,
        salary: 50_000,
        assignment_start_date: None,
        reporting_to: reporting_to.map(String::from),
    }
}

/// Adds and approves a member, returning its member id.
pub fn add_active(
    store: &Persistence,
    employee_id: &str,
    name: &str,
    role: &str,
    reporting_to: Option<&str>,
) -> i64 {
    let added = add_member(
        store,
        WO,
        add_request(employee_id, name, role, reporting_to),
        &create_test_actor(),
        &create_test_cause(),
        TODAY,
    )
    .unwrap();
    approve_member(
        store,
        WO,
        added.member.member_id,
        &create_test_actor(),
        &create_test_cause(),
        TODAY,
    )
    .unwrap();
    added.member.member_id
}

/// Builds head H1, operation manager O1, mobilisation manager M1 and
/// mobiliser B1, all active. Returns the member ids in that order.
pub fn create_active_chain(store: &Persistence) -> [i64; 4] {
    let head = add_active(store, "H1", "Hana", "state_or_project_head", None);
    let ops = add_active(store, "O1", "Omar", "operation_manager", Some("H1"));
    let mob_mgr = add_active(store, "M1", "Mia", "mobilisation_manager", Some("O1"));
    let mobiliser = add_active(store, "B1", "Bola", "mobiliser", Some("M1"));
    [head, ops, mob_mgr, mobiliser]
}
