// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ContactInfo, EmployeeId, MemberStatus, Role, TeamMember};
use time::Date;
use time::macros::date;

pub const START: Date = date!(2026 - 01 - 05);

pub fn create_test_member(
    member_id: i64,
    employee_id: &str,
    name: &str,
    role: Role,
    reporting_to: Option<&str>,
    status: MemberStatus,
    salary: u64,
) -> TeamMember {
    TeamMember {
        member_id,
        employee_id: EmployeeId::new(employee_id),
        name: String::from(name),
        role,
        contact: ContactInfo::default(),
        salary,
        assignment_start_date: START,
        assignment_end_date: None,
        status,
        reporting_to: reporting_to.map(EmployeeId::new),
        approved_by: None,
        approved_date: None,
        end_reason: None,
    }
}

/// Head, one operation manager, one centre manager, one mobilisation
/// manager and one mobiliser, all active.
pub fn create_full_chain() -> Vec<TeamMember> {
    vec![
        create_test_member(1, "H1", "Hana", Role::StateOrProjectHead, None, MemberStatus::Active, 200_000),
        create_test_member(2, "O1", "Omar", Role::OperationManager, Some("H1"), MemberStatus::Active, 120_000),
        create_test_member(3, "C1", "Chen", Role::CentreManager, Some("H1"), MemberStatus::Active, 110_000),
        create_test_member(4, "M1", "Mia", Role::MobilisationManager, Some("O1"), MemberStatus::Active, 60_000),
        create_test_member(5, "B1", "Bola", Role::Mobiliser, Some("M1"), MemberStatus::Active, 30_000),
    ]
}

/// Deterministic pseudo-random generator for roster-shaped property loops.
pub struct Lcg(u64);

impl Lcg {
    pub const fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_below(&mut self, bound: usize) -> usize {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        usize::try_from((self.0 >> 33) % u64::try_from(bound).unwrap()).unwrap()
    }
}

/// Generates a roster whose links all point to the tier directly above,
/// mixing statuses. Removed members never have live subordinates.
pub fn generate_roster(seed: u64, size: usize) -> Vec<TeamMember> {
    let mut rng: Lcg = Lcg::new(seed);
    let mut members: Vec<TeamMember> = vec![create_test_member(
        1,
        "ROOT",
        "Root",
        Role::StateOrProjectHead,
        None,
        MemberStatus::Active,
        100_000,
    )];

    for i in 0..size {
        let member_id: i64 = i64::try_from(i).unwrap() + 2;
        let role: Role = Role::ALL[1 + rng.next_below(Role::ALL.len() - 1)];
        let superiors: Vec<&TeamMember> = members
            .iter()
            .filter(|m| m.is_live() && crate::RoleHierarchyPolicy::permits(role, m.role))
            .collect();
        if superiors.is_empty() {
            continue;
        }
        let superior: EmployeeId = superiors[rng.next_below(superiors.len())].employee_id.clone();
        let status: MemberStatus = match rng.next_below(3) {
            0 => MemberStatus::PendingApproval,
            _ => MemberStatus::Active,
        };
        let salary: u64 = 1_000 * (1 + u64::try_from(rng.next_below(100)).unwrap());
        let mut member: TeamMember = create_test_member(
            member_id,
            &format!("E{member_id}"),
            &format!("Name {}", rng.next_below(20)),
            role,
            Some(superior.value()),
            status,
            salary,
        );
        // Leaves may end; anything with reports stays live.
        if role == Role::Mobiliser && rng.next_below(4) == 0 {
            member.status = MemberStatus::Removed;
        }
        members.push(member);
    }
    members
}
