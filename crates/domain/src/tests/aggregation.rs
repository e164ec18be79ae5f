// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_full_chain, create_test_member, generate_roster};
use crate::{
    MemberStatus, OrgStructureRow, Role, RosterSummary, TeamMember, flatten_org_structure,
    summarize_roster, total_active_salary,
};

#[test]
fn test_summary_of_empty_roster_lists_every_role() {
    let summary: RosterSummary = summarize_roster(&[]);

    assert_eq!(summary.by_role.len(), Role::ALL.len());
    assert_eq!(summary.active_headcount, 0);
    assert_eq!(summary.total_active_monthly_salary, 0);
}

#[test]
fn test_summary_counts_active_salary_only() {
    let mut members: Vec<TeamMember> = create_full_chain();
    members.push(create_test_member(
        6,
        "B2",
        "Ben",
        Role::Mobiliser,
        Some("M1"),
        MemberStatus::PendingApproval,
        25_000,
    ));
    members.push(create_test_member(
        7,
        "B3",
        "Bo",
        Role::Mobiliser,
        Some("M1"),
        MemberStatus::Removed,
        99_000,
    ));

    let summary: RosterSummary = summarize_roster(&members);
    let mobilisers = summary.for_role(Role::Mobiliser).unwrap();

    assert_eq!(mobilisers.active_count, 1);
    assert_eq!(mobilisers.awaiting_approval_count, 1);
    assert_eq!(mobilisers.active_monthly_salary, 30_000);
    assert_eq!(summary.active_headcount, 5);
    assert_eq!(summary.awaiting_approval_headcount, 1);
    assert_eq!(summary.removed_count, 1);
    assert_eq!(summary.total_active_monthly_salary, 520_000);
}

#[test]
fn test_summary_totals_match_per_role_entries() {
    for seed in 0..30 {
        let members: Vec<TeamMember> = generate_roster(seed, 50);

        let summary: RosterSummary = summarize_roster(&members);

        let per_role: u64 = summary
            .by_role
            .iter()
            .map(|s| s.active_monthly_salary)
            .sum();
        assert_eq!(summary.total_active_monthly_salary, per_role);
        assert_eq!(
            summary.total_active_monthly_salary,
            total_active_salary(&members)
        );
        assert_eq!(
            summary.active_headcount + summary.awaiting_approval_headcount + summary.removed_count,
            members.len()
        );
    }
}

#[test]
fn test_approving_pending_member_moves_salary_into_totals() {
    let mut members: Vec<TeamMember> = create_full_chain();
    members.push(create_test_member(
        6,
        "B2",
        "Ben",
        Role::Mobiliser,
        Some("M1"),
        MemberStatus::PendingApproval,
        25_000,
    ));
    let before: u64 = total_active_salary(&members);

    members[5].status = MemberStatus::Active;

    assert_eq!(total_active_salary(&members), before + 25_000);
}

#[test]
fn test_org_structure_is_ordered_by_level_then_name() {
    let members: Vec<TeamMember> = create_full_chain();

    let rows: Vec<OrgStructureRow> = flatten_org_structure(&members);
    let names: Vec<&str> = rows.iter().map(|r| r.employee_name.as_str()).collect();

    assert_eq!(names, vec!["Hana", "Chen", "Omar", "Mia", "Bola"]);
    assert_eq!(rows[0].level, 1);
    assert_eq!(rows[0].reports_to_name, None);
    assert_eq!(rows[3].reports_to_name, Some(String::from("Omar")));
}

#[test]
fn test_org_structure_skips_removed_members() {
    let mut members: Vec<TeamMember> = create_full_chain();
    members[4].status = MemberStatus::Removed;

    let rows: Vec<OrgStructureRow> = flatten_org_structure(&members);

    assert_eq!(rows.len(), 4);
    assert!(rows.iter().all(|r| r.status != MemberStatus::Removed));
}
