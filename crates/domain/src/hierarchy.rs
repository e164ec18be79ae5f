// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Projection of a flat roster into a reporting tree.
//!
//! The tree is derived on every request and never stored. Children are
//! looked up through an adjacency index keyed by `reporting_to`, built once
//! per call, so construction is linear in the roster size.
//!
//! Reporting links are validated on write to point only at the tier
//! directly above, so the graph reachable from the root is acyclic by
//! construction. Traversal starts at the root, which has no superior, so a
//! malformed cycle elsewhere in the input could never be reached anyway.

use crate::role::{Role, RoleHierarchyPolicy};
use crate::types::{EmployeeId, TeamMember};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// A slot in the org chart.
///
/// A node with `member: None` is vacant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyNode {
    /// Stable node identifier (`member-<id>` or `vacant-<role>`).
    pub id: String,
    /// The role of the slot.
    pub role: Role,
    /// The member occupying the slot, if any.
    pub member: Option<TeamMember>,
    /// Direct reports, ordered by role then name.
    pub children: Vec<Self>,
}

impl HierarchyNode {
    /// Creates a vacant placeholder node for `role`.
    #[must_use]
    pub fn vacant(role: Role) -> Self {
        Self {
            id: format!("vacant-{}", role.as_str()),
            role,
            member: None,
            children: Vec::new(),
        }
    }

    fn occupied(member: &TeamMember, children: Vec<Self>) -> Self {
        Self {
            id: format!("member-{}", member.member_id),
            role: member.role,
            member: Some(member.clone()),
            children,
        }
    }

    /// Returns true if no member occupies this slot.
    #[must_use]
    pub const fn is_vacant(&self) -> bool {
        self.member.is_none()
    }

    /// Counts occupied nodes in this subtree, including this one.
    #[must_use]
    pub fn member_count(&self) -> usize {
        usize::from(self.member.is_some())
            + self.children.iter().map(Self::member_count).sum::<usize>()
    }

    /// Returns the depth of this subtree (a leaf has depth 1).
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(Self::depth).max().unwrap_or(0)
    }

    /// Finds the node occupied by `employee_id` in this subtree.
    #[must_use]
    pub fn find(&self, employee_id: &EmployeeId) -> Option<&Self> {
        if self
            .member
            .as_ref()
            .is_some_and(|m| &m.employee_id == employee_id)
        {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(employee_id))
    }
}

/// Orders siblings by role sequence, then name, then assignment id.
fn sibling_order(a: &TeamMember, b: &TeamMember) -> Ordering {
    a.role
        .cmp(&b.role)
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.member_id.cmp(&b.member_id))
}

/// Builds the reporting tree for a roster.
///
/// Removed members are excluded; pending members are included. If no
/// non-removed top-tier member exists, a single vacant root is returned.
#[must_use]
pub fn build_hierarchy(members: &[TeamMember]) -> HierarchyNode {
    let live: Vec<&TeamMember> = members.iter().filter(|m| m.is_live()).collect();

    let Some(root) = live
        .iter()
        .copied()
        .find(|m| m.role == RoleHierarchyPolicy::TOP_TIER)
    else {
        return HierarchyNode::vacant(RoleHierarchyPolicy::TOP_TIER);
    };

    let mut children_of: HashMap<&EmployeeId, Vec<usize>> = HashMap::new();
    for (idx, member) in live.iter().enumerate() {
        if let Some(superior) = &member.reporting_to {
            children_of.entry(superior).or_default().push(idx);
        }
    }
    for siblings in children_of.values_mut() {
        siblings.sort_by(|&a, &b| sibling_order(live[a], live[b]));
    }

    build_node(root, &live, &children_of)
}

fn build_node(
    member: &TeamMember,
    live: &[&TeamMember],
    children_of: &HashMap<&EmployeeId, Vec<usize>>,
) -> HierarchyNode {
    let children: Vec<HierarchyNode> = children_of
        .get(&member.employee_id)
        .map_or_else(Vec::new, |siblings| {
            siblings
                .iter()
                .map(|&idx| build_node(live[idx], live, children_of))
                .collect()
        });
    HierarchyNode::occupied(member, children)
}

/// Follows `reporting_to` links upward from `employee_id`.
///
/// Returns the chain of employee ids from the starting member to the root,
/// inclusive, or `None` if the member is unknown, a link does not resolve
/// to a non-removed member, or the walk exceeds the number of tiers.
#[must_use]
pub fn reporting_chain(employee_id: &EmployeeId, members: &[TeamMember]) -> Option<Vec<EmployeeId>> {
    let by_id: HashMap<&EmployeeId, &TeamMember> = members
        .iter()
        .filter(|m| m.is_live())
        .map(|m| (&m.employee_id, m))
        .collect();

    let mut chain: Vec<EmployeeId> = Vec::new();
    let mut current: &TeamMember = by_id.get(employee_id).copied()?;
    loop {
        chain.push(current.employee_id.clone());
        if chain.len() > usize::from(Role::TIER_COUNT) {
            return None;
        }
        match &current.reporting_to {
            None => return Some(chain),
            Some(superior) => current = by_id.get(superior).copied()?,
        }
    }
}
