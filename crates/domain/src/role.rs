// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Role tiers and the reporting-relationship policy.
//!
//! The role set is closed. Each role sits on one tier of a fixed chain and
//! may report only to a role on the tier directly above it. The top tier
//! reports to nobody.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

/// A role a team member can hold within a work order.
///
/// Variant order is the fixed role sequence used for display and export.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Head of the state or project. The single root of a work order team.
    StateOrProjectHead,
    /// Operation manager, reporting to the head.
    OperationManager,
    /// Centre manager, reporting to the head. Same tier as operation manager.
    CentreManager,
    /// Mobilisation manager, reporting to an operation or centre manager.
    MobilisationManager,
    /// Field mobiliser, reporting to a mobilisation manager.
    Mobiliser,
}

impl Role {
    /// Every role in the fixed role sequence.
    pub const ALL: [Self; 5] = [
        Self::StateOrProjectHead,
        Self::OperationManager,
        Self::CentreManager,
        Self::MobilisationManager,
        Self::Mobiliser,
    ];

    /// Number of distinct tiers in the reporting chain.
    pub const TIER_COUNT: u8 = 4;

    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::StateOrProjectHead => "state_or_project_head",
            Self::OperationManager => "operation_manager",
            Self::CentreManager => "centre_manager",
            Self::MobilisationManager => "mobilisation_manager",
            Self::Mobiliser => "mobiliser",
        }
    }

    /// Returns the human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::StateOrProjectHead => "State/Project Head",
            Self::OperationManager => "Operation Manager",
            Self::CentreManager => "Centre Manager",
            Self::MobilisationManager => "Mobilisation Manager",
            Self::Mobiliser => "Mobiliser",
        }
    }

    /// Returns the tier level, starting at 1 for the top tier.
    ///
    /// Operation and centre managers share level 2.
    #[must_use]
    pub const fn level(&self) -> u8 {
        match self {
            Self::StateOrProjectHead => 1,
            Self::OperationManager | Self::CentreManager => 2,
            Self::MobilisationManager => 3,
            Self::Mobiliser => 4,
        }
    }

    /// Returns true if this is the top tier (no superior).
    #[must_use]
    pub const fn is_top_tier(&self) -> bool {
        matches!(self, Self::StateOrProjectHead)
    }

    /// Parses a role from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownRole` if the string names no role.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s.trim() {
            "state_or_project_head" => Ok(Self::StateOrProjectHead),
            "operation_manager" => Ok(Self::OperationManager),
            "centre_manager" => Ok(Self::CentreManager),
            "mobilisation_manager" => Ok(Self::MobilisationManager),
            "mobiliser" => Ok(Self::Mobiliser),
            other => Err(DomainError::UnknownRole(other.to_string())),
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The static table of permitted reporting relationships.
///
/// This is a total function over the closed role set. Unknown roles never
/// reach it: they are rejected when a role string is parsed.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleHierarchyPolicy;

impl RoleHierarchyPolicy {
    /// The role that roots every work order hierarchy.
    pub const TOP_TIER: Role = Role::StateOrProjectHead;

    /// Returns the roles a member holding `role` may report to.
    ///
    /// The top tier has no permitted superiors.
    #[must_use]
    pub const fn superiors_of(role: Role) -> &'static [Role] {
        match role {
            Role::StateOrProjectHead => &[],
            Role::OperationManager | Role::CentreManager => &[Role::StateOrProjectHead],
            Role::MobilisationManager => &[Role::OperationManager, Role::CentreManager],
            Role::Mobiliser => &[Role::MobilisationManager],
        }
    }

    /// Returns the permitted superiors of `role` as a set.
    #[must_use]
    pub fn permitted_superiors(role: Role) -> BTreeSet<Role> {
        Self::superiors_of(role).iter().copied().collect()
    }

    /// Returns true if `subordinate` may report to `superior`.
    #[must_use]
    pub fn permits(subordinate: Role, superior: Role) -> bool {
        Self::superiors_of(subordinate).contains(&superior)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_string_round_trip() {
        for role in Role::ALL {
            match Role::parse(role.as_str()) {
                Ok(parsed) => assert_eq!(role, parsed),
                Err(e) => panic!("Failed to parse role string {}: {e}", role.as_str()),
            }
        }
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let result = "regional_director".parse::<Role>();
        assert_eq!(
            result,
            Err(DomainError::UnknownRole(String::from("regional_director")))
        );
    }

    #[test]
    fn test_top_tier_has_no_superiors() {
        assert!(RoleHierarchyPolicy::permitted_superiors(Role::StateOrProjectHead).is_empty());
        assert!(Role::StateOrProjectHead.is_top_tier());
        assert_eq!(RoleHierarchyPolicy::TOP_TIER, Role::StateOrProjectHead);
    }

    #[test]
    fn test_managers_report_to_head() {
        assert!(RoleHierarchyPolicy::permits(
            Role::OperationManager,
            Role::StateOrProjectHead
        ));
        assert!(RoleHierarchyPolicy::permits(
            Role::CentreManager,
            Role::StateOrProjectHead
        ));
        assert!(!RoleHierarchyPolicy::permits(
            Role::CentreManager,
            Role::OperationManager
        ));
    }

    #[test]
    fn test_mobiliser_reports_only_to_mobilisation_manager() {
        let superiors = RoleHierarchyPolicy::permitted_superiors(Role::Mobiliser);
        assert_eq!(superiors.len(), 1);
        assert!(superiors.contains(&Role::MobilisationManager));
        assert!(!RoleHierarchyPolicy::permits(
            Role::Mobiliser,
            Role::StateOrProjectHead
        ));
    }

    #[test]
    fn test_every_superior_is_exactly_one_level_up() {
        for role in Role::ALL {
            for superior in RoleHierarchyPolicy::superiors_of(role) {
                assert_eq!(superior.level() + 1, role.level());
            }
        }
    }

    #[test]
    fn test_no_role_may_report_to_itself() {
        for role in Role::ALL {
            assert!(!RoleHierarchyPolicy::permits(role, role));
        }
    }

    #[test]
    fn test_levels_cover_all_tiers() {
        let max_level = Role::ALL.iter().map(Role::level).max();
        assert_eq!(max_level, Some(Role::TIER_COUNT));
    }
}
