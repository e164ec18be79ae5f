// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Assignment status tracking and transition logic.
//!
//! Transitions are one-way: a pending assignment is approved or rejected,
//! an active assignment is eventually removed, and `removed` is terminal.
//! A vacant slot is not a status; it is the absence of a backing record.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Status of a stored team member assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    /// Assignment proposed, waiting for an approver.
    PendingApproval,
    /// Assignment approved and in effect.
    Active,
    /// Assignment ended (rejected, removed, or replaced). Retained for audit.
    Removed,
}

impl MemberStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PendingApproval => "pending_approval",
            Self::Active => "active",
            Self::Removed => "removed",
        }
    }

    /// Parses a status from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownStatus` if the string is not a valid status.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "pending_approval" => Ok(Self::PendingApproval),
            "active" => Ok(Self::Active),
            "removed" => Ok(Self::Removed),
            _ => Err(DomainError::UnknownStatus(s.to_string())),
        }
    }

    /// Returns true if this status is terminal.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Removed)
    }

    /// Returns true if the member still occupies a slot in the hierarchy.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        !self.is_terminal()
    }

    /// Validates if a transition from this status to another is permitted.
    ///
    /// Allowed: `pending_approval -> active`, `pending_approval -> removed`,
    /// `active -> removed`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` if the transition is not allowed.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        if self.is_terminal() {
            return Err(DomainError::InvalidStatusTransition {
                from: *self,
                to: new_status,
                reason: String::from("removed assignments are terminal"),
            });
        }

        let valid = matches!(
            (self, new_status),
            (Self::PendingApproval, Self::Active | Self::Removed) | (Self::Active, Self::Removed)
        );

        if valid {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                from: *self,
                to: new_status,
                reason: String::from("transition not permitted by assignment lifecycle rules"),
            })
        }
    }
}

impl FromStr for MemberStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [MemberStatus; 3] = [
        MemberStatus::PendingApproval,
        MemberStatus::Active,
        MemberStatus::Removed,
    ];

    #[test]
    fn test_invalid_status_string() {
        assert!(MemberStatus::parse("vacant").is_err());
        assert!(MemberStatus::parse("ACTIVE").is_err());
    }

    #[test]
    fn test_only_removed_is_terminal() {
        assert!(!MemberStatus::PendingApproval.is_terminal());
        assert!(!MemberStatus::Active.is_terminal());
        assert!(MemberStatus::Removed.is_terminal());
    }

    #[test]
    fn test_valid_transitions() {
        assert!(
            MemberStatus::PendingApproval
                .validate_transition(MemberStatus::Active)
                .is_ok()
        );
        assert!(
            MemberStatus::PendingApproval
                .validate_transition(MemberStatus::Removed)
                .is_ok()
        );
        assert!(
            MemberStatus::Active
                .validate_transition(MemberStatus::Removed)
                .is_ok()
        );
    }

    #[test]
    fn test_no_backwards_transitions() {
        assert!(
            MemberStatus::Active
                .validate_transition(MemberStatus::PendingApproval)
                .is_err()
        );
        assert!(
            MemberStatus::Active
                .validate_transition(MemberStatus::Active)
                .is_err()
        );
        assert!(
            MemberStatus::PendingApproval
                .validate_transition(MemberStatus::PendingApproval)
                .is_err()
        );
    }

    #[test]
    fn test_no_transitions_from_removed() {
        for target in ALL {
            match MemberStatus::Removed.validate_transition(target) {
                Err(DomainError::InvalidStatusTransition { from, to, .. }) => {
                    assert_eq!(from, MemberStatus::Removed);
                    assert_eq!(to, target);
                }
                other => panic!("Expected InvalidStatusTransition, got {other:?}"),
            }
        }
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&MemberStatus::PendingApproval).unwrap();
        assert_eq!(json, "\"pending_approval\"");
    }
}
