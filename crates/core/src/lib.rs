// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod command;
mod error;
mod state;

#[cfg(test)]
mod tests;

use wo_team_domain::{DomainError, TeamMember};

// Re-export public types and functions
pub use apply::apply;
pub use command::Command;
pub use error::CoreError;
pub use state::{Roster, TransitionOutcome, TransitionResult};

/// Looks up a member by assignment id.
///
/// This is a read-only check that does not create audit events.
///
/// # Errors
///
/// Returns `DomainError::MemberNotFound` if no record has `member_id`.
pub fn find_member(roster: &Roster, member_id: i64) -> Result<&TeamMember, DomainError> {
    roster
        .member(member_id)
        .ok_or(DomainError::MemberNotFound { member_id })
}
