// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Verb-oriented API over work-order team rosters.
//!
//! Callers are trusted: the actor id supplied with a request is recorded
//! in the audit trail as given.

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

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

use wo_team_audit::Actor;

pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    MAX_COMMIT_ATTEMPTS, add_member, approve_member, export_roster, get_audit_event,
    get_audit_timeline, get_hierarchy, get_history, get_org_structure, get_roster, get_summary,
    list_work_orders, parse_work_order, reassign_member, reject_member, remove_member,
    replace_member,
};
pub use request_response::{
    AddMemberRequest, AuditTimelineResponse, HierarchyResponse, HistoryResponse, MemberResponse,
    OrgStructureResponse, ReassignMemberRequest, RejectMemberRequest, RemoveMemberRequest,
    ReplaceMemberRequest, ReplaceMemberResponse, RosterResponse, SummaryResponse,
    WorkOrdersResponse,
};

/// Maximum length of a caller id.
const MAX_ACTOR_ID_LEN: usize = 128;

/// The caller of a write operation.
///
/// Approvals record this id as `approved_by`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The unique identifier for this actor.
    pub id: String,
}

impl AuthenticatedActor {
    /// Creates a new actor.
    #[must_use]
    pub const fn new(id: String) -> Self {
        Self { id }
    }

    /// Converts this actor into an audit Actor.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        Actor::new(self.id.clone(), String::from("user"))
    }
}

/// Accepts the caller id supplied with a request.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the id is blank or too long.
pub fn identify_caller(actor_id: &str) -> Result<AuthenticatedActor, ApiError> {
    let trimmed: &str = actor_id.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("actor_id"),
            message: String::from("Actor id cannot be empty"),
        });
    }
    if trimmed.len() > MAX_ACTOR_ID_LEN {
        return Err(ApiError::InvalidInput {
            field: String::from("actor_id"),
            message: format!("Actor id must be at most {MAX_ACTOR_ID_LEN} characters"),
        });
    }
    Ok(AuthenticatedActor::new(trimmed.to_string()))
}
