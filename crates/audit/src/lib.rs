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
    clippy::unwrap_used,
    clippy::expect_used
)]

use serde::{Deserialize, Serialize};
use wo_team_domain::WorkOrderId;

#[cfg(test)]
mod tests;

/// Who initiated a roster change.
///
/// Identity is supplied by the caller and trusted as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The actor's identifier, recorded as `approved_by` on approvals.
    pub id: String,
    /// The kind of actor (e.g., "user", "system", "fixture").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }
}

/// Why a roster change was requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cause {
    /// Correlation id (e.g., request id).
    pub id: String,
    /// Free-form description.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// What change was made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The operation name (e.g., "`AddMember`", "`ReplaceMember`").
    pub name: String,
    /// Optional details such as the affected member.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A textual summary of a roster at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub data: String,
}

impl StateSnapshot {
    /// Creates a new `StateSnapshot`.
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }
}

/// An immutable record of one successful roster transition.
///
/// Every transition produces exactly one event. Failed operations produce
/// none. The event is scoped to the work order whose roster changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Assigned when the event is committed. `None` before that.
    pub event_id: Option<i64>,
    /// The actor who initiated the change.
    pub actor: Actor,
    /// The reason for the change.
    pub cause: Cause,
    /// The change that was made.
    pub action: Action,
    /// Roster summary before the transition.
    pub before: StateSnapshot,
    /// Roster summary after the transition.
    pub after: StateSnapshot,
    /// The work order the change applies to.
    pub work_order: WorkOrderId,
}

impl AuditEvent {
    /// Creates a new, uncommitted `AuditEvent`.
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
        work_order: WorkOrderId,
    ) -> Self {
        Self {
            event_id: None,
            actor,
            cause,
            action,
            before,
            after,
            work_order,
        }
    }

    /// Returns a copy of this event carrying the committed `event_id`.
    #[must_use]
    pub fn with_event_id(&self, event_id: i64) -> Self {
        Self {
            event_id: Some(event_id),
            ..self.clone()
        }
    }
}
