// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::member_status::MemberStatus;
use crate::role::Role;
use serde::{Deserialize, Serialize};
use time::Date;

/// Identifies the work order a roster belongs to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkOrderId {
    value: String,
}

impl WorkOrderId {
    /// Maximum length of a work order identifier.
    pub const MAX_LEN: usize = 64;

    /// Creates a validated work order identifier.
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidWorkOrder` if the value is empty, too
    /// long, or contains characters other than ASCII alphanumerics, `-`, `_`.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let trimmed: &str = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidWorkOrder(String::from(
                "Work order id cannot be empty",
            )));
        }
        if trimmed.len() > Self::MAX_LEN {
            return Err(DomainError::InvalidWorkOrder(format!(
                "Work order id must be at most {} characters",
                Self::MAX_LEN
            )));
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(DomainError::InvalidWorkOrder(format!(
                "Work order id '{trimmed}' contains invalid characters"
            )));
        }
        Ok(Self {
            value: trimmed.to_string(),
        })
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for WorkOrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Stable identifier of an employee across assignments.
///
/// Employee ids are normalized to uppercase so lookups are case-insensitive.
/// Deserialization goes through `new`, so wire values are normalized too.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct EmployeeId {
    value: String,
}

impl EmployeeId {
    /// Prefix used for generated employee ids.
    pub const GENERATED_PREFIX: &'static str = "EMP-";

    /// Creates a new `EmployeeId`, trimming and uppercasing the value.
    ///
    /// Format rules are checked by `validate_employee_id`.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.trim().to_uppercase(),
        }
    }

    /// Creates a generated employee id from a sequence number (`EMP-00042`).
    #[must_use]
    pub fn generated(sequence: u64) -> Self {
        Self {
            value: format!("{}{sequence:05}", Self::GENERATED_PREFIX),
        }
    }

    /// Returns the id value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl From<String> for EmployeeId {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<EmployeeId> for String {
    fn from(id: EmployeeId) -> Self {
        id.value
    }
}

impl std::fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Optional contact details of a team member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    /// Email address.
    pub email: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
}

impl ContactInfo {
    /// Creates contact details, dropping blank values.
    #[must_use]
    pub fn new(email: Option<String>, phone: Option<String>) -> Self {
        Self {
            email: email.map(|e| e.trim().to_string()).filter(|e| !e.is_empty()),
            phone: phone.map(|p| p.trim().to_string()).filter(|p| !p.is_empty()),
        }
    }
}

/// One assignment record in a work order roster.
///
/// Records are never deleted. An ended assignment keeps its row with
/// status `removed` and an end date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    /// Assignment id, unique within the work order.
    pub member_id: i64,
    /// Stable employee identity.
    pub employee_id: EmployeeId,
    /// Display name.
    pub name: String,
    /// The role held by this assignment.
    pub role: Role,
    /// Contact details.
    pub contact: ContactInfo,
    /// Monthly salary in whole currency units.
    pub salary: u64,
    /// First day of the assignment.
    pub assignment_start_date: Date,
    /// Last day of the assignment. Set only once the status is `removed`.
    pub assignment_end_date: Option<Date>,
    /// Current lifecycle status.
    pub status: MemberStatus,
    /// Employee id of the superior. `None` only for the top tier.
    pub reporting_to: Option<EmployeeId>,
    /// Who approved the assignment.
    pub approved_by: Option<String>,
    /// When the assignment was approved.
    pub approved_date: Option<Date>,
    /// Why the assignment ended.
    pub end_reason: Option<String>,
}

impl TeamMember {
    /// Returns true if the member still occupies a slot (not removed).
    #[must_use]
    pub const fn is_live(&self) -> bool {
        self.status.is_live()
    }

    /// Returns true if the member is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == MemberStatus::Active
    }

    /// Returns true if this member reports to `employee_id`.
    #[must_use]
    pub fn reports_to(&self, employee_id: &EmployeeId) -> bool {
        self.reporting_to.as_ref() == Some(employee_id)
    }
}

/// Input for proposing a new assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDraft {
    /// Employee id. Generated when absent.
    pub employee_id: Option<EmployeeId>,
    /// Display name.
    pub name: String,
    /// The role to assign.
    pub role: Role,
    /// Contact details.
    pub contact: ContactInfo,
    /// Monthly salary.
    pub salary: u64,
    /// Start date. Defaults to the effective date of the operation.
    pub assignment_start_date: Option<Date>,
    /// Employee id of the superior. Must be absent for the top tier.
    pub reporting_to: Option<EmployeeId>,
}

/// Input describing the successor in a replacement.
///
/// Role and reporting line are inherited from the member being replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessorDraft {
    /// Employee id. Generated when absent.
    pub employee_id: Option<EmployeeId>,
    /// Display name.
    pub name: String,
    /// Contact details.
    pub contact: ContactInfo,
    /// Monthly salary.
    pub salary: u64,
    /// Start date. Defaults to the effective date of the replacement.
    pub assignment_start_date: Option<Date>,
}

/// Immutable ledger entry written on every replacement.
///
/// The ledger is keyed by role so that the holders of a position can be
/// listed over time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentHistory {
    /// Ledger entry id, unique within the work order.
    pub history_id: i64,
    /// The assignment id of the outgoing member.
    pub member_id: i64,
    /// Employee id of the outgoing member.
    pub employee_id: EmployeeId,
    /// Name of the outgoing member.
    pub employee_name: String,
    /// The position that changed hands.
    pub role: Role,
    /// Start date of the outgoing assignment.
    pub start_date: Date,
    /// End date of the outgoing assignment.
    pub end_date: Date,
    /// Why the member was replaced.
    pub reason: String,
    /// Assignment id of the successor.
    pub replaced_by: Option<i64>,
}
