// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::role::{Role, RoleHierarchyPolicy};
use crate::types::{ContactInfo, EmployeeId, TeamMember};

/// Upper bound on a monthly salary.
pub const MAX_MONTHLY_SALARY: u64 = 10_000_000;

/// Maximum length of an employee id.
const MAX_EMPLOYEE_ID_LEN: usize = 32;

/// Validates the free-form fields of a proposed assignment.
///
/// This function checks field constraints only. It does NOT check
/// uniqueness or reporting links (those require roster context).
///
/// # Errors
///
/// Returns an error if:
/// - The name is empty
/// - The salary exceeds `MAX_MONTHLY_SALARY`
/// - The email has no `@` or the phone has no digits
pub fn validate_member_fields(
    name: &str,
    salary: u64,
    contact: &ContactInfo,
) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }

    if salary > MAX_MONTHLY_SALARY {
        return Err(DomainError::InvalidSalary {
            salary,
            max: MAX_MONTHLY_SALARY,
        });
    }

    if let Some(email) = &contact.email {
        let valid = email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
        if !valid {
            return Err(DomainError::InvalidContact {
                field: "email",
                reason: format!("'{email}' is not a valid email address"),
            });
        }
    }

    if let Some(phone) = &contact.phone {
        let valid = phone.chars().any(|c| c.is_ascii_digit())
            && phone
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'));
        if !valid {
            return Err(DomainError::InvalidContact {
                field: "phone",
                reason: format!("'{phone}' is not a valid phone number"),
            });
        }
    }

    Ok(())
}

/// Validates the format of an employee id.
///
/// # Errors
///
/// Returns `DomainError::InvalidEmployeeId` if the id is empty, longer than
/// 32 characters, or contains characters other than ASCII alphanumerics,
/// `-` and `_`.
pub fn validate_employee_id(employee_id: &EmployeeId) -> Result<(), DomainError> {
    let value: &str = employee_id.value();
    if value.is_empty() {
        return Err(DomainError::InvalidEmployeeId(String::from(
            "Employee id cannot be empty",
        )));
    }
    if value.len() > MAX_EMPLOYEE_ID_LEN {
        return Err(DomainError::InvalidEmployeeId(format!(
            "Employee id must be at most {MAX_EMPLOYEE_ID_LEN} characters"
        )));
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(DomainError::InvalidEmployeeId(format!(
            "Employee id '{value}' contains invalid characters"
        )));
    }
    Ok(())
}

/// Validates a replacement or removal reason.
///
/// # Errors
///
/// Returns `DomainError::InvalidReason` if the reason is blank.
pub fn validate_reason(reason: &str) -> Result<(), DomainError> {
    if reason.trim().is_empty() {
        return Err(DomainError::InvalidReason(String::from(
            "Reason cannot be empty",
        )));
    }
    Ok(())
}

/// Validates that no non-removed member already holds `employee_id`.
///
/// Removed records keep their ids for audit and do not collide.
///
/// # Errors
///
/// Returns `DomainError::DuplicateIdentity` on collision.
pub fn validate_employee_id_unique(
    employee_id: &EmployeeId,
    members: &[TeamMember],
) -> Result<(), DomainError> {
    // Rule: within a work order, live employee ids must be unique
    if members
        .iter()
        .any(|m| m.is_live() && &m.employee_id == employee_id)
    {
        return Err(DomainError::DuplicateIdentity {
            employee_id: employee_id.clone(),
        });
    }
    Ok(())
}

/// Validates that the top tier is vacant.
///
/// # Errors
///
/// Returns `DomainError::RootOccupied` if a non-removed top-tier member exists.
pub fn validate_root_vacant(members: &[TeamMember]) -> Result<(), DomainError> {
    if let Some(holder) = members
        .iter()
        .find(|m| m.is_live() && m.role.is_top_tier())
    {
        return Err(DomainError::RootOccupied {
            holder: holder.employee_id.clone(),
        });
    }
    Ok(())
}

/// Validates the reporting link of a member holding `role`.
///
/// The top tier must have no superior. Every other role must report to a
/// non-removed member whose role is a permitted superior.
///
/// # Arguments
///
/// * `role` - The role of the member being linked
/// * `reporting_to` - The requested superior's employee id
/// * `members` - The current roster
///
/// # Returns
///
/// * `Ok(None)` for a valid top-tier member
/// * `Ok(Some(superior))` with the resolved superior otherwise
///
/// # Errors
///
/// Returns `DomainError::InvalidReportingLink` if the superior is missing,
/// unknown, removed, or of a role the policy does not permit.
pub fn validate_reporting_link<'a>(
    role: Role,
    reporting_to: Option<&EmployeeId>,
    members: &'a [TeamMember],
) -> Result<Option<&'a TeamMember>, DomainError> {
    let link_error = |reason: String| DomainError::InvalidReportingLink {
        role,
        reporting_to: reporting_to.cloned(),
        reason,
    };

    if role.is_top_tier() {
        return match reporting_to {
            None => Ok(None),
            Some(_) => Err(link_error(String::from(
                "the top tier does not report to anyone",
            ))),
        };
    }

    let Some(superior_id) = reporting_to else {
        return Err(link_error(String::from("a superior is required")));
    };

    let superior: &TeamMember = match members
        .iter()
        .find(|m| m.is_live() && &m.employee_id == superior_id)
    {
        Some(superior) => superior,
        None if members.iter().any(|m| &m.employee_id == superior_id) => {
            return Err(link_error(String::from("the superior has been removed")));
        }
        None => return Err(link_error(String::from("the superior does not exist"))),
    };

    if !RoleHierarchyPolicy::permits(role, superior.role) {
        return Err(link_error(format!(
            "a {} may not report to a {}",
            role.label(),
            superior.role.label()
        )));
    }

    Ok(Some(superior))
}

/// Counts the non-removed members reporting to `employee_id`.
#[must_use]
pub fn count_live_subordinates(employee_id: &EmployeeId, members: &[TeamMember]) -> usize {
    members
        .iter()
        .filter(|m| m.is_live() && m.reports_to(employee_id))
        .count()
}

/// Validates that ending `member` would not orphan anyone.
///
/// # Errors
///
/// Returns `DomainError::SubordinatesAssigned` if non-removed members still
/// report to `member`.
pub fn validate_no_live_subordinates(
    member: &TeamMember,
    members: &[TeamMember],
) -> Result<(), DomainError> {
    let count: usize = count_live_subordinates(&member.employee_id, members);
    if count > 0 {
        return Err(DomainError::SubordinatesAssigned {
            member_id: member.member_id,
            count,
        });
    }
    Ok(())
}
