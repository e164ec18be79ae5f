// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use wo_team::CoreError;
use wo_team_domain::DomainError;
use wo_team_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The roster kept changing underneath the request.
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Conflict { message } => write!(f, "Conflict: {message}"),
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

fn rule_violation(rule: &str, err: &DomainError) -> ApiError {
    ApiError::DomainRuleViolation {
        rule: String::from(rule),
        message: err.to_string(),
    }
}

fn invalid_input(field: &str, err: &DomainError) -> ApiError {
    ApiError::InvalidInput {
        field: String::from(field),
        message: err.to_string(),
    }
}

/// Translates a domain error into an API error.
///
/// Domain errors are internal implementation details and must not leak
/// directly to API consumers. This function maps them to stable API errors.
#[must_use]
pub fn translate_domain_error(err: &DomainError) -> ApiError {
    match err {
        DomainError::InvalidReportingLink { .. } => rule_violation("invalid_reporting_link", err),
        DomainError::InvalidStatusTransition { .. } => {
            rule_violation("invalid_status_transition", err)
        }
        DomainError::TargetNotActive { .. } => rule_violation("target_not_active", err),
        DomainError::DuplicateIdentity { .. } => rule_violation("duplicate_identity", err),
        DomainError::RootOccupied { .. } => rule_violation("root_occupied", err),
        DomainError::SubordinatesAssigned { .. } => rule_violation("subordinates_assigned", err),
        DomainError::MemberNotFound { .. } => ApiError::ResourceNotFound {
            resource_type: String::from("Member"),
            message: err.to_string(),
        },
        DomainError::UnknownRole(_) => invalid_input("role", err),
        DomainError::UnknownStatus(_) => invalid_input("status", err),
        DomainError::InvalidName(_) => invalid_input("name", err),
        DomainError::InvalidSalary { .. } => invalid_input("salary", err),
        DomainError::InvalidContact { field, .. } => invalid_input(field, err),
        DomainError::InvalidEmployeeId(_) => invalid_input("employee_id", err),
        DomainError::InvalidReason(_) => invalid_input("reason", err),
        DomainError::InvalidWorkOrder(_) => invalid_input("work_order", err),
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: &CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}

/// Translates a persistence error into an API error.
#[must_use]
pub fn translate_persistence_error(err: &PersistenceError) -> ApiError {
    match err {
        PersistenceError::VersionConflict { .. } => ApiError::Conflict {
            message: err.to_string(),
        },
        PersistenceError::EventNotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("AuditEvent"),
            message: err.to_string(),
        },
        PersistenceError::UnknownDataSource(_) => ApiError::InvalidInput {
            field: String::from("data_source"),
            message: err.to_string(),
        },
        PersistenceError::LockPoisoned(_) | PersistenceError::FixtureError(_) => {
            ApiError::Internal {
                message: err.to_string(),
            }
        }
    }
}
