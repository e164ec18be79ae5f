// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, EmployeeId, MemberStatus, Role};

#[test]
fn test_reporting_link_error_names_role_and_superior() {
    let error: DomainError = DomainError::InvalidReportingLink {
        role: Role::Mobiliser,
        reporting_to: Some(EmployeeId::new("h1")),
        reason: String::from("a Mobiliser may not report to a State/Project Head"),
    };
    let message: String = error.to_string();

    assert!(message.contains("Mobiliser"));
    assert!(message.contains("'H1'"));
}

#[test]
fn test_reporting_link_error_without_superior() {
    let error: DomainError = DomainError::InvalidReportingLink {
        role: Role::CentreManager,
        reporting_to: None,
        reason: String::from("a superior is required"),
    };

    assert!(error.to_string().ends_with("a superior is required"));
}

#[test]
fn test_status_transition_error_display() {
    let error: DomainError = DomainError::InvalidStatusTransition {
        from: MemberStatus::Removed,
        to: MemberStatus::Active,
        reason: String::from("removed assignments are terminal"),
    };

    assert_eq!(
        error.to_string(),
        "Cannot transition from removed to active: removed assignments are terminal"
    );
}

#[test]
fn test_duplicate_identity_display() {
    let error: DomainError = DomainError::DuplicateIdentity {
        employee_id: EmployeeId::new("emp-7"),
    };

    assert_eq!(
        error.to_string(),
        "Employee id 'EMP-7' is already assigned in this work order"
    );
}

#[test]
fn test_errors_compare_by_value() {
    let a: DomainError = DomainError::MemberNotFound { member_id: 4 };
    let b: DomainError = DomainError::MemberNotFound { member_id: 4 };
    let c: DomainError = DomainError::MemberNotFound { member_id: 5 };

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_domain_error_is_std_error() {
    let error: Box<dyn std::error::Error> = Box::new(DomainError::InvalidName(String::from("x")));

    assert_eq!(error.to_string(), "Invalid name: x");
}
