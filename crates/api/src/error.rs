// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::target_policy::TargetPolicyError;
use docket::CoreError;
use docket_domain::DomainError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API
/// contract.
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
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
    /// Target policy violation.
    TargetPolicyViolation {
        /// A human-readable description of the policy violation.
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
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
            Self::TargetPolicyViolation { message } => {
                write!(f, "Target policy violation: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<TargetPolicyError> for ApiError {
    fn from(err: TargetPolicyError) -> Self {
        Self::TargetPolicyViolation {
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidFirmPrefix(msg) => ApiError::InvalidInput {
            field: String::from("prefix"),
            message: msg,
        },
        DomainError::InvalidDepartmentCode(msg) => ApiError::InvalidInput {
            field: String::from("code"),
            message: msg,
        },
        DomainError::InvalidName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::InvalidCaseCategory(msg) => ApiError::InvalidInput {
            field: String::from("category"),
            message: msg,
        },
        DomainError::FirmNotFound(firm_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Firm"),
            message: format!("Firm {firm_id} does not exist"),
        },
        DomainError::DepartmentNotFound {
            firm_id,
            department_id,
        } => ApiError::ResourceNotFound {
            resource_type: String::from("Department"),
            message: format!("Department {department_id} does not exist in firm {firm_id}"),
        },
        DomainError::DuplicateFirmPrefix(prefix) => ApiError::DomainRuleViolation {
            rule: String::from("unique_firm_prefix"),
            message: format!("Firm prefix '{prefix}' is already registered"),
        },
        DomainError::DuplicateDepartmentCode { firm_id, code } => ApiError::DomainRuleViolation {
            rule: String::from("unique_department_code"),
            message: format!("Department code '{code}' already exists in firm {firm_id}"),
        },
        DomainError::InvalidYearlyTarget { reason } => ApiError::InvalidInput {
            field: String::from("yearly_target"),
            message: reason,
        },
        DomainError::TargetYearOutOfRange { year, min, max } => ApiError::InvalidInput {
            field: String::from("year"),
            message: format!("Target year {year} is out of range. Must be between {min} and {max}"),
        },
        DomainError::CaseYearOutOfRange { year } => ApiError::Internal {
            message: format!("Case year {year} cannot be represented"),
        },
        DomainError::TargetNotFound { year, scope } => ApiError::ResourceNotFound {
            resource_type: String::from("Revenue target"),
            message: format!("No revenue target for {scope} in {year}"),
        },
        DomainError::CaseNotFound(case_number) => ApiError::ResourceNotFound {
            resource_type: String::from("Case"),
            message: format!("Case '{case_number}' does not exist"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked
/// directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Store(store_err) => ApiError::Internal {
            message: format!("Store failure: {store_err}"),
        },
    }
}
