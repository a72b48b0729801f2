// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Firm numbering prefix is empty or malformed.
    InvalidFirmPrefix(String),
    /// Department code is empty or malformed.
    InvalidDepartmentCode(String),
    /// Firm or department name is empty or invalid.
    InvalidName(String),
    /// Case category is not recognized.
    InvalidCaseCategory(String),
    /// Firm does not exist.
    FirmNotFound(i64),
    /// Department does not exist within the firm.
    DepartmentNotFound {
        /// The firm the lookup was scoped to.
        firm_id: i64,
        /// The department identifier.
        department_id: i64,
    },
    /// Firm numbering prefix already registered.
    DuplicateFirmPrefix(String),
    /// Department code already exists within the firm.
    DuplicateDepartmentCode {
        /// The firm the department belongs to.
        firm_id: i64,
        /// The duplicate code.
        code: String,
    },
    /// Yearly revenue target is negative or not a finite number.
    InvalidYearlyTarget {
        /// Description of the validation failure.
        reason: String,
    },
    /// Target year is outside the supported planning range.
    TargetYearOutOfRange {
        /// The rejected year.
        year: u16,
        /// Lowest accepted year.
        min: u16,
        /// Highest accepted year.
        max: u16,
    },
    /// The allocation clock produced a year that cannot be represented.
    CaseYearOutOfRange {
        /// The year reported by the clock.
        year: i32,
    },
    /// A revenue target does not exist for the requested scope.
    TargetNotFound {
        /// The target year.
        year: u16,
        /// Human-readable scope description.
        scope: String,
    },
    /// A case with the given number does not exist.
    CaseNotFound(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFirmPrefix(msg) => write!(f, "Invalid firm prefix: {msg}"),
            Self::InvalidDepartmentCode(msg) => write!(f, "Invalid department code: {msg}"),
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidCaseCategory(msg) => write!(f, "Invalid case category: {msg}"),
            Self::FirmNotFound(firm_id) => write!(f, "Firm {firm_id} not found"),
            Self::DepartmentNotFound {
                firm_id,
                department_id,
            } => {
                write!(f, "Department {department_id} not found in firm {firm_id}")
            }
            Self::DuplicateFirmPrefix(prefix) => {
                write!(f, "Firm prefix '{prefix}' is already registered")
            }
            Self::DuplicateDepartmentCode { firm_id, code } => {
                write!(f, "Department code '{code}' already exists in firm {firm_id}")
            }
            Self::InvalidYearlyTarget { reason } => {
                write!(f, "Invalid yearly target: {reason}")
            }
            Self::TargetYearOutOfRange { year, min, max } => {
                write!(
                    f,
                    "Target year {year} is out of range. Must be between {min} and {max}"
                )
            }
            Self::CaseYearOutOfRange { year } => {
                write!(f, "Case year {year} cannot be represented")
            }
            Self::TargetNotFound { year, scope } => {
                write!(f, "No revenue target for {scope} in {year}")
            }
            Self::CaseNotFound(case_number) => write!(f, "Case '{case_number}' not found"),
        }
    }
}

impl std::error::Error for DomainError {}
