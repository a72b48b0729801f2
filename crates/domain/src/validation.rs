// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field-level domain validation.
//!
//! Revenue target inputs are validated here before the decomposer runs;
//! the decomposer itself assumes validated input and has no error path.

use crate::error::DomainError;

/// Lowest year a revenue target may be planned for.
pub const MIN_TARGET_YEAR: u16 = 2020;

/// Highest year a revenue target may be planned for.
pub const MAX_TARGET_YEAR: u16 = 2100;

/// Longest accepted firm prefix or department code.
const MAX_CODE_LENGTH: usize = 8;

/// Validates a firm numbering prefix.
///
/// Prefixes must be non-empty, at most 8 characters, and ASCII
/// alphanumeric, since they embed directly into rendered case numbers.
///
/// # Arguments
///
/// * `prefix` - The raw prefix value before normalization
///
/// # Errors
///
/// Returns `DomainError::InvalidFirmPrefix` if the prefix is malformed.
pub fn validate_firm_prefix(prefix: &str) -> Result<(), DomainError> {
    if prefix.is_empty() {
        return Err(DomainError::InvalidFirmPrefix(String::from(
            "Prefix must not be empty",
        )));
    }
    if prefix.len() > MAX_CODE_LENGTH {
        return Err(DomainError::InvalidFirmPrefix(format!(
            "Prefix must be at most {MAX_CODE_LENGTH} characters"
        )));
    }
    if !prefix.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(DomainError::InvalidFirmPrefix(String::from(
            "Prefix must be ASCII alphanumeric",
        )));
    }
    Ok(())
}

/// Validates a department code.
///
/// # Arguments
///
/// * `code` - The raw code value before normalization
///
/// # Errors
///
/// Returns `DomainError::InvalidDepartmentCode` if the code is malformed.
pub fn validate_department_code(code: &str) -> Result<(), DomainError> {
    if code.is_empty() {
        return Err(DomainError::InvalidDepartmentCode(String::from(
            "Code must not be empty",
        )));
    }
    if code.len() > MAX_CODE_LENGTH {
        return Err(DomainError::InvalidDepartmentCode(format!(
            "Code must be at most {MAX_CODE_LENGTH} characters"
        )));
    }
    if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(DomainError::InvalidDepartmentCode(String::from(
            "Code must be ASCII alphanumeric",
        )));
    }
    Ok(())
}

/// Validates a yearly revenue target amount.
///
/// # Arguments
///
/// * `yearly_target` - The proposed yearly amount
///
/// # Errors
///
/// Returns `DomainError::InvalidYearlyTarget` if the amount is negative
/// or not a finite number.
pub fn validate_yearly_target(yearly_target: f64) -> Result<(), DomainError> {
    if !yearly_target.is_finite() {
        return Err(DomainError::InvalidYearlyTarget {
            reason: String::from("Target must be a finite number"),
        });
    }
    if yearly_target < 0.0 {
        return Err(DomainError::InvalidYearlyTarget {
            reason: String::from("Target must not be negative"),
        });
    }
    Ok(())
}

/// Validates a revenue target year.
///
/// # Arguments
///
/// * `year` - The proposed target year
///
/// # Errors
///
/// Returns `DomainError::TargetYearOutOfRange` if the year falls outside
/// the supported planning range.
pub fn validate_target_year(year: u16) -> Result<(), DomainError> {
    if !(MIN_TARGET_YEAR..=MAX_TARGET_YEAR).contains(&year) {
        return Err(DomainError::TargetYearOutOfRange {
            year,
            min: MIN_TARGET_YEAR,
            max: MAX_TARGET_YEAR,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_firm_prefix() {
        assert!(validate_firm_prefix("ACM").is_ok());
        assert!(validate_firm_prefix("acm1").is_ok());
    }

    #[test]
    fn test_empty_firm_prefix_rejected() {
        assert!(matches!(
            validate_firm_prefix(""),
            Err(DomainError::InvalidFirmPrefix(_))
        ));
    }

    #[test]
    fn test_long_firm_prefix_rejected() {
        assert!(validate_firm_prefix("ABCDEFGHI").is_err());
    }

    #[test]
    fn test_non_alphanumeric_prefix_rejected() {
        assert!(validate_firm_prefix("A-M").is_err());
        assert!(validate_firm_prefix("A M").is_err());
    }

    #[test]
    fn test_department_code_rules_match_prefix_rules() {
        assert!(validate_department_code("COL").is_ok());
        assert!(validate_department_code("").is_err());
        assert!(validate_department_code("L/T").is_err());
    }

    #[test]
    fn test_negative_target_rejected() {
        assert!(matches!(
            validate_yearly_target(-1.0),
            Err(DomainError::InvalidYearlyTarget { .. })
        ));
    }

    #[test]
    fn test_non_finite_target_rejected() {
        assert!(validate_yearly_target(f64::NAN).is_err());
        assert!(validate_yearly_target(f64::INFINITY).is_err());
    }

    #[test]
    fn test_zero_and_positive_targets_accepted() {
        assert!(validate_yearly_target(0.0).is_ok());
        assert!(validate_yearly_target(1_200_000.0).is_ok());
    }

    #[test]
    fn test_target_year_bounds() {
        assert!(validate_target_year(2020).is_ok());
        assert!(validate_target_year(2100).is_ok());
        assert!(validate_target_year(2019).is_err());
        assert!(validate_target_year(2101).is_err());
    }
}
