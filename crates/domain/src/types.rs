// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::case_number::CaseNumber;
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::Date;

/// A firm's numbering prefix.
///
/// The prefix is the leading component of every sequential case number the
/// firm receives. It is normalized to uppercase to ensure case-insensitive
/// uniqueness across firms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FirmPrefix {
    /// The prefix value (e.g., "ACM").
    value: String,
}

impl FirmPrefix {
    /// Creates a new `FirmPrefix`.
    ///
    /// # Arguments
    ///
    /// * `value` - The prefix value (will be normalized to uppercase)
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_uppercase(),
        }
    }

    /// Returns the prefix value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// A department code within a firm.
///
/// Codes are normalized to uppercase and are unique per firm, not globally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DepartmentCode {
    /// The code value (e.g., "COL" for collections, "LIT" for litigation).
    value: String,
}

impl DepartmentCode {
    /// Creates a new `DepartmentCode`.
    ///
    /// # Arguments
    ///
    /// * `value` - The code value (will be normalized to uppercase)
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_uppercase(),
        }
    }

    /// Returns the code value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// A law firm using the platform.
///
/// The firm is the unit of data isolation. `firm_id` is the canonical
/// numeric identifier assigned by the database; `None` indicates the firm
/// has not been persisted yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Firm {
    /// The canonical numeric identifier assigned by the database.
    firm_id: Option<i64>,
    /// The firm's numbering prefix.
    prefix: FirmPrefix,
    /// The firm's display name.
    name: String,
}

// Two Firms are equal if they share a prefix, regardless of their IDs.
impl PartialEq for Firm {
    fn eq(&self, other: &Self) -> bool {
        self.prefix == other.prefix
    }
}

impl Eq for Firm {}

impl std::hash::Hash for Firm {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.prefix.hash(state);
    }
}

impl Firm {
    /// Creates a new `Firm` without a persisted ID.
    ///
    /// # Arguments
    ///
    /// * `prefix` - The firm's numbering prefix
    /// * `name` - The firm's display name
    #[must_use]
    pub const fn new(prefix: FirmPrefix, name: String) -> Self {
        Self {
            firm_id: None,
            prefix,
            name,
        }
    }

    /// Creates a `Firm` with an existing persisted ID.
    ///
    /// # Arguments
    ///
    /// * `firm_id` - The canonical numeric identifier
    /// * `prefix` - The firm's numbering prefix
    /// * `name` - The firm's display name
    #[must_use]
    pub const fn with_id(firm_id: i64, prefix: FirmPrefix, name: String) -> Self {
        Self {
            firm_id: Some(firm_id),
            prefix,
            name,
        }
    }

    /// Returns the canonical numeric identifier if persisted.
    #[must_use]
    pub const fn firm_id(&self) -> Option<i64> {
        self.firm_id
    }

    /// Returns the firm's numbering prefix.
    #[must_use]
    pub const fn prefix(&self) -> &FirmPrefix {
        &self.prefix
    }

    /// Returns the firm's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A department within a firm.
///
/// Departments scope both case numbering sequences and revenue targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    /// The canonical numeric identifier assigned by the database.
    department_id: Option<i64>,
    /// The owning firm's canonical identifier.
    firm_id: Option<i64>,
    /// The department code.
    code: DepartmentCode,
    /// The department's display name.
    name: String,
}

// Two Departments are equal if they share a code, regardless of their IDs.
impl PartialEq for Department {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Department {}

impl std::hash::Hash for Department {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl Department {
    /// Creates a new `Department` without persisted IDs.
    ///
    /// # Arguments
    ///
    /// * `code` - The department code
    /// * `name` - The department's display name
    #[must_use]
    pub const fn new(code: DepartmentCode, name: String) -> Self {
        Self {
            department_id: None,
            firm_id: None,
            code,
            name,
        }
    }

    /// Creates a `Department` with existing persisted IDs.
    ///
    /// # Arguments
    ///
    /// * `department_id` - The canonical numeric identifier
    /// * `firm_id` - The owning firm's canonical identifier
    /// * `code` - The department code
    /// * `name` - The department's display name
    #[must_use]
    pub const fn with_id(
        department_id: i64,
        firm_id: i64,
        code: DepartmentCode,
        name: String,
    ) -> Self {
        Self {
            department_id: Some(department_id),
            firm_id: Some(firm_id),
            code,
            name,
        }
    }

    /// Returns the canonical numeric identifier if persisted.
    #[must_use]
    pub const fn department_id(&self) -> Option<i64> {
        self.department_id
    }

    /// Returns the owning firm's canonical identifier if persisted.
    #[must_use]
    pub const fn firm_id(&self) -> Option<i64> {
        self.firm_id
    }

    /// Returns the department code.
    #[must_use]
    pub const fn code(&self) -> &DepartmentCode {
        &self.code
    }

    /// Returns the department's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// The workflow a case belongs to.
///
/// Credit cases are debt-collection matters; legal cases are litigation
/// matters. A credit case that escalates produces a legal case numbered
/// from the escalated sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseCategory {
    /// Debt-collection workflow.
    Credit,
    /// Litigation workflow.
    Legal,
}

impl CaseCategory {
    /// Parses a case category from a string.
    ///
    /// # Arguments
    ///
    /// * `s` - The string to parse
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not match a valid category.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "Credit" => Ok(Self::Credit),
            "Legal" => Ok(Self::Legal),
            _ => Err(DomainError::InvalidCaseCategory(format!(
                "Unknown case category: {s}"
            ))),
        }
    }

    /// Returns the string representation of this category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Credit => "Credit",
            Self::Legal => "Legal",
        }
    }
}

impl std::fmt::Display for CaseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identifies one independent case-numbering sequence.
///
/// Escalated and non-escalated cases for the same firm, department, and
/// year draw from independent counters, so the escalation flag is part of
/// the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartitionKey {
    /// The calendar year the sequence belongs to.
    year: u16,
    /// The rendered numbering prefix (firm prefix + department code).
    prefix: String,
    /// The firm's canonical identifier.
    firm_id: i64,
    /// The department's canonical identifier.
    department_id: i64,
    /// Whether this is the escalated sequence.
    escalated: bool,
}

impl PartitionKey {
    /// Creates a partition key for a firm and department.
    ///
    /// The rendered numbering prefix joins the firm prefix and department
    /// code with a hyphen (e.g., "ACM-COL").
    ///
    /// # Arguments
    ///
    /// * `year` - The calendar year
    /// * `firm_prefix` - The firm's numbering prefix
    /// * `code` - The department code
    /// * `firm_id` - The firm's canonical identifier
    /// * `department_id` - The department's canonical identifier
    /// * `escalated` - Whether this keys the escalated sequence
    #[must_use]
    pub fn new(
        year: u16,
        firm_prefix: &FirmPrefix,
        code: &DepartmentCode,
        firm_id: i64,
        department_id: i64,
        escalated: bool,
    ) -> Self {
        Self {
            year,
            prefix: format!("{}-{}", firm_prefix.value(), code.value()),
            firm_id,
            department_id,
            escalated,
        }
    }

    /// Returns the calendar year.
    #[must_use]
    pub const fn year(&self) -> u16 {
        self.year
    }

    /// Returns the rendered numbering prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the firm's canonical identifier.
    #[must_use]
    pub const fn firm_id(&self) -> i64 {
        self.firm_id
    }

    /// Returns the department's canonical identifier.
    #[must_use]
    pub const fn department_id(&self) -> i64 {
        self.department_id
    }

    /// Returns whether this keys the escalated sequence.
    #[must_use]
    pub const fn escalated(&self) -> bool {
        self.escalated
    }

    /// Renders the composite key under which the counter is stored.
    ///
    /// The escalation flag is encoded as a trailing `E` or `N` so the two
    /// sequences for a scope never share a counter record.
    #[must_use]
    pub fn storage_key(&self) -> String {
        format!(
            "{}:{}:{}:{}:{}",
            self.year,
            self.prefix,
            self.firm_id,
            self.department_id,
            if self.escalated { 'E' } else { 'N' }
        )
    }
}

/// A case record.
///
/// `case_id` is the canonical internal identifier; the case number is the
/// human-facing identifier and is unique across all firms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    /// Canonical internal identifier. `None` before persistence.
    pub case_id: Option<i64>,
    /// The globally unique case number.
    pub case_number: CaseNumber,
    /// The owning firm's canonical identifier.
    pub firm_id: i64,
    /// The owning department's canonical identifier.
    pub department_id: i64,
    /// The workflow this case belongs to.
    pub category: CaseCategory,
    /// Whether this case was numbered from the escalated sequence.
    pub escalated: bool,
    /// The credit case this legal case was escalated from, if any.
    pub origin_case_number: Option<CaseNumber>,
    /// The date the case was opened.
    pub opened_on: Date,
}

impl Case {
    /// Creates a new `Case` without a persisted `case_id`.
    ///
    /// # Arguments
    ///
    /// * `case_number` - The allocated case number
    /// * `firm_id` - The owning firm's canonical identifier
    /// * `department_id` - The owning department's canonical identifier
    /// * `category` - The workflow this case belongs to
    /// * `escalated` - Whether the escalated sequence numbered this case
    /// * `origin_case_number` - The originating credit case, if escalated
    /// * `opened_on` - The date the case was opened
    #[must_use]
    pub const fn new(
        case_number: CaseNumber,
        firm_id: i64,
        department_id: i64,
        category: CaseCategory,
        escalated: bool,
        origin_case_number: Option<CaseNumber>,
        opened_on: Date,
    ) -> Self {
        Self {
            case_id: None,
            case_number,
            firm_id,
            department_id,
            category,
            escalated,
            origin_case_number,
            opened_on,
        }
    }
}
