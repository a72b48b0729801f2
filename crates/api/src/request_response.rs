// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Responses round monetary amounts to currency precision. This is the
//! only place rounding happens; stored and computed amounts carry full
//! float precision so rounding error never compounds across the target
//! hierarchy.

use docket_domain::{Case, DayTarget, MonthTarget, RevenueTarget, WeekTarget};
use time::Date;

/// Rounds a monetary amount to two decimal places for presentation.
fn round_currency(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// API request to register a new firm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterFirmRequest {
    /// The firm's numbering prefix.
    pub prefix: String,
    /// The firm's display name.
    pub name: String,
}

/// API response for a successful firm registration.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RegisterFirmResponse {
    /// The canonical numeric identifier.
    pub firm_id: i64,
    /// The normalized numbering prefix.
    pub prefix: String,
    /// The event ID of the persisted audit event.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// API request to create a department within a firm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDepartmentRequest {
    /// The owning firm's canonical identifier.
    pub firm_id: i64,
    /// The department code.
    pub code: String,
    /// The department's display name.
    pub name: String,
}

/// API response for a successful department creation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateDepartmentResponse {
    /// The canonical numeric identifier.
    pub department_id: i64,
    /// The owning firm's canonical identifier.
    pub firm_id: i64,
    /// The normalized department code.
    pub code: String,
    /// The event ID of the persisted audit event.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// API request to open a new case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenCaseRequest {
    /// The firm's canonical identifier.
    pub firm_id: i64,
    /// The department's canonical identifier.
    pub department_id: i64,
    /// The workflow category ("Credit" or "Legal").
    pub category: String,
}

/// API response for a successfully opened case.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OpenCaseResponse {
    /// The case's canonical identifier.
    pub case_id: i64,
    /// The issued case number.
    pub case_number: String,
    /// Whether the number came from the sequential counter. `false`
    /// means a fallback identifier was issued.
    pub sequential: bool,
    /// The event ID of the persisted audit event.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// API request to escalate a credit case into the legal workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscalateCaseRequest {
    /// The case number of the credit case to escalate.
    pub case_number: String,
}

/// API response for a successful escalation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EscalateCaseResponse {
    /// The new legal case's canonical identifier.
    pub case_id: i64,
    /// The new legal case's number, drawn from the escalated sequence.
    pub case_number: String,
    /// The originating credit case's number.
    pub origin_case_number: String,
    /// The event ID of the persisted audit event.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// API request to create or replace a revenue target.
#[derive(Debug, Clone, PartialEq)]
pub struct SetRevenueTargetRequest {
    /// The firm's canonical identifier.
    pub firm_id: i64,
    /// Optional department scope (`None` = firm-wide).
    pub department_id: Option<i64>,
    /// The target year.
    pub year: u16,
    /// The yearly monetary target.
    pub yearly_target: f64,
}

/// API response for a successful target upsert.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SetRevenueTargetResponse {
    /// The target's canonical identifier.
    pub target_id: i64,
    /// The target year.
    pub year: u16,
    /// The yearly amount as stored.
    pub yearly_target: f64,
    /// The event ID of the persisted audit event.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// One day of a presented target breakdown.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DayTargetInfo {
    /// Day of month (1-based).
    pub day: u8,
    /// The day's target, rounded to currency precision.
    pub target: f64,
}

/// One week of a presented target breakdown.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WeekTargetInfo {
    /// Week of month (1-based).
    pub week: u8,
    /// The week's target, rounded to currency precision.
    pub target: f64,
    /// The days this week covers.
    pub daily_targets: Vec<DayTargetInfo>,
}

/// One month of a presented target breakdown.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MonthTargetInfo {
    /// Month of year (1-12).
    pub month: u8,
    /// The month's target, rounded to currency precision.
    pub target: f64,
    /// The month's week slices.
    pub weekly_targets: Vec<WeekTargetInfo>,
}

/// API response carrying a revenue target with its full breakdown.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GetRevenueTargetResponse {
    /// The target year.
    pub year: u16,
    /// The firm's canonical identifier.
    pub firm_id: i64,
    /// Optional department scope.
    pub department_id: Option<i64>,
    /// The yearly amount as stored, unrounded.
    pub yearly_target: f64,
    /// The presented breakdown.
    pub monthly_targets: Vec<MonthTargetInfo>,
}

impl From<&DayTarget> for DayTargetInfo {
    fn from(day: &DayTarget) -> Self {
        Self {
            day: day.day,
            target: round_currency(day.target),
        }
    }
}

impl From<&WeekTarget> for WeekTargetInfo {
    fn from(week: &WeekTarget) -> Self {
        Self {
            week: week.week,
            target: round_currency(week.target),
            daily_targets: week.daily_targets.iter().map(DayTargetInfo::from).collect(),
        }
    }
}

impl From<&MonthTarget> for MonthTargetInfo {
    fn from(month: &MonthTarget) -> Self {
        Self {
            month: month.month,
            target: round_currency(month.target),
            weekly_targets: month
                .weekly_targets
                .iter()
                .map(WeekTargetInfo::from)
                .collect(),
        }
    }
}

impl From<&RevenueTarget> for GetRevenueTargetResponse {
    fn from(target: &RevenueTarget) -> Self {
        Self {
            year: target.year,
            firm_id: target.firm_id,
            department_id: target.department_id,
            yearly_target: target.yearly_target,
            monthly_targets: target
                .monthly_targets
                .iter()
                .map(MonthTargetInfo::from)
                .collect(),
        }
    }
}

/// Case information returned by read handlers.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CaseInfo {
    /// The case's canonical identifier.
    pub case_id: Option<i64>,
    /// The case number.
    pub case_number: String,
    /// The owning firm's canonical identifier.
    pub firm_id: i64,
    /// The owning department's canonical identifier.
    pub department_id: i64,
    /// The workflow category.
    pub category: String,
    /// Whether the escalated sequence numbered this case.
    pub escalated: bool,
    /// The originating credit case, if escalated.
    pub origin_case_number: Option<String>,
    /// The date the case was opened.
    pub opened_on: Date,
}

impl From<&Case> for CaseInfo {
    fn from(case: &Case) -> Self {
        Self {
            case_id: case.case_id,
            case_number: case.case_number.value().to_owned(),
            firm_id: case.firm_id,
            department_id: case.department_id,
            category: case.category.as_str().to_owned(),
            escalated: case.escalated,
            origin_case_number: case
                .origin_case_number
                .as_ref()
                .map(|number| number.value().to_owned()),
            opened_on: case.opened_on,
        }
    }
}
