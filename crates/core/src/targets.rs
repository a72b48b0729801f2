// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Revenue target planning.
//!
//! Validates target inputs, runs the pure decomposition, and records the
//! change as an audit event. The resulting target replaces any previous
//! breakdown in full; partial decompositions never exist.

use docket_audit::{Action, Actor, AuditEvent, AuditSubject, Cause};
use docket_domain::{RevenueTarget, validate_target_year, validate_yearly_target};

use crate::error::CoreError;

/// The result of a successful target planning operation.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetPlanResult {
    /// The assembled target with its full month/week/day breakdown.
    pub target: RevenueTarget,
    /// The audit event recording this change.
    pub audit_event: AuditEvent,
}

/// Plans a revenue target for a scope and year.
///
/// Inputs are validated before the decomposer runs: the decomposer itself
/// is total over validated input and has no error path. The previous
/// target, when one exists, is recorded in the audit event so target
/// history remains reconstructible.
///
/// # Arguments
///
/// * `actor` - The actor performing the change
/// * `cause` - The reason for the change
/// * `firm_id` - The firm's canonical identifier
/// * `department_id` - Optional department scope (`None` = firm-wide)
/// * `year` - The target year
/// * `yearly_target` - The yearly monetary amount
/// * `previous` - The currently persisted target for this scope, if any
///
/// # Errors
///
/// Returns `CoreError::DomainViolation` if the year is outside the
/// supported planning range or the amount is negative or non-finite.
pub fn plan_revenue_target(
    actor: Actor,
    cause: Cause,
    firm_id: i64,
    department_id: Option<i64>,
    year: u16,
    yearly_target: f64,
    previous: Option<&RevenueTarget>,
) -> Result<TargetPlanResult, CoreError> {
    validate_target_year(year)?;
    validate_yearly_target(yearly_target)?;

    let target: RevenueTarget = RevenueTarget::assemble(year, firm_id, department_id, yearly_target);

    let subject: AuditSubject = AuditSubject::RevenueTargeting {
        year,
        scope: target.scope_label(),
        yearly_target_before: previous.map(|t| t.yearly_target),
        yearly_target_after: yearly_target,
    };
    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        Action::new(
            String::from("SetRevenueTarget"),
            Some(format!("{yearly_target} for {} in {year}", target.scope_label())),
        ),
        subject,
    );

    Ok(TargetPlanResult {
        target,
        audit_event,
    })
}
