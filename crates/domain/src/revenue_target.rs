// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Revenue target decomposition for a single scope and calendar year.
//!
//! This module provides the pure, deterministic breakdown of a yearly
//! monetary target into month, week, and day sub-targets for
//! progress-tracking dashboards.

use serde::{Deserialize, Serialize};
use time::Month;

/// Number of days a full week slice covers.
const WEEK_LENGTH_DAYS: u8 = 7;

/// Calendar months in order, used to walk a year without fallible
/// `u8` conversions.
const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// One calendar day's share of its month's target.
///
/// A day's target is the month's target divided by the number of days in
/// the month. It is independent of which week the day falls in; all days
/// in a month carry equal weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayTarget {
    /// Day of month (1-based).
    pub day: u8,
    /// The day's monetary target.
    pub target: f64,
}

/// A roughly 7-day slice of a month's target.
///
/// Weeks are numbered sequentially from the 1st of the month; the final
/// week is truncated to the month's actual length. A truncated week's own
/// days do not sum to the week's target, because daily targets derive from
/// the month's total rather than the week's. Both breakdowns reconcile to
/// the month independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekTarget {
    /// Week of month (1-based).
    pub week: u8,
    /// The week's monetary target.
    pub target: f64,
    /// The days this week covers.
    pub daily_targets: Vec<DayTarget>,
}

/// One month's equal share of the yearly target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthTarget {
    /// Month of year (1-12).
    pub month: u8,
    /// The month's monetary target.
    pub target: f64,
    /// The month's week slices.
    pub weekly_targets: Vec<WeekTarget>,
}

impl MonthTarget {
    /// Iterates all day targets in this month across its weeks.
    pub fn daily_targets(&self) -> impl Iterator<Item = &DayTarget> {
        self.weekly_targets
            .iter()
            .flat_map(|week| week.daily_targets.iter())
    }
}

/// A yearly monetary goal for a firm, optionally scoped to one department.
///
/// At most one target exists per (year, firm, department) scope. The
/// breakdown is recomputed in full whenever the yearly amount changes;
/// it is never partially updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueTarget {
    /// The target year.
    pub year: u16,
    /// The firm's canonical identifier.
    pub firm_id: i64,
    /// The department's canonical identifier. `None` means firm-wide.
    pub department_id: Option<i64>,
    /// The yearly monetary target.
    pub yearly_target: f64,
    /// The month breakdown (always exactly 12 entries).
    pub monthly_targets: Vec<MonthTarget>,
}

impl RevenueTarget {
    /// Assembles a target with its full decomposition.
    ///
    /// # Arguments
    ///
    /// * `year` - The target year (validated by the caller)
    /// * `firm_id` - The firm's canonical identifier
    /// * `department_id` - Optional department scope
    /// * `yearly_target` - The yearly amount (validated by the caller)
    #[must_use]
    pub fn assemble(year: u16, firm_id: i64, department_id: Option<i64>, yearly_target: f64) -> Self {
        Self {
            year,
            firm_id,
            department_id,
            yearly_target,
            monthly_targets: decompose_yearly_target(yearly_target, year),
        }
    }

    /// Renders a human-readable scope description for audit trails.
    #[must_use]
    pub fn scope_label(&self) -> String {
        match self.department_id {
            Some(department_id) => format!("firm {} department {department_id}", self.firm_id),
            None => format!("firm {} firm-wide", self.firm_id),
        }
    }
}

/// Decomposes a yearly target into month, week, and day sub-targets.
///
/// This is a pure, deterministic calculation:
/// - Every month receives `yearly_target / 12`. Months are equal-weight
///   buckets regardless of length; shares are deliberately not weighted by
///   days-in-month so that monthly goals stay predictable.
/// - Each month is sliced into `ceil(days / 7)` weeks of
///   `month_target / weeks` each, the final week truncated to the month's
///   actual length.
/// - Each day receives `month_target / days_in_month`, derived from the
///   month rather than the week. Daily and weekly breakdowns therefore
///   reconcile to the month independently, and a truncated week's days do
///   not sum to that week's own target.
///
/// All arithmetic is floating-point division with no intermediate
/// rounding; rounding to currency precision happens at presentation time
/// only.
///
/// # Arguments
///
/// * `yearly_target` - The yearly amount (non-negative, validated upstream)
/// * `year` - The calendar year, used for leap-aware month lengths
///
/// # Returns
///
/// Twelve `MonthTarget` entries covering the full year.
#[must_use]
pub fn decompose_yearly_target(yearly_target: f64, year: u16) -> Vec<MonthTarget> {
    let monthly_amount: f64 = yearly_target / 12.0;

    MONTHS
        .iter()
        .enumerate()
        .map(|(month_index, month)| {
            let days_in_month: u8 = month.length(i32::from(year));
            let weeks_in_month: u8 = days_in_month.div_ceil(WEEK_LENGTH_DAYS);
            let weekly_amount: f64 = monthly_amount / f64::from(weeks_in_month);
            let daily_amount: f64 = monthly_amount / f64::from(days_in_month);

            let weekly_targets: Vec<WeekTarget> = (1..=weeks_in_month)
                .map(|week| {
                    let first_day: u8 = (week - 1) * WEEK_LENGTH_DAYS + 1;
                    let last_day: u8 = (week * WEEK_LENGTH_DAYS).min(days_in_month);
                    let daily_targets: Vec<DayTarget> = (first_day..=last_day)
                        .map(|day| DayTarget {
                            day,
                            target: daily_amount,
                        })
                        .collect();

                    WeekTarget {
                        week,
                        target: weekly_amount,
                        daily_targets,
                    }
                })
                .collect();

            MonthTarget {
                month: month_number(month_index),
                target: monthly_amount,
                weekly_targets,
            }
        })
        .collect()
}

/// Converts a zero-based month index to its 1-based calendar number.
///
/// `MONTHS` has exactly 12 entries, so the cast cannot truncate.
#[allow(clippy::cast_possible_truncation)]
const fn month_number(month_index: usize) -> u8 {
    (month_index + 1) as u8
}
