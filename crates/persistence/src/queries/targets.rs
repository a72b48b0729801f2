// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Revenue target queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use num_traits::ToPrimitive;

use docket_domain::{MonthTarget, RevenueTarget};

use crate::diesel_schema::revenue_targets;
use crate::error::PersistenceError;

/// Loads the revenue target for a scope and year, if one exists.
///
/// The stored breakdown is deserialized in full; amounts are returned
/// exactly as stored, with no rounding.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `year` - The target year
/// * `firm_id` - The firm's canonical identifier
/// * `department_id` - Optional department scope (`None` = firm-wide)
///
/// # Errors
///
/// Returns an error if the query fails or the stored breakdown cannot be
/// deserialized.
pub fn get_revenue_target(
    conn: &mut SqliteConnection,
    year: u16,
    firm_id: i64,
    department_id: Option<i64>,
) -> Result<Option<RevenueTarget>, PersistenceError> {
    let year_i32: i32 = i32::from(year);

    let row: Option<(i32, f64, String)> = match department_id {
        Some(dep_id) => revenue_targets::table
            .select((
                revenue_targets::year,
                revenue_targets::yearly_target,
                revenue_targets::monthly_targets_json,
            ))
            .filter(revenue_targets::year.eq(year_i32))
            .filter(revenue_targets::firm_id.eq(firm_id))
            .filter(revenue_targets::department_id.eq(dep_id))
            .first::<(i32, f64, String)>(conn)
            .optional()?,
        None => revenue_targets::table
            .select((
                revenue_targets::year,
                revenue_targets::yearly_target,
                revenue_targets::monthly_targets_json,
            ))
            .filter(revenue_targets::year.eq(year_i32))
            .filter(revenue_targets::firm_id.eq(firm_id))
            .filter(revenue_targets::department_id.is_null())
            .first::<(i32, f64, String)>(conn)
            .optional()?,
    };

    let Some((stored_year, yearly_target, breakdown_json)) = row else {
        return Ok(None);
    };

    let stored_year: u16 = stored_year.to_u16().ok_or_else(|| {
        PersistenceError::ReconstructionError(format!("Year out of u16 range: {stored_year}"))
    })?;
    let monthly_targets: Vec<MonthTarget> = serde_json::from_str(&breakdown_json)?;

    Ok(Some(RevenueTarget {
        year: stored_year,
        firm_id,
        department_id,
        yearly_target,
        monthly_targets,
    }))
}
