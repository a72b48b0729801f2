// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Revenue target mutations.
//!
//! Targets are upserted by their (year, firm, department) scope and the
//! serialized breakdown is always replaced in full. A partially updated
//! decomposition never exists.

use diesel::prelude::*;
use diesel::SqliteConnection;
use time::OffsetDateTime;
use tracing::info;

use docket_domain::RevenueTarget;

use crate::backend::get_last_insert_rowid;
use crate::diesel_schema::revenue_targets;
use crate::error::PersistenceError;

/// Upserts a revenue target by its scope and returns its canonical
/// identifier.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `target` - The target with its full decomposition
///
/// # Errors
///
/// Returns an error if the breakdown cannot be serialized or the
/// transaction fails.
pub fn upsert_revenue_target(
    conn: &mut SqliteConnection,
    target: &RevenueTarget,
) -> Result<i64, PersistenceError> {
    let year_i32: i32 = i32::from(target.year);
    let breakdown_json: String = serde_json::to_string(&target.monthly_targets)?;
    let stamped_at: String = OffsetDateTime::now_utc().to_string();

    let target_id: i64 = conn.immediate_transaction(|conn| {
        let existing: Option<i64> = match target.department_id {
            Some(department_id) => revenue_targets::table
                .select(revenue_targets::target_id)
                .filter(revenue_targets::year.eq(year_i32))
                .filter(revenue_targets::firm_id.eq(target.firm_id))
                .filter(revenue_targets::department_id.eq(department_id))
                .first::<i64>(conn)
                .optional()?,
            None => revenue_targets::table
                .select(revenue_targets::target_id)
                .filter(revenue_targets::year.eq(year_i32))
                .filter(revenue_targets::firm_id.eq(target.firm_id))
                .filter(revenue_targets::department_id.is_null())
                .first::<i64>(conn)
                .optional()?,
        };

        match existing {
            Some(target_id) => {
                diesel::update(
                    revenue_targets::table.filter(revenue_targets::target_id.eq(target_id)),
                )
                .set((
                    revenue_targets::yearly_target.eq(target.yearly_target),
                    revenue_targets::monthly_targets_json.eq(&breakdown_json),
                    revenue_targets::updated_at.eq(&stamped_at),
                ))
                .execute(conn)?;
                Ok::<i64, PersistenceError>(target_id)
            }
            None => {
                diesel::insert_into(revenue_targets::table)
                    .values((
                        revenue_targets::year.eq(year_i32),
                        revenue_targets::firm_id.eq(target.firm_id),
                        revenue_targets::department_id.eq(target.department_id),
                        revenue_targets::yearly_target.eq(target.yearly_target),
                        revenue_targets::monthly_targets_json.eq(&breakdown_json),
                        revenue_targets::updated_at.eq(&stamped_at),
                    ))
                    .execute(conn)?;
                get_last_insert_rowid(conn)
            }
        }
    })?;

    info!(
        target_id,
        year = target.year,
        scope = %target.scope_label(),
        "Upserted revenue target"
    );
    Ok(target_id)
}
