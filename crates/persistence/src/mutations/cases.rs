// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Case record mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use docket_domain::{Case, CaseNumber};

use crate::backend::get_last_insert_rowid;
use crate::diesel_schema::cases;
use crate::error::PersistenceError;

/// Inserts a case record and returns its canonical identifier.
///
/// The `case_number` column carries a unique constraint as the storage
/// backstop for the allocator's global-uniqueness invariant.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `case` - The case to persist
///
/// # Errors
///
/// Returns an error if the insert fails, including on a case number
/// collision.
pub fn insert_case(conn: &mut SqliteConnection, case: &Case) -> Result<i64, PersistenceError> {
    diesel::insert_into(cases::table)
        .values((
            cases::case_number.eq(case.case_number.value()),
            cases::firm_id.eq(case.firm_id),
            cases::department_id.eq(case.department_id),
            cases::category.eq(case.category.as_str()),
            cases::escalated.eq(i32::from(case.escalated)),
            cases::origin_case_number.eq(case.origin_case_number.as_ref().map(CaseNumber::value)),
            cases::opened_on.eq(case.opened_on.to_string()),
        ))
        .execute(conn)?;

    let case_id: i64 = get_last_insert_rowid(conn)?;
    debug!(
        case_id,
        case_number = case.case_number.value(),
        "Inserted case record"
    );
    Ok(case_id)
}
