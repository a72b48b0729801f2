// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Firm and department registration mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::info;

use docket_domain::{DepartmentCode, FirmPrefix};

use crate::backend::get_last_insert_rowid;
use crate::diesel_schema::{departments, firms};
use crate::error::PersistenceError;

/// Inserts a firm and returns its canonical identifier.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `prefix` - The firm's numbering prefix
/// * `name` - The firm's display name
///
/// # Errors
///
/// Returns an error if the insert fails, including when the prefix is
/// already registered (unique constraint).
pub fn insert_firm(
    conn: &mut SqliteConnection,
    prefix: &FirmPrefix,
    name: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(firms::table)
        .values((firms::prefix.eq(prefix.value()), firms::name.eq(name)))
        .execute(conn)?;

    let firm_id: i64 = get_last_insert_rowid(conn)?;
    info!(firm_id, prefix = prefix.value(), "Registered firm");
    Ok(firm_id)
}

/// Inserts a department and returns its canonical identifier.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `firm_id` - The owning firm's canonical identifier
/// * `code` - The department code
/// * `name` - The department's display name
///
/// # Errors
///
/// Returns an error if the insert fails, including when the code already
/// exists within the firm (unique constraint) or the firm does not exist
/// (foreign key).
pub fn insert_department(
    conn: &mut SqliteConnection,
    firm_id: i64,
    code: &DepartmentCode,
    name: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(departments::table)
        .values((
            departments::firm_id.eq(firm_id),
            departments::code.eq(code.value()),
            departments::name.eq(name),
        ))
        .execute(conn)?;

    let department_id: i64 = get_last_insert_rowid(conn)?;
    info!(department_id, firm_id, code = code.value(), "Created department");
    Ok(department_id)
}
