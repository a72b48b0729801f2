// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Firm and department queries.

use diesel::prelude::*;
use diesel::SqliteConnection;

use docket::NumberingMetadata;
use docket_domain::{Department, DepartmentCode, Firm, FirmPrefix};

use crate::diesel_schema::{departments, firms};
use crate::error::PersistenceError;

/// Resolves the numbering metadata for a firm and department pair.
///
/// Returns `None` when either record is missing or the department does
/// not belong to the firm.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `firm_id` - The firm's canonical identifier
/// * `department_id` - The department's canonical identifier
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn numbering_metadata(
    conn: &mut SqliteConnection,
    firm_id: i64,
    department_id: i64,
) -> Result<Option<NumberingMetadata>, PersistenceError> {
    let row: Option<(String, String)> = departments::table
        .inner_join(firms::table)
        .filter(departments::department_id.eq(department_id))
        .filter(departments::firm_id.eq(firm_id))
        .select((firms::prefix, departments::code))
        .first::<(String, String)>(conn)
        .optional()?;

    Ok(row.map(|(prefix, code)| NumberingMetadata {
        firm_prefix: FirmPrefix::new(&prefix),
        department_code: DepartmentCode::new(&code),
    }))
}

/// Checks whether a firm prefix is already registered.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `prefix` - The normalized prefix value
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn firm_prefix_exists(
    conn: &mut SqliteConnection,
    prefix: &FirmPrefix,
) -> Result<bool, PersistenceError> {
    let count: i64 = firms::table
        .filter(firms::prefix.eq(prefix.value()))
        .count()
        .get_result::<i64>(conn)?;
    Ok(count > 0)
}

/// Checks whether a firm exists.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `firm_id` - The firm's canonical identifier
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn firm_exists(conn: &mut SqliteConnection, firm_id: i64) -> Result<bool, PersistenceError> {
    let count: i64 = firms::table
        .filter(firms::firm_id.eq(firm_id))
        .count()
        .get_result::<i64>(conn)?;
    Ok(count > 0)
}

/// Checks whether a department code already exists within a firm.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `firm_id` - The owning firm's canonical identifier
/// * `code` - The normalized department code
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn department_code_exists(
    conn: &mut SqliteConnection,
    firm_id: i64,
    code: &DepartmentCode,
) -> Result<bool, PersistenceError> {
    let count: i64 = departments::table
        .filter(departments::firm_id.eq(firm_id))
        .filter(departments::code.eq(code.value()))
        .count()
        .get_result::<i64>(conn)?;
    Ok(count > 0)
}

/// Loads a firm by its canonical identifier.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `firm_id` - The firm's canonical identifier
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the firm does not exist.
pub fn get_firm(conn: &mut SqliteConnection, firm_id: i64) -> Result<Firm, PersistenceError> {
    let (prefix, name): (String, String) = firms::table
        .select((firms::prefix, firms::name))
        .filter(firms::firm_id.eq(firm_id))
        .first::<(String, String)>(conn)?;

    Ok(Firm::with_id(firm_id, FirmPrefix::new(&prefix), name))
}

/// Loads a department by its canonical identifier.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `department_id` - The department's canonical identifier
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the department does not exist.
pub fn get_department(
    conn: &mut SqliteConnection,
    department_id: i64,
) -> Result<Department, PersistenceError> {
    let (firm_id, code, name): (i64, String, String) = departments::table
        .select((departments::firm_id, departments::code, departments::name))
        .filter(departments::department_id.eq(department_id))
        .first::<(i64, String, String)>(conn)?;

    Ok(Department::with_id(
        department_id,
        firm_id,
        DepartmentCode::new(&code),
        name,
    ))
}
