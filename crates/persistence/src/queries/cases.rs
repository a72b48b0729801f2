// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Case record queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use time::Date;

use docket_domain::{Case, CaseCategory, CaseNumber};

use crate::diesel_schema::cases;
use crate::error::PersistenceError;

/// Finds the highest sequence number already issued for a prefix and year.
///
/// Matching case numbers are loaded and their numeric suffixes parsed in
/// Rust, because a widened sequence (five or more digits) does not sort
/// correctly as text.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `prefix` - The rendered numbering prefix
/// * `year` - The calendar year partition
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn highest_case_sequence(
    conn: &mut SqliteConnection,
    prefix: &str,
    year: u16,
) -> Result<Option<u64>, PersistenceError> {
    let pattern: String = format!("{prefix}-{year}-%");
    let numbers: Vec<String> = cases::table
        .select(cases::case_number)
        .filter(cases::case_number.like(pattern))
        .load::<String>(conn)?;

    Ok(numbers
        .into_iter()
        .filter_map(|value| CaseNumber::from_value(value).sequence_for(prefix, year))
        .max())
}

/// Checks whether any case already holds the exact case number.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `case_number` - The candidate value
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn case_number_exists(
    conn: &mut SqliteConnection,
    case_number: &str,
) -> Result<bool, PersistenceError> {
    let count: i64 = cases::table
        .filter(cases::case_number.eq(case_number))
        .count()
        .get_result::<i64>(conn)?;
    Ok(count > 0)
}

/// Loads a case by its case number.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `case_number` - The case number to look up
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no case holds the number, or a
/// reconstruction error if the stored row cannot be rebuilt into its
/// domain type.
pub fn get_case(conn: &mut SqliteConnection, case_number: &str) -> Result<Case, PersistenceError> {
    type CaseRow = (i64, String, i64, i64, String, i32, Option<String>, String);

    let row: CaseRow = cases::table
        .select((
            cases::case_id,
            cases::case_number,
            cases::firm_id,
            cases::department_id,
            cases::category,
            cases::escalated,
            cases::origin_case_number,
            cases::opened_on,
        ))
        .filter(cases::case_number.eq(case_number))
        .first::<CaseRow>(conn)?;

    let (case_id, number, firm_id, department_id, category, escalated, origin, opened_on) = row;

    let category: CaseCategory = CaseCategory::parse(&category)
        .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
    let opened_on: Date = Date::parse(
        &opened_on,
        &time::format_description::well_known::Iso8601::DEFAULT,
    )
    .map_err(|e| {
        PersistenceError::ReconstructionError(format!("Invalid opened_on '{opened_on}': {e}"))
    })?;

    Ok(Case {
        case_id: Some(case_id),
        case_number: CaseNumber::from_value(number),
        firm_id,
        department_id,
        category,
        escalated: escalated != 0,
        origin_case_number: origin.map(CaseNumber::from_value),
        opened_on,
    })
}
