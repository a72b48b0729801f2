// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Counter record mutations.
//!
//! The counter table backs sequential case numbering. Seeding uses an
//! insert-that-ignores-conflicts so two racing seeders cannot
//! double-initialize a partition, and the increment is a single
//! `UPDATE ... RETURNING` statement so the fetch-and-add is indivisible
//! at the storage layer. No application-level locking is layered on top.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::diesel_schema::case_counters;
use crate::error::PersistenceError;

/// Creates a counter record for a partition key if none exists.
///
/// A concurrent seed attempt for the same key is a no-op, never an error
/// or an overwrite.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `key` - The composite partition key
/// * `year` - The calendar year the partition belongs to
/// * `initial` - The seed sequence value
///
/// # Errors
///
/// Returns an error if the insert fails for any reason other than the
/// record already existing.
pub fn seed_counter(
    conn: &mut SqliteConnection,
    key: &str,
    year: i32,
    initial: i64,
) -> Result<(), PersistenceError> {
    diesel::insert_into(case_counters::table)
        .values((
            case_counters::counter_key.eq(key),
            case_counters::year.eq(year),
            case_counters::sequence.eq(initial),
        ))
        .on_conflict(case_counters::counter_key)
        .do_nothing()
        .execute(conn)?;

    debug!(counter_key = key, initial, "Seeded counter record");
    Ok(())
}

/// Atomically increments a counter and returns the new sequence value.
///
/// The read-modify-write happens inside one SQL statement, so no caller
/// can observe or apply an intermediate state.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `key` - The composite partition key
///
/// # Errors
///
/// Returns `PersistenceError::CounterNotFound` if no record exists for
/// the key, or a database error if the update fails.
pub fn increment_counter(
    conn: &mut SqliteConnection,
    key: &str,
) -> Result<i64, PersistenceError> {
    let result: Result<i64, diesel::result::Error> =
        diesel::update(case_counters::table.filter(case_counters::counter_key.eq(key)))
            .set(case_counters::sequence.eq(case_counters::sequence + 1_i64))
            .returning(case_counters::sequence)
            .get_result::<i64>(conn);

    match result {
        Ok(sequence) => {
            debug!(counter_key = key, sequence, "Incremented counter");
            Ok(sequence)
        }
        Err(diesel::result::Error::NotFound) => {
            Err(PersistenceError::CounterNotFound(key.to_string()))
        }
        Err(e) => Err(PersistenceError::from(e)),
    }
}
