// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Counter record queries.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::diesel_schema::case_counters;
use crate::error::PersistenceError;

/// Reads the current sequence for a counter key.
///
/// Returns `None` when no counter record exists yet for the key.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `key` - The composite partition key
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn fetch_counter(
    conn: &mut SqliteConnection,
    key: &str,
) -> Result<Option<i64>, PersistenceError> {
    Ok(case_counters::table
        .select(case_counters::sequence)
        .filter(case_counters::counter_key.eq(key))
        .first::<i64>(conn)
        .optional()?)
}
