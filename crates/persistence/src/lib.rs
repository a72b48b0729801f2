// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Docket case numbering engine.
//!
//! This crate provides `SQLite` persistence, via Diesel, for firms,
//! departments, case records, case counters, revenue targets, and audit
//! events. It also supplies the production implementations of the core
//! crate's collaborator traits, so the allocator runs against the same
//! counter semantics in production and in integration tests.
//!
//! ## Atomicity
//!
//! The counter increment is a single `UPDATE ... RETURNING` statement and
//! counter seeding is an insert that ignores conflicts. `SQLite`
//! serializes writers, which makes both operations indivisible at the
//! storage layer; no application-level locking is added on top.
//!
//! ## Testing
//!
//! In-memory databases get a unique shared-cache name per call via an
//! atomic counter, so tests are isolated without time-based collisions.
//! File-based databases run in WAL mode for better read concurrency.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use num_traits::ToPrimitive;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use docket::{
    CaseDirectory, CounterStore, NumberingDirectory, NumberingMetadata, StoreError,
};
use docket_audit::AuditEvent;
use docket_domain::{Case, Department, DepartmentCode, Firm, FirmPrefix, RevenueTarget};

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique
/// sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{ActionData, ActorData, CauseData, SubjectData};
pub use error::PersistenceError;

/// Persistence adapter for the Docket engine.
///
/// Owns a single `SQLite` connection. Construction runs migrations and
/// verifies foreign key enforcement before handing the adapter out.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite`
    /// database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based
    /// collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name: String = format!("memdb_docket_{db_id}");
        let shared_memory_url: String = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::initialize_database(&shared_memory_url)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite`
    /// database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::initialize_database(path_str)?;
        backend::enable_wal_mode(&mut conn)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Registers a firm and returns its canonical identifier.
    ///
    /// # Arguments
    ///
    /// * `prefix` - The firm's numbering prefix
    /// * `name` - The firm's display name
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn register_firm(
        &mut self,
        prefix: &FirmPrefix,
        name: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::registry::insert_firm(&mut self.conn, prefix, name)
    }

    /// Creates a department and returns its canonical identifier.
    ///
    /// # Arguments
    ///
    /// * `firm_id` - The owning firm's canonical identifier
    /// * `code` - The department code
    /// * `name` - The department's display name
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_department(
        &mut self,
        firm_id: i64,
        code: &DepartmentCode,
        name: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::registry::insert_department(&mut self.conn, firm_id, code, name)
    }

    /// Checks whether a firm exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn firm_exists(&mut self, firm_id: i64) -> Result<bool, PersistenceError> {
        queries::registry::firm_exists(&mut self.conn, firm_id)
    }

    /// Checks whether a firm prefix is already registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn firm_prefix_exists(&mut self, prefix: &FirmPrefix) -> Result<bool, PersistenceError> {
        queries::registry::firm_prefix_exists(&mut self.conn, prefix)
    }

    /// Checks whether a department code already exists within a firm.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn department_code_exists(
        &mut self,
        firm_id: i64,
        code: &DepartmentCode,
    ) -> Result<bool, PersistenceError> {
        queries::registry::department_code_exists(&mut self.conn, firm_id, code)
    }

    /// Loads a firm by its canonical identifier.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the firm does not exist.
    pub fn get_firm(&mut self, firm_id: i64) -> Result<Firm, PersistenceError> {
        queries::registry::get_firm(&mut self.conn, firm_id)
    }

    /// Loads a department by its canonical identifier.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the department does not
    /// exist.
    pub fn get_department(&mut self, department_id: i64) -> Result<Department, PersistenceError> {
        queries::registry::get_department(&mut self.conn, department_id)
    }

    /// Inserts a case record and returns its canonical identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, including on a case number
    /// collision.
    pub fn insert_case(&mut self, case: &Case) -> Result<i64, PersistenceError> {
        mutations::cases::insert_case(&mut self.conn, case)
    }

    /// Loads a case by its case number.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no case holds the number.
    pub fn get_case(&mut self, case_number: &str) -> Result<Case, PersistenceError> {
        queries::cases::get_case(&mut self.conn, case_number)
    }

    /// Reads the current sequence for a counter key.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn fetch_counter(&mut self, key: &str) -> Result<Option<i64>, PersistenceError> {
        queries::counters::fetch_counter(&mut self.conn, key)
    }

    /// Upserts a revenue target by its scope and returns its canonical
    /// identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the transaction fails.
    pub fn upsert_revenue_target(
        &mut self,
        target: &RevenueTarget,
    ) -> Result<i64, PersistenceError> {
        mutations::targets::upsert_revenue_target(&mut self.conn, target)
    }

    /// Loads the revenue target for a scope and year, if one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored breakdown cannot
    /// be deserialized.
    pub fn get_revenue_target(
        &mut self,
        year: u16,
        firm_id: i64,
        department_id: Option<i64>,
    ) -> Result<Option<RevenueTarget>, PersistenceError> {
        queries::targets::get_revenue_target(&mut self.conn, year, firm_id, department_id)
    }

    /// Persists an audit event and returns its event ID.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the insert fails.
    pub fn persist_audit_event(&mut self, event: &AuditEvent) -> Result<i64, PersistenceError> {
        mutations::audit::persist_audit_event(&mut self.conn, event)
    }

    /// Loads a single audit event by its event ID.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::EventNotFound` if no event exists.
    pub fn get_audit_event(&mut self, event_id: i64) -> Result<AuditEvent, PersistenceError> {
        queries::audit::get_audit_event(&mut self.conn, event_id)
    }

    /// Loads all audit events in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn load_audit_events(&mut self) -> Result<Vec<(i64, AuditEvent)>, PersistenceError> {
        queries::audit::load_audit_events(&mut self.conn)
    }
}

/// Translates a persistence error into the core store error taxonomy.
///
/// Missing counter records surface as corruption (the allocator seeds
/// before incrementing, so a miss means the stores diverged); everything
/// else is unavailability.
fn to_store_error(err: PersistenceError) -> StoreError {
    match err {
        PersistenceError::CounterNotFound(key) => {
            StoreError::Corrupted(format!("No counter record for key {key}"))
        }
        PersistenceError::ReconstructionError(msg) | PersistenceError::SerializationError(msg) => {
            StoreError::Corrupted(msg)
        }
        other => StoreError::Unavailable(other.to_string()),
    }
}

/// Extracts the year component from a composite counter key.
///
/// Keys render as `{year}:{prefix}:{firm}:{department}:{flag}`.
fn year_from_counter_key(key: &str) -> Result<i32, StoreError> {
    key.split(':')
        .next()
        .and_then(|year| year.parse::<i32>().ok())
        .ok_or_else(|| StoreError::Corrupted(format!("Malformed counter key: {key}")))
}

impl CounterStore for Persistence {
    fn fetch(&mut self, key: &str) -> Result<Option<u64>, StoreError> {
        let sequence: Option<i64> =
            queries::counters::fetch_counter(&mut self.conn, key).map_err(to_store_error)?;

        sequence
            .map(|value| {
                value.to_u64().ok_or_else(|| {
                    StoreError::Corrupted(format!("Negative sequence {value} for key {key}"))
                })
            })
            .transpose()
    }

    fn insert_if_absent(&mut self, key: &str, initial: u64) -> Result<(), StoreError> {
        let year: i32 = year_from_counter_key(key)?;
        let initial: i64 = initial
            .to_i64()
            .ok_or_else(|| StoreError::Corrupted(format!("Seed {initial} out of range")))?;

        mutations::counters::seed_counter(&mut self.conn, key, year, initial)
            .map_err(to_store_error)
    }

    fn increment_and_get(&mut self, key: &str) -> Result<u64, StoreError> {
        let sequence: i64 =
            mutations::counters::increment_counter(&mut self.conn, key).map_err(to_store_error)?;

        sequence.to_u64().ok_or_else(|| {
            StoreError::Corrupted(format!("Negative sequence {sequence} for key {key}"))
        })
    }
}

impl CaseDirectory for Persistence {
    fn highest_sequence(&mut self, prefix: &str, year: u16) -> Result<Option<u64>, StoreError> {
        queries::cases::highest_case_sequence(&mut self.conn, prefix, year).map_err(to_store_error)
    }

    fn case_number_exists(&mut self, case_number: &str) -> Result<bool, StoreError> {
        queries::cases::case_number_exists(&mut self.conn, case_number).map_err(to_store_error)
    }
}

impl NumberingDirectory for Persistence {
    fn numbering_metadata(
        &mut self,
        firm_id: i64,
        department_id: i64,
    ) -> Result<Option<NumberingMetadata>, StoreError> {
        queries::registry::numbering_metadata(&mut self.conn, firm_id, department_id)
            .map_err(to_store_error)
    }
}
