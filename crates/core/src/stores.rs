// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Collaborator seams for the case number allocator.
//!
//! The allocator never talks to a database directly. It is written against
//! these traits so the persistence layer can supply the production
//! implementations while tests substitute fakes, including fakes forced to
//! report collisions.

use docket_domain::{DepartmentCode, FirmPrefix};

/// Errors reported by persistent collaborators.
///
/// A failing collaborator is a hard failure for sequential allocation:
/// the caller must not proceed with a guessed number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached or the operation timed out.
    Unavailable(String),
    /// The store returned data that violates its own contract.
    Corrupted(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(msg) => write!(f, "Store unavailable: {msg}"),
            Self::Corrupted(msg) => write!(f, "Store corrupted: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Numbering metadata resolved for a firm and department.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberingMetadata {
    /// The firm's numbering prefix.
    pub firm_prefix: FirmPrefix,
    /// The department's code.
    pub department_code: DepartmentCode,
}

/// The shared, persistent counter store.
///
/// One counter record exists per partition key. `increment_and_get` is the
/// only operation that must be linearizable across concurrent callers; the
/// store's native atomic primitive provides that, and no application-level
/// locking is layered on top.
pub trait CounterStore {
    /// Reads the current sequence for a counter key.
    ///
    /// Returns `None` if no counter record exists yet for the key.
    ///
    /// # Arguments
    ///
    /// * `key` - The composite partition key
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried.
    fn fetch(&mut self, key: &str) -> Result<Option<u64>, StoreError>;

    /// Creates a counter record if none exists for the key.
    ///
    /// Must be atomic: when two seeders race, exactly one insert wins and
    /// the other is a no-op, never an error or an overwrite.
    ///
    /// # Arguments
    ///
    /// * `key` - The composite partition key
    /// * `initial` - The seed sequence value
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn insert_if_absent(&mut self, key: &str, initial: u64) -> Result<(), StoreError>;

    /// Atomically increments the counter and returns the new value.
    ///
    /// This is an indivisible fetch-and-add: no caller can observe or
    /// apply an intermediate state. A read-then-write sequence is not an
    /// acceptable implementation.
    ///
    /// # Arguments
    ///
    /// * `key` - The composite partition key
    ///
    /// # Errors
    ///
    /// Returns an error if the counter record does not exist or the store
    /// cannot be written.
    fn increment_and_get(&mut self, key: &str) -> Result<u64, StoreError>;
}

/// Read access to existing case records.
pub trait CaseDirectory {
    /// Finds the highest sequence number already issued for a prefix and
    /// year, parsed from persisted case numbers.
    ///
    /// Returns `None` when no matching case exists. Used to seed a counter
    /// so pre-existing or re-imported data is never re-numbered.
    ///
    /// # Arguments
    ///
    /// * `prefix` - The rendered numbering prefix
    /// * `year` - The calendar year partition
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried.
    fn highest_sequence(&mut self, prefix: &str, year: u16) -> Result<Option<u64>, StoreError>;

    /// Checks whether any case already holds the exact case number.
    ///
    /// # Arguments
    ///
    /// * `case_number` - The candidate value
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried.
    fn case_number_exists(&mut self, case_number: &str) -> Result<bool, StoreError>;
}

/// Resolves firms and departments to their numbering metadata.
pub trait NumberingDirectory {
    /// Looks up the numbering metadata for a firm and department.
    ///
    /// Returns `None` when either record is missing; the allocator treats
    /// that as a degraded condition, not an error.
    ///
    /// # Arguments
    ///
    /// * `firm_id` - The firm's canonical identifier
    /// * `department_id` - The department's canonical identifier
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be queried.
    fn numbering_metadata(
        &mut self,
        firm_id: i64,
        department_id: i64,
    ) -> Result<Option<NumberingMetadata>, StoreError>;
}
