// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use time::OffsetDateTime;
use time::macros::datetime;

use docket_audit::{Actor, Cause};
use docket_domain::{CaseNumber, DepartmentCode, FirmPrefix};

use crate::clock::Clock;
use crate::stores::{
    CaseDirectory, CounterStore, NumberingDirectory, NumberingMetadata, StoreError,
};

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("test-actor"), String::from("system"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("test-cause"), String::from("Test operation"))
}

/// A clock pinned to a fixed instant so year derivation is deterministic.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: OffsetDateTime,
}

impl FixedClock {
    pub const fn at(now: OffsetDateTime) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn now_utc(&self) -> OffsetDateTime {
        self.now
    }
}

/// Returns a clock pinned to March 15, 2026.
pub fn create_test_clock() -> FixedClock {
    FixedClock::at(datetime!(2026-03-15 12:00 UTC))
}

#[derive(Debug, Default)]
struct FakeStoreInner {
    counters: HashMap<String, u64>,
    cases: HashSet<String>,
    metadata: HashMap<(i64, i64), NumberingMetadata>,
    force_collisions: bool,
    fail_increment: bool,
}

/// An in-memory store shared between clones, mirroring the atomicity
/// contract of the persistent store: every trait call takes the lock once,
/// so `increment_and_get` is an indivisible read-modify-write.
#[derive(Debug, Clone, Default)]
pub struct FakeStore {
    inner: Arc<Mutex<FakeStoreInner>>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers numbering metadata for a firm and department pair.
    pub fn register_metadata(&self, firm_id: i64, department_id: i64, prefix: &str, code: &str) {
        let metadata: NumberingMetadata = NumberingMetadata {
            firm_prefix: FirmPrefix::new(prefix),
            department_code: DepartmentCode::new(code),
        };
        self.inner
            .lock()
            .unwrap()
            .metadata
            .insert((firm_id, department_id), metadata);
    }

    /// Records an existing case number, as if a case had been persisted.
    pub fn persist_case(&self, case_number: &CaseNumber) {
        self.inner
            .lock()
            .unwrap()
            .cases
            .insert(case_number.value().to_owned());
    }

    /// Forces every uniqueness probe to report a collision.
    pub fn force_collisions(&self) {
        self.inner.lock().unwrap().force_collisions = true;
    }

    /// Makes every counter increment fail as unavailable.
    pub fn fail_increments(&self) {
        self.inner.lock().unwrap().fail_increment = true;
    }

    /// Reads a counter value directly, bypassing the trait surface.
    pub fn counter_value(&self, key: &str) -> Option<u64> {
        self.inner.lock().unwrap().counters.get(key).copied()
    }
}

impl CounterStore for FakeStore {
    fn fetch(&mut self, key: &str) -> Result<Option<u64>, StoreError> {
        Ok(self.inner.lock().unwrap().counters.get(key).copied())
    }

    fn insert_if_absent(&mut self, key: &str, initial: u64) -> Result<(), StoreError> {
        self.inner
            .lock()
            .unwrap()
            .counters
            .entry(key.to_owned())
            .or_insert(initial);
        Ok(())
    }

    fn increment_and_get(&mut self, key: &str) -> Result<u64, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_increment {
            return Err(StoreError::Unavailable(String::from(
                "Counter store offline",
            )));
        }
        match inner.counters.get_mut(key) {
            Some(sequence) => {
                *sequence += 1;
                Ok(*sequence)
            }
            None => Err(StoreError::Corrupted(format!(
                "No counter record for key {key}"
            ))),
        }
    }
}

impl CaseDirectory for FakeStore {
    fn highest_sequence(&mut self, prefix: &str, year: u16) -> Result<Option<u64>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .cases
            .iter()
            .filter_map(|value| {
                CaseNumber::from_value(value.clone()).sequence_for(prefix, year)
            })
            .max())
    }

    fn case_number_exists(&mut self, case_number: &str) -> Result<bool, StoreError> {
        let inner = self.inner.lock().unwrap();
        if inner.force_collisions {
            return Ok(true);
        }
        Ok(inner.cases.contains(case_number))
    }
}

impl NumberingDirectory for FakeStore {
    fn numbering_metadata(
        &mut self,
        firm_id: i64,
        department_id: i64,
    ) -> Result<Option<NumberingMetadata>, StoreError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .metadata
            .get(&(firm_id, department_id))
            .cloned())
    }
}
