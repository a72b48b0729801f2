// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod allocation_tests;
mod target_tests;

use time::OffsetDateTime;
use time::macros::datetime;

use docket::Clock;
use docket_audit::{Actor, Cause};
use docket_domain::{DepartmentCode, FirmPrefix};

use crate::Persistence;

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("In-memory database")
}

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("test-actor"), String::from("system"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("test-cause"), String::from("Test operation"))
}

/// A clock pinned to March 15, 2026 so year partitions are deterministic.
pub struct FixedClock {
    now: OffsetDateTime,
}

impl Clock for FixedClock {
    fn now_utc(&self) -> OffsetDateTime {
        self.now
    }
}

pub fn create_test_clock() -> FixedClock {
    FixedClock {
        now: datetime!(2026-03-15 12:00 UTC),
    }
}

/// Registers the standard test firm and department, returning their IDs.
pub fn setup_firm_and_department(persistence: &mut Persistence) -> (i64, i64) {
    let firm_id: i64 = persistence
        .register_firm(&FirmPrefix::new("ACM"), "Acme Legal")
        .expect("Register firm");
    let department_id: i64 = persistence
        .create_department(firm_id, &DepartmentCode::new("COL"), "Collections")
        .expect("Create department");
    (firm_id, department_id)
}
