// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::OffsetDateTime;
use time::macros::datetime;

use docket::Clock;
use docket_audit::{Actor, Cause};
use docket_persistence::Persistence;

use crate::handlers;
use crate::request_response::{CreateDepartmentRequest, RegisterFirmRequest};

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("In-memory database")
}

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("staff-9"), String::from("user"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-12"), String::from("Test request"))
}

/// A clock pinned to March 15, 2026.
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

/// Registers the standard test firm through the API boundary.
pub fn register_test_firm(persistence: &mut Persistence) -> i64 {
    handlers::register_firm(
        persistence,
        RegisterFirmRequest {
            prefix: String::from("ACM"),
            name: String::from("Acme Legal"),
        },
        create_test_actor(),
        create_test_cause(),
    )
    .expect("Register firm")
    .firm_id
}

/// Creates the standard test department through the API boundary.
pub fn create_test_department(persistence: &mut Persistence, firm_id: i64) -> i64 {
    handlers::create_department(
        persistence,
        CreateDepartmentRequest {
            firm_id,
            code: String::from("COL"),
            name: String::from("Collections"),
        },
        create_test_actor(),
        create_test_cause(),
    )
    .expect("Create department")
    .department_id
}
