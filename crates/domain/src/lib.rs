// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod case_number;
mod error;
mod revenue_target;
mod types;
mod validation;

pub use case_number::CaseNumber;
pub use error::DomainError;
pub use revenue_target::{
    DayTarget, MonthTarget, RevenueTarget, WeekTarget, decompose_yearly_target,
};
pub use types::{Case, CaseCategory, Department, DepartmentCode, Firm, FirmPrefix, PartitionKey};
pub use validation::{
    MAX_TARGET_YEAR, MIN_TARGET_YEAR, validate_department_code, validate_firm_prefix,
    validate_target_year, validate_yearly_target,
};
