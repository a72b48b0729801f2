// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the Docket case numbering engine.
//!
//! This crate owns the request/response contract: DTOs distinct from
//! domain types, explicit error translation so domain errors never leak
//! raw, input policy validation, and handler functions that orchestrate
//! the core allocator and planner against the persistence layer. It is a
//! library boundary; no HTTP surface lives here.

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

mod error;
pub mod handlers;
mod request_response;
mod target_policy;

#[cfg(test)]
mod tests;

pub use error::{ApiError, translate_core_error, translate_domain_error};
pub use request_response::{
    CaseInfo, CreateDepartmentRequest, CreateDepartmentResponse, DayTargetInfo,
    EscalateCaseRequest, EscalateCaseResponse, GetRevenueTargetResponse, MonthTargetInfo,
    OpenCaseRequest, OpenCaseResponse, RegisterFirmRequest, RegisterFirmResponse,
    SetRevenueTargetRequest, SetRevenueTargetResponse, WeekTargetInfo,
};
pub use target_policy::{TargetPolicy, TargetPolicyError};
