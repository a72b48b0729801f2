// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use docket_audit::AuditSubject;
use docket_persistence::Persistence;

use crate::error::ApiError;
use crate::handlers;
use crate::request_response::{
    GetRevenueTargetResponse, MonthTargetInfo, SetRevenueTargetRequest, SetRevenueTargetResponse,
};
use crate::tests::helpers::{
    create_test_actor, create_test_cause, create_test_department, create_test_persistence,
    register_test_firm,
};

fn set_target(
    persistence: &mut Persistence,
    firm_id: i64,
    department_id: Option<i64>,
    year: u16,
    yearly_target: f64,
) -> Result<SetRevenueTargetResponse, ApiError> {
    handlers::set_revenue_target(
        persistence,
        SetRevenueTargetRequest {
            firm_id,
            department_id,
            year,
            yearly_target,
        },
        create_test_actor(),
        create_test_cause(),
    )
}

#[test]
fn test_set_and_get_target_round_trip() {
    let mut persistence: Persistence = create_test_persistence();
    let firm_id: i64 = register_test_firm(&mut persistence);
    let department_id: i64 = create_test_department(&mut persistence, firm_id);

    let response: SetRevenueTargetResponse = set_target(
        &mut persistence,
        firm_id,
        Some(department_id),
        2024,
        1_200_000.0,
    )
    .unwrap();
    assert!(response.target_id > 0);

    let loaded: GetRevenueTargetResponse =
        handlers::get_revenue_target(&mut persistence, 2024, firm_id, Some(department_id))
            .unwrap();

    assert_eq!(loaded.year, 2024);
    assert_eq!(loaded.monthly_targets.len(), 12);
    assert!((loaded.yearly_target - 1_200_000.0).abs() < 1e-6);
}

#[test]
fn test_presented_breakdown_is_rounded_to_currency() {
    let mut persistence: Persistence = create_test_persistence();
    let firm_id: i64 = register_test_firm(&mut persistence);
    let department_id: i64 = create_test_department(&mut persistence, firm_id);

    set_target(
        &mut persistence,
        firm_id,
        Some(department_id),
        2024,
        1_200_000.0,
    )
    .unwrap();

    let loaded: GetRevenueTargetResponse =
        handlers::get_revenue_target(&mut persistence, 2024, firm_id, Some(department_id))
            .unwrap();

    let january: &MonthTargetInfo = &loaded.monthly_targets[0];
    assert!((january.target - 100_000.0).abs() < 1e-9);

    // 100000 / 31 = 3225.8064..., presented as 3225.81. The stored value
    // keeps full precision; only the DTO rounds.
    let first_day: f64 = january.weekly_targets[0].daily_targets[0].target;
    assert!((first_day - 3225.81).abs() < 1e-9);

    // Every week of January carries the full 20000 share, including the
    // truncated 3-day tail, whose own days sum to roughly 9677.43. The
    // mismatch is deliberate and must survive presentation.
    let tail = &january.weekly_targets[4];
    assert!((tail.target - 20_000.0).abs() < 1e-9);
    let tail_sum: f64 = tail.daily_targets.iter().map(|d| d.target).sum();
    assert!((tail_sum - tail.target).abs() > 1.0);
}

#[test]
fn test_replacing_target_updates_breakdown() {
    let mut persistence: Persistence = create_test_persistence();
    let firm_id: i64 = register_test_firm(&mut persistence);
    let department_id: i64 = create_test_department(&mut persistence, firm_id);

    set_target(
        &mut persistence,
        firm_id,
        Some(department_id),
        2024,
        1_200_000.0,
    )
    .unwrap();
    let second: SetRevenueTargetResponse = set_target(
        &mut persistence,
        firm_id,
        Some(department_id),
        2024,
        600_000.0,
    )
    .unwrap();

    let loaded: GetRevenueTargetResponse =
        handlers::get_revenue_target(&mut persistence, 2024, firm_id, Some(department_id))
            .unwrap();
    assert!((loaded.yearly_target - 600_000.0).abs() < 1e-6);
    assert!((loaded.monthly_targets[0].target - 50_000.0).abs() < 1e-9);

    // The audit event for the replacement carries the previous amount.
    let event = persistence.get_audit_event(second.event_id).unwrap();
    match event.subject {
        AuditSubject::RevenueTargeting {
            yearly_target_before,
            yearly_target_after,
            ..
        } => {
            assert_eq!(yearly_target_before, Some(1_200_000.0));
            assert!((yearly_target_after - 600_000.0).abs() < 1e-6);
        }
        _ => panic!("Expected RevenueTargeting subject"),
    }
}

#[test]
fn test_target_policy_rejects_bad_input() {
    let mut persistence: Persistence = create_test_persistence();
    let firm_id: i64 = register_test_firm(&mut persistence);

    assert!(matches!(
        set_target(&mut persistence, firm_id, None, 2024, -1.0),
        Err(ApiError::TargetPolicyViolation { .. })
    ));
    assert!(matches!(
        set_target(&mut persistence, firm_id, None, 2019, 1.0),
        Err(ApiError::TargetPolicyViolation { .. })
    ));
    assert!(matches!(
        set_target(&mut persistence, firm_id, None, 2024, f64::NAN),
        Err(ApiError::TargetPolicyViolation { .. })
    ));
}

#[test]
fn test_target_for_unknown_firm_is_not_found() {
    let mut persistence: Persistence = create_test_persistence();

    assert!(matches!(
        set_target(&mut persistence, 999, None, 2024, 1.0),
        Err(ApiError::ResourceNotFound { .. })
    ));
}

#[test]
fn test_target_for_foreign_department_is_not_found() {
    let mut persistence: Persistence = create_test_persistence();
    let firm_id: i64 = register_test_firm(&mut persistence);
    create_test_department(&mut persistence, firm_id);

    // A department id that exists under no firm at all.
    assert!(matches!(
        set_target(&mut persistence, firm_id, Some(999), 2024, 1.0),
        Err(ApiError::ResourceNotFound { .. })
    ));
}

#[test]
fn test_get_missing_target_is_not_found() {
    let mut persistence: Persistence = create_test_persistence();
    let firm_id: i64 = register_test_firm(&mut persistence);

    let result = handlers::get_revenue_target(&mut persistence, 2024, firm_id, None);
    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_firm_wide_and_department_targets_are_separate() {
    let mut persistence: Persistence = create_test_persistence();
    let firm_id: i64 = register_test_firm(&mut persistence);
    let department_id: i64 = create_test_department(&mut persistence, firm_id);

    set_target(&mut persistence, firm_id, None, 2024, 2_400_000.0).unwrap();
    set_target(
        &mut persistence,
        firm_id,
        Some(department_id),
        2024,
        1_200_000.0,
    )
    .unwrap();

    let firm_wide: GetRevenueTargetResponse =
        handlers::get_revenue_target(&mut persistence, 2024, firm_id, None).unwrap();
    let scoped: GetRevenueTargetResponse =
        handlers::get_revenue_target(&mut persistence, 2024, firm_id, Some(department_id))
            .unwrap();

    assert!((firm_wide.yearly_target - 2_400_000.0).abs() < 1e-6);
    assert!((scoped.yearly_target - 1_200_000.0).abs() < 1e-6);
}
