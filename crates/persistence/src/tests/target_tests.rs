// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use docket_domain::{MonthTarget, RevenueTarget};

use crate::Persistence;
use crate::tests::{create_test_persistence, setup_firm_and_department};

const EPSILON: f64 = 1e-6;

#[test]
fn test_upsert_creates_then_loads() {
    let mut persistence: Persistence = create_test_persistence();
    let (firm_id, department_id) = setup_firm_and_department(&mut persistence);

    let target: RevenueTarget =
        RevenueTarget::assemble(2024, firm_id, Some(department_id), 1_200_000.0);
    persistence.upsert_revenue_target(&target).unwrap();

    let loaded: RevenueTarget = persistence
        .get_revenue_target(2024, firm_id, Some(department_id))
        .unwrap()
        .unwrap();

    assert_eq!(loaded, target);
}

#[test]
fn test_missing_target_is_none() {
    let mut persistence: Persistence = create_test_persistence();
    let (firm_id, _) = setup_firm_and_department(&mut persistence);

    assert!(persistence
        .get_revenue_target(2024, firm_id, None)
        .unwrap()
        .is_none());
}

#[test]
fn test_upsert_replaces_breakdown_in_full() {
    let mut persistence: Persistence = create_test_persistence();
    let (firm_id, department_id) = setup_firm_and_department(&mut persistence);

    let original: RevenueTarget =
        RevenueTarget::assemble(2024, firm_id, Some(department_id), 1_200_000.0);
    let first_id: i64 = persistence.upsert_revenue_target(&original).unwrap();

    let replacement: RevenueTarget =
        RevenueTarget::assemble(2024, firm_id, Some(department_id), 600_000.0);
    let second_id: i64 = persistence.upsert_revenue_target(&replacement).unwrap();

    // Same scope row, fully replaced breakdown.
    assert_eq!(first_id, second_id);

    let loaded: RevenueTarget = persistence
        .get_revenue_target(2024, firm_id, Some(department_id))
        .unwrap()
        .unwrap();
    assert!((loaded.yearly_target - 600_000.0).abs() < EPSILON);
    assert!((loaded.monthly_targets[0].target - 50_000.0).abs() < EPSILON);
}

#[test]
fn test_firm_wide_and_department_scopes_coexist() {
    let mut persistence: Persistence = create_test_persistence();
    let (firm_id, department_id) = setup_firm_and_department(&mut persistence);

    let firm_wide: RevenueTarget = RevenueTarget::assemble(2024, firm_id, None, 2_400_000.0);
    let scoped: RevenueTarget =
        RevenueTarget::assemble(2024, firm_id, Some(department_id), 1_200_000.0);
    persistence.upsert_revenue_target(&firm_wide).unwrap();
    persistence.upsert_revenue_target(&scoped).unwrap();

    let loaded_firm_wide: RevenueTarget = persistence
        .get_revenue_target(2024, firm_id, None)
        .unwrap()
        .unwrap();
    let loaded_scoped: RevenueTarget = persistence
        .get_revenue_target(2024, firm_id, Some(department_id))
        .unwrap()
        .unwrap();

    assert!((loaded_firm_wide.yearly_target - 2_400_000.0).abs() < EPSILON);
    assert!((loaded_scoped.yearly_target - 1_200_000.0).abs() < EPSILON);
}

#[test]
fn test_firm_wide_upserts_share_one_row() {
    let mut persistence: Persistence = create_test_persistence();
    let (firm_id, _) = setup_firm_and_department(&mut persistence);

    let first: RevenueTarget = RevenueTarget::assemble(2024, firm_id, None, 1_000_000.0);
    let second: RevenueTarget = RevenueTarget::assemble(2024, firm_id, None, 1_500_000.0);

    let first_id: i64 = persistence.upsert_revenue_target(&first).unwrap();
    let second_id: i64 = persistence.upsert_revenue_target(&second).unwrap();
    assert_eq!(first_id, second_id);
}

#[test]
fn test_loaded_breakdown_still_reconciles() {
    let mut persistence: Persistence = create_test_persistence();
    let (firm_id, department_id) = setup_firm_and_department(&mut persistence);

    let target: RevenueTarget =
        RevenueTarget::assemble(2024, firm_id, Some(department_id), 120_000.0);
    persistence.upsert_revenue_target(&target).unwrap();

    let loaded: RevenueTarget = persistence
        .get_revenue_target(2024, firm_id, Some(department_id))
        .unwrap()
        .unwrap();

    let month_sum: f64 = loaded.monthly_targets.iter().map(|m| m.target).sum();
    assert!((month_sum - 120_000.0).abs() < EPSILON);

    for month in &loaded.monthly_targets {
        let weekly_sum: f64 = month.weekly_targets.iter().map(|w| w.target).sum();
        let daily_sum: f64 = month.daily_targets().map(|d| d.target).sum();
        assert!((weekly_sum - month.target).abs() < EPSILON);
        assert!((daily_sum - month.target).abs() < EPSILON);
    }
}

#[test]
fn test_stored_amounts_are_not_rounded() {
    let mut persistence: Persistence = create_test_persistence();
    let (firm_id, department_id) = setup_firm_and_department(&mut persistence);

    // 100000 / 31 has no exact decimal representation; storage must keep
    // the full float rather than a currency-rounded value.
    let target: RevenueTarget =
        RevenueTarget::assemble(2024, firm_id, Some(department_id), 1_200_000.0);
    persistence.upsert_revenue_target(&target).unwrap();

    let loaded: RevenueTarget = persistence
        .get_revenue_target(2024, firm_id, Some(department_id))
        .unwrap()
        .unwrap();

    let january: &MonthTarget = &loaded.monthly_targets[0];
    let first_day: f64 = january
        .daily_targets()
        .next()
        .map(|d| d.target)
        .unwrap();
    assert!((first_day - 100_000.0 / 31.0).abs() < 1e-12);
}
