// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! End-to-end allocation tests running the core allocator against the
//! real `SQLite`-backed stores.

use time::macros::date;

use docket::{AllocationOutcome, AllocationRequest, AllocationResult, allocate_case_number};
use docket_domain::{Case, CaseCategory, CaseNumber};

use crate::Persistence;
use crate::tests::{
    create_test_actor, create_test_cause, create_test_clock, create_test_persistence,
    setup_firm_and_department,
};

fn allocate(
    persistence: &mut Persistence,
    firm_id: i64,
    department_id: i64,
    escalated: bool,
) -> AllocationResult {
    allocate_case_number(
        persistence,
        &create_test_clock(),
        create_test_actor(),
        create_test_cause(),
        &AllocationRequest {
            firm_id,
            department_id,
            escalated,
        },
    )
    .unwrap()
}

fn persist_allocated(
    persistence: &mut Persistence,
    result: &AllocationResult,
    firm_id: i64,
    department_id: i64,
) {
    let case: Case = Case::new(
        result.outcome.case_number().clone(),
        firm_id,
        department_id,
        CaseCategory::Credit,
        false,
        None,
        date!(2026 - 03 - 15),
    );
    persistence.insert_case(&case).unwrap();
}

#[test]
fn test_sequential_allocation_against_sqlite() {
    let mut persistence: Persistence = create_test_persistence();
    let (firm_id, department_id) = setup_firm_and_department(&mut persistence);

    for expected in 1..=3_u64 {
        let result: AllocationResult = allocate(&mut persistence, firm_id, department_id, false);
        match &result.outcome {
            AllocationOutcome::Sequential {
                case_number,
                sequence,
            } => {
                assert_eq!(*sequence, expected);
                assert_eq!(
                    case_number.value(),
                    format!("ACM-COL-2026-{expected:04}")
                );
            }
            AllocationOutcome::Fallback { .. } => panic!("Expected sequential outcome"),
        }
        persist_allocated(&mut persistence, &result, firm_id, department_id);
    }
}

#[test]
fn test_seeding_from_persisted_cases() {
    let mut persistence: Persistence = create_test_persistence();
    let (firm_id, department_id) = setup_firm_and_department(&mut persistence);

    // Pre-existing data without a counter record, as after a counter
    // store reset or an out-of-band import.
    let imported: Case = Case::new(
        CaseNumber::sequential("ACM-COL", 2026, 7),
        firm_id,
        department_id,
        CaseCategory::Credit,
        false,
        None,
        date!(2026 - 01 - 02),
    );
    persistence.insert_case(&imported).unwrap();

    let result: AllocationResult = allocate(&mut persistence, firm_id, department_id, false);
    assert_eq!(
        result.outcome.case_number().value(),
        "ACM-COL-2026-0008"
    );
}

#[test]
fn test_missing_department_falls_back() {
    let mut persistence: Persistence = create_test_persistence();
    let (firm_id, _) = setup_firm_and_department(&mut persistence);

    let result: AllocationResult = allocate(&mut persistence, firm_id, 999, false);

    match &result.outcome {
        AllocationOutcome::Fallback { case_number, .. } => {
            assert!(case_number.is_fallback());
        }
        AllocationOutcome::Sequential { .. } => panic!("Expected fallback outcome"),
    }
}

#[test]
fn test_escalated_sequence_runs_its_own_counter() {
    let mut persistence: Persistence = create_test_persistence();
    let (firm_id, department_id) = setup_firm_and_department(&mut persistence);

    let normal: AllocationResult = allocate(&mut persistence, firm_id, department_id, false);
    persist_allocated(&mut persistence, &normal, firm_id, department_id);

    // The escalated counter seeds from the rendered prefix pattern, which
    // spans both sequences, so it starts past the persisted 0001.
    let escalated: AllocationResult = allocate(&mut persistence, firm_id, department_id, true);
    assert_eq!(
        escalated.outcome.case_number().value(),
        "ACM-COL-2026-0002"
    );

    assert_eq!(
        persistence.fetch_counter("2026:ACM-COL:1:1:N").unwrap(),
        Some(1)
    );
    assert_eq!(
        persistence.fetch_counter("2026:ACM-COL:1:1:E").unwrap(),
        Some(2)
    );
}

#[test]
fn test_collision_with_persisted_case_retries() {
    let mut persistence: Persistence = create_test_persistence();
    let (firm_id, department_id) = setup_firm_and_department(&mut persistence);

    // Stale counter: a case holds 0001 but the counter still reads 0.
    use crate::mutations::counters::seed_counter;
    seed_counter(&mut persistence.conn, "2026:ACM-COL:1:1:N", 2026, 0).unwrap();
    let taken: Case = Case::new(
        CaseNumber::sequential("ACM-COL", 2026, 1),
        firm_id,
        department_id,
        CaseCategory::Credit,
        false,
        None,
        date!(2026 - 01 - 02),
    );
    persistence.insert_case(&taken).unwrap();

    let result: AllocationResult = allocate(&mut persistence, firm_id, department_id, false);
    assert_eq!(
        result.outcome.case_number().value(),
        "ACM-COL-2026-0002"
    );
}

#[test]
fn test_case_number_unique_constraint_is_the_backstop() {
    let mut persistence: Persistence = create_test_persistence();
    let (firm_id, department_id) = setup_firm_and_department(&mut persistence);

    let case: Case = Case::new(
        CaseNumber::sequential("ACM-COL", 2026, 1),
        firm_id,
        department_id,
        CaseCategory::Credit,
        false,
        None,
        date!(2026 - 03 - 15),
    );
    persistence.insert_case(&case).unwrap();
    assert!(persistence.insert_case(&case).is_err());
}

#[test]
fn test_case_round_trip() {
    let mut persistence: Persistence = create_test_persistence();
    let (firm_id, department_id) = setup_firm_and_department(&mut persistence);

    let origin: CaseNumber = CaseNumber::sequential("ACM-COL", 2026, 1);
    let case: Case = Case::new(
        CaseNumber::sequential("ACM-COL", 2026, 2),
        firm_id,
        department_id,
        CaseCategory::Legal,
        true,
        Some(origin.clone()),
        date!(2026 - 03 - 15),
    );
    let case_id: i64 = persistence.insert_case(&case).unwrap();

    let loaded: Case = persistence.get_case("ACM-COL-2026-0002").unwrap();
    assert_eq!(loaded.case_id, Some(case_id));
    assert_eq!(loaded.category, CaseCategory::Legal);
    assert!(loaded.escalated);
    assert_eq!(loaded.origin_case_number, Some(origin));
    assert_eq!(loaded.opened_on, date!(2026 - 03 - 15));
}

#[test]
fn test_allocation_audit_event_survives_persistence() {
    let mut persistence: Persistence = create_test_persistence();
    let (firm_id, department_id) = setup_firm_and_department(&mut persistence);

    let result: AllocationResult = allocate(&mut persistence, firm_id, department_id, false);
    let event_id: i64 = persistence.persist_audit_event(&result.audit_event).unwrap();

    let loaded = persistence.get_audit_event(event_id).unwrap();
    assert_eq!(loaded, result.audit_event);
}
