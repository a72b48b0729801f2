// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Sequential case number allocation.
//!
//! Produces a unique, formatted case number for a new case, safe under
//! concurrent creation against the same partition. Sequential numbering is
//! best-effort: missing firm or department metadata, and exhausted
//! collision retries, degrade to a timestamp-based fallback identifier
//! rather than failing case creation. A failing counter or case store is a
//! hard error; the allocator never guesses a number.

use time::OffsetDateTime;
use tracing::{debug, warn};

use docket_audit::{Action, Actor, AuditEvent, AuditSubject, Cause};
use docket_domain::{CaseNumber, DomainError, PartitionKey};

use crate::clock::Clock;
use crate::error::CoreError;
use crate::stores::{CaseDirectory, CounterStore, NumberingDirectory, NumberingMetadata};

/// Maximum attempts at issuing a collision-free sequential number before
/// the allocator gives up and issues a fallback identifier.
pub const MAX_ALLOCATION_RETRIES: u32 = 5;

/// Alphabet for the fallback identifier's random suffix.
const FALLBACK_ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of the fallback identifier's random suffix.
const FALLBACK_SUFFIX_LEN: usize = 5;

/// A request to number a new case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationRequest {
    /// The firm's canonical identifier.
    pub firm_id: i64,
    /// The department's canonical identifier.
    pub department_id: i64,
    /// Whether the case draws from the escalated sequence.
    pub escalated: bool,
}

/// Why the allocator fell back to a timestamp-based identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// The firm or department could not be resolved.
    MissingNumberingMetadata,
    /// Every retry collided with an existing case number.
    RetriesExhausted,
}

/// The number issued by an allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocationOutcome {
    /// A sequential number was issued from the partition's counter.
    Sequential {
        /// The issued case number.
        case_number: CaseNumber,
        /// The sequence value behind the number.
        sequence: u64,
    },
    /// A fallback identifier was issued.
    Fallback {
        /// The issued case number.
        case_number: CaseNumber,
        /// Why sequential numbering was abandoned.
        reason: FallbackReason,
    },
}

impl AllocationOutcome {
    /// Returns the issued case number.
    #[must_use]
    pub const fn case_number(&self) -> &CaseNumber {
        match self {
            Self::Sequential { case_number, .. } | Self::Fallback { case_number, .. } => {
                case_number
            }
        }
    }
}

/// The result of a successful allocation.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationResult {
    /// The issued number and how it was produced.
    pub outcome: AllocationOutcome,
    /// The audit event recording this allocation.
    pub audit_event: AuditEvent,
}

/// Allocates a case number for a new case.
///
/// The algorithm:
/// 1. Derives the year partition from the injected clock.
/// 2. Resolves firm and department numbering metadata; if either is
///    missing, returns a fallback identifier immediately.
/// 3. Lazily seeds the partition's counter from the highest sequence
///    already persisted for the prefix and year, using an atomic
///    insert-if-absent so racing seeders cannot double-initialize.
/// 4. Atomically increments the counter, formats the candidate, and
///    verifies no existing case holds it. Collisions retry the increment,
///    up to [`MAX_ALLOCATION_RETRIES`] total attempts.
/// 5. Exhausted retries produce a fallback identifier and a warning-level
///    diagnostic, since they signal the counter and case records have
///    diverged.
///
/// Side effects are bounded: at most one counter record is mutated, and
/// no case record is written.
///
/// # Arguments
///
/// * `store` - The persistent collaborators (counter, case directory,
///   numbering directory)
/// * `clock` - The time source for year derivation and fallback stamps
/// * `actor` - The actor performing the allocation
/// * `cause` - The reason for the allocation
/// * `request` - The firm, department, and escalation scope
///
/// # Errors
///
/// Returns `CoreError::Store` if a collaborator fails; missing metadata
/// and collision exhaustion are recovered locally and are not errors.
/// Returns `CoreError::DomainViolation` if the clock reports a year that
/// cannot be represented.
pub fn allocate_case_number<S>(
    store: &mut S,
    clock: &dyn Clock,
    actor: Actor,
    cause: Cause,
    request: &AllocationRequest,
) -> Result<AllocationResult, CoreError>
where
    S: CounterStore + CaseDirectory + NumberingDirectory,
{
    let now: OffsetDateTime = clock.now_utc();
    let year: u16 = u16::try_from(now.year())
        .map_err(|_| DomainError::CaseYearOutOfRange { year: now.year() })?;

    let metadata: Option<NumberingMetadata> =
        store.numbering_metadata(request.firm_id, request.department_id)?;

    let Some(metadata) = metadata else {
        debug!(
            firm_id = request.firm_id,
            department_id = request.department_id,
            "Numbering metadata missing; issuing fallback identifier"
        );
        return Ok(fallback_result(
            actor,
            cause,
            None,
            FallbackReason::MissingNumberingMetadata,
            now,
        ));
    };

    let partition: PartitionKey = PartitionKey::new(
        year,
        &metadata.firm_prefix,
        &metadata.department_code,
        request.firm_id,
        request.department_id,
        request.escalated,
    );
    let key: String = partition.storage_key();

    // Lazy seeding: a missing counter is initialized from the highest
    // sequence already persisted for this prefix and year, so a reset
    // counter store or imported data never causes re-numbering from 1.
    let sequence_before: Option<u64> = store.fetch(&key)?;
    if sequence_before.is_none() {
        let seed: u64 = store
            .highest_sequence(partition.prefix(), year)?
            .unwrap_or(0);
        store.insert_if_absent(&key, seed)?;
        debug!(partition = %key, seed, "Seeded counter");
    }

    let mut issued: Option<(u64, CaseNumber)> = None;
    for attempt in 1..=MAX_ALLOCATION_RETRIES {
        let sequence: u64 = store.increment_and_get(&key)?;
        let candidate: CaseNumber = CaseNumber::sequential(partition.prefix(), year, sequence);

        if store.case_number_exists(candidate.value())? {
            debug!(
                partition = %key,
                candidate = candidate.value(),
                attempt,
                "Case number collision; retrying"
            );
            continue;
        }

        issued = Some((sequence, candidate));
        break;
    }

    let Some((sequence, case_number)) = issued else {
        // Only reachable when the counter and case records have diverged,
        // for example after an incorrect reseed or an out-of-band import.
        warn!(
            partition = %key,
            attempts = MAX_ALLOCATION_RETRIES,
            "Sequential allocation exhausted retries; issuing fallback identifier"
        );

        return Ok(fallback_result(
            actor,
            cause,
            Some(&partition),
            FallbackReason::RetriesExhausted,
            now,
        ));
    };

    let subject: AuditSubject = AuditSubject::sequential_numbering(
        &partition,
        sequence_before,
        sequence,
        case_number.value().to_owned(),
    );
    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        Action::new(
            String::from("AllocateCaseNumber"),
            Some(format!("Sequential number for partition {key}")),
        ),
        subject,
    );

    Ok(AllocationResult {
        outcome: AllocationOutcome::Sequential {
            case_number,
            sequence,
        },
        audit_event,
    })
}

/// Builds the fallback outcome and its audit event.
fn fallback_result(
    actor: Actor,
    cause: Cause,
    partition: Option<&PartitionKey>,
    reason: FallbackReason,
    now: OffsetDateTime,
) -> AllocationResult {
    let timestamp_millis: i128 = now.unix_timestamp_nanos() / 1_000_000;
    let case_number: CaseNumber = CaseNumber::fallback(timestamp_millis, &fallback_suffix());

    let details: String = match reason {
        FallbackReason::MissingNumberingMetadata => {
            String::from("Firm or department metadata unavailable")
        }
        FallbackReason::RetriesExhausted => {
            format!("All {MAX_ALLOCATION_RETRIES} sequential attempts collided")
        }
    };

    let subject: AuditSubject =
        AuditSubject::fallback_numbering(partition, case_number.value().to_owned());
    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        Action::new(String::from("AllocateCaseNumber"), Some(details)),
        subject,
    );

    AllocationResult {
        outcome: AllocationOutcome::Fallback {
            case_number,
            reason,
        },
        audit_event,
    }
}

/// Draws a 5-character alphanumeric suffix for a fallback identifier.
fn fallback_suffix() -> String {
    let mut value: u64 = rand::random::<u64>();
    let mut suffix: String = String::with_capacity(FALLBACK_SUFFIX_LEN);
    for _ in 0..FALLBACK_SUFFIX_LEN {
        let index: usize = usize::try_from(value % FALLBACK_ALPHABET.len() as u64).unwrap_or(0);
        suffix.push(char::from(FALLBACK_ALPHABET[index]));
        value /= FALLBACK_ALPHABET.len() as u64;
    }
    suffix
}
