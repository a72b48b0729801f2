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
    clippy::all
)]

use docket_domain::PartitionKey;

/// Represents the entity performing an action.
///
/// An actor is any identifiable entity that initiates a state change:
/// a staff member, a system process, or an automated trigger.
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g., "user", "system").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }
}

/// Represents the reason or trigger for an action.
#[derive(Debug, Clone, PartialEq)]
pub struct Cause {
    /// A unique identifier for this cause (e.g., request ID).
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this cause
    /// * `description` - A description of what triggered this action
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// Represents the specific action performed.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    /// The name of the action (e.g., "`OpenCase`", "`SetRevenueTarget`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the action
    /// * `details` - Optional additional details
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// The typed payload of an audit event.
///
/// Rather than opaque before/after snapshots, each event carries the facts
/// an investigation of that operation needs: for numbering events, the
/// counter movement; for targeting events, the target movement.
#[derive(Debug, Clone, PartialEq)]
pub enum AuditSubject {
    /// A case number was allocated.
    CaseNumbering {
        /// The composite counter key, when sequential numbering ran.
        /// `None` when metadata was missing and no partition was derived.
        partition: Option<String>,
        /// Counter value before the allocation, `None` if freshly seeded
        /// or if the fallback path skipped the counter entirely.
        sequence_before: Option<u64>,
        /// Counter value after the allocation, `None` on the fallback path.
        sequence_after: Option<u64>,
        /// The case number that was issued.
        case_number: String,
        /// Whether a fallback identifier was issued.
        fallback: bool,
    },
    /// A revenue target was created or replaced.
    RevenueTargeting {
        /// The target year.
        year: u16,
        /// Human-readable scope description.
        scope: String,
        /// The previous yearly amount, `None` on first creation.
        yearly_target_before: Option<f64>,
        /// The new yearly amount.
        yearly_target_after: f64,
    },
    /// A firm or department was registered.
    Registry {
        /// The entity kind ("firm" or "department").
        entity: String,
        /// The entity's identifying code or prefix.
        identifier: String,
    },
}

impl AuditSubject {
    /// Builds a numbering subject for a sequential allocation.
    ///
    /// # Arguments
    ///
    /// * `partition` - The partition key the counter ran under
    /// * `sequence_before` - Counter value observed before the increment
    /// * `sequence_after` - Counter value after the final increment
    /// * `case_number` - The issued case number
    #[must_use]
    pub fn sequential_numbering(
        partition: &PartitionKey,
        sequence_before: Option<u64>,
        sequence_after: u64,
        case_number: String,
    ) -> Self {
        Self::CaseNumbering {
            partition: Some(partition.storage_key()),
            sequence_before,
            sequence_after: Some(sequence_after),
            case_number,
            fallback: false,
        }
    }

    /// Builds a numbering subject for a fallback allocation.
    ///
    /// # Arguments
    ///
    /// * `partition` - The partition key, when one was derived
    /// * `case_number` - The issued fallback identifier
    #[must_use]
    pub fn fallback_numbering(partition: Option<&PartitionKey>, case_number: String) -> Self {
        Self::CaseNumbering {
            partition: partition.map(PartitionKey::storage_key),
            sequence_before: None,
            sequence_after: None,
            case_number,
            fallback: true,
        }
    }
}

/// An immutable audit event.
///
/// Every successful state-changing operation must produce exactly one
/// audit event. Events are immutable once created and capture who
/// performed the action, why, what was performed, and the typed subject
/// of the change.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEvent {
    /// The actor who initiated this change.
    pub actor: Actor,
    /// The cause or reason for this change.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The typed payload of the change.
    pub subject: AuditSubject,
}

impl AuditEvent {
    /// Creates a new `AuditEvent`.
    ///
    /// Once created, an audit event is immutable.
    ///
    /// # Arguments
    ///
    /// * `actor` - The actor who initiated the change
    /// * `cause` - The reason for the change
    /// * `action` - The action that was performed
    /// * `subject` - The typed payload of the change
    #[must_use]
    pub const fn new(actor: Actor, cause: Cause, action: Action, subject: AuditSubject) -> Self {
        Self {
            actor,
            cause,
            action,
            subject,
        }
    }
}
