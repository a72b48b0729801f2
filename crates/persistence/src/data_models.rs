// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Serialization models for persisted audit events.
//!
//! Audit events are stored as JSON columns. These data transfer structs
//! mirror the audit crate's types so the persistence format is decoupled
//! from the in-memory representation.

use docket_audit::{Action, Actor, AuditSubject, Cause};
use serde::{Deserialize, Serialize};

/// Serialized form of an audit actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    /// The actor's unique identifier.
    pub id: String,
    /// The actor's type.
    pub actor_type: String,
}

impl From<&Actor> for ActorData {
    fn from(actor: &Actor) -> Self {
        Self {
            id: actor.id.clone(),
            actor_type: actor.actor_type.clone(),
        }
    }
}

impl From<ActorData> for Actor {
    fn from(data: ActorData) -> Self {
        Self::new(data.id, data.actor_type)
    }
}

/// Serialized form of an audit cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseData {
    /// The cause's unique identifier.
    pub id: String,
    /// The cause description.
    pub description: String,
}

impl From<&Cause> for CauseData {
    fn from(cause: &Cause) -> Self {
        Self {
            id: cause.id.clone(),
            description: cause.description.clone(),
        }
    }
}

impl From<CauseData> for Cause {
    fn from(data: CauseData) -> Self {
        Self::new(data.id, data.description)
    }
}

/// Serialized form of an audit action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    /// The action name.
    pub name: String,
    /// Optional action details.
    pub details: Option<String>,
}

impl From<&Action> for ActionData {
    fn from(action: &Action) -> Self {
        Self {
            name: action.name.clone(),
            details: action.details.clone(),
        }
    }
}

impl From<ActionData> for Action {
    fn from(data: ActionData) -> Self {
        Self::new(data.name, data.details)
    }
}

/// Serialized form of an audit subject.
///
/// Tagged so stored payloads remain self-describing when inspected with
/// plain SQL tooling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum SubjectData {
    /// A case number allocation.
    CaseNumbering {
        /// The composite counter key, if a partition was derived.
        partition: Option<String>,
        /// Counter value before the allocation.
        sequence_before: Option<u64>,
        /// Counter value after the allocation.
        sequence_after: Option<u64>,
        /// The issued case number.
        case_number: String,
        /// Whether a fallback identifier was issued.
        fallback: bool,
    },
    /// A revenue target change.
    RevenueTargeting {
        /// The target year.
        year: u16,
        /// Human-readable scope description.
        scope: String,
        /// The previous yearly amount.
        yearly_target_before: Option<f64>,
        /// The new yearly amount.
        yearly_target_after: f64,
    },
    /// A firm or department registration.
    Registry {
        /// The entity kind.
        entity: String,
        /// The entity's identifying code or prefix.
        identifier: String,
    },
}

impl From<&AuditSubject> for SubjectData {
    fn from(subject: &AuditSubject) -> Self {
        match subject {
            AuditSubject::CaseNumbering {
                partition,
                sequence_before,
                sequence_after,
                case_number,
                fallback,
            } => Self::CaseNumbering {
                partition: partition.clone(),
                sequence_before: *sequence_before,
                sequence_after: *sequence_after,
                case_number: case_number.clone(),
                fallback: *fallback,
            },
            AuditSubject::RevenueTargeting {
                year,
                scope,
                yearly_target_before,
                yearly_target_after,
            } => Self::RevenueTargeting {
                year: *year,
                scope: scope.clone(),
                yearly_target_before: *yearly_target_before,
                yearly_target_after: *yearly_target_after,
            },
            AuditSubject::Registry { entity, identifier } => Self::Registry {
                entity: entity.clone(),
                identifier: identifier.clone(),
            },
        }
    }
}

impl From<SubjectData> for AuditSubject {
    fn from(data: SubjectData) -> Self {
        match data {
            SubjectData::CaseNumbering {
                partition,
                sequence_before,
                sequence_after,
                case_number,
                fallback,
            } => Self::CaseNumbering {
                partition,
                sequence_before,
                sequence_after,
                case_number,
                fallback,
            },
            SubjectData::RevenueTargeting {
                year,
                scope,
                yearly_target_before,
                yearly_target_after,
            } => Self::RevenueTargeting {
                year,
                scope,
                yearly_target_before,
                yearly_target_after,
            },
            SubjectData::Registry { entity, identifier } => Self::Registry { entity, identifier },
        }
    }
}
