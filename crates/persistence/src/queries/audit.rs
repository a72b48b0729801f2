// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event queries.

use diesel::prelude::*;
use diesel::SqliteConnection;

use docket_audit::{Action, Actor, AuditEvent, AuditSubject, Cause};

use crate::data_models::{ActionData, ActorData, CauseData, SubjectData};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

type EventRow = (i64, String, String, String, String);

fn rebuild_event(row: EventRow) -> Result<(i64, AuditEvent), PersistenceError> {
    let (event_id, actor_json, cause_json, action_json, subject_json) = row;

    let actor: Actor = serde_json::from_str::<ActorData>(&actor_json)?.into();
    let cause: Cause = serde_json::from_str::<CauseData>(&cause_json)?.into();
    let action: Action = serde_json::from_str::<ActionData>(&action_json)?.into();
    let subject: AuditSubject = serde_json::from_str::<SubjectData>(&subject_json)?.into();

    Ok((event_id, AuditEvent::new(actor, cause, action, subject)))
}

/// Loads a single audit event by its event ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The event's canonical identifier
///
/// # Errors
///
/// Returns `PersistenceError::EventNotFound` if no event exists with the
/// ID, or a serialization error if a stored payload cannot be parsed.
pub fn get_audit_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<AuditEvent, PersistenceError> {
    let row: Option<EventRow> = audit_events::table
        .select((
            audit_events::event_id,
            audit_events::actor_json,
            audit_events::cause_json,
            audit_events::action_json,
            audit_events::subject_json,
        ))
        .filter(audit_events::event_id.eq(event_id))
        .first::<EventRow>(conn)
        .optional()?;

    let row: EventRow = row.ok_or(PersistenceError::EventNotFound(event_id))?;
    rebuild_event(row).map(|(_, event)| event)
}

/// Loads all audit events in insertion order.
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Errors
///
/// Returns an error if the query fails or a stored payload cannot be
/// parsed.
pub fn load_audit_events(
    conn: &mut SqliteConnection,
) -> Result<Vec<(i64, AuditEvent)>, PersistenceError> {
    let rows: Vec<EventRow> = audit_events::table
        .select((
            audit_events::event_id,
            audit_events::actor_json,
            audit_events::cause_json,
            audit_events::action_json,
            audit_events::subject_json,
        ))
        .order(audit_events::event_id.asc())
        .load::<EventRow>(conn)?;

    rows.into_iter().map(rebuild_event).collect()
}
