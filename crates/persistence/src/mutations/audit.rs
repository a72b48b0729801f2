// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event persistence.
//!
//! Events are stored as JSON columns so the audit trail survives schema
//! evolution of the in-memory types.

use diesel::prelude::*;
use diesel::SqliteConnection;
use time::OffsetDateTime;
use tracing::debug;

use docket_audit::AuditEvent;

use crate::backend::get_last_insert_rowid;
use crate::data_models::{ActionData, ActorData, CauseData, SubjectData};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Persists an audit event and returns its event ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event` - The audit event to persist
///
/// # Errors
///
/// Returns an error if serialization or the insert fails.
pub fn persist_audit_event(
    conn: &mut SqliteConnection,
    event: &AuditEvent,
) -> Result<i64, PersistenceError> {
    let actor_json: String = serde_json::to_string(&ActorData::from(&event.actor))?;
    let cause_json: String = serde_json::to_string(&CauseData::from(&event.cause))?;
    let action_json: String = serde_json::to_string(&ActionData::from(&event.action))?;
    let subject_json: String = serde_json::to_string(&SubjectData::from(&event.subject))?;
    let created_at: String = OffsetDateTime::now_utc().to_string();

    diesel::insert_into(audit_events::table)
        .values((
            audit_events::actor_json.eq(&actor_json),
            audit_events::cause_json.eq(&cause_json),
            audit_events::action_json.eq(&action_json),
            audit_events::subject_json.eq(&subject_json),
            audit_events::created_at.eq(Some(&created_at)),
        ))
        .execute(conn)?;

    let event_id: i64 = get_last_insert_rowid(conn)?;
    debug!(event_id, action = event.action.name.as_str(), "Persisted audit event");
    Ok(event_id)
}
