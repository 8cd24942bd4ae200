// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Append-only points ledger.
//!
//! Entries are never updated or deleted. Corrections are compensating
//! entries, which may carry negative points.

use challenge_audit::AuditEvent;
use challenge_domain::{NewPointsEntry, PointsEntry};
use diesel::SqliteConnection;
use diesel::prelude::*;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::data_models::{PointsEntryRow, format_timestamp};
use crate::diesel_schema::points_ledger;
use crate::error::PersistenceError;
use crate::mutations::audit::persist_audit_event;
use crate::queries::participants::get_participant;

/// Appends one entry to the ledger.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `entry` - The entry to append
/// * `task_completion_id` - The completion that produced the entry, if any
/// * `now` - The creation instant
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn append_points(
    conn: &mut SqliteConnection,
    entry: &NewPointsEntry,
    task_completion_id: Option<i64>,
    now: OffsetDateTime,
) -> Result<PointsEntry, PersistenceError> {
    let row: PointsEntryRow = diesel::insert_into(points_ledger::table)
        .values((
            points_ledger::user_id.eq(entry.user_id),
            points_ledger::points_earned.eq(entry.points_earned),
            points_ledger::activity_type.eq(&entry.activity_type),
            points_ledger::description.eq(&entry.description),
            points_ledger::task_completion_id.eq(task_completion_id),
            points_ledger::created_at.eq(format_timestamp(now)?),
        ))
        .returning(PointsEntryRow::as_returning())
        .get_result(conn)?;

    debug!(
        user_id = entry.user_id,
        points = entry.points_earned,
        activity_type = %entry.activity_type,
        "Appended points entry"
    );

    row.into_domain()
}

/// Appends an admin adjustment together with its audit event.
///
/// # Errors
///
/// Returns `UserNotFound` if the user is not enrolled, or an error if either
/// insert fails. Nothing is written on failure.
pub fn append_adjustment(
    conn: &mut SqliteConnection,
    entry: &NewPointsEntry,
    now: OffsetDateTime,
    event: &AuditEvent,
) -> Result<PointsEntry, PersistenceError> {
    conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        if get_participant(conn, entry.user_id)?.is_none() {
            return Err(PersistenceError::UserNotFound(entry.user_id));
        }

        let appended: PointsEntry = append_points(conn, entry, None, now)?;
        persist_audit_event(conn, event, now)?;

        info!(
            user_id = entry.user_id,
            points = entry.points_earned,
            "Recorded points adjustment"
        );

        Ok(appended)
    })
}
