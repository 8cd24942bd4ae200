// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Task definitions and idempotent task completion.
//!
//! A completion is keyed by `(user_id, task_definition_id, challenge_day)`.
//! The unique key is the arbiter: the insert uses `INSERT OR IGNORE`, and an
//! ignored insert means the completion already exists. The points award is
//! written in the same transaction as the completion row, so a key never
//! has a completion without its ledger entry or the reverse.

use challenge_audit::AuditEvent;
use challenge_domain::{
    CompletionOutcome, CompletionRequest, NewPointsEntry, TaskDefinition, validate_challenge_day,
};
use diesel::SqliteConnection;
use diesel::prelude::*;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::{day_to_column, format_timestamp};
use crate::diesel_schema::{task_completions, task_definitions};
use crate::error::PersistenceError;
use crate::mutations::audit::persist_audit_event;
use crate::mutations::points::append_points;
use crate::queries::participants::get_participant;
use crate::queries::tasks::get_task_definition;

/// Creates a task definition.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_task_definition(
    conn: &mut SqliteConnection,
    name: &str,
    point_value: i64,
) -> Result<TaskDefinition, PersistenceError> {
    diesel::insert_into(task_definitions::table)
        .values((
            task_definitions::name.eq(name),
            task_definitions::point_value.eq(point_value),
        ))
        .execute(conn)?;

    let task_definition_id: i64 = conn.get_last_insert_rowid()?;
    info!(task_definition_id, point_value, "Created task definition");

    get_task_definition(conn, task_definition_id)
}

/// Builds the ledger description for a completion.
fn completion_description(task: &TaskDefinition, request: &CompletionRequest) -> String {
    let mut description: String = match request.actor.admin_id() {
        Some(admin_id) => format!(
            "Admin {admin_id} recorded '{}' for day {}",
            task.name, request.challenge_day
        ),
        None => format!("Completed '{}' on day {}", task.name, request.challenge_day),
    };

    if let Some(notes) = request.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        description.push_str(": ");
        description.push_str(notes);
    }

    description
}

/// Records a task completion and awards its points exactly once.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `request` - The completion to record
/// * `now` - The completion instant
/// * `event` - Audit event for admin completions; written only when a new
///   completion is recorded
///
/// # Returns
///
/// `Completed` with the awarded points on first insert, or
/// `AlreadyCompleted` with zero points when the key already exists.
///
/// # Errors
///
/// Returns `DomainViolation` for a zero challenge day, `TaskNotFound` or
/// `UserNotFound` for unknown references, or a database error.
pub fn complete_task(
    conn: &mut SqliteConnection,
    request: &CompletionRequest,
    now: OffsetDateTime,
    event: Option<&AuditEvent>,
) -> Result<CompletionOutcome, PersistenceError> {
    validate_challenge_day(request.challenge_day)?;
    let challenge_day: i32 = day_to_column("challenge_day", request.challenge_day)?;
    let now_text: String = format_timestamp(now)?;

    conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        let task: TaskDefinition = get_task_definition(conn, request.task_definition_id)?;
        if get_participant(conn, request.user_id)?.is_none() {
            return Err(PersistenceError::UserNotFound(request.user_id));
        }

        let inserted: usize = diesel::insert_or_ignore_into(task_completions::table)
            .values((
                task_completions::user_id.eq(request.user_id),
                task_completions::task_definition_id.eq(request.task_definition_id),
                task_completions::challenge_day.eq(challenge_day),
                task_completions::completed_at.eq(&now_text),
                task_completions::notes.eq(request.notes.as_deref()),
                task_completions::actor_kind.eq(request.actor.as_str()),
                task_completions::actor_id.eq(request.actor.admin_id()),
            ))
            .execute(conn)?;

        if inserted == 0 {
            debug!(
                user_id = request.user_id,
                task_definition_id = request.task_definition_id,
                challenge_day = request.challenge_day,
                "Task already completed"
            );
            return Ok(CompletionOutcome::already_completed());
        }

        let task_completion_id: i64 = conn.get_last_insert_rowid()?;

        let entry: NewPointsEntry = NewPointsEntry {
            user_id: request.user_id,
            points_earned: task.point_value,
            activity_type: request.actor.activity_type().to_string(),
            description: completion_description(&task, request),
        };
        append_points(conn, &entry, Some(task_completion_id), now)?;

        if let Some(event) = event {
            persist_audit_event(conn, event, now)?;
        }

        info!(
            user_id = request.user_id,
            task_definition_id = request.task_definition_id,
            challenge_day = request.challenge_day,
            actor = request.actor.as_str(),
            points = task.point_value,
            "Recorded task completion"
        );

        Ok(CompletionOutcome::completed(task.point_value))
    })
}
