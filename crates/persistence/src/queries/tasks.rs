// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Task definition and completion queries.

use challenge_domain::{TaskCompletion, TaskDefinition};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::{TaskCompletionRow, TaskDefinitionRow, day_to_column};
use crate::diesel_schema::{task_completions, task_definitions};
use crate::error::PersistenceError;

/// Retrieves a task definition by ID.
///
/// # Errors
///
/// Returns `TaskNotFound` if no such task exists, or an error if the query
/// fails.
pub fn get_task_definition(
    conn: &mut SqliteConnection,
    task_definition_id: i64,
) -> Result<TaskDefinition, PersistenceError> {
    task_definitions::table
        .filter(task_definitions::task_definition_id.eq(task_definition_id))
        .select(TaskDefinitionRow::as_select())
        .first(conn)
        .optional()?
        .map(TaskDefinition::from)
        .ok_or(PersistenceError::TaskNotFound(task_definition_id))
}

/// Lists a user's completions ordered by day then insertion.
///
/// When `challenge_day` is given only that day's completions are returned.
///
/// # Errors
///
/// Returns an error if the query fails or a stored value cannot be decoded.
pub fn completions_for(
    conn: &mut SqliteConnection,
    user_id: i64,
    challenge_day: Option<u32>,
) -> Result<Vec<TaskCompletion>, PersistenceError> {
    let mut query = task_completions::table
        .filter(task_completions::user_id.eq(user_id))
        .into_boxed();

    if let Some(day) = challenge_day {
        let day: i32 = day_to_column("challenge_day", day)?;
        query = query.filter(task_completions::challenge_day.eq(day));
    }

    let rows: Vec<TaskCompletionRow> = query
        .order((
            task_completions::challenge_day.asc(),
            task_completions::task_completion_id.asc(),
        ))
        .select(TaskCompletionRow::as_select())
        .load(conn)?;

    debug!(user_id, count = rows.len(), "Loaded task completions");

    rows.into_iter().map(TaskCompletionRow::into_domain).collect()
}
