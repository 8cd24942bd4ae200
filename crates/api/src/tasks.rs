// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use challenge_domain::{CompletionActor, CompletionOutcome, CompletionRequest};
use challenge_persistence::Persistence;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::error::{ApiError, translate_persistence_error};
use crate::request_response::{CompleteTaskRequest, CompleteTaskResponse};

/// Records a participant's own task completion.
///
/// Repeating a completion for the same user, task, and day succeeds with
/// `AlreadyCompleted` and awards nothing.
///
/// # Errors
///
/// Returns an error if the user or task is unknown, the day is below 1, or
/// the write fails.
pub fn complete_task(
    persistence: &mut Persistence,
    request: CompleteTaskRequest,
    now: OffsetDateTime,
) -> Result<CompleteTaskResponse, ApiError> {
    let completion: CompletionRequest = CompletionRequest {
        user_id: request.user_id,
        task_definition_id: request.task_definition_id,
        challenge_day: request.challenge_day,
        notes: request.notes,
        actor: CompletionActor::System,
    };

    let outcome: CompletionOutcome = persistence
        .complete_task(&completion, now, None)
        .map_err(translate_persistence_error)?;

    if outcome.points_awarded > 0 {
        info!(
            user_id = completion.user_id,
            task_definition_id = completion.task_definition_id,
            challenge_day = completion.challenge_day,
            points = outcome.points_awarded,
            "Task completed"
        );
    } else {
        debug!(
            user_id = completion.user_id,
            task_definition_id = completion.task_definition_id,
            challenge_day = completion.challenge_day,
            status = ?outcome.status,
            "Task completion recorded without points"
        );
    }

    Ok(outcome.into())
}
