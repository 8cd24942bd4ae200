// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Admin override operations.
//!
//! Every operation resolves the caller's role through the authorization
//! port before touching persistence. A rejected caller causes no write and
//! no audit event.

use challenge_audit::{Action, Actor, AuditEvent, Cause};
use challenge_domain::{
    ChallengeConfig, ChallengePatch, CompletionActor, CompletionOutcome, CompletionRequest,
};
use challenge_persistence::{ChallengeWriteResult, Persistence};
use time::OffsetDateTime;
use tracing::info;

use crate::auth::{AuthenticatedActor, AuthorizationPort, AuthorizationService};
use crate::error::{ApiError, translate_persistence_error};
use crate::request_response::{
    ChallengeResponse, CompleteTaskRequest, CompleteTaskResponse, CreateChallengeRequest,
    SetChallengeDayRequest, UpdateChallengeRequest,
};

fn authorize<P: AuthorizationPort + ?Sized>(
    port: &P,
    actor_id: &str,
    action: &str,
) -> Result<Actor, ApiError> {
    let authenticated: AuthenticatedActor =
        AuthorizationService::authorize_admin(port, actor_id, action)?;
    Ok(authenticated.to_audit_actor())
}

/// Creates a new active challenge, deactivating any previous one.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `port` - The authorization port
/// * `actor_id` - The caller's identifier
/// * `request` - The challenge to create
/// * `cause` - The cause or reason for this action
/// * `now` - The request instant
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not an admin
/// - The name is empty or the range is inverted
/// - A concurrent create won the single-active race
pub fn create_challenge<P: AuthorizationPort + ?Sized>(
    persistence: &mut Persistence,
    port: &P,
    actor_id: &str,
    request: &CreateChallengeRequest,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ChallengeResponse, ApiError> {
    let actor: Actor = authorize(port, actor_id, "create_challenge")?;

    let action: Action = Action::new(
        String::from("CreateChallenge"),
        Some(format!("Created challenge '{}'", request.name)),
    );
    let event: AuditEvent = AuditEvent::new(actor, cause, action, None);

    let created: ChallengeConfig = persistence
        .create_challenge(&request.name, request.start_date, request.end_date, now, &event)
        .map_err(translate_persistence_error)?;

    info!(challenge_id = created.id, actor_id, "Admin created challenge");

    Ok(ChallengeResponse::from_config(created, true))
}

/// Ends a challenge now. Ending an already-ended challenge is a no-op.
///
/// # Errors
///
/// Returns an error if the caller is not an admin or the challenge does not
/// exist.
pub fn end_challenge<P: AuthorizationPort + ?Sized>(
    persistence: &mut Persistence,
    port: &P,
    actor_id: &str,
    challenge_id: i64,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ChallengeResponse, ApiError> {
    let actor: Actor = authorize(port, actor_id, "end_challenge")?;

    let action: Action = Action::new(String::from("EndChallenge"), None);
    let event: AuditEvent = AuditEvent::new(actor, cause, action, Some(challenge_id));

    let result: ChallengeWriteResult = persistence
        .end_challenge(challenge_id, now, &event)
        .map_err(translate_persistence_error)?;

    Ok(ChallengeResponse::from_config(result.config, result.changed))
}

/// Applies a partial update to a challenge.
///
/// # Errors
///
/// Returns an error if the caller is not an admin, the challenge does not
/// exist, or the resulting configuration is invalid.
pub fn update_challenge<P: AuthorizationPort + ?Sized>(
    persistence: &mut Persistence,
    port: &P,
    actor_id: &str,
    challenge_id: i64,
    request: UpdateChallengeRequest,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ChallengeResponse, ApiError> {
    let actor: Actor = authorize(port, actor_id, "update_challenge")?;

    let patch: ChallengePatch = request.into();
    let action: Action = Action::new(
        String::from("UpdateChallenge"),
        Some(describe_patch(&patch)),
    );
    let event: AuditEvent = AuditEvent::new(actor, cause, action, Some(challenge_id));

    let result: ChallengeWriteResult = persistence
        .update_challenge(challenge_id, &patch, now, &event)
        .map_err(translate_persistence_error)?;

    Ok(ChallengeResponse::from_config(result.config, result.changed))
}

fn describe_patch(patch: &ChallengePatch) -> String {
    let mut fields: Vec<&str> = Vec::new();
    if patch.name.is_some() {
        fields.push("name");
    }
    if patch.start_date.is_some() {
        fields.push("start_date");
    }
    if patch.end_date.is_some() {
        fields.push("end_date");
    }
    if patch.total_days.is_some() {
        fields.push("total_days");
    }
    format!("Updated fields: {}", fields.join(", "))
}

/// Overrides the stored current day.
///
/// The override holds until the next reconciliation run derives a
/// different day.
///
/// # Errors
///
/// Returns an error if the caller is not an admin, the challenge does not
/// exist, or the day lies outside `[1, total_days]`.
pub fn set_challenge_day<P: AuthorizationPort + ?Sized>(
    persistence: &mut Persistence,
    port: &P,
    actor_id: &str,
    challenge_id: i64,
    request: SetChallengeDayRequest,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ChallengeResponse, ApiError> {
    let actor: Actor = authorize(port, actor_id, "set_challenge_day")?;

    let action: Action = Action::new(
        String::from("SetChallengeDay"),
        Some(format!("Set current day to {}", request.day)),
    );
    let event: AuditEvent = AuditEvent::new(actor, cause, action, Some(challenge_id));

    let updated: ChallengeConfig = persistence
        .set_current_day(challenge_id, request.day, now, &event)
        .map_err(translate_persistence_error)?;

    Ok(ChallengeResponse::from_config(updated, true))
}

/// Records a task completion on behalf of a participant.
///
/// The completion row carries the admin as its actor and the audit event is
/// written only when a new completion is inserted.
///
/// # Errors
///
/// Returns an error if the caller is not an admin, the user or task is
/// unknown, or the day is invalid.
pub fn admin_complete_task<P: AuthorizationPort + ?Sized>(
    persistence: &mut Persistence,
    port: &P,
    actor_id: &str,
    request: CompleteTaskRequest,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<CompleteTaskResponse, ApiError> {
    let actor: Actor = authorize(port, actor_id, "admin_complete_task")?;

    let challenge_id: Option<i64> = persistence
        .get_active_challenge()
        .map_err(translate_persistence_error)?
        .map(|config| config.id);

    let details: String = request.notes.as_deref().map_or_else(
        || {
            format!(
                "Recorded task {} for user {} on day {}",
                request.task_definition_id, request.user_id, request.challenge_day
            )
        },
        |notes| {
            format!(
                "Recorded task {} for user {} on day {}: {notes}",
                request.task_definition_id, request.user_id, request.challenge_day
            )
        },
    );
    let action: Action = Action::new(String::from("AdminCompleteTask"), Some(details));
    let event: AuditEvent = AuditEvent::new(actor, cause, action, challenge_id);

    let completion: CompletionRequest = CompletionRequest {
        user_id: request.user_id,
        task_definition_id: request.task_definition_id,
        challenge_day: request.challenge_day,
        notes: request.notes,
        actor: CompletionActor::Admin {
            admin_id: actor_id.to_string(),
        },
    };

    let outcome: CompletionOutcome = persistence
        .complete_task(&completion, now, Some(&event))
        .map_err(translate_persistence_error)?;

    info!(
        actor_id,
        user_id = completion.user_id,
        task_definition_id = completion.task_definition_id,
        challenge_day = completion.challenge_day,
        status = ?outcome.status,
        "Admin recorded task completion"
    );

    Ok(outcome.into())
}
