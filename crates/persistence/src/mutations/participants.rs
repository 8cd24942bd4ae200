// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Enrollment writes.
//!
//! Enrollment is owned by an external onboarding flow. These entry points
//! exist so that flow (and tests) can seed participants through the same
//! connection.

use challenge_domain::Participant;
use diesel::SqliteConnection;
use diesel::prelude::*;
use time::OffsetDateTime;
use tracing::info;

use crate::data_models::format_timestamp;
use crate::diesel_schema::user_challenge_progress;
use crate::error::PersistenceError;
use crate::queries::participants::get_participant;

/// Enrolls a user as an active participant.
///
/// # Errors
///
/// Returns `Conflict` if the user is already enrolled, or a database error.
pub fn enroll_user(
    conn: &mut SqliteConnection,
    user_id: i64,
    now: OffsetDateTime,
) -> Result<Participant, PersistenceError> {
    diesel::insert_into(user_challenge_progress::table)
        .values((
            user_challenge_progress::user_id.eq(user_id),
            user_challenge_progress::is_active.eq(1),
            user_challenge_progress::enrolled_at.eq(format_timestamp(now)?),
        ))
        .execute(conn)?;

    info!(user_id, "Enrolled participant");

    get_participant(conn, user_id)?.ok_or(PersistenceError::UserNotFound(user_id))
}

/// Sets whether an enrolled participant is active.
///
/// # Errors
///
/// Returns `UserNotFound` if the user is not enrolled, or a database error.
pub fn set_participant_active(
    conn: &mut SqliteConnection,
    user_id: i64,
    is_active: bool,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        user_challenge_progress::table.filter(user_challenge_progress::user_id.eq(user_id)),
    )
    .set(user_challenge_progress::is_active.eq(i32::from(is_active)))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::UserNotFound(user_id));
    }

    info!(user_id, is_active, "Updated participant status");
    Ok(())
}
