// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use challenge_domain::Participant;
use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::ParticipantRow;
use crate::diesel_schema::user_challenge_progress;
use crate::error::PersistenceError;

/// Lists participants whose enrollment is active, in enrollment order.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn active_participants(
    conn: &mut SqliteConnection,
) -> Result<Vec<Participant>, PersistenceError> {
    user_challenge_progress::table
        .filter(user_challenge_progress::is_active.eq(1))
        .order(user_challenge_progress::progress_id.asc())
        .select(ParticipantRow::as_select())
        .load(conn)?
        .into_iter()
        .map(ParticipantRow::into_domain)
        .collect()
}

/// Retrieves a participant by user ID.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_participant(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Option<Participant>, PersistenceError> {
    user_challenge_progress::table
        .filter(user_challenge_progress::user_id.eq(user_id))
        .select(ParticipantRow::as_select())
        .first(conn)
        .optional()?
        .map(ParticipantRow::into_domain)
        .transpose()
}
