// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Challenge configuration queries.

use challenge_domain::ChallengeConfig;
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::ChallengeRow;
use crate::diesel_schema::challenge_config;
use crate::error::PersistenceError;

/// Retrieves the single active challenge, if any.
///
/// The partial unique index on `is_active` guarantees at most one row.
///
/// # Errors
///
/// Returns an error if the query fails or a stored value cannot be decoded.
pub fn get_active_challenge(
    conn: &mut SqliteConnection,
) -> Result<Option<ChallengeConfig>, PersistenceError> {
    let row: Option<ChallengeRow> = challenge_config::table
        .filter(challenge_config::is_active.eq(1))
        .select(ChallengeRow::as_select())
        .first(conn)
        .optional()?;

    debug!(found = row.is_some(), "Looked up active challenge");

    row.map(ChallengeRow::into_domain).transpose()
}

/// Retrieves a challenge by ID.
///
/// # Errors
///
/// Returns `ChallengeNotFound` if no such challenge exists, or an error if
/// the query fails.
pub fn get_challenge(
    conn: &mut SqliteConnection,
    challenge_id: i64,
) -> Result<ChallengeConfig, PersistenceError> {
    let row: Option<ChallengeRow> = challenge_config::table
        .filter(challenge_config::challenge_id.eq(challenge_id))
        .select(ChallengeRow::as_select())
        .first(conn)
        .optional()?;

    row.ok_or(PersistenceError::ChallengeNotFound(challenge_id))?
        .into_domain()
}

/// Counts challenges currently flagged active.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_active_challenges(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(challenge_config::table
        .filter(challenge_config::is_active.eq(1))
        .count()
        .get_result(conn)?)
}
