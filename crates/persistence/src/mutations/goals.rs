// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use challenge_domain::{GoalTargets, validate_goal_targets};
use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::upsert::excluded;
use time::OffsetDateTime;
use tracing::info;

use crate::data_models::format_timestamp;
use crate::diesel_schema::user_challenge_goals;
use crate::error::PersistenceError;

/// Inserts or replaces a user's goal targets.
///
/// Only targets are stored; current values are always computed.
///
/// # Errors
///
/// Returns `DomainViolation` for negative or non-finite targets, or a
/// database error.
pub fn upsert_goals(
    conn: &mut SqliteConnection,
    user_id: i64,
    targets: &GoalTargets,
    now: OffsetDateTime,
) -> Result<(), PersistenceError> {
    validate_goal_targets(targets)?;

    diesel::insert_into(user_challenge_goals::table)
        .values((
            user_challenge_goals::user_id.eq(user_id),
            user_challenge_goals::leads_goal.eq(targets.leads_goal),
            user_challenge_goals::events_goal.eq(targets.events_goal),
            user_challenge_goals::revenue_goal.eq(targets.revenue_goal),
            user_challenge_goals::updated_at.eq(format_timestamp(now)?),
        ))
        .on_conflict(user_challenge_goals::user_id)
        .do_update()
        .set((
            user_challenge_goals::leads_goal.eq(excluded(user_challenge_goals::leads_goal)),
            user_challenge_goals::events_goal.eq(excluded(user_challenge_goals::events_goal)),
            user_challenge_goals::revenue_goal.eq(excluded(user_challenge_goals::revenue_goal)),
            user_challenge_goals::updated_at.eq(excluded(user_challenge_goals::updated_at)),
        ))
        .execute(conn)?;

    info!(user_id, "Saved goal targets");
    Ok(())
}
