// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use challenge_domain::GoalTargets;
use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::diesel_schema::user_challenge_goals;
use crate::error::PersistenceError;

/// Retrieves a user's goal targets, if any were saved.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_goals(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Option<GoalTargets>, PersistenceError> {
    let row: Option<(i64, i64, f64)> = user_challenge_goals::table
        .filter(user_challenge_goals::user_id.eq(user_id))
        .select((
            user_challenge_goals::leads_goal,
            user_challenge_goals::events_goal,
            user_challenge_goals::revenue_goal,
        ))
        .first(conn)
        .optional()?;

    Ok(row.map(|(leads_goal, events_goal, revenue_goal)| GoalTargets {
        leads_goal,
        events_goal,
        revenue_goal,
    }))
}
