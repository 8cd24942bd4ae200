// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use challenge_domain::PointsEntry;
use diesel::SqliteConnection;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::BigInt;

use crate::data_models::PointsEntryRow;
use crate::diesel_schema::points_ledger;
use crate::error::PersistenceError;

/// Returns the sum of a user's ledger entries. Zero when there are none.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn total_points_for(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<i64, PersistenceError> {
    // NOTE: raw SQL fragment (Diesel's SUM over BigInt yields Numeric, which SQLite cannot load)
    Ok(points_ledger::table
        .filter(points_ledger::user_id.eq(user_id))
        .select(sql::<BigInt>("COALESCE(SUM(points_earned), 0)"))
        .first(conn)?)
}

/// Lists a user's ledger entries, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored value cannot be decoded.
pub fn points_entries_for(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Vec<PointsEntry>, PersistenceError> {
    points_ledger::table
        .filter(points_ledger::user_id.eq(user_id))
        .order(points_ledger::points_entry_id.desc())
        .select(PointsEntryRow::as_select())
        .load(conn)?
        .into_iter()
        .map(PointsEntryRow::into_domain)
        .collect()
}
