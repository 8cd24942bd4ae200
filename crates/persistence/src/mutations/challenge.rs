// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Challenge lifecycle writes.
//!
//! Admin writes (create, end, update, set day) each run in one immediate
//! transaction together with their audit event. The reconciliation writes
//! (`apply_reconciliation_day`, `claim_challenge_completion`) are single
//! statements and carry no audit event.
//!
//! ## Invariants
//!
//! - At most one row has `is_active = 1`; the partial unique index rejects a
//!   second one and surfaces as `PersistenceError::Conflict`
//! - `total_days` is recomputed from the dates on every write touching them
//! - `completion_notified_at` is set at most once

use challenge_audit::{AuditEvent, StateSnapshot};
use challenge_domain::{
    ChallengeConfig, ChallengePatch, inclusive_day_count, validate_challenge_name,
    validate_date_range, validate_day_override, validate_total_days,
};
use diesel::SqliteConnection;
use diesel::prelude::*;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::{ChallengeSnapshotData, day_to_column, format_timestamp};
use crate::diesel_schema::challenge_config;
use crate::error::PersistenceError;
use crate::mutations::audit::persist_audit_event;
use crate::queries::challenge::get_challenge;

/// Result of an admin write that may turn out to be a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeWriteResult {
    /// The record after the write.
    pub config: ChallengeConfig,
    /// Whether the write changed anything. No audit event is recorded
    /// for unchanged records.
    pub changed: bool,
}

fn snapshot_of(config: &ChallengeConfig) -> Result<StateSnapshot, PersistenceError> {
    let data: ChallengeSnapshotData = ChallengeSnapshotData::capture(config)?;
    Ok(StateSnapshot::new(serde_json::to_string(&data)?))
}

/// Records `event` against `after`, attaching before/after snapshots.
fn record_challenge_event(
    conn: &mut SqliteConnection,
    event: &AuditEvent,
    before: Option<&ChallengeConfig>,
    after: &ChallengeConfig,
    now: OffsetDateTime,
) -> Result<i64, PersistenceError> {
    let before_snapshot: StateSnapshot =
        before.map_or_else(|| Ok(StateSnapshot::default()), snapshot_of)?;
    let mut recorded: AuditEvent = event
        .clone()
        .with_snapshots(before_snapshot, snapshot_of(after)?);
    recorded.challenge_id = Some(after.id);

    persist_audit_event(conn, &recorded, now)
}

/// Creates a new active challenge, deactivating any prior active record.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `name` - Challenge name
/// * `start_date` - First instant of the challenge
/// * `end_date` - Last instant of the challenge
/// * `now` - The write instant
/// * `event` - Audit event describing the request
///
/// # Errors
///
/// Returns `DomainViolation` for an empty name or an inverted range,
/// `Conflict` if another writer activated a challenge concurrently, or a
/// database error.
pub fn create_challenge(
    conn: &mut SqliteConnection,
    name: &str,
    start_date: OffsetDateTime,
    end_date: OffsetDateTime,
    now: OffsetDateTime,
    event: &AuditEvent,
) -> Result<ChallengeConfig, PersistenceError> {
    validate_challenge_name(name)?;
    validate_date_range(start_date, end_date)?;
    let total_days: i32 = day_to_column(
        "total_days",
        validate_total_days(None, start_date, end_date)?,
    )?;

    let start_text: String = format_timestamp(start_date)?;
    let end_text: String = format_timestamp(end_date)?;
    let now_text: String = format_timestamp(now)?;

    conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        let deactivated: usize =
            diesel::update(challenge_config::table.filter(challenge_config::is_active.eq(1)))
                .set((
                    challenge_config::is_active.eq(0),
                    challenge_config::updated_at.eq(&now_text),
                ))
                .execute(conn)?;

        diesel::insert_into(challenge_config::table)
            .values((
                challenge_config::name.eq(name),
                challenge_config::start_date.eq(&start_text),
                challenge_config::end_date.eq(&end_text),
                challenge_config::total_days.eq(total_days),
                challenge_config::current_day.eq(1),
                challenge_config::is_active.eq(1),
                challenge_config::created_at.eq(&now_text),
                challenge_config::updated_at.eq(&now_text),
            ))
            .execute(conn)?;

        let challenge_id: i64 = conn.get_last_insert_rowid()?;
        let created: ChallengeConfig = get_challenge(conn, challenge_id)?;
        record_challenge_event(conn, event, None, &created, now)?;

        info!(
            challenge_id,
            total_days = created.total_days,
            deactivated,
            "Created active challenge"
        );

        Ok(created)
    })
}

/// Ends a challenge now.
///
/// Sets `is_active = false` and moves the end date to `now` when `now` lies
/// between the stored start and end. A challenge ended before it starts keeps
/// its dates so the range stays valid. Ending an inactive challenge is a
/// no-op.
///
/// # Errors
///
/// Returns `ChallengeNotFound` for an unknown ID, or a database error.
pub fn end_challenge(
    conn: &mut SqliteConnection,
    challenge_id: i64,
    now: OffsetDateTime,
    event: &AuditEvent,
) -> Result<ChallengeWriteResult, PersistenceError> {
    conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        let before: ChallengeConfig = get_challenge(conn, challenge_id)?;
        if !before.is_active {
            debug!(challenge_id, "Challenge already ended");
            return Ok(ChallengeWriteResult {
                config: before,
                changed: false,
            });
        }

        let end_date: OffsetDateTime = if now > before.start_date {
            before.end_date.min(now)
        } else {
            before.end_date
        };
        let total_days: u32 = inclusive_day_count(before.start_date, end_date);
        let current_day: u32 = before.current_day.min(total_days);

        diesel::update(challenge_config::table.find(challenge_id))
            .set((
                challenge_config::is_active.eq(0),
                challenge_config::end_date.eq(format_timestamp(end_date)?),
                challenge_config::total_days.eq(day_to_column("total_days", total_days)?),
                challenge_config::current_day.eq(day_to_column("current_day", current_day)?),
                challenge_config::updated_at.eq(format_timestamp(now)?),
            ))
            .execute(conn)?;

        let after: ChallengeConfig = get_challenge(conn, challenge_id)?;
        record_challenge_event(conn, event, Some(&before), &after, now)?;

        info!(challenge_id, "Ended challenge");

        Ok(ChallengeWriteResult {
            config: after,
            changed: true,
        })
    })
}

/// Applies a partial update to a challenge.
///
/// The resulting dates are validated and `total_days` is recomputed from
/// them. A supplied `total_days` must agree with the recomputed count. The
/// stored current day is clamped into the new range.
///
/// # Errors
///
/// Returns `ChallengeNotFound` for an unknown ID, `DomainViolation` when the
/// result is invalid, or a database error.
pub fn update_challenge(
    conn: &mut SqliteConnection,
    challenge_id: i64,
    patch: &ChallengePatch,
    now: OffsetDateTime,
    event: &AuditEvent,
) -> Result<ChallengeWriteResult, PersistenceError> {
    conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        let before: ChallengeConfig = get_challenge(conn, challenge_id)?;
        if patch.is_empty() {
            return Ok(ChallengeWriteResult {
                config: before,
                changed: false,
            });
        }

        let name: &str = patch.name.as_deref().unwrap_or(&before.name);
        validate_challenge_name(name)?;

        let start_date: OffsetDateTime = patch.start_date.unwrap_or(before.start_date);
        let end_date: OffsetDateTime = patch.end_date.unwrap_or(before.end_date);
        validate_date_range(start_date, end_date)?;

        let total_days: u32 = validate_total_days(patch.total_days, start_date, end_date)?;
        let current_day: u32 = before.current_day.min(total_days);

        diesel::update(challenge_config::table.find(challenge_id))
            .set((
                challenge_config::name.eq(name),
                challenge_config::start_date.eq(format_timestamp(start_date)?),
                challenge_config::end_date.eq(format_timestamp(end_date)?),
                challenge_config::total_days.eq(day_to_column("total_days", total_days)?),
                challenge_config::current_day.eq(day_to_column("current_day", current_day)?),
                challenge_config::updated_at.eq(format_timestamp(now)?),
            ))
            .execute(conn)?;

        let after: ChallengeConfig = get_challenge(conn, challenge_id)?;
        record_challenge_event(conn, event, Some(&before), &after, now)?;

        info!(challenge_id, total_days, "Updated challenge");

        Ok(ChallengeWriteResult {
            config: after,
            changed: true,
        })
    })
}

/// Overrides the stored current day.
///
/// # Errors
///
/// Returns `ChallengeNotFound` for an unknown ID, `DomainViolation` when the
/// day lies outside `[1, total_days]`, or a database error.
pub fn set_current_day(
    conn: &mut SqliteConnection,
    challenge_id: i64,
    day: u32,
    now: OffsetDateTime,
    event: &AuditEvent,
) -> Result<ChallengeConfig, PersistenceError> {
    conn.immediate_transaction::<_, PersistenceError, _>(|conn| {
        let before: ChallengeConfig = get_challenge(conn, challenge_id)?;
        validate_day_override(day, before.total_days)?;

        diesel::update(challenge_config::table.find(challenge_id))
            .set((
                challenge_config::current_day.eq(day_to_column("current_day", day)?),
                challenge_config::updated_at.eq(format_timestamp(now)?),
            ))
            .execute(conn)?;

        let after: ChallengeConfig = get_challenge(conn, challenge_id)?;
        record_challenge_event(conn, event, Some(&before), &after, now)?;

        info!(
            challenge_id,
            from = before.current_day,
            to = day,
            "Set challenge day"
        );

        Ok(after)
    })
}

/// Persists a reconciled current day.
///
/// # Returns
///
/// Whether a row was updated.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn apply_reconciliation_day(
    conn: &mut SqliteConnection,
    challenge_id: i64,
    day: u32,
    now: OffsetDateTime,
) -> Result<bool, PersistenceError> {
    let updated: usize = diesel::update(challenge_config::table.find(challenge_id))
        .set((
            challenge_config::current_day.eq(day_to_column("current_day", day)?),
            challenge_config::updated_at.eq(format_timestamp(now)?),
        ))
        .execute(conn)?;

    debug!(challenge_id, day, updated, "Applied reconciled day");

    Ok(updated > 0)
}

/// Claims the end-of-challenge transition.
///
/// Deactivates the challenge and sets the completion marker in a single
/// conditional update. Only the caller whose update affected a row may send
/// the completion notification; every later or concurrent caller gets
/// `false`.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn claim_challenge_completion(
    conn: &mut SqliteConnection,
    challenge_id: i64,
    now: OffsetDateTime,
) -> Result<bool, PersistenceError> {
    let now_text: String = format_timestamp(now)?;

    let claimed: usize = diesel::update(
        challenge_config::table
            .filter(challenge_config::challenge_id.eq(challenge_id))
            .filter(challenge_config::is_active.eq(1))
            .filter(challenge_config::completion_notified_at.is_null()),
    )
    .set((
        challenge_config::is_active.eq(0),
        challenge_config::completion_notified_at.eq(Some(now_text.clone())),
        challenge_config::updated_at.eq(&now_text),
    ))
    .execute(conn)?;

    if claimed > 0 {
        info!(challenge_id, "Claimed challenge completion");
    } else {
        debug!(challenge_id, "Challenge completion already claimed");
    }

    Ok(claimed > 0)
}
