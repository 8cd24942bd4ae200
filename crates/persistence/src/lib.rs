// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Challenge Engine.
//!
//! This crate stores challenge configurations, enrollments, task
//! completions, the points ledger, goal targets, and the audit trail. It is
//! built on Diesel over `SQLite`.
//!
//! ## Correctness Arbiters
//!
//! Two database constraints carry the concurrency guarantees:
//!
//! - A partial unique index on `challenge_config(is_active) WHERE is_active = 1`
//!   keeps at most one active challenge
//! - A unique key on `task_completions(user_id, task_definition_id, challenge_day)`
//!   makes task completion idempotent
//!
//! Multi-statement writes run in immediate transactions so the write lock
//! is held from the first read.
//!
//! ## Testing Philosophy
//!
//! - Tests run against isolated in-memory databases
//! - Each `new_in_memory()` call receives a uniquely named database
//! - Migrations are embedded and applied on open

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use challenge_audit::AuditEvent;
use challenge_domain::{
    ChallengeConfig, ChallengePatch, CompletionOutcome, CompletionRequest, GoalTargets,
    NewPointsEntry, Participant, PointsEntry, TaskCompletion, TaskDefinition,
};
use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use mutations::challenge::ChallengeWriteResult;

use backend::PersistenceBackend;

/// Persistence adapter over a single `SQLite` connection.
///
/// Callers share one adapter behind an async mutex; every method takes
/// `&mut self`.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;

        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;

        backend::sqlite::enable_wal_mode(&mut conn)?;

        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    // ========================================================================
    // Challenge Configuration
    // ========================================================================

    /// Creates a new active challenge, deactivating any prior active one.
    ///
    /// The audit event is recorded in the same transaction with the new
    /// challenge ID and an after-snapshot attached.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails, a concurrent activation wins
    /// the single-active index (`Conflict`), or the write fails.
    pub fn create_challenge(
        &mut self,
        name: &str,
        start_date: OffsetDateTime,
        end_date: OffsetDateTime,
        now: OffsetDateTime,
        event: &AuditEvent,
    ) -> Result<ChallengeConfig, PersistenceError> {
        mutations::challenge::create_challenge(
            &mut self.conn,
            name,
            start_date,
            end_date,
            now,
            event,
        )
    }

    /// Ends a challenge. Ending an inactive challenge changes nothing.
    ///
    /// # Errors
    ///
    /// Returns `ChallengeNotFound` for an unknown ID, or a database error.
    pub fn end_challenge(
        &mut self,
        challenge_id: i64,
        now: OffsetDateTime,
        event: &AuditEvent,
    ) -> Result<ChallengeWriteResult, PersistenceError> {
        mutations::challenge::end_challenge(&mut self.conn, challenge_id, now, event)
    }

    /// Applies a partial update, recomputing `total_days` from the dates.
    ///
    /// # Errors
    ///
    /// Returns `ChallengeNotFound`, a `DomainViolation`, or a database error.
    pub fn update_challenge(
        &mut self,
        challenge_id: i64,
        patch: &ChallengePatch,
        now: OffsetDateTime,
        event: &AuditEvent,
    ) -> Result<ChallengeWriteResult, PersistenceError> {
        mutations::challenge::update_challenge(&mut self.conn, challenge_id, patch, now, event)
    }

    /// Overrides the stored current day.
    ///
    /// # Errors
    ///
    /// Returns `ChallengeNotFound`, a `DomainViolation` for an out-of-range
    /// day, or a database error.
    pub fn set_current_day(
        &mut self,
        challenge_id: i64,
        day: u32,
        now: OffsetDateTime,
        event: &AuditEvent,
    ) -> Result<ChallengeConfig, PersistenceError> {
        mutations::challenge::set_current_day(&mut self.conn, challenge_id, day, now, event)
    }

    /// Retrieves the single active challenge, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_active_challenge(&mut self) -> Result<Option<ChallengeConfig>, PersistenceError> {
        queries::challenge::get_active_challenge(&mut self.conn)
    }

    /// Retrieves a challenge by ID.
    ///
    /// # Errors
    ///
    /// Returns `ChallengeNotFound` for an unknown ID, or a database error.
    pub fn get_challenge(
        &mut self,
        challenge_id: i64,
    ) -> Result<ChallengeConfig, PersistenceError> {
        queries::challenge::get_challenge(&mut self.conn, challenge_id)
    }

    /// Counts challenges flagged active. Never more than one.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_active_challenges(&mut self) -> Result<i64, PersistenceError> {
        queries::challenge::count_active_challenges(&mut self.conn)
    }

    // ========================================================================
    // Reconciliation
    // ========================================================================

    /// Persists a reconciled current day.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn apply_reconciliation_day(
        &mut self,
        challenge_id: i64,
        day: u32,
        now: OffsetDateTime,
    ) -> Result<bool, PersistenceError> {
        mutations::challenge::apply_reconciliation_day(&mut self.conn, challenge_id, day, now)
    }

    /// Claims the end-of-challenge transition.
    ///
    /// Returns `true` only for the single caller whose conditional update
    /// deactivated the challenge and set its completion marker.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn claim_challenge_completion(
        &mut self,
        challenge_id: i64,
        now: OffsetDateTime,
    ) -> Result<bool, PersistenceError> {
        mutations::challenge::claim_challenge_completion(&mut self.conn, challenge_id, now)
    }

    // ========================================================================
    // Participants
    // ========================================================================

    /// Enrolls a user as an active participant.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if the user is already enrolled.
    pub fn enroll_user(
        &mut self,
        user_id: i64,
        now: OffsetDateTime,
    ) -> Result<Participant, PersistenceError> {
        mutations::participants::enroll_user(&mut self.conn, user_id, now)
    }

    /// Sets whether an enrolled participant is active.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` if the user is not enrolled.
    pub fn set_participant_active(
        &mut self,
        user_id: i64,
        is_active: bool,
    ) -> Result<(), PersistenceError> {
        mutations::participants::set_participant_active(&mut self.conn, user_id, is_active)
    }

    /// Lists active participants.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn active_participants(&mut self) -> Result<Vec<Participant>, PersistenceError> {
        queries::participants::active_participants(&mut self.conn)
    }

    /// Retrieves a participant by user ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_participant(
        &mut self,
        user_id: i64,
    ) -> Result<Option<Participant>, PersistenceError> {
        queries::participants::get_participant(&mut self.conn, user_id)
    }

    // ========================================================================
    // Tasks
    // ========================================================================

    /// Creates a task definition.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_task_definition(
        &mut self,
        name: &str,
        point_value: i64,
    ) -> Result<TaskDefinition, PersistenceError> {
        mutations::tasks::create_task_definition(&mut self.conn, name, point_value)
    }

    /// Retrieves a task definition.
    ///
    /// # Errors
    ///
    /// Returns `TaskNotFound` for an unknown ID.
    pub fn get_task_definition(
        &mut self,
        task_definition_id: i64,
    ) -> Result<TaskDefinition, PersistenceError> {
        queries::tasks::get_task_definition(&mut self.conn, task_definition_id)
    }

    /// Records a task completion idempotently and awards its points once.
    ///
    /// # Errors
    ///
    /// Returns a `DomainViolation` for day zero, `TaskNotFound` or
    /// `UserNotFound` for unknown references, or a database error.
    pub fn complete_task(
        &mut self,
        request: &CompletionRequest,
        now: OffsetDateTime,
        event: Option<&AuditEvent>,
    ) -> Result<CompletionOutcome, PersistenceError> {
        mutations::tasks::complete_task(&mut self.conn, request, now, event)
    }

    /// Lists a user's completions, optionally for one day.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn completions_for(
        &mut self,
        user_id: i64,
        challenge_day: Option<u32>,
    ) -> Result<Vec<TaskCompletion>, PersistenceError> {
        queries::tasks::completions_for(&mut self.conn, user_id, challenge_day)
    }

    // ========================================================================
    // Points Ledger
    // ========================================================================

    /// Appends a ledger entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn append_points(
        &mut self,
        entry: &NewPointsEntry,
        now: OffsetDateTime,
    ) -> Result<PointsEntry, PersistenceError> {
        mutations::points::append_points(&mut self.conn, entry, None, now)
    }

    /// Appends an admin adjustment and its audit event in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` for an unenrolled user, or an error if either
    /// insert fails.
    pub fn append_adjustment(
        &mut self,
        entry: &NewPointsEntry,
        now: OffsetDateTime,
        event: &AuditEvent,
    ) -> Result<PointsEntry, PersistenceError> {
        mutations::points::append_adjustment(&mut self.conn, entry, now, event)
    }

    /// Returns a user's point total.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn total_points_for(&mut self, user_id: i64) -> Result<i64, PersistenceError> {
        queries::points::total_points_for(&mut self.conn, user_id)
    }

    /// Lists a user's ledger entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn points_entries_for(
        &mut self,
        user_id: i64,
    ) -> Result<Vec<PointsEntry>, PersistenceError> {
        queries::points::points_entries_for(&mut self.conn, user_id)
    }

    // ========================================================================
    // Goals
    // ========================================================================

    /// Inserts or replaces a user's goal targets.
    ///
    /// # Errors
    ///
    /// Returns a `DomainViolation` for invalid targets, or a database error.
    pub fn upsert_goals(
        &mut self,
        user_id: i64,
        targets: &GoalTargets,
        now: OffsetDateTime,
    ) -> Result<(), PersistenceError> {
        mutations::goals::upsert_goals(&mut self.conn, user_id, targets, now)
    }

    /// Retrieves a user's goal targets.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_goals(&mut self, user_id: i64) -> Result<Option<GoalTargets>, PersistenceError> {
        queries::goals::get_goals(&mut self.conn, user_id)
    }

    // ========================================================================
    // Audit
    // ========================================================================

    /// Persists a standalone audit event.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn persist_audit_event(
        &mut self,
        event: &AuditEvent,
        now: OffsetDateTime,
    ) -> Result<i64, PersistenceError> {
        mutations::audit::persist_audit_event(&mut self.conn, event, now)
    }

    /// Retrieves an audit event by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the event is missing or cannot be deserialized.
    pub fn get_audit_event(&mut self, event_id: i64) -> Result<AuditEvent, PersistenceError> {
        queries::audit::get_audit_event(&mut self.conn, event_id)
    }

    /// Retrieves the audit timeline of a challenge, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_audit_timeline(
        &mut self,
        challenge_id: i64,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::audit::get_audit_timeline(&mut self.conn, challenge_id)
    }
}
