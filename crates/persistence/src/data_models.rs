// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use challenge_domain::{
    ChallengeConfig, CompletionActor, Participant, PointsEntry, TaskCompletion, TaskDefinition,
};
use diesel::prelude::*;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::diesel_schema::{
    challenge_config, points_ledger, task_completions, task_definitions, user_challenge_progress,
};
use crate::error::PersistenceError;

/// Serializable representation of an Actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: String,
    pub actor_type: String,
}

/// Serializable representation of a Cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseData {
    pub id: String,
    pub description: String,
}

/// Serializable representation of an Action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub details: Option<String>,
}

/// Serializable representation of a `StateSnapshot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshotData {
    pub data: String,
}

/// Serializable view of a challenge configuration used in audit snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeSnapshotData {
    pub challenge_id: i64,
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub total_days: u32,
    pub current_day: u32,
    pub is_active: bool,
}

impl ChallengeSnapshotData {
    /// Captures the audit-relevant fields of `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if a date cannot be formatted.
    pub fn capture(config: &ChallengeConfig) -> Result<Self, PersistenceError> {
        Ok(Self {
            challenge_id: config.id,
            name: config.name.clone(),
            start_date: format_timestamp(config.start_date)?,
            end_date: format_timestamp(config.end_date)?,
            total_days: config.total_days,
            current_day: config.current_day,
            is_active: config.is_active,
        })
    }
}

/// Formats an instant for storage.
///
/// # Errors
///
/// Returns an error if the instant cannot be represented as RFC 3339.
pub fn format_timestamp(value: OffsetDateTime) -> Result<String, PersistenceError> {
    value
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

/// Parses a stored RFC 3339 instant.
///
/// # Errors
///
/// Returns an error if the stored text is not a valid RFC 3339 instant.
pub fn parse_timestamp(
    field: &'static str,
    value: &str,
) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|_| PersistenceError::InvalidStoredValue {
        field,
        value: value.to_string(),
    })
}

/// Converts a challenge day to its stored integer form.
///
/// # Errors
///
/// Returns an error if the day does not fit the column type.
pub fn day_to_column(field: &'static str, day: u32) -> Result<i32, PersistenceError> {
    day.to_i32().ok_or_else(|| PersistenceError::InvalidStoredValue {
        field,
        value: day.to_string(),
    })
}

fn day_from_column(field: &'static str, day: i32) -> Result<u32, PersistenceError> {
    day.to_u32().ok_or_else(|| PersistenceError::InvalidStoredValue {
        field,
        value: day.to_string(),
    })
}

/// Diesel Queryable struct for challenge configuration rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = challenge_config)]
pub struct ChallengeRow {
    pub challenge_id: i64,
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub total_days: i32,
    pub current_day: i32,
    pub is_active: i32,
    pub completion_notified_at: Option<String>,
}

impl ChallengeRow {
    /// Decodes the row into its domain representation.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored column cannot be decoded.
    pub fn into_domain(self) -> Result<ChallengeConfig, PersistenceError> {
        Ok(ChallengeConfig {
            id: self.challenge_id,
            name: self.name,
            start_date: parse_timestamp("start_date", &self.start_date)?,
            end_date: parse_timestamp("end_date", &self.end_date)?,
            total_days: day_from_column("total_days", self.total_days)?,
            current_day: day_from_column("current_day", self.current_day)?,
            is_active: self.is_active != 0,
            completion_notified_at: self
                .completion_notified_at
                .as_deref()
                .map(|value| parse_timestamp("completion_notified_at", value))
                .transpose()?,
        })
    }
}

/// Diesel Queryable struct for participant rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = user_challenge_progress)]
pub struct ParticipantRow {
    pub user_id: i64,
    pub is_active: i32,
    pub enrolled_at: String,
}

impl ParticipantRow {
    /// Decodes the row into its domain representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the enrollment timestamp cannot be decoded.
    pub fn into_domain(self) -> Result<Participant, PersistenceError> {
        Ok(Participant {
            user_id: self.user_id,
            is_active: self.is_active != 0,
            enrolled_at: parse_timestamp("enrolled_at", &self.enrolled_at)?,
        })
    }
}

/// Diesel Queryable struct for task definition rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = task_definitions)]
pub struct TaskDefinitionRow {
    pub task_definition_id: i64,
    pub name: String,
    pub point_value: i64,
}

impl From<TaskDefinitionRow> for TaskDefinition {
    fn from(row: TaskDefinitionRow) -> Self {
        Self {
            id: row.task_definition_id,
            name: row.name,
            point_value: row.point_value,
        }
    }
}

/// Diesel Queryable struct for task completion rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = task_completions)]
pub struct TaskCompletionRow {
    pub task_completion_id: i64,
    pub user_id: i64,
    pub task_definition_id: i64,
    pub challenge_day: i32,
    pub completed_at: String,
    pub notes: Option<String>,
    pub actor_kind: String,
    pub actor_id: Option<String>,
}

impl TaskCompletionRow {
    /// Decodes the row into its domain representation.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored column cannot be decoded.
    pub fn into_domain(self) -> Result<TaskCompletion, PersistenceError> {
        let actor: CompletionActor =
            CompletionActor::from_parts(&self.actor_kind, self.actor_id).map_err(|_| {
                PersistenceError::InvalidStoredValue {
                    field: "actor_kind",
                    value: self.actor_kind.clone(),
                }
            })?;

        Ok(TaskCompletion {
            id: self.task_completion_id,
            user_id: self.user_id,
            task_definition_id: self.task_definition_id,
            challenge_day: day_from_column("challenge_day", self.challenge_day)?,
            completed_at: parse_timestamp("completed_at", &self.completed_at)?,
            notes: self.notes,
            actor,
        })
    }
}

/// Diesel Queryable struct for points ledger rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = points_ledger)]
pub struct PointsEntryRow {
    pub points_entry_id: i64,
    pub user_id: i64,
    pub points_earned: i64,
    pub activity_type: String,
    pub description: String,
    pub task_completion_id: Option<i64>,
    pub created_at: String,
}

impl PointsEntryRow {
    /// Decodes the row into its domain representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the creation timestamp cannot be decoded.
    pub fn into_domain(self) -> Result<PointsEntry, PersistenceError> {
        Ok(PointsEntry {
            id: self.points_entry_id,
            user_id: self.user_id,
            points_earned: self.points_earned,
            activity_type: self.activity_type,
            description: self.description,
            created_at: parse_timestamp("created_at", &self.created_at)?,
            task_completion_id: self.task_completion_id,
        })
    }
}
