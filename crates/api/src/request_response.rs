// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Admin bodies use `snake_case` field names. Participant-facing bodies use
//! `camelCase`.

use challenge_domain::{ChallengeConfig, ChallengePatch, CompletionOutcome, CompletionStatus};
use time::OffsetDateTime;

/// API request to create a new active challenge.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateChallengeRequest {
    /// The challenge name.
    pub name: String,
    /// First instant of the challenge.
    #[serde(with = "time::serde::rfc3339")]
    pub start_date: OffsetDateTime,
    /// Last instant of the challenge.
    #[serde(with = "time::serde::rfc3339")]
    pub end_date: OffsetDateTime,
}

/// API request to patch a challenge. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UpdateChallengeRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub start_date: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub end_date: Option<OffsetDateTime>,
    /// Must match the inclusive day count of the resulting dates.
    #[serde(default)]
    pub total_days: Option<u32>,
}

impl From<UpdateChallengeRequest> for ChallengePatch {
    fn from(request: UpdateChallengeRequest) -> Self {
        Self {
            name: request.name,
            start_date: request.start_date,
            end_date: request.end_date,
            total_days: request.total_days,
        }
    }
}

/// API request to override the current challenge day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SetChallengeDayRequest {
    /// The 1-based day to store.
    pub day: u32,
}

/// A challenge configuration as returned by admin endpoints.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ChallengeResponse {
    /// The canonical numeric identifier.
    pub challenge_id: i64,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub start_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end_date: OffsetDateTime,
    pub total_days: u32,
    pub current_day: u32,
    pub is_active: bool,
    /// Whether the write changed the stored record.
    pub changed: bool,
}

impl ChallengeResponse {
    /// Builds a response from a stored configuration.
    #[must_use]
    pub fn from_config(config: ChallengeConfig, changed: bool) -> Self {
        Self {
            challenge_id: config.id,
            name: config.name,
            start_date: config.start_date,
            end_date: config.end_date,
            total_days: config.total_days,
            current_day: config.current_day,
            is_active: config.is_active,
            changed,
        }
    }
}

/// The participant-facing challenge status.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeStatusResponse {
    pub is_active: bool,
    /// Whether a challenge is configured at all.
    pub has_access: bool,
    pub current_day: u32,
    #[serde(with = "time::serde::rfc3339::option")]
    pub start_date: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub end_date: Option<OffsetDateTime>,
    pub total_days: u32,
    /// `Unconfigured` when no challenge is active, otherwise `NotStarted`,
    /// `InProgress` or `Ended`.
    pub phase: String,
}

/// API request to complete a task for a challenge day.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteTaskRequest {
    pub user_id: i64,
    pub task_definition_id: i64,
    pub challenge_day: u32,
    #[serde(default)]
    pub notes: Option<String>,
}

/// API response for a task completion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteTaskResponse {
    pub status: CompletionStatus,
    pub points_awarded: i64,
}

impl From<CompletionOutcome> for CompleteTaskResponse {
    fn from(outcome: CompletionOutcome) -> Self {
        Self {
            status: outcome.status,
            points_awarded: outcome.points_awarded,
        }
    }
}

/// API request to save a user's goal targets.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveGoalsRequest {
    pub leads_goal: i64,
    pub events_goal: i64,
    pub revenue_goal: f64,
}

/// API response for saved goal targets.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveGoalsResponse {
    pub user_id: i64,
    pub leads_goal: i64,
    pub events_goal: i64,
    pub revenue_goal: f64,
}

/// A user's points total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsTotalResponse {
    pub user_id: i64,
    pub total: i64,
}

/// API request to record a compensating points entry.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AdjustPointsRequest {
    /// Points to credit. Negative values debit.
    pub points: i64,
    pub description: String,
}
