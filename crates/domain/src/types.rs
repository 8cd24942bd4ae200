// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Where a challenge sits relative to its date range at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChallengePhase {
    /// No challenge is configured.
    Unconfigured,
    /// `now` is before the start date.
    NotStarted,
    /// `now` lies within `[start_date, end_date]`.
    InProgress,
    /// `now` is after the end date.
    Ended,
}

impl ChallengePhase {
    /// Converts this phase to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unconfigured => "Unconfigured",
            Self::NotStarted => "NotStarted",
            Self::InProgress => "InProgress",
            Self::Ended => "Ended",
        }
    }
}

impl std::fmt::Display for ChallengePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A persisted challenge configuration record.
///
/// Dates are authoritative. `total_days` is the inclusive day count derived
/// from them and is recomputed by every write that touches the dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeConfig {
    /// The canonical numeric identifier assigned by the database.
    pub id: i64,
    /// Human-readable challenge name.
    pub name: String,
    /// First instant of the challenge.
    pub start_date: OffsetDateTime,
    /// Last instant of the challenge.
    pub end_date: OffsetDateTime,
    /// Inclusive number of days between the start and end dates.
    pub total_days: u32,
    /// The last persisted challenge day.
    pub current_day: u32,
    /// Whether this is the single active challenge.
    pub is_active: bool,
    /// Set once the "challenge complete" notification has been claimed.
    pub completion_notified_at: Option<OffsetDateTime>,
}

impl ChallengeConfig {
    /// Returns whether the completion notification has already been claimed.
    #[must_use]
    pub const fn is_completion_notified(&self) -> bool {
        self.completion_notified_at.is_some()
    }
}

/// A partial update to a challenge configuration.
///
/// Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChallengePatch {
    pub name: Option<String>,
    pub start_date: Option<OffsetDateTime>,
    pub end_date: Option<OffsetDateTime>,
    pub total_days: Option<u32>,
}

impl ChallengePatch {
    /// Returns true when the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.total_days.is_none()
    }
}

/// An enrolled challenge participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub user_id: i64,
    pub is_active: bool,
    pub enrolled_at: OffsetDateTime,
}

/// Static task reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDefinition {
    pub id: i64,
    pub name: String,
    pub point_value: i64,
}

/// The write path a task completion arrived through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionActor {
    /// The participant completed the task through the normal flow.
    System,
    /// An administrator recorded the completion manually.
    Admin {
        /// Identifier of the administrator.
        admin_id: String,
    },
}

impl CompletionActor {
    /// The stored actor kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Admin { .. } => "admin",
        }
    }

    /// The administrator identifier, if any.
    #[must_use]
    pub fn admin_id(&self) -> Option<&str> {
        match self {
            Self::System => None,
            Self::Admin { admin_id } => Some(admin_id.as_str()),
        }
    }

    /// The ledger activity type credited for completions on this path.
    #[must_use]
    pub const fn activity_type(&self) -> &'static str {
        match self {
            Self::System => "task_completion",
            Self::Admin { .. } => "admin_task_completion",
        }
    }

    /// Rebuilds an actor from its stored kind and optional identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored kind is unknown.
    pub fn from_parts(kind: &str, actor_id: Option<String>) -> Result<Self, DomainError> {
        match kind {
            "system" => Ok(Self::System),
            "admin" => Ok(Self::Admin {
                admin_id: actor_id.unwrap_or_default(),
            }),
            other => Err(DomainError::InvalidStoredValue {
                field: "actor",
                value: other.to_string(),
            }),
        }
    }
}

/// A request to record one task completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub user_id: i64,
    pub task_definition_id: i64,
    /// 1-based challenge day the completion counts toward.
    pub challenge_day: u32,
    pub notes: Option<String>,
    pub actor: CompletionActor,
}

/// A recorded task completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCompletion {
    pub id: i64,
    pub user_id: i64,
    pub task_definition_id: i64,
    pub challenge_day: u32,
    pub completed_at: OffsetDateTime,
    pub notes: Option<String>,
    pub actor: CompletionActor,
}

/// Whether a completion request inserted a new row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompletionStatus {
    Completed,
    AlreadyCompleted,
}

/// Result of a task completion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionOutcome {
    pub status: CompletionStatus,
    /// Points credited by this call. Zero for `AlreadyCompleted`.
    pub points_awarded: i64,
}

impl CompletionOutcome {
    #[must_use]
    pub const fn completed(points_awarded: i64) -> Self {
        Self {
            status: CompletionStatus::Completed,
            points_awarded,
        }
    }

    #[must_use]
    pub const fn already_completed() -> Self {
        Self {
            status: CompletionStatus::AlreadyCompleted,
            points_awarded: 0,
        }
    }
}

/// A point-earning entry awaiting insertion into the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPointsEntry {
    pub user_id: i64,
    /// May be negative for compensating entries.
    pub points_earned: i64,
    pub activity_type: String,
    pub description: String,
}

/// A persisted, immutable points ledger entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointsEntry {
    pub id: i64,
    pub user_id: i64,
    pub points_earned: i64,
    pub activity_type: String,
    pub description: String,
    pub created_at: OffsetDateTime,
    /// The completion that produced this entry, for task awards.
    pub task_completion_id: Option<i64>,
}

/// Per-user goal targets. Zero means "no target".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalTargets {
    pub leads_goal: i64,
    pub events_goal: i64,
    pub revenue_goal: f64,
}

/// One sample from a user's CRM metric stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricEvent {
    /// A new lead was captured.
    Lead,
    /// An event was held or attended.
    Event,
    /// Revenue was booked.
    Revenue(f64),
}

/// Summed metric stream for one user.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetricTotals {
    pub leads: i64,
    pub events: i64,
    pub revenue: f64,
}

/// Goal targets joined with the current metric totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub leads_goal: i64,
    pub events_goal: i64,
    pub revenue_goal: f64,
    pub leads_current: i64,
    pub events_current: i64,
    pub revenue_current: f64,
    pub leads_progress: f64,
    pub events_progress: f64,
    pub revenue_progress: f64,
}
