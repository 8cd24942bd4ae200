// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod day_clock;
mod error;
mod goals;
mod reconciliation;
mod schedule;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use day_clock::{
    DEFAULT_TOTAL_DAYS, DayState, challenge_phase, derive_day_state, inclusive_day_count,
};
pub use error::DomainError;
pub use goals::{aggregate_metrics, compute_goal_progress, progress_ratio};
pub use reconciliation::{ReconciliationPlan, plan_reconciliation};
pub use schedule::{DailySchedule, next_run_after};
pub use types::{
    ChallengeConfig, ChallengePatch, ChallengePhase, CompletionActor, CompletionOutcome,
    CompletionRequest, CompletionStatus, GoalProgress, GoalTargets, MetricEvent, MetricTotals,
    NewPointsEntry, Participant, PointsEntry, TaskCompletion, TaskDefinition,
};
pub use validation::{
    validate_challenge_day, validate_challenge_name, validate_date_range, validate_day_override,
    validate_goal_targets, validate_total_days,
};
