// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the challenge engine.
//!
//! Functions here sit between the HTTP surface and persistence. They
//! enforce admin authorization, build audit events, translate lower-layer
//! errors into [`ApiError`], and give read paths their safe defaults.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod admin;
mod auth;
mod error;
mod goals;
mod points;
mod reconciliation;
mod request_response;
mod single_flight;
mod status;
mod tasks;

#[cfg(test)]
mod tests;

pub use admin::{
    admin_complete_task, create_challenge, end_challenge, set_challenge_day, update_challenge,
};
pub use auth::{AdminAllowlist, AuthenticatedActor, AuthorizationPort, AuthorizationService, Role};
pub use error::{ApiError, AuthError, translate_domain_error, translate_persistence_error};
pub use goals::{GoalProgressAggregator, MetricsSource};
pub use points::{ADJUSTMENT_ACTIVITY, adjust_points, get_points_total};
pub use reconciliation::{
    CompletionNotifier, LoggingNotifier, ReconciliationJob, ReconciliationReport,
};
pub use request_response::{
    AdjustPointsRequest, ChallengeResponse, ChallengeStatusResponse, CompleteTaskRequest,
    CompleteTaskResponse, CreateChallengeRequest, PointsTotalResponse, SaveGoalsRequest,
    SaveGoalsResponse, SetChallengeDayRequest, UpdateChallengeRequest,
};
pub use single_flight::SingleFlight;
pub use status::get_challenge_status;
pub use tasks::complete_task;
