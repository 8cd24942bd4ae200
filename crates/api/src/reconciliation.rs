// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Daily reconciliation of the active challenge.
//!
//! A run persists the derived current day while the challenge is in
//! progress. Once the date range has passed, the run claims the end
//! transition with a conditional update and only the claiming run invokes
//! the completion notifier.
//!
//! Failures never escape a run; they are logged and reported, and the next
//! scheduled run tries again.

use std::future::Future;
use std::sync::Arc;

use challenge_domain::{ChallengeConfig, Participant, ReconciliationPlan, plan_reconciliation};
use challenge_persistence::Persistence;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::error::{ApiError, translate_persistence_error};

/// Notification port invoked when a challenge completes.
pub trait CompletionNotifier: Send + Sync {
    /// Announces that `challenge` has completed to `participants`.
    ///
    /// # Errors
    ///
    /// Returns `Upstream` if the notification could not be delivered.
    fn challenge_complete(
        &self,
        challenge: &ChallengeConfig,
        participants: &[Participant],
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}

/// A notifier that only logs the completion.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingNotifier;

impl CompletionNotifier for LoggingNotifier {
    async fn challenge_complete(
        &self,
        challenge: &ChallengeConfig,
        participants: &[Participant],
    ) -> Result<(), ApiError> {
        info!(
            challenge_id = challenge.id,
            name = %challenge.name,
            participants = participants.len(),
            "Challenge complete"
        );
        Ok(())
    }
}

/// Outcome of one reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReconciliationReport {
    pub success: bool,
    pub message: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// Reconciles the active challenge against the clock.
pub struct ReconciliationJob<N> {
    persistence: Arc<Mutex<Persistence>>,
    notifier: N,
}

impl<N: CompletionNotifier> ReconciliationJob<N> {
    #[must_use]
    pub const fn new(persistence: Arc<Mutex<Persistence>>, notifier: N) -> Self {
        Self {
            persistence,
            notifier,
        }
    }

    /// Runs one reconciliation pass at `now`.
    pub async fn run_once(&self, now: OffsetDateTime) -> ReconciliationReport {
        match self.reconcile(now).await {
            Ok(message) => {
                info!(%message, "Reconciliation run finished");
                ReconciliationReport {
                    success: true,
                    message,
                    timestamp: now,
                }
            }
            Err(e) => {
                error!(error = %e, "Reconciliation run failed");
                ReconciliationReport {
                    success: false,
                    message: e.to_string(),
                    timestamp: now,
                }
            }
        }
    }

    async fn reconcile(&self, now: OffsetDateTime) -> Result<String, ApiError> {
        let (ended, participants): (ChallengeConfig, Vec<Participant>) = {
            let mut persistence = self.persistence.lock().await;

            let Some(config) = persistence
                .get_active_challenge()
                .map_err(translate_persistence_error)?
            else {
                return Ok(String::from("No active challenge"));
            };

            let plan: ReconciliationPlan = plan_reconciliation(&config, now);
            if let Some(day) = plan.new_day {
                persistence
                    .apply_reconciliation_day(config.id, day, now)
                    .map_err(translate_persistence_error)?;
            }

            if !plan.period_ended {
                return Ok(match plan.new_day {
                    Some(day) => format!(
                        "Challenge {} advanced from day {} to day {day}",
                        config.id, plan.stored_day
                    ),
                    None => format!(
                        "Challenge {} unchanged at day {} ({})",
                        config.id, plan.stored_day, plan.day_state.phase
                    ),
                });
            }

            let claimed: bool = persistence
                .claim_challenge_completion(config.id, now)
                .map_err(translate_persistence_error)?;
            if !claimed {
                return Ok(format!(
                    "Challenge {} completion already handled",
                    config.id
                ));
            }

            let ended: ChallengeConfig = persistence
                .get_challenge(config.id)
                .map_err(translate_persistence_error)?;
            let participants: Vec<Participant> = persistence
                .active_participants()
                .map_err(translate_persistence_error)?;
            (ended, participants)
        };

        // The claim stays in place if delivery fails; there is no resend.
        self.notifier
            .challenge_complete(&ended, &participants)
            .await
            .map_err(|e| ApiError::Upstream {
                service: String::from("completion_notifier"),
                message: format!("Challenge {} ended but notification failed: {e}", ended.id),
            })?;

        Ok(format!(
            "Challenge {} ended; notified {} participants",
            ended.id,
            participants.len()
        ))
    }
}
