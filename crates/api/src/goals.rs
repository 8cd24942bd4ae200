// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Goal progress aggregation.
//!
//! Progress joins a user's stored goal targets with the totals of their
//! metric stream. Concurrent reads for the same user share one metrics
//! fetch through a [`SingleFlight`] map owned by the aggregator.

use std::future::Future;
use std::sync::Arc;

use challenge_domain::{
    GoalProgress, GoalTargets, MetricEvent, MetricTotals, aggregate_metrics, compute_goal_progress,
};
use challenge_persistence::Persistence;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::{ApiError, translate_persistence_error};
use crate::request_response::{SaveGoalsRequest, SaveGoalsResponse};
use crate::single_flight::SingleFlight;

/// Read port for a user's CRM metric stream.
pub trait MetricsSource: Send + Sync {
    /// Fetches every metric sample recorded for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `Upstream` if the metric store cannot be reached.
    fn fetch_metrics(
        &self,
        user_id: i64,
    ) -> impl Future<Output = Result<Vec<MetricEvent>, ApiError>> + Send;
}

/// Computes per-user goal progress.
pub struct GoalProgressAggregator<M> {
    persistence: Arc<Mutex<Persistence>>,
    metrics: M,
    flights: SingleFlight<i64, MetricTotals, ApiError>,
}

impl<M: MetricsSource> GoalProgressAggregator<M> {
    #[must_use]
    pub fn new(persistence: Arc<Mutex<Persistence>>, metrics: M) -> Self {
        Self {
            persistence,
            metrics,
            flights: SingleFlight::new(),
        }
    }

    /// Returns goal targets, current totals, and progress ratios for a user.
    ///
    /// This read never fails. A storage failure yields zeroed progress and a
    /// metrics failure yields the stored targets with zero currents.
    pub async fn get_progress(&self, user_id: i64) -> GoalProgress {
        let targets: GoalTargets = {
            let mut persistence = self.persistence.lock().await;
            match persistence.get_goals(user_id) {
                Ok(targets) => targets.unwrap_or_default(),
                Err(e) => {
                    warn!(user_id, error = %e, "Failed to read goals, reporting zero progress");
                    return GoalProgress::default();
                }
            }
        };

        let metrics: &M = &self.metrics;
        let totals: MetricTotals = match self
            .flights
            .run(user_id, || async move {
                let events: Vec<MetricEvent> = metrics.fetch_metrics(user_id).await?;
                Ok(aggregate_metrics(&events))
            })
            .await
        {
            Ok(totals) => totals,
            Err(e) => {
                warn!(user_id, error = %e, "Failed to fetch metrics, reporting zero currents");
                MetricTotals::default()
            }
        };

        debug!(user_id, leads = totals.leads, events = totals.events, "Computed goal progress");

        compute_goal_progress(&targets, &totals)
    }

    /// Saves a user's goal targets. Metric totals are never written.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a negative or non-finite target, or an
    /// error if the write fails.
    pub async fn save_goals(
        &self,
        user_id: i64,
        request: SaveGoalsRequest,
        now: OffsetDateTime,
    ) -> Result<SaveGoalsResponse, ApiError> {
        let targets: GoalTargets = GoalTargets {
            leads_goal: request.leads_goal,
            events_goal: request.events_goal,
            revenue_goal: request.revenue_goal,
        };

        self.persistence
            .lock()
            .await
            .upsert_goals(user_id, &targets, now)
            .map_err(translate_persistence_error)?;

        Ok(SaveGoalsResponse {
            user_id,
            leads_goal: targets.leads_goal,
            events_goal: targets.events_goal,
            revenue_goal: targets.revenue_goal,
        })
    }

    /// Number of callers waiting on a pending metrics fetch for `user_id`.
    #[must_use]
    pub fn waiting(&self, user_id: i64) -> usize {
        self.flights.waiting(&user_id)
    }
}
