// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Goal progress arithmetic.

use crate::types::{GoalProgress, GoalTargets, MetricEvent, MetricTotals};

/// Returns `current / goal`, or `0.0` when there is no positive target.
///
/// Never returns NaN or infinity.
#[must_use]
pub fn progress_ratio(current: f64, goal: f64) -> f64 {
    if !goal.is_finite() || goal <= 0.0 || !current.is_finite() {
        return 0.0;
    }
    current / goal
}

/// Sums a user's metric stream.
///
/// Each `Lead` and `Event` sample counts once; revenue samples are summed.
/// Non-finite revenue samples are skipped.
#[must_use]
pub fn aggregate_metrics(events: &[MetricEvent]) -> MetricTotals {
    events
        .iter()
        .fold(MetricTotals::default(), |mut totals, event| {
            match event {
                MetricEvent::Lead => totals.leads += 1,
                MetricEvent::Event => totals.events += 1,
                MetricEvent::Revenue(amount) if amount.is_finite() => totals.revenue += amount,
                MetricEvent::Revenue(_) => {}
            }
            totals
        })
}

/// Joins goal targets with metric totals.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn compute_goal_progress(targets: &GoalTargets, totals: &MetricTotals) -> GoalProgress {
    GoalProgress {
        leads_goal: targets.leads_goal,
        events_goal: targets.events_goal,
        revenue_goal: targets.revenue_goal,
        leads_current: totals.leads,
        events_current: totals.events,
        revenue_current: totals.revenue,
        leads_progress: progress_ratio(totals.leads as f64, targets.leads_goal as f64),
        events_progress: progress_ratio(totals.events as f64, targets.events_goal as f64),
        revenue_progress: progress_ratio(totals.revenue, targets.revenue_goal),
    }
}
