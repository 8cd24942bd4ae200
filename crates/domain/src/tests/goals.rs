// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    GoalProgress, GoalTargets, MetricEvent, MetricTotals, aggregate_metrics,
    compute_goal_progress, progress_ratio,
};

#[test]
fn test_progress_ratio_zero_goal_is_zero() {
    assert!((progress_ratio(12.0, 0.0)).abs() < f64::EPSILON);
}

#[test]
fn test_progress_ratio_never_nan() {
    assert!(!progress_ratio(0.0, 0.0).is_nan());
    assert!(!progress_ratio(f64::NAN, 10.0).is_nan());
    assert!(!progress_ratio(5.0, f64::INFINITY).is_nan());
}

#[test]
fn test_aggregate_metrics_counts_and_sums() {
    let events: Vec<MetricEvent> = vec![
        MetricEvent::Lead,
        MetricEvent::Lead,
        MetricEvent::Event,
        MetricEvent::Revenue(1500.0),
        MetricEvent::Revenue(250.5),
        MetricEvent::Revenue(f64::NAN),
    ];

    let totals: MetricTotals = aggregate_metrics(&events);

    assert_eq!(totals.leads, 2);
    assert_eq!(totals.events, 1);
    assert!((totals.revenue - 1750.5).abs() < 1e-9);
}

#[test]
fn test_compute_goal_progress_per_metric() {
    let targets: GoalTargets = GoalTargets {
        leads_goal: 10,
        events_goal: 0,
        revenue_goal: 1000.0,
    };
    let totals: MetricTotals = MetricTotals {
        leads: 5,
        events: 3,
        revenue: 250.0,
    };

    let progress: GoalProgress = compute_goal_progress(&targets, &totals);

    assert!((progress.leads_progress - 0.5).abs() < 1e-9);
    assert!(progress.events_progress.abs() < f64::EPSILON);
    assert!((progress.revenue_progress - 0.25).abs() < 1e-9);
    assert_eq!(progress.events_current, 3);
    assert_eq!(progress.leads_goal, 10);
}
