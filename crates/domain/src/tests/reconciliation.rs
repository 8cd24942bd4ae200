// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::create_test_config;
use crate::{ChallengeConfig, ReconciliationPlan, plan_reconciliation};
use time::macros::datetime;

#[test]
fn test_plan_advances_stored_day() {
    let config: ChallengeConfig = create_test_config();

    let plan: ReconciliationPlan = plan_reconciliation(&config, datetime!(2024-01-05 00:05 UTC));

    assert_eq!(plan.new_day, Some(5));
    assert!(!plan.period_ended);
    assert!(!plan.is_noop());
}

#[test]
fn test_plan_is_noop_when_day_unchanged() {
    let mut config: ChallengeConfig = create_test_config();
    config.current_day = 5;

    let plan: ReconciliationPlan = plan_reconciliation(&config, datetime!(2024-01-05 12:00 UTC));

    assert!(plan.is_noop());
}

#[test]
fn test_plan_overwrites_manual_override() {
    let mut config: ChallengeConfig = create_test_config();
    config.current_day = 40;

    let plan: ReconciliationPlan = plan_reconciliation(&config, datetime!(2024-01-05 12:00 UTC));

    assert_eq!(plan.stored_day, 40);
    assert_eq!(plan.new_day, Some(5));
}

#[test]
fn test_plan_flags_period_end_and_keeps_final_day() {
    let mut config: ChallengeConfig = create_test_config();
    config.current_day = 75;

    let plan: ReconciliationPlan = plan_reconciliation(&config, datetime!(2024-03-17 00:05 UTC));

    assert!(plan.period_ended);
    assert_eq!(plan.new_day, None);
    assert!(!plan.day_state.is_active);
}

#[test]
fn test_plan_does_not_end_a_challenge_that_has_not_started() {
    let config: ChallengeConfig = create_test_config();

    let plan: ReconciliationPlan = plan_reconciliation(&config, datetime!(2023-12-30 00:05 UTC));

    assert!(!plan.period_ended);
    assert!(plan.is_noop());
}

#[test]
fn test_plan_ignores_already_inactive_record() {
    let mut config: ChallengeConfig = create_test_config();
    config.is_active = false;

    let plan: ReconciliationPlan = plan_reconciliation(&config, datetime!(2024-03-20 00:05 UTC));

    assert!(!plan.period_ended);
}
