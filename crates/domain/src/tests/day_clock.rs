// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_test_config, create_test_config_between};
use crate::{
    ChallengeConfig, ChallengePhase, DEFAULT_TOTAL_DAYS, DayState, derive_day_state,
    inclusive_day_count,
};
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

#[test]
fn test_first_instant_is_day_one_and_active() {
    let config: ChallengeConfig = create_test_config();

    let state: DayState = derive_day_state(Some(&config), datetime!(2024-01-01 00:00 UTC));

    assert_eq!(state.current_day, 1);
    assert!(state.is_active);
    assert!(state.has_access);
    assert_eq!(state.total_days, 75);
    assert_eq!(state.phase, ChallengePhase::InProgress);
}

#[test]
fn test_day_after_end_is_inactive_and_defaults_to_day_one() {
    let config: ChallengeConfig = create_test_config();

    let state: DayState = derive_day_state(Some(&config), datetime!(2024-03-17 00:00 UTC));

    assert!(!state.is_active);
    assert_eq!(state.current_day, 1);
    assert!(state.has_access);
    assert_eq!(state.phase, ChallengePhase::Ended);
}

#[test]
fn test_mid_challenge_day_uses_floor_of_elapsed_days() {
    let config: ChallengeConfig = create_test_config();

    let state: DayState = derive_day_state(Some(&config), datetime!(2024-01-10 18:30 UTC));

    assert_eq!(state.current_day, 10);
    assert!(state.is_active);
}

#[test]
fn test_before_start_is_not_started_day_one() {
    let config: ChallengeConfig = create_test_config();

    let state: DayState = derive_day_state(Some(&config), datetime!(2023-12-31 23:59 UTC));

    assert_eq!(state.phase, ChallengePhase::NotStarted);
    assert_eq!(state.current_day, 1);
    assert!(!state.is_active);
    assert!(state.has_access);
}

#[test]
fn test_stored_inactive_flag_wins_inside_period() {
    let mut config: ChallengeConfig = create_test_config();
    config.is_active = false;

    let state: DayState = derive_day_state(Some(&config), datetime!(2024-02-01 00:00 UTC));

    assert!(!state.is_active);
    assert_eq!(state.current_day, 32);
    assert_eq!(state.phase, ChallengePhase::InProgress);
}

#[test]
fn test_missing_config_yields_safe_default() {
    let state: DayState = derive_day_state(None, datetime!(2024-02-01 00:00 UTC));

    assert_eq!(state, DayState::unconfigured());
    assert!(!state.is_active);
    assert!(!state.has_access);
    assert_eq!(state.current_day, 1);
    assert_eq!(state.total_days, DEFAULT_TOTAL_DAYS);
    assert_eq!(state.phase, ChallengePhase::Unconfigured);
}

#[test]
fn test_current_day_is_monotonic_and_bounded_over_whole_days() {
    let start: OffsetDateTime = datetime!(2024-01-01 06:00 UTC);
    let end: OffsetDateTime = datetime!(2024-03-16 06:00 UTC);
    let config: ChallengeConfig = create_test_config_between(start, end);

    let mut previous_day: u32 = 0;
    let mut now: OffsetDateTime = start;
    while now <= end {
        let state: DayState = derive_day_state(Some(&config), now);
        assert!(state.current_day >= previous_day, "day went backwards at {now}");
        assert!(state.current_day >= 1);
        assert!(state.current_day <= state.total_days);
        previous_day = state.current_day;
        now += Duration::days(1);
    }
    assert_eq!(previous_day, config.total_days);
}

#[test]
fn test_reported_total_days_is_the_stored_value() {
    let mut config: ChallengeConfig = create_test_config_between(
        datetime!(2024-01-01 00:00 UTC),
        datetime!(2024-01-03 00:00 UTC),
    );
    config.total_days = 99;

    let state: DayState = derive_day_state(Some(&config), datetime!(2024-01-03 00:00 UTC));

    assert_eq!(state.current_day, 3);
    assert_eq!(state.total_days, 99);
}

#[test]
fn test_inclusive_day_count_whole_days() {
    assert_eq!(
        inclusive_day_count(
            datetime!(2024-01-01 00:00 UTC),
            datetime!(2024-01-03 00:00 UTC)
        ),
        3
    );
    assert_eq!(
        inclusive_day_count(
            datetime!(2024-01-01 00:00 UTC),
            datetime!(2024-03-16 00:00 UTC)
        ),
        76
    );
}

#[test]
fn test_inclusive_day_count_rounds_partial_days_up() {
    assert_eq!(
        inclusive_day_count(
            datetime!(2024-01-01 00:00 UTC),
            datetime!(2024-01-01 12:00 UTC)
        ),
        2
    );
}

#[test]
fn test_inclusive_day_count_floors_inverted_range_to_one() {
    assert_eq!(
        inclusive_day_count(
            datetime!(2024-01-05 00:00 UTC),
            datetime!(2024-01-01 00:00 UTC)
        ),
        1
    );
}
