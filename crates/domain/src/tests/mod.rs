// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod day_clock;
mod goals;
mod reconciliation;
mod schedule;

use crate::ChallengeConfig;
use time::OffsetDateTime;
use time::macros::datetime;

/// Builds the 75-day reference challenge running 2024-01-01 to 2024-03-16.
pub fn create_test_config() -> ChallengeConfig {
    ChallengeConfig {
        id: 1,
        name: String::from("Spring Sprint"),
        start_date: datetime!(2024-01-01 00:00 UTC),
        end_date: datetime!(2024-03-16 00:00 UTC),
        total_days: 75,
        current_day: 1,
        is_active: true,
        completion_notified_at: None,
    }
}

pub fn create_test_config_between(start: OffsetDateTime, end: OffsetDateTime) -> ChallengeConfig {
    ChallengeConfig {
        start_date: start,
        end_date: end,
        total_days: crate::inclusive_day_count(start, end),
        ..create_test_config()
    }
}
