// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pure planning for the daily reconciliation run.
//!
//! The plan only describes what should change. Applying it (and claiming the
//! completion notification) is the job of the persistence and API layers.

use crate::day_clock::{DayState, derive_day_state};
use crate::types::{ChallengeConfig, ChallengePhase};
use time::OffsetDateTime;

/// What a reconciliation run should do for the active challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconciliationPlan {
    pub challenge_id: i64,
    /// The day currently stored on the configuration.
    pub stored_day: u32,
    /// The day to persist, when it differs from the stored day.
    pub new_day: Option<u32>,
    /// The stored record is active but its date range has passed.
    pub period_ended: bool,
    /// The derived state the plan was built from.
    pub day_state: DayState,
}

impl ReconciliationPlan {
    /// Returns true when the plan changes nothing.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.new_day.is_none() && !self.period_ended
    }
}

/// Builds the reconciliation plan for `config` at `now`.
///
/// The derived day is only persisted while the challenge is in progress.
/// Before the start date the stored day stays as is, and once the range has
/// passed the final stored day is kept for history while the record is
/// flagged for the end transition. A manual day override is therefore
/// overwritten by the first run that derives a different in-progress day.
#[must_use]
pub fn plan_reconciliation(config: &ChallengeConfig, now: OffsetDateTime) -> ReconciliationPlan {
    let day_state: DayState = derive_day_state(Some(config), now);

    let new_day: Option<u32> = match day_state.phase {
        ChallengePhase::InProgress if day_state.current_day != config.current_day => {
            Some(day_state.current_day)
        }
        _ => None,
    };

    ReconciliationPlan {
        challenge_id: config.id,
        stored_day: config.current_day,
        new_day,
        period_ended: config.is_active && day_state.phase == ChallengePhase::Ended,
        day_state,
    }
}
