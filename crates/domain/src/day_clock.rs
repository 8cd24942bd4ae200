// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Day derivation for the active challenge.
//!
//! The current challenge day and active flag are never trusted from storage
//! on the read path. They are derived from the stored date range and the
//! current instant by the pure function [`derive_day_state`].
//!
//! ## Invariants
//!
//! - `current_day` always lies in `[1, computed_total_days]`
//! - Within the date range, `current_day` is non-decreasing as `now` advances
//! - Outside the date range, `current_day` is `1`
//! - A missing configuration yields a safe default with no access

use crate::types::{ChallengeConfig, ChallengePhase};
use time::{Duration, OffsetDateTime};

/// Fallback challenge length reported when no challenge is configured.
pub const DEFAULT_TOTAL_DAYS: u32 = 75;

/// The derived temporal state of a challenge at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayState {
    /// The stored active flag AND the instant lies within the date range.
    pub is_active: bool,
    /// Whether a challenge configuration exists at all.
    pub has_access: bool,
    /// 1-based challenge day.
    pub current_day: u32,
    /// The stored `total_days` of the configuration.
    pub total_days: u32,
    /// Position of the instant relative to the date range.
    pub phase: ChallengePhase,
}

impl DayState {
    /// The state reported when no challenge is configured.
    #[must_use]
    pub const fn unconfigured() -> Self {
        Self {
            is_active: false,
            has_access: false,
            current_day: 1,
            total_days: DEFAULT_TOTAL_DAYS,
            phase: ChallengePhase::Unconfigured,
        }
    }
}

/// Computes the inclusive number of days covered by `[start_date, end_date]`.
///
/// This is `ceil((end - start) / 1 day) + 1`, with a floor of one day for
/// empty or inverted ranges.
#[must_use]
pub fn inclusive_day_count(start_date: OffsetDateTime, end_date: OffsetDateTime) -> u32 {
    let span: Duration = end_date - start_date;
    if span <= Duration::ZERO {
        return 1;
    }

    let mut whole_days: i64 = span.whole_days();
    if span > Duration::days(whole_days) {
        whole_days += 1;
    }

    u32::try_from(whole_days.saturating_add(1)).unwrap_or(u32::MAX)
}

/// Classifies `now` against the configuration's date range.
#[must_use]
pub fn challenge_phase(config: &ChallengeConfig, now: OffsetDateTime) -> ChallengePhase {
    if now < config.start_date {
        ChallengePhase::NotStarted
    } else if now > config.end_date {
        ChallengePhase::Ended
    } else {
        ChallengePhase::InProgress
    }
}

/// Derives the temporal state of a challenge at `now`.
///
/// This function has no side effects and never fails. Passing `None`
/// yields [`DayState::unconfigured`].
#[must_use]
pub fn derive_day_state(config: Option<&ChallengeConfig>, now: OffsetDateTime) -> DayState {
    let Some(config) = config else {
        return DayState::unconfigured();
    };

    let computed_total_days: u32 = inclusive_day_count(config.start_date, config.end_date);
    let phase: ChallengePhase = challenge_phase(config, now);

    let current_day: u32 = if phase == ChallengePhase::InProgress {
        let day_index: i64 = (now - config.start_date).whole_days();
        let day: u32 = u32::try_from(day_index.saturating_add(1)).unwrap_or(u32::MAX);
        day.clamp(1, computed_total_days)
    } else {
        1
    };

    DayState {
        is_active: config.is_active && phase == ChallengePhase::InProgress,
        has_access: true,
        current_day,
        total_days: config.total_days,
        phase,
    }
}
