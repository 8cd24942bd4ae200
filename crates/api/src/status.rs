// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Participant-facing challenge status.

use challenge_domain::{ChallengeConfig, DayState, derive_day_state};
use challenge_persistence::Persistence;
use time::OffsetDateTime;
use tracing::warn;

use crate::request_response::ChallengeStatusResponse;

/// Returns the status of the active challenge at `now`.
///
/// This read never fails. A storage error is logged and reported as "no
/// challenge configured".
pub fn get_challenge_status(
    persistence: &mut Persistence,
    now: OffsetDateTime,
) -> ChallengeStatusResponse {
    let active: Option<ChallengeConfig> = match persistence.get_active_challenge() {
        Ok(active) => active,
        Err(e) => {
            warn!(error = %e, "Failed to read active challenge, reporting defaults");
            None
        }
    };

    let state: DayState = derive_day_state(active.as_ref(), now);

    ChallengeStatusResponse {
        is_active: state.is_active,
        has_access: state.has_access,
        current_day: state.current_day,
        start_date: active.as_ref().map(|config| config.start_date),
        end_date: active.as_ref().map(|config| config.end_date),
        total_days: state.total_days,
        phase: state.phase.as_str().to_string(),
    }
}
