// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::day_clock::inclusive_day_count;
use crate::error::DomainError;
use crate::types::GoalTargets;
use time::OffsetDateTime;

/// Validates a challenge name.
///
/// # Errors
///
/// Returns an error if the name is empty or only whitespace.
pub fn validate_challenge_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidChallengeName(String::from(
            "Name cannot be empty",
        )));
    }
    Ok(())
}

/// Validates that a challenge date range is well formed.
///
/// # Errors
///
/// Returns an error if `start_date` is not strictly before `end_date`.
pub fn validate_date_range(
    start_date: OffsetDateTime,
    end_date: OffsetDateTime,
) -> Result<(), DomainError> {
    if start_date >= end_date {
        return Err(DomainError::InvalidDateRange {
            start_date,
            end_date,
        });
    }
    Ok(())
}

/// Validates a caller-supplied `total_days` against the date range.
///
/// Dates are authoritative, so a supplied value is only accepted when it
/// agrees with the derived inclusive day count.
///
/// # Returns
///
/// The derived day count.
///
/// # Errors
///
/// Returns an error if the supplied value differs from the derived count.
pub fn validate_total_days(
    supplied: Option<u32>,
    start_date: OffsetDateTime,
    end_date: OffsetDateTime,
) -> Result<u32, DomainError> {
    let derived: u32 = inclusive_day_count(start_date, end_date);
    match supplied {
        Some(supplied) if supplied != derived => {
            Err(DomainError::TotalDaysMismatch { supplied, derived })
        }
        _ => Ok(derived),
    }
}

/// Validates a challenge day supplied with a task completion.
///
/// # Errors
///
/// Returns an error if the day is zero.
pub const fn validate_challenge_day(day: u32) -> Result<(), DomainError> {
    if day == 0 {
        return Err(DomainError::InvalidChallengeDay {
            day,
            total_days: None,
        });
    }
    Ok(())
}

/// Validates a manual current-day override.
///
/// # Errors
///
/// Returns an error if the day lies outside `[1, total_days]`.
pub const fn validate_day_override(day: u32, total_days: u32) -> Result<(), DomainError> {
    if day == 0 || day > total_days {
        return Err(DomainError::InvalidChallengeDay {
            day,
            total_days: Some(total_days),
        });
    }
    Ok(())
}

/// Validates goal targets before they are stored.
///
/// A zero target is allowed and means "no target"; progress for that metric
/// is reported as zero.
///
/// # Errors
///
/// Returns an error if any target is negative or the revenue target is not
/// a finite number.
pub fn validate_goal_targets(targets: &GoalTargets) -> Result<(), DomainError> {
    if targets.leads_goal < 0 {
        return Err(DomainError::InvalidGoal {
            field: "leads_goal",
            reason: format!("must not be negative, got {}", targets.leads_goal),
        });
    }
    if targets.events_goal < 0 {
        return Err(DomainError::InvalidGoal {
            field: "events_goal",
            reason: format!("must not be negative, got {}", targets.events_goal),
        });
    }
    if !targets.revenue_goal.is_finite() {
        return Err(DomainError::InvalidGoal {
            field: "revenue_goal",
            reason: String::from("must be a finite number"),
        });
    }
    if targets.revenue_goal < 0.0 {
        return Err(DomainError::InvalidGoal {
            field: "revenue_goal",
            reason: format!("must not be negative, got {}", targets.revenue_goal),
        });
    }
    Ok(())
}
