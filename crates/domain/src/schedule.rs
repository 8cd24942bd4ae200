// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Daily reconciliation schedule.
//!
//! The reconciliation job runs once per day at a wall-clock time in a
//! declared timezone. All computation happens in that timezone and the
//! result is returned as a UTC instant.
//!
//! ## Invariants
//!
//! - The next run is always strictly after `now`
//! - A run time that falls into a DST gap moves forward by one hour
//! - A run time that is ambiguous (DST overlap) uses the earlier instant

use crate::error::DomainError;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use time::OffsetDateTime;

/// A daily run time in a declared timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailySchedule {
    run_at: NaiveTime,
    timezone: Tz,
}

impl DailySchedule {
    /// Parses a schedule from an `HH:MM` time and an IANA timezone name.
    ///
    /// # Errors
    ///
    /// Returns an error if the time or the timezone cannot be parsed.
    pub fn parse(run_at: &str, timezone: &str) -> Result<Self, DomainError> {
        let run_at: NaiveTime = NaiveTime::parse_from_str(run_at, "%H:%M")
            .map_err(|e| DomainError::InvalidScheduleTime(format!("'{run_at}': {e}")))?;
        let timezone: Tz = timezone
            .parse::<Tz>()
            .map_err(|_| DomainError::InvalidTimezone(timezone.to_string()))?;
        Ok(Self { run_at, timezone })
    }

    /// The configured timezone.
    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.timezone
    }

    /// The configured wall-clock run time.
    #[must_use]
    pub const fn run_at(&self) -> NaiveTime {
        self.run_at
    }
}

/// Resolves a local wall-clock time on `date` to a UTC instant.
fn resolve_local(schedule: &DailySchedule, date: NaiveDate) -> Option<DateTime<Utc>> {
    let local = date.and_time(schedule.run_at);
    schedule
        .timezone
        .from_local_datetime(&local)
        .earliest()
        .or_else(|| {
            // Nonexistent local time (spring-forward gap)
            schedule
                .timezone
                .from_local_datetime(&(local + Duration::hours(1)))
                .earliest()
        })
        .map(|dt| dt.with_timezone(&Utc))
}

/// Computes the first scheduled run strictly after `now`.
///
/// # Errors
///
/// Returns an error if `now` cannot be represented in the schedule's
/// timezone or the computed instant overflows.
pub fn next_run_after(
    schedule: &DailySchedule,
    now: OffsetDateTime,
) -> Result<OffsetDateTime, DomainError> {
    let overflow = |operation: &str| DomainError::DateArithmeticOverflow {
        operation: operation.to_string(),
    };

    let now_utc: DateTime<Utc> = DateTime::<Utc>::from_timestamp(now.unix_timestamp(), 0)
        .ok_or_else(|| overflow("converting the current instant"))?;
    let today: NaiveDate = now_utc.with_timezone(&schedule.timezone).date_naive();

    let mut candidate_date: NaiveDate = today;
    for _ in 0..3 {
        if let Some(candidate) = resolve_local(schedule, candidate_date) {
            if candidate > now_utc {
                return OffsetDateTime::from_unix_timestamp(candidate.timestamp())
                    .map_err(|_| overflow("converting the scheduled instant"));
            }
        }
        candidate_date = candidate_date
            .succ_opt()
            .ok_or_else(|| overflow("advancing to the next day"))?;
    }

    Err(overflow("finding the next scheduled run"))
}
