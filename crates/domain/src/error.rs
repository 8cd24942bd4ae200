// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::OffsetDateTime;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Challenge name is empty or invalid.
    InvalidChallengeName(String),
    /// The challenge start date is not strictly before its end date.
    InvalidDateRange {
        /// The offending start date.
        start_date: OffsetDateTime,
        /// The offending end date.
        end_date: OffsetDateTime,
    },
    /// A supplied `total_days` disagrees with the count derived from the dates.
    TotalDaysMismatch {
        /// The value supplied by the caller.
        supplied: u32,
        /// The inclusive day count derived from the dates.
        derived: u32,
    },
    /// A challenge day lies outside `[1, total_days]`.
    InvalidChallengeDay {
        /// The requested day.
        day: u32,
        /// The upper bound, when known.
        total_days: Option<u32>,
    },
    /// A goal target is negative or not a finite number.
    InvalidGoal {
        /// The goal field that failed validation.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// The daily schedule time could not be parsed.
    InvalidScheduleTime(String),
    /// The timezone is not a known IANA zone.
    InvalidTimezone(String),
    /// Challenge does not exist.
    ChallengeNotFound(i64),
    /// Task definition does not exist.
    TaskNotFound(i64),
    /// The user is not an enrolled challenge participant.
    UserNotFound(i64),
    /// A persisted value could not be mapped back to a domain value.
    InvalidStoredValue {
        /// The column or field name.
        field: &'static str,
        /// The unrecognised value.
        value: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidChallengeName(msg) => write!(f, "Invalid challenge name: {msg}"),
            Self::InvalidDateRange {
                start_date,
                end_date,
            } => {
                write!(
                    f,
                    "Challenge start date {start_date} must be before end date {end_date}"
                )
            }
            Self::TotalDaysMismatch { supplied, derived } => {
                write!(
                    f,
                    "total_days {supplied} does not match the {derived} days in the date range"
                )
            }
            Self::InvalidChallengeDay { day, total_days } => match total_days {
                Some(total) => write!(
                    f,
                    "Invalid challenge day: {day}. Must be between 1 and {total}"
                ),
                None => write!(f, "Invalid challenge day: {day}. Must be at least 1"),
            },
            Self::InvalidGoal { field, reason } => {
                write!(f, "Invalid goal '{field}': {reason}")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::InvalidScheduleTime(msg) => write!(f, "Invalid schedule time: {msg}"),
            Self::InvalidTimezone(tz) => write!(f, "Unknown timezone: {tz}"),
            Self::ChallengeNotFound(id) => write!(f, "Challenge {id} not found"),
            Self::TaskNotFound(id) => write!(f, "Task definition {id} not found"),
            Self::UserNotFound(id) => {
                write!(f, "User {id} is not enrolled in the challenge")
            }
            Self::InvalidStoredValue { field, value } => {
                write!(f, "Invalid stored value for '{field}': {value}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
