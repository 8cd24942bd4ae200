// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DailySchedule, DomainError, next_run_after};
use time::OffsetDateTime;
use time::macros::datetime;

#[test]
fn test_parse_rejects_bad_time() {
    let result: Result<DailySchedule, DomainError> = DailySchedule::parse("25:00", "UTC");
    assert!(matches!(result, Err(DomainError::InvalidScheduleTime(_))));
}

#[test]
fn test_parse_rejects_unknown_timezone() {
    let result: Result<DailySchedule, DomainError> = DailySchedule::parse("00:05", "Mars/Olympus");
    assert!(matches!(result, Err(DomainError::InvalidTimezone(_))));
}

#[test]
fn test_next_run_later_today() {
    let schedule: DailySchedule = DailySchedule::parse("00:05", "UTC").unwrap();

    let next: OffsetDateTime = next_run_after(&schedule, datetime!(2024-01-01 00:00 UTC)).unwrap();

    assert_eq!(next, datetime!(2024-01-01 00:05 UTC));
}

#[test]
fn test_next_run_rolls_to_tomorrow_when_passed() {
    let schedule: DailySchedule = DailySchedule::parse("00:05", "UTC").unwrap();

    let next: OffsetDateTime = next_run_after(&schedule, datetime!(2024-01-01 00:05 UTC)).unwrap();

    assert_eq!(next, datetime!(2024-01-02 00:05 UTC));
}

#[test]
fn test_next_run_in_declared_timezone() {
    // 00:05 in New York (EST, UTC-5) is 05:05 UTC.
    let schedule: DailySchedule = DailySchedule::parse("00:05", "America/New_York").unwrap();

    let next: OffsetDateTime = next_run_after(&schedule, datetime!(2024-01-10 12:00 UTC)).unwrap();

    assert_eq!(next, datetime!(2024-01-11 05:05 UTC));
}

#[test]
fn test_next_run_skips_forward_over_dst_gap() {
    // 2024-03-10 02:30 does not exist in New York; the run moves to 03:30 EDT.
    let schedule: DailySchedule = DailySchedule::parse("02:30", "America/New_York").unwrap();

    let next: OffsetDateTime = next_run_after(&schedule, datetime!(2024-03-10 05:00 UTC)).unwrap();

    assert_eq!(next, datetime!(2024-03-10 07:30 UTC));
}
