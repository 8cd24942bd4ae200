// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use challenge_domain::{ChallengeConfig, ChallengePatch, DomainError};
use time::macros::datetime;

use super::{create_spring_challenge, create_test_event, create_test_persistence, test_now};
use crate::error::PersistenceError;
use crate::mutations::challenge::ChallengeWriteResult;

#[test]
fn test_create_challenge_derives_total_days_from_dates() {
    let mut persistence = create_test_persistence();

    let created: ChallengeConfig = create_spring_challenge(&mut persistence);

    assert_eq!(created.name, "Spring Sprint");
    assert_eq!(created.total_days, 76);
    assert_eq!(created.current_day, 1);
    assert!(created.is_active);
    assert!(created.completion_notified_at.is_none());
}

#[test]
fn test_create_challenge_deactivates_prior_active_record() {
    let mut persistence = create_test_persistence();
    let first: ChallengeConfig = create_spring_challenge(&mut persistence);

    let second: ChallengeConfig = persistence
        .create_challenge(
            "Summer Sprint",
            datetime!(2024-06-01 0:00 UTC),
            datetime!(2024-06-30 0:00 UTC),
            test_now(),
            &create_test_event("CreateChallenge"),
        )
        .unwrap();

    let active: ChallengeConfig = persistence.get_active_challenge().unwrap().unwrap();
    assert_eq!(active.id, second.id);
    assert!(!persistence.get_challenge(first.id).unwrap().is_active);
    assert_eq!(persistence.count_active_challenges().unwrap(), 1);
}

#[test]
fn test_repeated_creates_leave_exactly_one_active() {
    let mut persistence = create_test_persistence();

    for _ in 0..5 {
        create_spring_challenge(&mut persistence);
    }

    assert_eq!(persistence.count_active_challenges().unwrap(), 1);
}

#[test]
fn test_create_challenge_rejects_empty_name() {
    let mut persistence = create_test_persistence();

    let result = persistence.create_challenge(
        "   ",
        datetime!(2024-01-01 0:00 UTC),
        datetime!(2024-03-16 0:00 UTC),
        test_now(),
        &create_test_event("CreateChallenge"),
    );

    assert!(matches!(
        result,
        Err(PersistenceError::DomainViolation(
            DomainError::InvalidChallengeName(_)
        ))
    ));
    assert!(persistence.get_active_challenge().unwrap().is_none());
}

#[test]
fn test_create_challenge_rejects_inverted_range() {
    let mut persistence = create_test_persistence();

    let result = persistence.create_challenge(
        "Backwards",
        datetime!(2024-03-16 0:00 UTC),
        datetime!(2024-01-01 0:00 UTC),
        test_now(),
        &create_test_event("CreateChallenge"),
    );

    assert!(matches!(
        result,
        Err(PersistenceError::DomainViolation(
            DomainError::InvalidDateRange { .. }
        ))
    ));
}

#[test]
fn test_end_challenge_deactivates_and_moves_end_date() {
    let mut persistence = create_test_persistence();
    let created: ChallengeConfig = create_spring_challenge(&mut persistence);

    let result: ChallengeWriteResult = persistence
        .end_challenge(
            created.id,
            datetime!(2024-01-10 12:00 UTC),
            &create_test_event("EndChallenge"),
        )
        .unwrap();

    assert!(result.changed);
    assert!(!result.config.is_active);
    assert_eq!(result.config.end_date, datetime!(2024-01-10 12:00 UTC));
    assert_eq!(result.config.total_days, 11);
    assert!(persistence.get_active_challenge().unwrap().is_none());
}

#[test]
fn test_end_challenge_keeps_end_date_already_past() {
    let mut persistence = create_test_persistence();
    let created: ChallengeConfig = create_spring_challenge(&mut persistence);

    let result: ChallengeWriteResult = persistence
        .end_challenge(
            created.id,
            datetime!(2024-04-01 0:00 UTC),
            &create_test_event("EndChallenge"),
        )
        .unwrap();

    assert_eq!(result.config.end_date, created.end_date);
    assert_eq!(result.config.total_days, created.total_days);
}

#[test]
fn test_end_challenge_before_start_keeps_valid_range() {
    let mut persistence = create_test_persistence();
    let created: ChallengeConfig = create_spring_challenge(&mut persistence);

    let result: ChallengeWriteResult = persistence
        .end_challenge(
            created.id,
            datetime!(2023-12-20 0:00 UTC),
            &create_test_event("EndChallenge"),
        )
        .unwrap();

    assert!(!result.config.is_active);
    assert_eq!(result.config.start_date, created.start_date);
    assert_eq!(result.config.end_date, created.end_date);
    assert_eq!(result.config.total_days, created.total_days);

    let patch = ChallengePatch {
        name: Some(String::from("Cancelled Sprint")),
        ..ChallengePatch::default()
    };
    let renamed: ChallengeWriteResult = persistence
        .update_challenge(
            created.id,
            &patch,
            datetime!(2023-12-21 0:00 UTC),
            &create_test_event("UpdateChallenge"),
        )
        .unwrap();

    assert_eq!(renamed.config.name, "Cancelled Sprint");
    assert!(renamed.config.start_date < renamed.config.end_date);
}

#[test]
fn test_end_challenge_twice_is_a_noop() {
    let mut persistence = create_test_persistence();
    let created: ChallengeConfig = create_spring_challenge(&mut persistence);
    let now = datetime!(2024-01-10 12:00 UTC);

    persistence
        .end_challenge(created.id, now, &create_test_event("EndChallenge"))
        .unwrap();
    let second: ChallengeWriteResult = persistence
        .end_challenge(created.id, now, &create_test_event("EndChallenge"))
        .unwrap();

    assert!(!second.changed);
    assert_eq!(persistence.get_audit_timeline(created.id).unwrap().len(), 2);
}

#[test]
fn test_end_unknown_challenge_is_not_found() {
    let mut persistence = create_test_persistence();

    let result = persistence.end_challenge(99, test_now(), &create_test_event("EndChallenge"));

    assert_eq!(result, Err(PersistenceError::ChallengeNotFound(99)));
}

#[test]
fn test_update_name_keeps_dates() {
    let mut persistence = create_test_persistence();
    let created: ChallengeConfig = create_spring_challenge(&mut persistence);

    let patch = ChallengePatch {
        name: Some(String::from("Renamed")),
        ..ChallengePatch::default()
    };
    let result: ChallengeWriteResult = persistence
        .update_challenge(
            created.id,
            &patch,
            test_now(),
            &create_test_event("UpdateChallenge"),
        )
        .unwrap();

    assert!(result.changed);
    assert_eq!(result.config.name, "Renamed");
    assert_eq!(result.config.start_date, created.start_date);
    assert_eq!(result.config.total_days, 76);
}

#[test]
fn test_update_end_date_recomputes_total_days() {
    let mut persistence = create_test_persistence();
    let created: ChallengeConfig = create_spring_challenge(&mut persistence);

    let patch = ChallengePatch {
        end_date: Some(datetime!(2024-01-31 0:00 UTC)),
        ..ChallengePatch::default()
    };
    let result: ChallengeWriteResult = persistence
        .update_challenge(
            created.id,
            &patch,
            test_now(),
            &create_test_event("UpdateChallenge"),
        )
        .unwrap();

    assert_eq!(result.config.total_days, 31);
}

#[test]
fn test_update_rejects_mismatched_total_days() {
    let mut persistence = create_test_persistence();
    let created: ChallengeConfig = create_spring_challenge(&mut persistence);

    let patch = ChallengePatch {
        end_date: Some(datetime!(2024-01-31 0:00 UTC)),
        total_days: Some(10),
        ..ChallengePatch::default()
    };
    let result = persistence.update_challenge(
        created.id,
        &patch,
        test_now(),
        &create_test_event("UpdateChallenge"),
    );

    assert_eq!(
        result,
        Err(PersistenceError::DomainViolation(
            DomainError::TotalDaysMismatch {
                supplied: 10,
                derived: 31
            }
        ))
    );
    assert_eq!(
        persistence.get_challenge(created.id).unwrap().total_days,
        76,
        "rejected update must not be applied"
    );
}

#[test]
fn test_update_accepts_matching_total_days() {
    let mut persistence = create_test_persistence();
    let created: ChallengeConfig = create_spring_challenge(&mut persistence);

    let patch = ChallengePatch {
        total_days: Some(76),
        ..ChallengePatch::default()
    };
    let result = persistence.update_challenge(
        created.id,
        &patch,
        test_now(),
        &create_test_event("UpdateChallenge"),
    );

    assert!(result.is_ok());
}

#[test]
fn test_update_rejects_start_after_end() {
    let mut persistence = create_test_persistence();
    let created: ChallengeConfig = create_spring_challenge(&mut persistence);

    let patch = ChallengePatch {
        start_date: Some(datetime!(2024-04-01 0:00 UTC)),
        ..ChallengePatch::default()
    };
    let result = persistence.update_challenge(
        created.id,
        &patch,
        test_now(),
        &create_test_event("UpdateChallenge"),
    );

    assert!(matches!(
        result,
        Err(PersistenceError::DomainViolation(
            DomainError::InvalidDateRange { .. }
        ))
    ));
}

#[test]
fn test_empty_update_changes_nothing() {
    let mut persistence = create_test_persistence();
    let created: ChallengeConfig = create_spring_challenge(&mut persistence);

    let result: ChallengeWriteResult = persistence
        .update_challenge(
            created.id,
            &ChallengePatch::default(),
            test_now(),
            &create_test_event("UpdateChallenge"),
        )
        .unwrap();

    assert!(!result.changed);
    assert_eq!(result.config, created);
}

#[test]
fn test_set_current_day_within_range() {
    let mut persistence = create_test_persistence();
    let created: ChallengeConfig = create_spring_challenge(&mut persistence);

    let updated: ChallengeConfig = persistence
        .set_current_day(created.id, 10, test_now(), &create_test_event("SetChallengeDay"))
        .unwrap();

    assert_eq!(updated.current_day, 10);
}

#[test]
fn test_set_current_day_rejects_out_of_range() {
    let mut persistence = create_test_persistence();
    let created: ChallengeConfig = create_spring_challenge(&mut persistence);

    for day in [0, 77] {
        let result = persistence.set_current_day(
            created.id,
            day,
            test_now(),
            &create_test_event("SetChallengeDay"),
        );
        assert_eq!(
            result,
            Err(PersistenceError::DomainViolation(
                DomainError::InvalidChallengeDay {
                    day,
                    total_days: Some(76)
                }
            ))
        );
    }
}

#[test]
fn test_set_current_day_accepts_last_day() {
    let mut persistence = create_test_persistence();
    let created: ChallengeConfig = create_spring_challenge(&mut persistence);

    let updated: ChallengeConfig = persistence
        .set_current_day(created.id, 76, test_now(), &create_test_event("SetChallengeDay"))
        .unwrap();

    assert_eq!(updated.current_day, 76);
}
