// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod challenge_tests;
mod goals_tests;
mod reconciliation_tests;

use challenge_audit::{Action, Actor, AuditEvent, Cause};
use challenge_domain::{ChallengeConfig, TaskDefinition};
use time::OffsetDateTime;
use time::macros::datetime;

use crate::Persistence;

pub fn create_test_actor() -> Actor {
    Actor::admin("test-admin")
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("test-cause"), String::from("Test operation"))
}

pub fn create_test_event(action: &str) -> AuditEvent {
    AuditEvent::new(
        create_test_actor(),
        create_test_cause(),
        Action::new(action.to_string(), None),
        None,
    )
}

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

/// The instant used as "now" for writes in these tests.
pub const fn test_now() -> OffsetDateTime {
    datetime!(2024-01-01 08:00 UTC)
}

/// Creates the 2024-01-01 to 2024-03-16 challenge used across tests.
pub fn create_spring_challenge(persistence: &mut Persistence) -> ChallengeConfig {
    persistence
        .create_challenge(
            "Spring Sprint",
            datetime!(2024-01-01 0:00 UTC),
            datetime!(2024-03-16 0:00 UTC),
            test_now(),
            &create_test_event("CreateChallenge"),
        )
        .expect("challenge created")
}

/// Enrolls users 1 and 2 and creates a 10-point task.
pub fn seed_participants_and_task(persistence: &mut Persistence) -> TaskDefinition {
    persistence.enroll_user(1, test_now()).unwrap();
    persistence.enroll_user(2, test_now()).unwrap();
    persistence.create_task_definition("Call a lead", 10).unwrap()
}
