// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod points_tests;
mod task_tests;

use std::sync::Arc;

use challenge_audit::Cause;
use challenge_domain::TaskDefinition;
use challenge_persistence::Persistence;
use time::OffsetDateTime;
use time::macros::datetime;
use tokio::sync::Mutex;

use crate::{AdminAllowlist, ChallengeResponse, CreateChallengeRequest, create_challenge};

pub const ADMIN: &str = "admin-1";
pub const MEMBER: &str = "member-7";

pub fn allowlist() -> AdminAllowlist {
    AdminAllowlist::new([ADMIN])
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("test-request"), String::from("Test request"))
}

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn shared(persistence: Persistence) -> Arc<Mutex<Persistence>> {
    Arc::new(Mutex::new(persistence))
}

/// The instant used as "now" for writes in these tests.
pub const fn test_now() -> OffsetDateTime {
    datetime!(2024-01-01 08:00 UTC)
}

pub fn spring_request() -> CreateChallengeRequest {
    CreateChallengeRequest {
        name: String::from("Spring Sprint"),
        start_date: datetime!(2024-01-01 0:00 UTC),
        end_date: datetime!(2024-03-16 0:00 UTC),
    }
}

/// Creates the 2024-01-01 to 2024-03-16 challenge as an admin.
pub fn create_spring_challenge(persistence: &mut Persistence) -> ChallengeResponse {
    create_challenge(
        persistence,
        &allowlist(),
        ADMIN,
        &spring_request(),
        create_test_cause(),
        test_now(),
    )
    .expect("challenge created")
}

/// Enrolls users 1 and 2 and creates a 10-point task.
pub fn seed_participants_and_task(persistence: &mut Persistence) -> TaskDefinition {
    persistence.enroll_user(1, test_now()).unwrap();
    persistence.enroll_user(2, test_now()).unwrap();
    persistence.create_task_definition("Call a lead", 10).unwrap()
}
