// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use challenge_domain::{DomainError, GoalTargets};

use super::{create_test_persistence, test_now};
use crate::error::PersistenceError;

#[test]
fn test_goals_absent_until_saved() {
    let mut persistence = create_test_persistence();

    assert_eq!(persistence.get_goals(1).unwrap(), None);
}

#[test]
fn test_upsert_replaces_existing_targets() {
    let mut persistence = create_test_persistence();
    let first = GoalTargets {
        leads_goal: 10,
        events_goal: 4,
        revenue_goal: 5000.0,
    };
    let second = GoalTargets {
        leads_goal: 20,
        events_goal: 0,
        revenue_goal: 7500.5,
    };

    persistence.upsert_goals(1, &first, test_now()).unwrap();
    persistence.upsert_goals(1, &second, test_now()).unwrap();

    assert_eq!(persistence.get_goals(1).unwrap(), Some(second));
}

#[test]
fn test_negative_target_is_rejected() {
    let mut persistence = create_test_persistence();
    let targets = GoalTargets {
        leads_goal: -1,
        ..GoalTargets::default()
    };

    let result = persistence.upsert_goals(1, &targets, test_now());

    assert!(matches!(
        result,
        Err(PersistenceError::DomainViolation(DomainError::InvalidGoal {
            field: "leads_goal",
            ..
        }))
    ));
    assert_eq!(persistence.get_goals(1).unwrap(), None);
}
