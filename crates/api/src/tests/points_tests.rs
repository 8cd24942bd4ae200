// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use challenge_domain::PointsEntry;

use super::{
    ADMIN, MEMBER, allowlist, create_test_cause, create_test_persistence,
    seed_participants_and_task, test_now,
};
use crate::{
    ADJUSTMENT_ACTIVITY, AdjustPointsRequest, ApiError, CompleteTaskRequest, adjust_points,
    complete_task, get_points_total,
};

fn adjustment(points: i64, description: &str) -> AdjustPointsRequest {
    AdjustPointsRequest {
        points,
        description: description.to_string(),
    }
}

#[test]
fn test_total_for_unknown_user_is_zero() {
    let mut persistence = create_test_persistence();

    let response = get_points_total(&mut persistence, 99);

    assert_eq!(response.user_id, 99);
    assert_eq!(response.total, 0);
}

#[test]
fn test_negative_adjustment_compensates_a_completion() {
    let mut persistence = create_test_persistence();
    let task = seed_participants_and_task(&mut persistence);
    complete_task(
        &mut persistence,
        CompleteTaskRequest {
            user_id: 1,
            task_definition_id: task.id,
            challenge_day: 1,
            notes: None,
        },
        test_now(),
    )
    .unwrap();

    let response = adjust_points(
        &mut persistence,
        &allowlist(),
        ADMIN,
        1,
        &adjustment(-10, "Duplicate call logged"),
        create_test_cause(),
        test_now(),
    )
    .unwrap();

    assert_eq!(response.total, 0);
    assert_eq!(get_points_total(&mut persistence, 1).total, 0);

    let entries: Vec<PointsEntry> = persistence.points_entries_for(1).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].activity_type, ADJUSTMENT_ACTIVITY);
    assert_eq!(entries[0].points_earned, -10);
}

#[test]
fn test_adjustment_rejects_zero_and_blank_description() {
    let mut persistence = create_test_persistence();
    seed_participants_and_task(&mut persistence);

    let zero = adjust_points(
        &mut persistence,
        &allowlist(),
        ADMIN,
        1,
        &adjustment(0, "nothing"),
        create_test_cause(),
        test_now(),
    );
    let blank = adjust_points(
        &mut persistence,
        &allowlist(),
        ADMIN,
        1,
        &adjustment(5, "   "),
        create_test_cause(),
        test_now(),
    );

    assert!(matches!(zero, Err(ApiError::InvalidInput { .. })));
    assert!(matches!(blank, Err(ApiError::InvalidInput { .. })));
    assert!(persistence.points_entries_for(1).unwrap().is_empty());
}

#[test]
fn test_adjustment_by_member_is_forbidden() {
    let mut persistence = create_test_persistence();
    seed_participants_and_task(&mut persistence);

    let result = adjust_points(
        &mut persistence,
        &allowlist(),
        MEMBER,
        1,
        &adjustment(50, "Self-awarded"),
        create_test_cause(),
        test_now(),
    );

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
    assert_eq!(get_points_total(&mut persistence, 1).total, 0);
}

#[test]
fn test_adjustment_for_unenrolled_user_is_not_found() {
    let mut persistence = create_test_persistence();

    let result = adjust_points(
        &mut persistence,
        &allowlist(),
        ADMIN,
        5,
        &adjustment(5, "Bonus"),
        create_test_cause(),
        test_now(),
    );

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}
