// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use challenge_domain::{CompletionActor, CompletionStatus, PointsEntry};
use futures::future::join_all;

use super::{create_test_persistence, seed_participants_and_task, shared, test_now};
use crate::{ApiError, CompleteTaskRequest, CompleteTaskResponse, complete_task};

fn request(user_id: i64, task_definition_id: i64, challenge_day: u32) -> CompleteTaskRequest {
    CompleteTaskRequest {
        user_id,
        task_definition_id,
        challenge_day,
        notes: None,
    }
}

#[test]
fn test_first_completion_awards_points() {
    let mut persistence = create_test_persistence();
    let task = seed_participants_and_task(&mut persistence);

    let response = complete_task(&mut persistence, request(1, task.id, 1), test_now()).unwrap();

    assert_eq!(response.status, CompletionStatus::Completed);
    assert_eq!(response.points_awarded, 10);

    let entries: Vec<PointsEntry> = persistence.points_entries_for(1).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].activity_type, "task_completion");
    assert!(entries[0].task_completion_id.is_some());
}

#[test]
fn test_repeat_completion_is_already_completed() {
    let mut persistence = create_test_persistence();
    let task = seed_participants_and_task(&mut persistence);

    complete_task(&mut persistence, request(1, task.id, 4), test_now()).unwrap();
    let again = complete_task(&mut persistence, request(1, task.id, 4), test_now()).unwrap();

    assert_eq!(again.status, CompletionStatus::AlreadyCompleted);
    assert_eq!(again.points_awarded, 0);
    assert_eq!(persistence.total_points_for(1).unwrap(), 10);
}

#[test]
fn test_same_task_on_another_day_counts_again() {
    let mut persistence = create_test_persistence();
    let task = seed_participants_and_task(&mut persistence);

    complete_task(&mut persistence, request(1, task.id, 1), test_now()).unwrap();
    complete_task(&mut persistence, request(1, task.id, 2), test_now()).unwrap();
    complete_task(&mut persistence, request(2, task.id, 1), test_now()).unwrap();

    assert_eq!(persistence.total_points_for(1).unwrap(), 20);
    assert_eq!(persistence.total_points_for(2).unwrap(), 10);
    assert_eq!(
        persistence.completions_for(1, None).unwrap()[0].actor,
        CompletionActor::System
    );
}

#[tokio::test]
async fn test_concurrent_duplicate_completions_award_once() {
    let persistence = shared(create_test_persistence());
    let task_id: i64 = seed_participants_and_task(&mut *persistence.lock().await).id;

    let attempts = (0..2).map(|_| {
        let persistence = persistence.clone();
        async move {
            let mut persistence = persistence.lock().await;
            complete_task(&mut persistence, request(1, task_id, 5), test_now())
        }
    });
    let results: Vec<CompleteTaskResponse> = join_all(attempts)
        .await
        .into_iter()
        .map(Result::unwrap)
        .collect();

    let completed = results
        .iter()
        .filter(|r| r.status == CompletionStatus::Completed)
        .count();
    let duplicates = results
        .iter()
        .filter(|r| r.status == CompletionStatus::AlreadyCompleted)
        .count();
    assert_eq!((completed, duplicates), (1, 1));

    let mut persistence = persistence.lock().await;
    assert_eq!(persistence.completions_for(1, Some(5)).unwrap().len(), 1);
    assert_eq!(persistence.points_entries_for(1).unwrap().len(), 1);
}

#[test]
fn test_unknown_task_and_user_are_not_found() {
    let mut persistence = create_test_persistence();
    let task = seed_participants_and_task(&mut persistence);

    let unknown_task = complete_task(&mut persistence, request(1, 999, 1), test_now());
    let unknown_user = complete_task(&mut persistence, request(42, task.id, 1), test_now());

    assert!(matches!(unknown_task, Err(ApiError::ResourceNotFound { .. })));
    assert!(matches!(unknown_user, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_day_zero_is_invalid() {
    let mut persistence = create_test_persistence();
    let task = seed_participants_and_task(&mut persistence);

    let result = complete_task(&mut persistence, request(1, task.id, 0), test_now());

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
    assert_eq!(persistence.total_points_for(1).unwrap(), 0);
}
