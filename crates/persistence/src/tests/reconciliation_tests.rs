// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use challenge_domain::{ChallengeConfig, Participant};
use time::macros::datetime;

use super::{create_spring_challenge, create_test_event, create_test_persistence, test_now};

#[test]
fn test_apply_reconciliation_day_updates_current_day() {
    let mut persistence = create_test_persistence();
    let created: ChallengeConfig = create_spring_challenge(&mut persistence);

    let updated: bool = persistence
        .apply_reconciliation_day(created.id, 12, datetime!(2024-01-12 0:05 UTC))
        .unwrap();

    assert!(updated);
    assert_eq!(persistence.get_challenge(created.id).unwrap().current_day, 12);
}

#[test]
fn test_completion_claim_succeeds_once() {
    let mut persistence = create_test_persistence();
    let created: ChallengeConfig = create_spring_challenge(&mut persistence);
    let now = datetime!(2024-03-17 0:05 UTC);

    let first: bool = persistence.claim_challenge_completion(created.id, now).unwrap();
    let second: bool = persistence.claim_challenge_completion(created.id, now).unwrap();

    assert!(first);
    assert!(!second);

    let ended: ChallengeConfig = persistence.get_challenge(created.id).unwrap();
    assert!(!ended.is_active);
    assert_eq!(ended.completion_notified_at, Some(now));
}

#[test]
fn test_completion_claim_ignores_admin_ended_challenge() {
    let mut persistence = create_test_persistence();
    let created: ChallengeConfig = create_spring_challenge(&mut persistence);
    persistence
        .end_challenge(created.id, test_now(), &create_test_event("EndChallenge"))
        .unwrap();

    let claimed: bool = persistence
        .claim_challenge_completion(created.id, datetime!(2024-03-17 0:05 UTC))
        .unwrap();

    assert!(!claimed);
}

#[test]
fn test_active_participants_excludes_withdrawn_users() {
    let mut persistence = create_test_persistence();
    for user_id in [1, 2, 3] {
        persistence.enroll_user(user_id, test_now()).unwrap();
    }
    persistence.set_participant_active(2, false).unwrap();

    let participants: Vec<Participant> = persistence.active_participants().unwrap();

    assert_eq!(
        participants.iter().map(|p| p.user_id).collect::<Vec<_>>(),
        vec![1, 3]
    );
}
