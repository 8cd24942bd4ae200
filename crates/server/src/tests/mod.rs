// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]


use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use challenge_api::{AdminAllowlist, CreateChallengeRequest};
use challenge_domain::TaskDefinition;
use challenge_persistence::Persistence;
use serde_json::Value;
use time::{Duration, OffsetDateTime};
use tower::ServiceExt;

use crate::{ACTOR_HEADER, AppState};

pub const ADMIN: &str = "admin1";
pub const MEMBER: &str = "member1";

/// Helper to create test app state with in-memory persistence.
pub fn create_test_app_state() -> AppState {
    let persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    AppState::new(persistence, AdminAllowlist::new([ADMIN]))
}

/// A challenge that started two days ago and runs for ten more days.
pub fn running_challenge_request() -> CreateChallengeRequest {
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    CreateChallengeRequest {
        name: String::from("Running Challenge"),
        start_date: now - Duration::days(2),
        end_date: now + Duration::days(10),
    }
}

/// Enrolls users 1 and 2 and creates a 10-point task.
pub async fn seed_participants_and_task(app_state: &AppState) -> TaskDefinition {
    let mut persistence = app_state.persistence.lock().await;
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    persistence.enroll_user(1, now).unwrap();
    persistence.enroll_user(2, now).unwrap();
    persistence.create_task_definition("Call a lead", 10).unwrap()
}

/// Sends one request through the router and returns the status and JSON body.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    actor: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(actor) = actor {
        builder = builder.header(ACTOR_HEADER, actor);
    }
    let request: Request<Body> = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status: StatusCode = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

    (status, value)
}
