// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod metrics;
mod scheduler;

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use challenge_api::{
    AdjustPointsRequest, AdminAllowlist, ApiError, AuthorizationService, ChallengeResponse,
    ChallengeStatusResponse, CompleteTaskRequest, CompleteTaskResponse, CreateChallengeRequest,
    GoalProgressAggregator, LoggingNotifier, PointsTotalResponse, ReconciliationJob,
    ReconciliationReport, SaveGoalsRequest, SaveGoalsResponse, SetChallengeDayRequest,
    UpdateChallengeRequest,
};
use challenge_audit::Cause;
use challenge_domain::{DailySchedule, GoalProgress};
use challenge_persistence::Persistence;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::metrics::UnconnectedMetrics;

/// Header carrying the caller's actor identifier on admin requests.
const ACTOR_HEADER: &str = "x-actor-id";

/// Challenge Server - HTTP server for the Challenge Engine
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Actor identifier granted the Admin role. May be repeated.
    #[arg(long = "admin")]
    admins: Vec<String>,

    /// Local time (`HH:MM`) of the daily reconciliation run
    #[arg(long, default_value = "00:05")]
    reconcile_at: String,

    /// IANA timezone the reconciliation time is expressed in
    #[arg(long, default_value = "UTC")]
    timezone: String,

    /// Disable the daily reconciliation scheduler
    #[arg(long)]
    no_scheduler: bool,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<Persistence>>,
    authorization: Arc<AdminAllowlist>,
    goals: Arc<GoalProgressAggregator<UnconnectedMetrics>>,
    reconciliation: Arc<ReconciliationJob<LoggingNotifier>>,
}

impl AppState {
    fn new(persistence: Persistence, authorization: AdminAllowlist) -> Self {
        let persistence: Arc<Mutex<Persistence>> = Arc::new(Mutex::new(persistence));
        Self {
            goals: Arc::new(GoalProgressAggregator::new(
                Arc::clone(&persistence),
                UnconnectedMetrics,
            )),
            reconciliation: Arc::new(ReconciliationJob::new(
                Arc::clone(&persistence),
                LoggingNotifier,
            )),
            authorization: Arc::new(authorization),
            persistence,
        }
    }
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::DomainRuleViolation { .. } => StatusCode::CONFLICT,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Reads the caller's actor identifier. A missing header yields an empty
/// identifier, which the authorization port rejects.
fn actor_id(headers: &HeaderMap) -> &str {
    headers
        .get(ACTOR_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

fn admin_cause(action: &str) -> Cause {
    Cause::new(
        String::from("admin_request"),
        format!("Admin request: {action}"),
    )
}

/// Handler for GET `/challenge/status` endpoint.
async fn handle_get_status(
    AxumState(app_state): AxumState<AppState>,
) -> Json<ChallengeStatusResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Json(challenge_api::get_challenge_status(
        &mut persistence,
        OffsetDateTime::now_utc(),
    ))
}

/// Handler for POST `/admin/challenge` endpoint.
async fn handle_create_challenge(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateChallengeRequest>,
) -> Result<(StatusCode, Json<ChallengeResponse>), HttpError> {
    let actor: &str = actor_id(&headers);
    info!(actor_id = actor, name = %req.name, "Handling create_challenge request");

    let mut persistence = app_state.persistence.lock().await;
    let created: ChallengeResponse = challenge_api::create_challenge(
        &mut persistence,
        app_state.authorization.as_ref(),
        actor,
        &req,
        admin_cause("create_challenge"),
        OffsetDateTime::now_utc(),
    )?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Handler for POST `/admin/challenge/{challenge_id}/end` endpoint.
async fn handle_end_challenge(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(challenge_id): Path<i64>,
) -> Result<Json<ChallengeResponse>, HttpError> {
    let actor: &str = actor_id(&headers);
    info!(actor_id = actor, challenge_id, "Handling end_challenge request");

    let mut persistence = app_state.persistence.lock().await;
    let ended: ChallengeResponse = challenge_api::end_challenge(
        &mut persistence,
        app_state.authorization.as_ref(),
        actor,
        challenge_id,
        admin_cause("end_challenge"),
        OffsetDateTime::now_utc(),
    )?;

    Ok(Json(ended))
}

/// Handler for PATCH `/admin/challenge/{challenge_id}` endpoint.
async fn handle_update_challenge(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(challenge_id): Path<i64>,
    Json(req): Json<UpdateChallengeRequest>,
) -> Result<Json<ChallengeResponse>, HttpError> {
    let actor: &str = actor_id(&headers);
    info!(actor_id = actor, challenge_id, "Handling update_challenge request");

    let mut persistence = app_state.persistence.lock().await;
    let updated: ChallengeResponse = challenge_api::update_challenge(
        &mut persistence,
        app_state.authorization.as_ref(),
        actor,
        challenge_id,
        req,
        admin_cause("update_challenge"),
        OffsetDateTime::now_utc(),
    )?;

    Ok(Json(updated))
}

/// Handler for PATCH `/admin/challenge/{challenge_id}/day` endpoint.
async fn handle_set_challenge_day(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(challenge_id): Path<i64>,
    Json(req): Json<SetChallengeDayRequest>,
) -> Result<Json<ChallengeResponse>, HttpError> {
    let actor: &str = actor_id(&headers);
    info!(actor_id = actor, challenge_id, day = req.day, "Handling set_challenge_day request");

    let mut persistence = app_state.persistence.lock().await;
    let updated: ChallengeResponse = challenge_api::set_challenge_day(
        &mut persistence,
        app_state.authorization.as_ref(),
        actor,
        challenge_id,
        req,
        admin_cause("set_challenge_day"),
        OffsetDateTime::now_utc(),
    )?;

    Ok(Json(updated))
}

/// Handler for POST `/task/complete` endpoint.
async fn handle_complete_task(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CompleteTaskRequest>,
) -> Result<Json<CompleteTaskResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: CompleteTaskResponse =
        challenge_api::complete_task(&mut persistence, req, OffsetDateTime::now_utc())?;

    Ok(Json(response))
}

/// Handler for POST `/admin/task/complete` endpoint.
async fn handle_admin_complete_task(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<CompleteTaskRequest>,
) -> Result<Json<CompleteTaskResponse>, HttpError> {
    let actor: &str = actor_id(&headers);
    info!(
        actor_id = actor,
        user_id = req.user_id,
        task_definition_id = req.task_definition_id,
        "Handling admin_complete_task request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: CompleteTaskResponse = challenge_api::admin_complete_task(
        &mut persistence,
        app_state.authorization.as_ref(),
        actor,
        req,
        admin_cause("admin_complete_task"),
        OffsetDateTime::now_utc(),
    )?;

    Ok(Json(response))
}

/// Handler for GET `/goals/{user_id}` endpoint.
async fn handle_get_goals(
    AxumState(app_state): AxumState<AppState>,
    Path(user_id): Path<i64>,
) -> Json<GoalProgress> {
    Json(app_state.goals.get_progress(user_id).await)
}

/// Handler for PUT `/goals/{user_id}` endpoint.
async fn handle_save_goals(
    AxumState(app_state): AxumState<AppState>,
    Path(user_id): Path<i64>,
    Json(req): Json<SaveGoalsRequest>,
) -> Result<Json<SaveGoalsResponse>, HttpError> {
    let saved: SaveGoalsResponse = app_state
        .goals
        .save_goals(user_id, req, OffsetDateTime::now_utc())
        .await?;

    Ok(Json(saved))
}

/// Handler for GET `/points/{user_id}` endpoint.
async fn handle_get_points(
    AxumState(app_state): AxumState<AppState>,
    Path(user_id): Path<i64>,
) -> Json<PointsTotalResponse> {
    let mut persistence = app_state.persistence.lock().await;
    Json(challenge_api::get_points_total(&mut persistence, user_id))
}

/// Handler for POST `/admin/points/{user_id}` endpoint.
async fn handle_adjust_points(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(user_id): Path<i64>,
    Json(req): Json<AdjustPointsRequest>,
) -> Result<Json<PointsTotalResponse>, HttpError> {
    let actor: &str = actor_id(&headers);
    info!(actor_id = actor, user_id, points = req.points, "Handling adjust_points request");

    let mut persistence = app_state.persistence.lock().await;
    let response: PointsTotalResponse = challenge_api::adjust_points(
        &mut persistence,
        app_state.authorization.as_ref(),
        actor,
        user_id,
        &req,
        admin_cause("adjust_points"),
        OffsetDateTime::now_utc(),
    )?;

    Ok(Json(response))
}

/// Handler for POST `/admin/reconcile` endpoint.
///
/// Runs one reconciliation pass immediately. The report is returned with
/// status 200 even when the run itself failed.
async fn handle_reconcile(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<ReconciliationReport>, HttpError> {
    let actor: &str = actor_id(&headers);
    AuthorizationService::authorize_admin(app_state.authorization.as_ref(), actor, "reconcile")
        .map_err(ApiError::from)?;
    info!(actor_id = actor, "Handling manual reconciliation request");

    let report: ReconciliationReport = app_state
        .reconciliation
        .run_once(OffsetDateTime::now_utc())
        .await;

    Ok(Json(report))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/challenge/status", get(handle_get_status))
        .route("/admin/challenge", post(handle_create_challenge))
        .route("/admin/challenge/{challenge_id}", patch(handle_update_challenge))
        .route("/admin/challenge/{challenge_id}/end", post(handle_end_challenge))
        .route("/admin/challenge/{challenge_id}/day", patch(handle_set_challenge_day))
        .route("/task/complete", post(handle_complete_task))
        .route("/admin/task/complete", post(handle_admin_complete_task))
        .route("/goals/{user_id}", get(handle_get_goals).put(handle_save_goals))
        .route("/points/{user_id}", get(handle_get_points))
        .route("/admin/points/{user_id}", post(handle_adjust_points))
        .route("/admin/reconcile", post(handle_reconcile))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Challenge Server");

    let schedule: DailySchedule = DailySchedule::parse(&args.reconcile_at, &args.timezone)?;

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };
    persistence.verify_foreign_key_enforcement()?;

    if args.admins.is_empty() {
        warn!("No --admin actors configured, admin endpoints will reject every caller");
    }
    let app_state: AppState = AppState::new(persistence, AdminAllowlist::new(args.admins));

    if args.no_scheduler {
        info!("Reconciliation scheduler disabled");
    } else {
        tokio::spawn(scheduler::run_daily(
            Arc::clone(&app_state.reconciliation),
            schedule,
        ));
    }

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests;
