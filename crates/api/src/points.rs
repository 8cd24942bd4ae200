// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Points ledger reads and admin adjustments.

use challenge_audit::{Action, AuditEvent, Cause};
use challenge_domain::NewPointsEntry;
use challenge_persistence::Persistence;
use time::OffsetDateTime;
use tracing::warn;

use crate::auth::{AuthenticatedActor, AuthorizationPort, AuthorizationService};
use crate::error::{ApiError, translate_persistence_error};
use crate::request_response::{AdjustPointsRequest, PointsTotalResponse};

/// Activity type recorded for admin adjustments.
pub const ADJUSTMENT_ACTIVITY: &str = "admin_adjustment";

/// Returns a user's point total.
///
/// A storage error is logged and reported as a zero total.
pub fn get_points_total(persistence: &mut Persistence, user_id: i64) -> PointsTotalResponse {
    let total: i64 = persistence.total_points_for(user_id).unwrap_or_else(|e| {
        warn!(user_id, error = %e, "Failed to read points total, reporting zero");
        0
    });

    PointsTotalResponse { user_id, total }
}

/// Appends a compensating ledger entry for a user and returns the new total.
///
/// Ledger entries are never edited. Corrections are recorded as new entries
/// whose points may be negative.
///
/// # Errors
///
/// Returns an error if the caller is not an admin, the description is
/// empty, the points are zero, or the user is not enrolled.
pub fn adjust_points<P: AuthorizationPort + ?Sized>(
    persistence: &mut Persistence,
    port: &P,
    actor_id: &str,
    user_id: i64,
    request: &AdjustPointsRequest,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<PointsTotalResponse, ApiError> {
    let authenticated: AuthenticatedActor =
        AuthorizationService::authorize_admin(port, actor_id, "adjust_points")?;

    let description: &str = request.description.trim();
    if request.points == 0 {
        return Err(ApiError::InvalidInput {
            field: String::from("points"),
            message: String::from("Adjustment must be non-zero"),
        });
    }
    if description.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("description"),
            message: String::from("Adjustment description must not be empty"),
        });
    }

    let entry: NewPointsEntry = NewPointsEntry {
        user_id,
        points_earned: request.points,
        activity_type: ADJUSTMENT_ACTIVITY.to_string(),
        description: description.to_string(),
    };
    let action: Action = Action::new(
        String::from("AdjustPoints"),
        Some(format!(
            "{:+} points for user {user_id}: {description}",
            request.points
        )),
    );
    let event: AuditEvent = AuditEvent::new(authenticated.to_audit_actor(), cause, action, None);

    persistence
        .append_adjustment(&entry, now, &event)
        .map_err(translate_persistence_error)?;

    let total: i64 = persistence
        .total_points_for(user_id)
        .map_err(translate_persistence_error)?;

    Ok(PointsTotalResponse { user_id, total })
}
