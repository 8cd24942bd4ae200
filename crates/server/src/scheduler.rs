// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Daily reconciliation scheduler.

use std::sync::Arc;

use challenge_api::{CompletionNotifier, ReconciliationJob, ReconciliationReport};
use challenge_domain::{DailySchedule, next_run_after};
use time::OffsetDateTime;
use tracing::{error, info, warn};

/// Runs `job` once per day at the schedule's local time.
///
/// A failed run is logged and retried at the next scheduled time. The loop
/// only exits if the next run time cannot be computed.
pub async fn run_daily<N: CompletionNotifier>(
    job: Arc<ReconciliationJob<N>>,
    schedule: DailySchedule,
) {
    info!(
        run_at = %schedule.run_at(),
        timezone = %schedule.timezone(),
        "Starting reconciliation scheduler"
    );

    loop {
        let now: OffsetDateTime = OffsetDateTime::now_utc();
        let next: OffsetDateTime = match next_run_after(&schedule, now) {
            Ok(next) => next,
            Err(e) => {
                error!(error = %e, "Cannot compute next reconciliation run, stopping scheduler");
                return;
            }
        };

        let wait: std::time::Duration =
            std::time::Duration::try_from(next - now).unwrap_or(std::time::Duration::ZERO);
        info!(next_run = %next, wait_secs = wait.as_secs(), "Next reconciliation scheduled");
        tokio::time::sleep(wait).await;

        let report: ReconciliationReport = job.run_once(OffsetDateTime::now_utc()).await;
        if !report.success {
            warn!(message = %report.message, "Scheduled reconciliation failed, retrying next run");
        }
    }
}
