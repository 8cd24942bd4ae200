// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use challenge_api::{ApiError, MetricsSource};
use challenge_domain::MetricEvent;
use tracing::debug;

/// Metrics source used when no CRM metric store is connected.
///
/// Every user has an empty metric stream, so progress reports zero
/// currents against the stored targets.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconnectedMetrics;

impl MetricsSource for UnconnectedMetrics {
    async fn fetch_metrics(&self, user_id: i64) -> Result<Vec<MetricEvent>, ApiError> {
        debug!(user_id, "No metric store connected, returning empty stream");
        Ok(Vec::new())
    }
}
