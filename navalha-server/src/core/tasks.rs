//! Background tasks

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use shared::util::now_millis;

use crate::core::ServerState;
use crate::db::repository::subscription;

/// How often overdue subscriptions are swept.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Periodically mark active subscriptions whose paid period has lapsed
/// as expired, so plan gates stop honoring them between requests. The
/// gates also check `period_end` themselves; the sweeper keeps the
/// stored status in line with reality.
pub fn spawn_subscription_sweeper(
    state: ServerState,
    shutdown: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SWEEP_INTERVAL);

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::debug!("Subscription sweeper stopped");
                    break;
                }
                _ = interval.tick() => {
                    match subscription::expire_overdue(&state.db.write, now_millis()).await {
                        Ok(0) => {}
                        Ok(count) => tracing::info!(count, "Expired overdue subscriptions"),
                        Err(e) => tracing::error!(error = %e, "Subscription sweep failed"),
                    }
                }
            }
        }
    })
}
