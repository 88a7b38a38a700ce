//! Background maintenance tasks.
//!
//! One task for now: the refresh-token sweeper. Logout revokes tokens
//! eagerly, but tokens from sessions that simply lapse would otherwise sit
//! in the table forever. The sweeper deletes rows past `expires_at` on an
//! interval; a sweep failure is logged and retried next round.

use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use armory_db::Database;

/// Spawns the periodic refresh-token sweep.
///
/// Returns the task handle so shutdown can abort it. Each round deletes
/// every refresh-token row whose expiry has passed and logs the count.
pub fn spawn_token_sweeper(db: Database, interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(interval_secs, "Refresh token sweeper started");

        loop {
            tokio::time::sleep(interval).await;

            match db.refresh_tokens().delete_expired(Utc::now()).await {
                Ok(0) => debug!("Token sweep: nothing expired"),
                Ok(removed) => info!(removed, "Token sweep: removed expired refresh tokens"),
                Err(e) => warn!(error = %e, "Token sweep failed, will retry next interval"),
            }
        }
    })
}
