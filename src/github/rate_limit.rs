use chrono::Utc;
use std::time::Duration;
use tracing::warn;

/// Extra seconds slept past the advertised reset time
const RESET_BUFFER_SECS: u64 = 5;

/// How long to sleep before the limit window at `reset` (epoch seconds)
/// reopens. `None` when the reset time has already passed.
pub fn backoff_duration(reset: i64, now: i64) -> Option<Duration> {
    let wait = reset - now;
    if wait > 0 {
        Some(Duration::from_secs(wait as u64 + RESET_BUFFER_SECS))
    } else {
        None
    }
}

/// Sleep until the rate limit window reopens.
///
/// Blocks the run: processing is strictly sequential and this is its only
/// suspension point.
pub async fn wait_for_reset(reset: i64) {
    if let Some(wait) = backoff_duration(reset, Utc::now().timestamp()) {
        warn!(
            "Rate limit exhausted, waiting {} seconds until reset",
            wait.as_secs()
        );
        tokio::time::sleep(wait).await;
    }
}
