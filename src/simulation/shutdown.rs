//! Cooperative shutdown helpers
//!
//! Every long wait in a skier or lift task goes through these helpers so that a
//! cancelled [`CancellationToken`] interrupts it promptly.

use thiserror::Error;
use tokio::time::{sleep, sleep_until, Duration, Instant};
use tokio_util::sync::CancellationToken;

/// Marker error returned when a wait was cut short by shutdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("shutdown requested")]
pub struct ShutdownRequested;

/// Sleep for `duration` unless shutdown is requested first
pub async fn sleep_or_shutdown(
    duration: Duration,
    shutdown: &CancellationToken,
) -> Result<(), ShutdownRequested> {
    tokio::select! {
        _ = shutdown.cancelled() => Err(ShutdownRequested),
        _ = sleep(duration) => Ok(()),
    }
}

/// Sleep until `deadline` unless shutdown is requested first
pub async fn sleep_until_or_shutdown(
    deadline: Instant,
    shutdown: &CancellationToken,
) -> Result<(), ShutdownRequested> {
    tokio::select! {
        _ = shutdown.cancelled() => Err(ShutdownRequested),
        _ = sleep_until(deadline) => Ok(()),
    }
}
