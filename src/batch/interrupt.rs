use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Exit status used when a second interrupt aborts the run outright.
pub const FORCED_EXIT_CODE: i32 = 130;

/// Waits on `next_signal` for interrupts. The first one cancels `cancel` so the
/// batch discards its current file and stops; the second returns
/// `FORCED_EXIT_CODE` for the caller to exit with. Returns `None` if the signal
/// source fails before a second interrupt arrives.
pub async fn watch_interrupts<F, Fut>(mut next_signal: F, cancel: CancellationToken) -> Option<i32>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::io::Result<()>>,
{
    next_signal().await.ok()?;
    warn!("Interrupt received, stopping after discarding the current file (press Ctrl-C again to abort)");
    cancel.cancel();

    next_signal().await.ok()?;
    warn!("Second interrupt received, aborting");
    Some(FORCED_EXIT_CODE)
}
