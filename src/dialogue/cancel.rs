//! Cooperative cancellation for dialogue sessions
//!
//! A session owns one [`CancelSignal`]. Every suspension point in the
//! sequencer goes through the helpers here, which sleep in short slices and
//! check the signal between slices.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::{sleep, Instant};

/// Shared cancellation flag for one session
pub type CancelSignal = Arc<AtomicBool>;

/// Returned by a wait that observed cancellation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

/// Create a fresh, unset signal
pub fn new_signal() -> CancelSignal {
    Arc::new(AtomicBool::new(false))
}

/// Raise the signal
pub fn cancel(signal: &CancelSignal) {
    signal.store(true, Ordering::Release);
}

/// Check whether the signal has been raised
pub fn is_cancelled(signal: &CancelSignal) -> bool {
    signal.load(Ordering::Acquire)
}

/// Poll `probe` every `interval` until it yields a value
pub async fn wait_for<T, F>(mut probe: F, interval: Duration, signal: &CancelSignal) -> Result<T, Cancelled>
where
    F: FnMut() -> Option<T>,
{
    loop {
        if is_cancelled(signal) {
            return Err(Cancelled);
        }
        if let Some(value) = probe() {
            return Ok(value);
        }
        sleep(interval).await;
    }
}

/// Poll `condition` every `interval` until it holds
pub async fn wait_until<F>(mut condition: F, interval: Duration, signal: &CancelSignal) -> Result<(), Cancelled>
where
    F: FnMut() -> bool,
{
    wait_for(|| condition().then_some(()), interval, signal).await
}

/// Sleep for `duration`, waking every `interval` to check the signal
///
/// A duration past the end of the clock only ends on cancellation.
pub async fn sleep_or_cancel(duration: Duration, interval: Duration, signal: &CancelSignal) -> Result<(), Cancelled> {
    let deadline = Instant::now().checked_add(duration);
    loop {
        if is_cancelled(signal) {
            return Err(Cancelled);
        }
        let slice = match deadline {
            Some(deadline) => {
                let now = Instant::now();
                if now >= deadline {
                    return Ok(());
                }
                (deadline - now).min(interval)
            }
            None => interval,
        };
        sleep(slice).await;
    }
}
