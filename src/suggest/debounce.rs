//! Trailing-edge debounce for UI callbacks.
//!
//! A burst of [`Debouncer::schedule`] calls collapses into one invocation that
//! fires after the last call has been quiet for its delay.

use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, warn};

/// Holds at most one pending timer and re-arms it on every call.
///
/// The pending timer runs as a tokio task. Dropping the debouncer cancels it,
/// so a callback never fires after its owner is gone.
#[derive(Debug, Default)]
pub struct Debouncer {
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    /// Creates a debouncer with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels any pending invocation and arms a new one.
    ///
    /// `callback(args)` runs once `delay` has elapsed, unless another call to
    /// `schedule` or [`cancel`](Self::cancel) arrives first. Must be called
    /// from within a tokio runtime; otherwise the call is logged and dropped.
    pub fn schedule<F, A>(&mut self, callback: F, args: A, delay: Duration)
    where
        F: FnOnce(A) + Send + 'static,
        A: Send + 'static,
    {
        self.cancel();

        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                warn!("Debounced call dropped, no async runtime: {e}");
                return;
            }
        };

        // Deadline is taken now, not when the task is first polled.
        let deadline = Instant::now() + delay;
        self.pending = Some(handle.spawn(async move {
            sleep_until(deadline).await;
            callback(args);
        }));
    }

    /// Cancels the pending invocation, if any.
    pub fn cancel(&mut self) {
        if let Some(task) = self.pending.take() {
            if !task.is_finished() {
                debug!("Cancelling pending debounced call");
            }
            task.abort();
        }
    }

    /// Returns true while an invocation is armed and has not yet run.
    ///
    /// A task that finished, including one whose callback panicked, no longer
    /// counts as pending.
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};
    use tokio::time::sleep;

    type Calls = Arc<Mutex<Vec<(u32, Duration)>>>;

    fn recorder(calls: &Calls, start: Instant) -> impl FnOnce(u32) + Send + 'static {
        let calls = Arc::clone(calls);
        move |value| {
            calls.lock().unwrap().push((value, start.elapsed()));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_fires_once_with_last_args() {
        let calls: Calls = Arc::default();
        let start = Instant::now();
        let delay = Duration::from_millis(100);
        let mut debouncer = Debouncer::new();

        debouncer.schedule(recorder(&calls, start), 0, delay);
        sleep(Duration::from_millis(20)).await;
        debouncer.schedule(recorder(&calls, start), 20, delay);
        sleep(Duration::from_millis(20)).await;
        debouncer.schedule(recorder(&calls, start), 40, delay);

        sleep(Duration::from_millis(99)).await;
        assert!(calls.lock().unwrap().is_empty());
        assert!(debouncer.is_pending());

        sleep(Duration::from_millis(2)).await;
        assert_eq!(
            *calls.lock().unwrap(),
            vec![(40, Duration::from_millis(140))]
        );
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_fire_separately() {
        let calls: Calls = Arc::default();
        let start = Instant::now();
        let delay = Duration::from_millis(50);
        let mut debouncer = Debouncer::new();

        debouncer.schedule(recorder(&calls, start), 1, delay);
        sleep(Duration::from_millis(80)).await;
        debouncer.schedule(recorder(&calls, start), 2, delay);
        sleep(Duration::from_millis(80)).await;

        assert_eq!(
            *calls.lock().unwrap(),
            vec![(1, Duration::from_millis(50)), (2, Duration::from_millis(130))]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_firing() {
        let calls: Calls = Arc::default();
        let mut debouncer = Debouncer::new();

        debouncer.schedule(recorder(&calls, Instant::now()), 7, Duration::from_millis(10));
        debouncer.cancel();
        assert!(!debouncer.is_pending());

        sleep(Duration::from_millis(50)).await;
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_timer() {
        let calls: Calls = Arc::default();
        {
            let mut debouncer = Debouncer::new();
            debouncer.schedule(recorder(&calls, Instant::now()), 3, Duration::from_millis(10));
        }

        sleep(Duration::from_millis(50)).await;
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_panicking_callback_leaves_scheduler_usable() {
        let calls: Calls = Arc::default();
        let start = Instant::now();
        let mut debouncer = Debouncer::new();

        debouncer.schedule(
            |_: u32| panic!("callback failed"),
            0,
            Duration::from_millis(10),
        );
        sleep(Duration::from_millis(20)).await;
        assert!(!debouncer.is_pending());

        debouncer.schedule(recorder(&calls, start), 9, Duration::from_millis(10));
        assert!(debouncer.is_pending());
        sleep(Duration::from_millis(20)).await;

        assert_eq!(
            *calls.lock().unwrap(),
            vec![(9, Duration::from_millis(30))]
        );
    }

    #[test]
    fn test_schedule_outside_runtime_is_ignored() {
        let mut debouncer = Debouncer::new();
        debouncer.schedule(|_: ()| {}, (), Duration::from_millis(1));
        assert!(!debouncer.is_pending());
    }
}
