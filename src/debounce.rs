//! Cancellable trailing-edge timer.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Runs only the most recently scheduled action, once `delay` has passed
/// without another call to [`Debouncer::schedule`].
///
/// Dropping the debouncer cancels whatever is still pending.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
            pending: None,
        }
    }

    /// Replaces any pending action with `action`, restarting the quiet period.
    ///
    /// Outside of a Tokio runtime there is no timer to wait on, so the action
    /// runs immediately.
    pub fn schedule<F>(&mut self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();

        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(err) => {
                log::warn!("No async runtime for debounced action, running it now: {err}");
                action();
                return;
            }
        };

        let ticket = self.generation.load(Ordering::SeqCst);
        let generation = Arc::clone(&self.generation);
        let deadline = Instant::now() + self.delay;

        self.pending = Some(handle.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            // A newer schedule or a cancel bumped the generation while this
            // task was already running past its abort point.
            if generation.load(Ordering::SeqCst) == ticket {
                action();
            }
        }));
    }

    /// Drops the pending action, if any.
    pub fn cancel(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|pending| !pending.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
