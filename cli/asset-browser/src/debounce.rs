//! Coalescing of rapid search input into a single delayed action.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::trace;

/// Delay between the last search input and the catalog query.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(800);

/// Holds at most one pending timer.
///
/// Scheduling a new action cancels the pending one.
/// Once a timer fires, its action runs as a detached task,
/// so cancelling afterwards does not abort an action already underway.
#[derive(Debug, Default)]
pub struct SearchDebouncer {
    pending: Option<JoinHandle<()>>,
}

impl SearchDebouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `action` after `delay`, unless another action is scheduled first.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&mut self, delay: Duration, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if self.cancel() {
            trace!("superseded pending search");
        }
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tokio::spawn(action);
        }));
    }

    /// Cancel the pending timer without scheduling a new one.
    ///
    /// Returns whether a timer was still waiting.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                true
            },
            _ => false,
        }
    }

    /// Whether a timer is waiting to fire.
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
