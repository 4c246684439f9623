//! Bounded retry with a fixed delay.

use std::{future::Future, time::Duration};

use tokio::time::sleep;

/// How many times to try an operation and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    /// Per-voice synthesis attempts.
    pub const SYNTHESIS: RetryPolicy = RetryPolicy::new(5, Duration::from_secs(1));

    /// Long-text task polling.
    pub const TASK_POLL: RetryPolicy = RetryPolicy::new(20, Duration::from_secs(8));

    pub const fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// Runs `attempt` until it yields `Some` or the attempts are used up,
    /// sleeping `delay` after every attempt that yields `None`.
    ///
    /// The closure receives the 1-based attempt number.
    pub async fn retry<T, F, Fut>(&self, mut attempt: F) -> Option<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Option<T>>,
    {
        for n in 1..=self.max_attempts {
            if let Some(value) = attempt(n).await {
                return Some(value);
            }
            sleep(self.delay).await;
        }
        None
    }

    /// Like [`RetryPolicy::retry`], but sleeps `delay` before every attempt.
    /// Suited to polling something that is known not to be ready yet.
    pub async fn poll<T, F, Fut>(&self, mut attempt: F) -> Option<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Option<T>>,
    {
        for n in 1..=self.max_attempts {
            sleep(self.delay).await;
            if let Some(value) = attempt(n).await {
                return Some(value);
            }
        }
        None
    }
}
