//! Bounded polling against the live UI.
//!
//! The UI renders asynchronously with respect to the actions we dispatch, so a
//! single check after a click is racy. Every page-object operation whose
//! effect is not immediate goes through a [`Waiter`]: the condition is
//! re-evaluated every poll interval until it holds or the deadline passes.

use derive_more::Display;
use eyre::{
    ensure,
    Result,
};
use std::{
    future::Future,
    time::Duration,
};
use tokio::time::Instant;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum WaitOutcome {
    Satisfied,
    TimedOut,
}

impl WaitOutcome {
    pub fn is_satisfied(self) -> bool {
        self == WaitOutcome::Satisfied
    }
}

/// A required UI state was not observed in time.
///
/// This is the only failure the page objects produce themselves; anything
/// else comes straight from the driver.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{actor}: timed out after {timeout:?} waiting for {expectation} ({query})")]
pub struct TimeoutError {
    /// Participant whose browser was observed.
    pub actor: String,
    /// The state that was expected, e.g. "mute control for Bob to be displayed".
    pub expectation: String,
    /// Selector or script that was polled.
    pub query: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone, Copy)]
pub struct Waiter {
    poll_interval: Duration,
}

impl Default for Waiter {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL)
    }
}

impl Waiter {
    pub fn new(poll_interval: Duration) -> Self {
        Self { poll_interval }
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Evaluates `check` until it yields a value or `timeout` elapses.
    ///
    /// The check runs once more when the deadline is reached; the last sleep
    /// is clamped so we never overshoot the deadline by more than one check.
    /// An error from the check is returned right away.
    pub async fn poll<T, F, Fut>(&self, timeout: Duration, mut check: F) -> Result<Option<T>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Option<T>>>,
    {
        ensure!(!timeout.is_zero(), "wait timeout must be greater than zero");

        let deadline = Instant::now() + timeout;
        loop {
            if let Some(value) = check().await? {
                return Ok(Some(value));
            }

            let now = Instant::now();
            if now >= deadline {
                return Ok(None);
            }
            tokio::time::sleep(self.poll_interval.min(deadline - now)).await;
        }
    }

    /// Evaluates `predicate` until it returns `true` or `timeout` elapses.
    pub async fn until<F, Fut>(&self, timeout: Duration, mut predicate: F) -> Result<WaitOutcome>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<bool>>,
    {
        let satisfied = self
            .poll(timeout, || {
                let check = predicate();
                async move { Ok(check.await?.then_some(())) }
            })
            .await?;

        Ok(match satisfied {
            Some(()) => WaitOutcome::Satisfied,
            None => WaitOutcome::TimedOut,
        })
    }
}
