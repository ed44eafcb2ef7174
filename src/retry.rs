//! Bounded retry with a growing per-attempt timeout.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// One attempt handed to the retried operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attempt {
    /// 1-based attempt number.
    pub number: u32,
    /// Timeout the operation should apply to its request.
    pub timeout: Duration,
}

/// Attempt budget and timeout schedule for an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    attempts: u32,
    timeout: Duration,
    timeout_step: Duration,
}

impl RetryPolicy {
    /// A policy of `attempts` tries (at least one), each with the same `timeout`.
    #[must_use]
    pub const fn new(attempts: u32, timeout: Duration) -> Self {
        let attempts = if attempts == 0 { 1 } else { attempts };
        Self { attempts, timeout, timeout_step: Duration::ZERO }
    }

    /// Grow the timeout by `step` after every failed attempt.
    #[must_use]
    pub const fn with_timeout_step(mut self, step: Duration) -> Self {
        self.timeout_step = step;
        self
    }

    /// Number of attempts this policy allows.
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Timeout for the given 1-based attempt.
    #[must_use]
    pub fn timeout_for(&self, number: u32) -> Duration {
        self.timeout + self.timeout_step * number.saturating_sub(1)
    }

    /// Run `op` until it succeeds or the budget is spent, returning the last error.
    ///
    /// Each failure is logged at `warn` with `what` as context.
    ///
    /// # Errors
    ///
    /// Returns the error from the final attempt when every attempt failed.
    pub async fn run<T, E, F, Fut>(&self, what: &str, mut op: F) -> Result<T, E>
    where
        F: FnMut(Attempt) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let mut number = 1;
        loop {
            let attempt = Attempt { number, timeout: self.timeout_for(number) };
            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(e) if number >= self.attempts => {
                    tracing::warn!(attempt = number, of = self.attempts, "{what} failed: {e}");
                    return Err(e);
                }
                Err(e) => {
                    tracing::warn!(
                        attempt = number,
                        of = self.attempts,
                        "{what} failed, retrying: {e}"
                    );
                }
            }
            number += 1;
        }
    }

    /// Like [`RetryPolicy::run`], but degrade to `fallback` once the budget is spent.
    pub async fn run_or<T, E, F, Fut>(&self, what: &str, fallback: T, op: F) -> T
    where
        F: FnMut(Attempt) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        self.run(what, op).await.unwrap_or(fallback)
    }
}
