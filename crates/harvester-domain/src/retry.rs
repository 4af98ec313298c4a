//! Retry policy for calls that cross an adapter boundary
//!
//! [`RetryPolicy`] only computes delays. [`retry_with_policy`] is the one
//! executor every adapter retries through.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tracing::warn;

/// Bounded attempts with capped exponential backoff
///
/// # Examples
///
/// ```
/// use harvester_domain::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.delay_for(1), Duration::from_millis(1000));
/// assert_eq!(policy.delay_for(2), Duration::from_millis(2000));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempts including the first one
    pub max_attempts: u32,

    /// Delay after the first failed attempt (milliseconds)
    pub initial_backoff_ms: u64,

    /// Growth factor applied per further failure
    pub multiplier: f64,

    /// Upper bound for a single delay (milliseconds)
    pub max_backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_backoff_ms: 1000,
            multiplier: 2.0,
            max_backoff_ms: 30_000,
        }
    }
}

impl RetryPolicy {
    /// Single attempt, no retries
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Policy with zero delays, for tests
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            initial_backoff_ms: 0,
            multiplier: 1.0,
            max_backoff_ms: 0,
        }
    }

    /// Delay to wait after the given failed attempt (1-based)
    pub fn delay_for(&self, failed_attempt: u32) -> Duration {
        if failed_attempt == 0 {
            return Duration::ZERO;
        }
        let factor = self.multiplier.max(1.0).powi(failed_attempt as i32 - 1);
        let millis = (self.initial_backoff_ms as f64 * factor).min(self.max_backoff_ms as f64);
        Duration::from_millis(millis as u64)
    }

    /// Whether another attempt is allowed after `attempts_made` attempts
    pub fn should_retry(&self, attempts_made: u32) -> bool {
        attempts_made < self.max_attempts
    }

    /// Validate the policy
    pub fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("max_attempts must be greater than 0".to_string());
        }
        if self.multiplier < 1.0 {
            return Err("multiplier must be at least 1.0".to_string());
        }
        if self.initial_backoff_ms > self.max_backoff_ms {
            return Err("initial_backoff_ms cannot exceed max_backoff_ms".to_string());
        }
        Ok(())
    }
}

/// Boxed future borrowing the retried state for `'a`
pub type StepFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Run `op` against `state` until it succeeds, fails with an error that
/// `is_retryable` rejects, or the policy's attempts are used up
///
/// The state is handed to each attempt by mutable reference, so stateful
/// adapters such as an `IssueSource` can be retried without cloning.
///
/// # Examples
///
/// ```
/// use harvester_domain::{retry_with_policy, RetryPolicy};
///
/// # #[tokio::main]
/// # async fn main() {
/// let mut calls = 0u32;
/// let result: Result<u32, String> = retry_with_policy(
///     &RetryPolicy::immediate(3),
///     &mut calls,
///     |_| true,
///     |calls| {
///         Box::pin(async move {
///             *calls += 1;
///             if *calls < 3 { Err("busy".to_string()) } else { Ok(*calls) }
///         })
///     },
/// )
/// .await;
/// assert_eq!(result, Ok(3));
/// # }
/// ```
pub async fn retry_with_policy<S, T, E, R, F>(
    policy: &RetryPolicy,
    state: &mut S,
    is_retryable: R,
    mut op: F,
) -> Result<T, E>
where
    S: ?Sized,
    E: Display,
    R: Fn(&E) -> bool,
    F: for<'a> FnMut(&'a mut S) -> StepFuture<'a, T, E>,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        match op(state).await {
            Ok(value) => return Ok(value),
            Err(e) if is_retryable(&e) && policy.should_retry(attempt) => {
                let delay = policy.delay_for(attempt);
                warn!(attempt, "Attempt failed ({}), retrying in {:?}", e, delay);
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}
