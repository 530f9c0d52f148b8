//! # Retry Executor
//!
//! Bounded retry-until-success-or-timeout for any asynchronous condition.
//!
//! The retried operation runs on a background task that reports success over a
//! one-slot done channel, raced against a timeout sleep. On timeout the caller
//! signals a one-slot quit channel that the background task polls
//! non-blockingly each iteration, so cancellation is best-effort: at most one
//! extra invocation plus one backoff sleep may run past the deadline. The
//! operation itself is never interrupted mid-flight.

use std::future::Future;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, trace};

use crate::error::{ConductorError, Result};

/// Repeatedly invoke `f` until it succeeds or `timeout` elapses, sleeping
/// `backoff` between attempts.
///
/// Every `Err` from `f` is treated as retryable; `f` alone decides whether a
/// failure is permanent by converging or not. If no attempt succeeds within
/// the window, the single [`ConductorError::Timeout`] sentinel is returned.
///
/// A `timeout` of zero times out without a second invocation of `f`; a
/// `backoff` of zero retries as fast as `f` allows.
pub async fn do_retry_with_timeout<T, F, Fut>(f: F, timeout: Duration, backoff: Duration) -> Result<T>
where
    T: Send + 'static,
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = anyhow::Result<T>> + Send + 'static,
{
    let (done_tx, done_rx) = oneshot::channel::<T>();
    let (quit_tx, mut quit_rx) = mpsc::channel::<()>(1);

    tokio::spawn(async move {
        let mut f = f;
        let mut attempt: u64 = 0;
        loop {
            if quit_rx.try_recv().is_ok() {
                trace!(attempt, "retry loop cancelled after timeout");
                return;
            }
            attempt += 1;
            match f().await {
                Ok(value) => {
                    // The receiver is gone once the caller timed out; nothing
                    // left to do with the value either way.
                    let _ = done_tx.send(value);
                    return;
                }
                Err(error) => {
                    debug!(attempt, %error, backoff_ms = backoff.as_millis() as u64, "attempt failed, retrying");
                }
            }
            if backoff.is_zero() {
                // Zero-duration sleeps complete without yielding; cooperate
                // explicitly so the timeout timer can fire.
                tokio::task::yield_now().await;
            } else {
                tokio::time::sleep(backoff).await;
            }
        }
    });

    tokio::select! {
        outcome = done_rx => match outcome {
            Ok(value) => Ok(value),
            // The background task dropped its sender without a success, which
            // only happens when the retried future panicked.
            Err(_) => Err(ConductorError::Timeout { waited: timeout }),
        },
        _ = tokio::time::sleep(timeout) => {
            let _ = quit_tx.try_send(());
            Err(ConductorError::Timeout { waited: timeout })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Instant;
    use tokio_test::assert_ok;

    #[tokio::test]
    async fn success_on_first_attempt_returns_value() {
        let result = do_retry_with_timeout(
            || async { Ok::<_, anyhow::Error>(42) },
            Duration::from_secs(1),
            Duration::from_millis(10),
        )
        .await;
        assert_eq!(assert_ok!(result), 42);
    }

    #[tokio::test]
    async fn success_on_attempt_k_sleeps_k_minus_one_times() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let started = Instant::now();
        let result = do_retry_with_timeout(
            move || {
                let counter = Arc::clone(&counter);
                async move {
                    if counter.fetch_add(1, Ordering::SeqCst) + 1 < 3 {
                        anyhow::bail!("not yet");
                    }
                    Ok("converged")
                }
            },
            Duration::from_secs(5),
            Duration::from_millis(50),
        )
        .await;
        assert_eq!(assert_ok!(result), "converged");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // Two failures before success means exactly two backoff sleeps.
        assert!(started.elapsed() >= Duration::from_millis(100));
    }

    #[tokio::test]
    async fn always_failing_returns_timeout_within_bound() {
        let timeout = Duration::from_millis(100);
        let backoff = Duration::from_millis(10);
        let started = Instant::now();
        let result = do_retry_with_timeout(
            || async { Err::<(), _>(anyhow::anyhow!("never")) },
            timeout,
            backoff,
        )
        .await;
        let elapsed = started.elapsed();
        assert!(result.unwrap_err().is_timeout());
        assert!(elapsed >= timeout);
        // Sentinel arrives as soon as the timer fires; the loose upper bound
        // only guards against the executor blocking on the retried task.
        assert!(elapsed < timeout + Duration::from_millis(500));
    }

    #[tokio::test]
    async fn zero_timeout_times_out_without_second_invocation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let result = do_retry_with_timeout(
            move || {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err::<(), _>(anyhow::anyhow!("still failing"))
                }
            },
            Duration::ZERO,
            Duration::from_millis(5),
        )
        .await;
        assert!(result.unwrap_err().is_timeout());
        // Give the background loop time to observe the quit signal.
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(calls.load(Ordering::SeqCst) <= 1);
    }

    #[tokio::test]
    async fn zero_backoff_spins_as_fast_as_f_allows() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let result = do_retry_with_timeout(
            move || {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err::<(), _>(anyhow::anyhow!("spin"))
                }
            },
            Duration::from_millis(50),
            Duration::ZERO,
        )
        .await;
        assert!(result.unwrap_err().is_timeout());
        assert!(calls.load(Ordering::SeqCst) > 5);
    }
}
