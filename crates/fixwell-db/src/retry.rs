//! Retry executor and fresh-client escape hatch.
//!
//! Wraps an arbitrary unit of work in a bounded retry loop, rebuilding the
//! shared connection between attempts when failures look connection-shaped.
//! The dominant real-world failure being defended against is a stale pooled
//! connection whose prepared statements no longer match the server side after
//! an infrastructure-initiated reset, so the first retry always rebuilds,
//! regardless of what the error text says — classifying driver messages is
//! inherently fragile.

use std::sync::Arc;
use std::time::Duration;

use fixwell_config::DatabaseConfig;
use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::error::{DatabaseError, ErrorClass, classify};
use crate::supervisor::{ConnectionSupervisor, Connector};

/// Tuning for the retry loop.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the initial one).
    pub max_attempts: u32,
    /// Fixed pause after a successful forced reconnect.
    pub reconnect_pause: Duration,
    /// Base delay for exponential backoff (`base × 2^attempt`).
    pub backoff_base: Duration,
    /// Backoff is capped here.
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            reconnect_pause: Duration::from_millis(1000),
            backoff_base: Duration::from_millis(500),
            max_delay: Duration::from_secs(8),
        }
    }
}

impl RetryConfig {
    /// Pull the retry knobs out of the database configuration section.
    #[must_use]
    pub fn from_database_config(config: &DatabaseConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            reconnect_pause: Duration::from_millis(config.reconnect_pause_ms),
            backoff_base: Duration::from_millis(config.backoff_base_ms),
            ..Self::default()
        }
    }
}

/// Execute `operation` up to `config.max_attempts` times.
///
/// Success on any attempt returns that attempt's value immediately, with no
/// trace of earlier failures. When every attempt fails, the **last** error is
/// returned verbatim — never the first, never a synthetic wrapper.
///
/// Between attempts:
/// - a [`ErrorClass::Connection`] failure, or any failure on attempt 1,
///   forces a reconnect and then pauses `reconnect_pause`;
/// - a failed reconnect is downgraded to a warning and the loop falls back to
///   exponential backoff — the operation's own error stays the one that
///   matters;
/// - every other failure pauses with exponential backoff. Unknown errors
///   still retry; they just never trigger a reconnect.
///
/// # Errors
///
/// The final attempt's error, unchanged.
pub async fn with_retry<C, T, F, Fut>(
    supervisor: &ConnectionSupervisor<C>,
    config: &RetryConfig,
    mut operation: F,
) -> Result<T, DatabaseError>
where
    C: Connector,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DatabaseError>>,
{
    let max_attempts = config.max_attempts.max(1);
    let mut attempt = 0;
    loop {
        attempt += 1;
        let failure = match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    info!(attempt, "operation recovered");
                }
                return Ok(value);
            }
            Err(e) if attempt >= max_attempts => {
                error!(attempt, error = %e, "operation failed, attempts exhausted");
                return Err(e);
            }
            Err(e) => e,
        };

        let class = classify(&failure);
        warn!(attempt, ?class, error = %failure, "operation failed, will retry");

        if attempt == 1 || class == ErrorClass::Connection {
            match supervisor.force_new_connection().await {
                Ok(()) => {
                    sleep(config.reconnect_pause).await;
                    continue;
                }
                Err(rebuild_error) => {
                    warn!(
                        error = %rebuild_error,
                        "forced reconnect failed, falling back to backoff"
                    );
                }
            }
        }
        sleep(backoff_delay(config, attempt)).await;
    }
}

/// Single-shot execution against an explicitly rebuilt handle.
///
/// Forces one reconnect, then runs `operation` exactly once with the freshly
/// installed handle. No retry is layered on top: this is the last-resort tier
/// for callers whose retry-wrapped path has already failed, before they give
/// up and return a default payload.
///
/// # Errors
///
/// The reconnect error if the rebuild fails, otherwise whatever the operation
/// produces.
pub async fn execute_with_fresh_client<C, T, F, Fut>(
    supervisor: &ConnectionSupervisor<C>,
    operation: F,
) -> Result<T, DatabaseError>
where
    C: Connector,
    F: FnOnce(Arc<C::Handle>) -> Fut,
    Fut: Future<Output = Result<T, DatabaseError>>,
{
    supervisor.force_new_connection().await?;
    let handle = supervisor.get_handle().await?;
    operation(handle).await
}

/// `base × 2^attempt`, capped at `max_delay`.
fn backoff_delay(config: &RetryConfig, attempt: u32) -> Duration {
    let doublings = attempt.min(10);
    config
        .backoff_base
        .saturating_mul(1 << doublings)
        .min(config.max_delay)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::Instant;

    use crate::test_support::fake::FakeConnector;

    fn fast_config() -> RetryConfig {
        RetryConfig::default()
    }

    fn supervisor() -> ConnectionSupervisor<FakeConnector> {
        ConnectionSupervisor::new(FakeConnector::new())
    }

    #[tokio::test(start_paused = true)]
    async fn first_attempt_success_has_no_side_effects() {
        let sup = supervisor();
        let started = Instant::now();

        let result = with_retry(&sup, &fast_config(), move || async move {
            Ok::<_, DatabaseError>(7)
        })
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(sup.rebuild_attempts(), 0);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_retries_return_the_last_error() {
        let sup = supervisor();
        let calls = &AtomicU32::new(0);

        let result: Result<(), _> = with_retry(&sup, &fast_config(), move || async move {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            Err(DatabaseError::Query(format!("boom {n}")))
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        let message = result.unwrap_err().to_string();
        assert!(message.contains("boom 3"), "got: {message}");
    }

    #[tokio::test(start_paused = true)]
    async fn connection_error_reconnects_and_second_attempt_wins() {
        let sup = supervisor();
        let calls = &AtomicU32::new(0);

        let result = with_retry(&sup, &fast_config(), move || async move {
            if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(DatabaseError::Query("connection reset by peer".into()))
            } else {
                Ok(99)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 99);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(sup.rebuild_attempts(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn unrelated_error_on_attempt_one_still_reconnects() {
        let sup = supervisor();
        let calls = &AtomicU32::new(0);

        let result = with_retry(&sup, &fast_config(), move || async move {
            if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(DatabaseError::Query("not found".into()))
            } else {
                Ok("value")
            }
        })
        .await;

        assert_eq!(result.unwrap(), "value");
        assert_eq!(sup.rebuild_attempts(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn later_unknown_errors_back_off_without_reconnecting() {
        let sup = supervisor();
        let calls = &AtomicU32::new(0);
        let started = Instant::now();

        let result = with_retry(&sup, &fast_config(), move || async move {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            if n < 3 {
                Err(DatabaseError::Query("not found".into()))
            } else {
                Ok(n)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 3);
        // Attempt 1 reconnects unconditionally; attempt 2's unknown error
        // only backs off (500ms × 2^2 = 2s).
        assert_eq!(sup.rebuild_attempts(), 1);
        assert_eq!(started.elapsed(), Duration::from_millis(1000 + 2000));
    }

    #[tokio::test(start_paused = true)]
    async fn stale_prepared_statement_recovers_on_third_attempt() {
        let sup = supervisor();
        let calls = &AtomicU32::new(0);
        let started = Instant::now();

        let result = with_retry(&sup, &fast_config(), move || async move {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            if n <= 2 {
                Err(DatabaseError::Query(
                    "prepared statement \"s1\" already exists".into(),
                ))
            } else {
                Ok(n)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(sup.rebuild_attempts(), 2);
        // Both pauses take the fixed reconnect branch.
        assert_eq!(started.elapsed(), Duration::from_millis(2000));
    }

    #[tokio::test(start_paused = true)]
    async fn single_attempt_budget_skips_all_retry_logic() {
        let sup = supervisor();
        let calls = &AtomicU32::new(0);
        let started = Instant::now();
        let config = RetryConfig {
            max_attempts: 1,
            ..RetryConfig::default()
        };

        let result: Result<(), _> = with_retry(&sup, &config, move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(DatabaseError::Query("connection refused".into()))
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(sup.rebuild_attempts(), 0);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_reconnect_is_swallowed_and_backs_off() {
        let sup = supervisor();
        sup.get_handle().await.unwrap();
        sup.connector().fail_next_connects(1);
        let calls = &AtomicU32::new(0);
        let started = Instant::now();

        let result = with_retry(&sup, &fast_config(), move || async move {
            if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(DatabaseError::Query("connection reset by peer".into()))
            } else {
                Ok(11)
            }
        })
        .await;

        // The rebuild failure never propagates; the loop backs off and the
        // second attempt's result comes through.
        assert_eq!(result.unwrap(), 11);
        assert_eq!(sup.rebuild_attempts(), 1);
        assert_eq!(started.elapsed(), Duration::from_millis(1000));
    }

    #[tokio::test]
    async fn fresh_client_runs_once_against_a_new_handle() {
        let sup = supervisor();
        let stale = sup.get_handle().await.unwrap();

        let serial = execute_with_fresh_client(&sup, |handle| async move {
            Ok::<_, DatabaseError>(handle.serial)
        })
        .await
        .unwrap();

        assert!(serial > stale.serial);
        assert_eq!(sup.rebuild_attempts(), 1);
    }

    #[tokio::test]
    async fn fresh_client_propagates_rebuild_failure() {
        let sup = supervisor();
        sup.get_handle().await.unwrap();
        sup.connector().fail_next_probes(1);

        let result = execute_with_fresh_client(&sup, |_handle| async move {
            Ok::<_, DatabaseError>(())
        })
        .await;
        assert!(result.is_err());
    }

    #[test]
    fn backoff_is_capped() {
        let config = fast_config();
        assert_eq!(backoff_delay(&config, 1), Duration::from_secs(1));
        assert_eq!(backoff_delay(&config, 2), Duration::from_secs(2));
        assert_eq!(backoff_delay(&config, 30), config.max_delay);
    }
}
