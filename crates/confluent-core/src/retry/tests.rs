//! Integration tests for the retry module
//!
//! These exercise the full attempt loop: classification, backoff and the
//! server override, cancellation, and concurrent reuse of one policy value.

use std::error::Error;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use crate::error::ApiError;
use crate::retry::error::RetryError;
use crate::retry::executor::{retry_with_policy, RetryExecutorBuilder};
use crate::retry::observer::{RetryObserver, StatsObserver};
use crate::retry::policy::RetryPolicy;
use crate::retry::strategies::{
    calculate_backoff, ApiFailure, ConservativePolicy, JitterSource,
};

/// Operation error used throughout: either a structured API failure or a
/// transport fault the classifier cannot see into.
#[derive(Debug, thiserror::Error)]
enum TestError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("connection reset by peer")]
    Transport,
}

impl ApiFailure for TestError {
    fn api_error(&self) -> Option<&ApiError> {
        match self {
            TestError::Api(err) => Some(err),
            TestError::Transport => None,
        }
    }
}

fn api_failure(status: u16) -> TestError {
    TestError::Api(ApiError::new(
        status,
        crate::error::status_code_to_error_code(status),
        "injected failure",
    ))
}

/// Policy with delays short enough for tests.
fn quick_policy(max_attempts: u32) -> RetryPolicy {
    RetryPolicy::default()
        .with_max_attempts(max_attempts)
        .with_initial_backoff(Duration::from_millis(1))
        .with_max_backoff(Duration::from_millis(10))
        .with_jitter(false)
}

struct FixedJitter(f64);

impl JitterSource for FixedJitter {
    fn unit(&self) -> f64 {
        self.0
    }
}

/// Observer that records the delay chosen before each retry.
#[derive(Default)]
struct DelayCapture {
    delays: Mutex<Vec<Duration>>,
}

impl RetryObserver for DelayCapture {
    fn on_attempt_start(&self, _attempt: u32, _max_attempts: u32) {}

    fn on_attempt_failed(&self, _attempt: u32, _error: &dyn Error, delay: Duration) {
        self.delays.lock().unwrap().push(delay);
    }

    fn on_success(&self, _attempt: u32, _total_duration: Duration) {}

    fn on_exhausted(&self, _attempts: u32, _final_error: &dyn Error) {}
}

// ============================================================================
// Backoff properties
// ============================================================================

#[test]
fn test_backoff_monotonic_and_bounded() {
    let policy = RetryPolicy::default()
        .with_initial_backoff(Duration::from_millis(100))
        .with_max_backoff(Duration::from_secs(30))
        .with_multiplier(2.0);

    let mut previous = Duration::ZERO;
    for retries in 0..20 {
        let delay = calculate_backoff(&policy, retries, None);
        assert!(delay >= previous, "backoff shrank at index {retries}");
        assert!(delay <= Duration::from_secs(30));
        previous = delay;
    }
}

// ============================================================================
// Loop semantics
// ============================================================================

#[tokio::test]
async fn test_immediate_success_single_invocation() {
    let observer = Arc::new(StatsObserver::new());
    let calls = Arc::new(AtomicU32::new(0));
    let calls_clone = calls.clone();

    let result: Result<&str, RetryError<TestError>> = RetryExecutorBuilder::new()
        .with_policy(quick_policy(5))
        .with_observer(observer.clone())
        .build()
        .execute(|| {
            let calls = calls_clone.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok("success")
            }
        })
        .await;

    assert_eq!(result.unwrap(), "success");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(observer.attempt_starts(), 1);
    assert_eq!(observer.successes(), 1);
    assert_eq!(observer.failures(), 0);
}

#[tokio::test]
async fn test_fail_fast_on_permanent_client_error() {
    let observer = Arc::new(StatsObserver::new());
    let calls = Arc::new(AtomicU32::new(0));
    let calls_clone = calls.clone();

    let result: Result<&str, RetryError<TestError>> = RetryExecutorBuilder::new()
        .with_policy(quick_policy(10))
        .with_observer(observer.clone())
        .build()
        .execute(|| {
            let calls = calls_clone.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(api_failure(404))
            }
        })
        .await;

    let err = result.unwrap_err();
    assert!(err.is_non_retryable());
    assert_eq!(err.attempts(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(observer.non_retryables(), 1);
    assert_eq!(observer.failures(), 0);
}

#[tokio::test]
async fn test_unclassifiable_error_fails_fast() {
    let calls = Arc::new(AtomicU32::new(0));
    let calls_clone = calls.clone();

    let result: Result<&str, RetryError<TestError>> = RetryExecutorBuilder::new()
        .with_policy(quick_policy(5))
        .build()
        .execute(|| {
            let calls = calls_clone.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(TestError::Transport)
            }
        })
        .await;

    let err = result.unwrap_err();
    assert!(err.is_non_retryable());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(matches!(err.into_source(), Some(TestError::Transport)));
}

#[tokio::test]
async fn test_exhaustion_consumes_exact_budget() {
    let observer = Arc::new(StatsObserver::new());
    let calls = Arc::new(AtomicU32::new(0));
    let calls_clone = calls.clone();

    let result: Result<&str, RetryError<TestError>> = RetryExecutorBuilder::new()
        .with_policy(quick_policy(3))
        .with_observer(observer.clone())
        .build()
        .execute(|| {
            let calls = calls_clone.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(api_failure(503))
            }
        })
        .await;

    let err = result.unwrap_err();
    assert!(err.is_exhausted());
    assert_eq!(err.attempts(), 3);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(observer.attempt_starts(), 3);
    assert_eq!(observer.failures(), 2); // final failure reports exhaustion instead
    assert_eq!(observer.exhaustions(), 1);

    let source = err.into_source().unwrap();
    assert_eq!(source.api_error().unwrap().status, 503);
}

#[tokio::test]
async fn test_success_on_third_attempt() {
    let calls = Arc::new(AtomicU32::new(0));
    let calls_clone = calls.clone();

    let result: Result<&str, RetryError<TestError>> = RetryExecutorBuilder::new()
        .with_policy(quick_policy(5))
        .build()
        .execute(|| {
            let calls = calls_clone.clone();
            async move {
                let attempt = calls.fetch_add(1, Ordering::SeqCst) + 1;
                if attempt < 3 {
                    Err(api_failure(500))
                } else {
                    Ok("recovered")
                }
            }
        })
        .await;

    assert_eq!(result.unwrap(), "recovered");
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_conservative_predicate_rejects_bare_500() {
    let calls = Arc::new(AtomicU32::new(0));
    let calls_clone = calls.clone();

    let result: Result<&str, RetryError<TestError>> = RetryExecutorBuilder::new()
        .with_policy(quick_policy(4))
        .with_predicate(ConservativePolicy)
        .build()
        .execute(|| {
            let calls = calls_clone.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(api_failure(500))
            }
        })
        .await;

    assert!(result.unwrap_err().is_non_retryable());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

// ============================================================================
// Wait selection
// ============================================================================

#[tokio::test]
async fn test_server_retry_after_overrides_backoff() {
    let observer = Arc::new(DelayCapture::default());
    let calls = Arc::new(AtomicU32::new(0));
    let calls_clone = calls.clone();

    // Configured backoff is far larger than the server hint; the hint wins.
    let policy = RetryPolicy::default()
        .with_max_attempts(3)
        .with_initial_backoff(Duration::from_secs(30))
        .with_jitter(false);

    let start = Instant::now();
    let result: Result<&str, RetryError<TestError>> = RetryExecutorBuilder::new()
        .with_policy(policy)
        .with_observer(observer.clone())
        .build()
        .execute(|| {
            let calls = calls_clone.clone();
            async move {
                let attempt = calls.fetch_add(1, Ordering::SeqCst) + 1;
                if attempt == 1 {
                    Err(TestError::Api(
                        ApiError::new(429, "RATE_LIMIT_EXCEEDED", "slow down")
                            .with_retry_after(Duration::from_millis(50)),
                    ))
                } else {
                    Ok("after hint")
                }
            }
        })
        .await;

    assert_eq!(result.unwrap(), "after hint");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(start.elapsed() < Duration::from_secs(5), "hint was not honored");

    let delays = observer.delays.lock().unwrap();
    assert_eq!(delays.as_slice(), &[Duration::from_millis(50)]);
}

#[tokio::test]
async fn test_rate_limit_without_hint_uses_calculated_backoff() {
    let observer = Arc::new(DelayCapture::default());
    let calls = Arc::new(AtomicU32::new(0));
    let calls_clone = calls.clone();

    let policy = RetryPolicy::default()
        .with_max_attempts(2)
        .with_initial_backoff(Duration::from_millis(7))
        .with_jitter(false);

    let _: Result<&str, RetryError<TestError>> = RetryExecutorBuilder::new()
        .with_policy(policy)
        .with_observer(observer.clone())
        .build()
        .execute(|| {
            let calls = calls_clone.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(api_failure(429))
            }
        })
        .await;

    let delays = observer.delays.lock().unwrap();
    assert_eq!(delays.as_slice(), &[Duration::from_millis(7)]);
}

#[tokio::test]
async fn test_injected_jitter_source_shapes_delay() {
    let observer = Arc::new(DelayCapture::default());

    let policy = RetryPolicy::default()
        .with_max_attempts(2)
        .with_initial_backoff(Duration::from_millis(100))
        .with_jitter(true);

    // r = 1.0 pushes the delay to the full +20% bound.
    let _: Result<&str, RetryError<TestError>> = RetryExecutorBuilder::new()
        .with_policy(policy)
        .with_observer(observer.clone())
        .with_jitter_source(Arc::new(FixedJitter(1.0)))
        .build()
        .execute(|| async { Err(api_failure(503)) })
        .await;

    let delays = observer.delays.lock().unwrap();
    assert_eq!(delays.as_slice(), &[Duration::from_millis(120)]);
}

// ============================================================================
// Cancellation
// ============================================================================

#[tokio::test]
async fn test_cancellation_interrupts_backoff_wait() {
    let token = CancellationToken::new();
    let observer = Arc::new(StatsObserver::new());
    let calls = Arc::new(AtomicU32::new(0));
    let calls_clone = calls.clone();

    let policy = RetryPolicy::default()
        .with_max_attempts(5)
        .with_initial_backoff(Duration::from_secs(30))
        .with_jitter(false);

    let cancel = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        cancel.cancel();
    });

    let start = Instant::now();
    let result: Result<&str, RetryError<TestError>> = RetryExecutorBuilder::new()
        .with_policy(policy)
        .with_observer(observer.clone())
        .with_cancellation(token)
        .build()
        .execute(|| {
            let calls = calls_clone.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(api_failure(503))
            }
        })
        .await;

    let err = result.unwrap_err();
    assert!(err.is_cancelled());
    assert_eq!(err.attempts(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(start.elapsed() < Duration::from_secs(5), "wait was not interrupted");
    assert_eq!(observer.cancellations(), 1);

    // The failure that preceded cancellation is still reachable.
    let source = err.into_source().unwrap();
    assert_eq!(source.api_error().unwrap().status, 503);
}

#[tokio::test]
async fn test_cancellation_before_first_attempt() {
    let token = CancellationToken::new();
    token.cancel();

    let calls = Arc::new(AtomicU32::new(0));
    let calls_clone = calls.clone();

    let result: Result<&str, RetryError<TestError>> = RetryExecutorBuilder::new()
        .with_policy(quick_policy(3))
        .with_cancellation(token)
        .build()
        .execute(|| {
            let calls = calls_clone.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok("never runs")
            }
        })
        .await;

    let err = result.unwrap_err();
    assert!(err.is_cancelled());
    assert_eq!(err.attempts(), 0);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

// ============================================================================
// Concurrent reuse
// ============================================================================

#[tokio::test]
async fn test_concurrent_invocations_share_one_executor() {
    let executor = Arc::new(
        RetryExecutorBuilder::new()
            .with_policy(quick_policy(5))
            .build(),
    );

    let mut handles = Vec::new();
    for _ in 0..8 {
        let executor = executor.clone();
        handles.push(tokio::spawn(async move {
            let calls = AtomicU32::new(0);
            let result: Result<&str, RetryError<TestError>> = executor
                .execute(|| {
                    let attempt = calls.fetch_add(1, Ordering::SeqCst) + 1;
                    async move {
                        if attempt == 1 {
                            Err(api_failure(503))
                        } else {
                            Ok("done")
                        }
                    }
                })
                .await;
            (result.unwrap(), calls.into_inner())
        }));
    }

    for handle in handles {
        let (value, calls) = handle.await.unwrap();
        assert_eq!(value, "done");
        assert_eq!(calls, 2, "each invocation counts attempts independently");
    }
}

// ============================================================================
// Convenience wrapper
// ============================================================================

#[tokio::test]
async fn test_retry_with_policy_convenience() {
    let policy = quick_policy(3);
    let calls = Arc::new(AtomicU32::new(0));
    let calls_clone = calls.clone();

    let result = retry_with_policy(&policy, || {
        let calls = calls_clone.clone();
        async move {
            let attempt = calls.fetch_add(1, Ordering::SeqCst) + 1;
            if attempt < 2 {
                Err(api_failure(502))
            } else {
                Ok("done")
            }
        }
    })
    .await;

    assert_eq!(result.unwrap(), "done");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_single_attempt_policy_reports_exhaustion() {
    let result: Result<&str, RetryError<TestError>> =
        retry_with_policy(&quick_policy(1), || async { Err(api_failure(500)) }).await;

    let err = result.unwrap_err();
    assert!(err.is_exhausted());
    assert_eq!(err.attempts(), 1);
}
