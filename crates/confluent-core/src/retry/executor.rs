//! Retry execution engine
//!
//! The executor drives the attempt loop: invoke the operation, classify the
//! failure, compute the next wait (honoring a server-supplied `Retry-After`
//! hint on rate-limited responses), and sleep in a way that the external
//! cancellation token can interrupt.

use std::error::Error;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use super::error::RetryError;
use super::observer::{NoOpObserver, RetryObserver};
use super::policy::RetryPolicy;
use super::strategies::{
    calculate_backoff, ApiFailure, DefaultPolicy, JitterSource, RetryPredicate, SecureJitter,
};

/// Execute an async operation with retry under the given policy and the
/// default classification stance (retry on 429 and any 5xx).
///
/// Convenience wrapper for simple call sites; use [`RetryExecutorBuilder`]
/// for custom predicates, observers, jitter sources, or cancellation.
///
/// # Example
///
/// ```rust,no_run
/// use confluent_core::retry::{retry_with_policy, RetryPolicy};
/// use confluent_core::ApiError;
///
/// async fn example() {
///     let policy = RetryPolicy::default().with_max_attempts(3);
///
///     let result = retry_with_policy(&policy, || async {
///         Ok::<_, ApiError>("success")
///     })
///     .await;
/// }
/// ```
pub async fn retry_with_policy<F, Fut, T, E>(
    policy: &RetryPolicy,
    op: F,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: ApiFailure + Error,
{
    RetryExecutorBuilder::new()
        .with_policy(policy.clone())
        .build()
        .execute(op)
        .await
}

/// Builder for configuring a [`RetryExecutor`].
///
/// # Example
///
/// ```rust
/// use confluent_core::retry::{ConservativePolicy, RetryExecutorBuilder, RetryPolicy, TracingObserver};
///
/// let executor = RetryExecutorBuilder::new()
///     .with_policy(RetryPolicy::default())
///     .with_predicate(ConservativePolicy)
///     .with_observer(TracingObserver::new("create-topic"))
///     .build();
/// ```
pub struct RetryExecutorBuilder<P = DefaultPolicy, O = NoOpObserver> {
    policy: RetryPolicy,
    predicate: P,
    observer: O,
    jitter_source: Arc<dyn JitterSource>,
    cancellation: CancellationToken,
}

impl Default for RetryExecutorBuilder<DefaultPolicy, NoOpObserver> {
    fn default() -> Self {
        Self::new()
    }
}

impl RetryExecutorBuilder<DefaultPolicy, NoOpObserver> {
    /// Create a builder with the default policy, predicate, and a
    /// never-cancelled token.
    pub fn new() -> Self {
        Self {
            policy: RetryPolicy::default(),
            predicate: DefaultPolicy,
            observer: NoOpObserver,
            jitter_source: Arc::new(SecureJitter),
            cancellation: CancellationToken::new(),
        }
    }
}

impl<P, O> RetryExecutorBuilder<P, O> {
    /// Set the retry policy.
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the classification predicate deciding which API errors are
    /// retried.
    pub fn with_predicate<P2>(self, predicate: P2) -> RetryExecutorBuilder<P2, O> {
        RetryExecutorBuilder {
            policy: self.policy,
            predicate,
            observer: self.observer,
            jitter_source: self.jitter_source,
            cancellation: self.cancellation,
        }
    }

    /// Set the observer receiving attempt callbacks.
    pub fn with_observer<O2>(self, observer: O2) -> RetryExecutorBuilder<P, O2> {
        RetryExecutorBuilder {
            policy: self.policy,
            predicate: self.predicate,
            observer,
            jitter_source: self.jitter_source,
            cancellation: self.cancellation,
        }
    }

    /// Substitute the jitter randomness source. The default draws from the
    /// thread-local CSPRNG; tests can inject a fixed-sequence source.
    pub fn with_jitter_source(mut self, source: Arc<dyn JitterSource>) -> Self {
        self.jitter_source = source;
        self
    }

    /// Attach an external cancellation token. The token is checked before
    /// every attempt and interrupts any in-progress backoff wait; attach a
    /// deadline to the token to realize a timeout.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Build the executor.
    pub fn build(self) -> RetryExecutor<P, O> {
        RetryExecutor {
            policy: self.policy,
            predicate: self.predicate,
            observer: self.observer,
            jitter_source: self.jitter_source,
            cancellation: self.cancellation,
        }
    }
}

/// A retry executor with configurable policy, predicate, observer, jitter
/// source, and cancellation token.
///
/// Each [`execute`](RetryExecutor::execute) call runs as a single sequential
/// attempt loop with its own state; one executor may serve any number of
/// concurrent calls.
pub struct RetryExecutor<P, O> {
    policy: RetryPolicy,
    predicate: P,
    observer: O,
    jitter_source: Arc<dyn JitterSource>,
    cancellation: CancellationToken,
}

impl<P, O> RetryExecutor<P, O>
where
    P: RetryPredicate,
    O: RetryObserver,
{
    /// Execute an operation with retry.
    ///
    /// The operation is invoked up to `max_attempts` times. Failures that do
    /// not carry a structured API error, or whose API error the predicate
    /// rejects, fail fast as [`RetryError::NonRetryable`]. A rate-limited
    /// error carrying a positive server `Retry-After` hint overrides the
    /// calculated backoff for that wait. The operation must be safe to
    /// invoke multiple times; partial effects are not tracked here.
    pub async fn execute<F, Fut, T, E>(&self, mut op: F) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: ApiFailure + Error,
    {
        let start = Instant::now();
        let max_attempts = self.policy.max_attempts();

        for attempt in 1..=max_attempts {
            if self.cancellation.is_cancelled() {
                self.observer.on_cancelled(attempt - 1);
                return Err(RetryError::cancelled(attempt - 1, None));
            }

            self.observer.on_attempt_start(attempt, max_attempts);

            let err = match op().await {
                Ok(value) => {
                    self.observer.on_success(attempt, start.elapsed());
                    return Ok(value);
                }
                Err(err) => err,
            };

            // Failures without a structured API error are unclassifiable and
            // terminate the loop rather than retry blindly.
            let retryable = err
                .api_error()
                .map(|api| self.predicate.should_retry(api))
                .unwrap_or(false);
            if !retryable {
                self.observer.on_non_retryable(attempt, &err);
                return Err(RetryError::non_retryable(err));
            }

            if attempt >= max_attempts {
                self.observer.on_exhausted(attempt, &err);
                return Err(RetryError::exhausted(attempt, err, start.elapsed()));
            }

            let delay = self.next_delay(&err, attempt);
            self.observer.on_attempt_failed(attempt, &err, delay);

            if !delay.is_zero() {
                tokio::select! {
                    _ = tokio::time::sleep(delay) => {}
                    _ = self.cancellation.cancelled() => {
                        self.observer.on_cancelled(attempt);
                        return Err(RetryError::cancelled(attempt, Some(err)));
                    }
                }
            }
        }

        // The clamped policy guarantees at least one attempt, so every path
        // returns inside the loop; fall back gracefully rather than panic.
        Err(RetryError::cancelled(max_attempts, None))
    }

    /// Wait before the next attempt: the server's `Retry-After` hint when
    /// the failure is rate limiting and the hint is positive, otherwise the
    /// calculated exponential backoff.
    fn next_delay<E: ApiFailure>(&self, err: &E, attempt: u32) -> Duration {
        if let Some(api) = err.api_error() {
            if api.is_rate_limited() {
                if let Some(hint) = api.retry_after {
                    if !hint.is_zero() {
                        return hint;
                    }
                }
            }
        }

        let jitter: Option<&dyn JitterSource> = if self.policy.jitter() {
            Some(self.jitter_source.as_ref())
        } else {
            None
        };
        calculate_backoff(&self.policy, attempt - 1, jitter)
    }
}
