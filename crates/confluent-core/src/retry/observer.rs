//! Retry observation and logging

use std::error::Error;
use std::time::Duration;

/// Observer trait for retry attempt events.
///
/// Implement this to receive callbacks during retry execution, for logging,
/// metrics collection, or debugging. All methods have no-op defaults except
/// the four core events.
pub trait RetryObserver: Send + Sync {
    /// Called when an attempt is about to start (1-indexed).
    fn on_attempt_start(&self, attempt: u32, max_attempts: u32);

    /// Called when an attempt fails and will be retried after `delay`.
    fn on_attempt_failed(&self, attempt: u32, error: &dyn Error, delay: Duration);

    /// Called when the operation succeeds.
    fn on_success(&self, attempt: u32, total_duration: Duration);

    /// Called when all retry attempts are exhausted.
    fn on_exhausted(&self, attempts: u32, final_error: &dyn Error);

    /// Called when an error is classified as non-retryable and the loop
    /// fails fast.
    fn on_non_retryable(&self, attempt: u32, error: &dyn Error) {
        let _ = (attempt, error);
    }

    /// Called when the external cancellation signal stops the loop.
    fn on_cancelled(&self, attempts: u32) {
        let _ = attempts;
    }
}

/// An observer that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl RetryObserver for NoOpObserver {
    fn on_attempt_start(&self, _attempt: u32, _max_attempts: u32) {}

    fn on_attempt_failed(&self, _attempt: u32, _error: &dyn Error, _delay: Duration) {}

    fn on_success(&self, _attempt: u32, _total_duration: Duration) {}

    fn on_exhausted(&self, _attempts: u32, _final_error: &dyn Error) {}
}

/// An observer that logs retry events using the `tracing` crate.
///
/// Log levels: attempt start at DEBUG, failed attempt at WARN, success at
/// INFO when retries were needed (DEBUG otherwise), exhaustion at ERROR,
/// fail-fast and cancellation at WARN.
#[derive(Debug, Clone)]
pub struct TracingObserver {
    operation: String,
}

impl TracingObserver {
    /// Create an observer tagged with a descriptive operation name.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
        }
    }

    /// Get the operation name.
    pub fn operation(&self) -> &str {
        &self.operation
    }
}

impl Default for TracingObserver {
    fn default() -> Self {
        Self::new("retry")
    }
}

impl RetryObserver for TracingObserver {
    fn on_attempt_start(&self, attempt: u32, max_attempts: u32) {
        tracing::debug!(
            operation = %self.operation,
            attempt,
            max_attempts,
            "starting attempt"
        );
    }

    fn on_attempt_failed(&self, attempt: u32, error: &dyn Error, delay: Duration) {
        tracing::warn!(
            operation = %self.operation,
            attempt,
            error = %error,
            delay_ms = delay.as_millis() as u64,
            "attempt failed, will retry"
        );
    }

    fn on_success(&self, attempt: u32, total_duration: Duration) {
        if attempt > 1 {
            tracing::info!(
                operation = %self.operation,
                attempt,
                total_duration_ms = total_duration.as_millis() as u64,
                "succeeded after retry"
            );
        } else {
            tracing::debug!(
                operation = %self.operation,
                duration_ms = total_duration.as_millis() as u64,
                "succeeded on first attempt"
            );
        }
    }

    fn on_exhausted(&self, attempts: u32, final_error: &dyn Error) {
        tracing::error!(
            operation = %self.operation,
            attempts,
            error = %final_error,
            "all retry attempts exhausted"
        );
    }

    fn on_non_retryable(&self, attempt: u32, error: &dyn Error) {
        tracing::warn!(
            operation = %self.operation,
            attempt,
            error = %error,
            "non-retryable error, failing fast"
        );
    }

    fn on_cancelled(&self, attempts: u32) {
        tracing::warn!(
            operation = %self.operation,
            attempts,
            "retry cancelled"
        );
    }
}

/// An observer that counts retry events. Useful for tests and metrics.
#[derive(Debug, Default)]
pub struct StatsObserver {
    attempt_starts: std::sync::atomic::AtomicU32,
    failures: std::sync::atomic::AtomicU32,
    successes: std::sync::atomic::AtomicU32,
    exhaustions: std::sync::atomic::AtomicU32,
    non_retryables: std::sync::atomic::AtomicU32,
    cancellations: std::sync::atomic::AtomicU32,
}

impl StatsObserver {
    /// Create a new stats observer with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of attempts started.
    pub fn attempt_starts(&self) -> u32 {
        self.attempt_starts.load(std::sync::atomic::Ordering::SeqCst)
    }

    /// Number of failed attempts that led to a retry.
    pub fn failures(&self) -> u32 {
        self.failures.load(std::sync::atomic::Ordering::SeqCst)
    }

    /// Number of successful completions.
    pub fn successes(&self) -> u32 {
        self.successes.load(std::sync::atomic::Ordering::SeqCst)
    }

    /// Number of exhaustion events.
    pub fn exhaustions(&self) -> u32 {
        self.exhaustions.load(std::sync::atomic::Ordering::SeqCst)
    }

    /// Number of fail-fast events.
    pub fn non_retryables(&self) -> u32 {
        self.non_retryables.load(std::sync::atomic::Ordering::SeqCst)
    }

    /// Number of cancellation events.
    pub fn cancellations(&self) -> u32 {
        self.cancellations.load(std::sync::atomic::Ordering::SeqCst)
    }
}

impl RetryObserver for StatsObserver {
    fn on_attempt_start(&self, _attempt: u32, _max_attempts: u32) {
        self.attempt_starts
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }

    fn on_attempt_failed(&self, _attempt: u32, _error: &dyn Error, _delay: Duration) {
        self.failures
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }

    fn on_success(&self, _attempt: u32, _total_duration: Duration) {
        self.successes
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }

    fn on_exhausted(&self, _attempts: u32, _final_error: &dyn Error) {
        self.exhaustions
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }

    fn on_non_retryable(&self, _attempt: u32, _error: &dyn Error) {
        self.non_retryables
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }

    fn on_cancelled(&self, _attempts: u32) {
        self.cancellations
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }
}

impl<T: RetryObserver + ?Sized> RetryObserver for std::sync::Arc<T> {
    fn on_attempt_start(&self, attempt: u32, max_attempts: u32) {
        (**self).on_attempt_start(attempt, max_attempts)
    }

    fn on_attempt_failed(&self, attempt: u32, error: &dyn Error, delay: Duration) {
        (**self).on_attempt_failed(attempt, error, delay)
    }

    fn on_success(&self, attempt: u32, total_duration: Duration) {
        (**self).on_success(attempt, total_duration)
    }

    fn on_exhausted(&self, attempts: u32, final_error: &dyn Error) {
        (**self).on_exhausted(attempts, final_error)
    }

    fn on_non_retryable(&self, attempt: u32, error: &dyn Error) {
        (**self).on_non_retryable(attempt, error)
    }

    fn on_cancelled(&self, attempts: u32) {
        (**self).on_cancelled(attempts)
    }
}
