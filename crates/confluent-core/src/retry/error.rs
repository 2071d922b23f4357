//! Error types for the retry execution engine

use std::error::Error;
use std::fmt;
use std::time::Duration;

/// Terminal outcome of a failed retry loop.
///
/// Exactly three failure shapes are distinguishable by the caller, and the
/// underlying error is always reachable — nothing is silently swallowed.
/// The type is generic over `E`, the error type of the operation being
/// retried.
#[derive(Debug)]
pub enum RetryError<E> {
    /// The error was classified as not worth retrying and is returned
    /// immediately after a single failed attempt, without consuming the
    /// remaining attempt budget.
    NonRetryable(E),

    /// The attempt budget was consumed without success.
    Exhausted {
        /// Number of attempts made before giving up.
        attempts: u32,
        /// The error from the final attempt.
        source: E,
        /// Total duration spent across all attempts.
        total_duration: Duration,
    },

    /// The loop was stopped by the external cancellation signal, either
    /// before an attempt started or during a backoff wait.
    Cancelled {
        /// Number of attempts completed before cancellation.
        attempts: u32,
        /// The last error observed, if any attempt ran.
        last_error: Option<E>,
    },
}

impl<E: fmt::Display> fmt::Display for RetryError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetryError::NonRetryable(source) => {
                write!(f, "non-retryable error: {}", source)
            }
            RetryError::Exhausted {
                attempts,
                source,
                total_duration,
            } => {
                write!(
                    f,
                    "retry exhausted after {} attempts over {:.2}s: {}",
                    attempts,
                    total_duration.as_secs_f64(),
                    source
                )
            }
            RetryError::Cancelled {
                attempts,
                last_error,
            } => {
                if let Some(err) = last_error {
                    write!(f, "retry cancelled after {} attempts: {}", attempts, err)
                } else {
                    write!(f, "retry cancelled after {} attempts", attempts)
                }
            }
        }
    }
}

impl<E: Error + 'static> Error for RetryError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RetryError::NonRetryable(source) => Some(source),
            RetryError::Exhausted { source, .. } => Some(source),
            RetryError::Cancelled {
                last_error: Some(err),
                ..
            } => Some(err),
            RetryError::Cancelled { last_error: None, .. } => None,
        }
    }
}

impl<E> RetryError<E> {
    /// Create a new non-retryable error.
    pub fn non_retryable(source: E) -> Self {
        RetryError::NonRetryable(source)
    }

    /// Create a new exhausted error.
    pub fn exhausted(attempts: u32, source: E, total_duration: Duration) -> Self {
        RetryError::Exhausted {
            attempts,
            source,
            total_duration,
        }
    }

    /// Create a new cancelled error.
    pub fn cancelled(attempts: u32, last_error: Option<E>) -> Self {
        RetryError::Cancelled {
            attempts,
            last_error,
        }
    }

    /// Number of attempts made before the loop terminated.
    pub fn attempts(&self) -> u32 {
        match self {
            RetryError::NonRetryable(_) => 1,
            RetryError::Exhausted { attempts, .. } => *attempts,
            RetryError::Cancelled { attempts, .. } => *attempts,
        }
    }

    /// Check whether the error was classified as non-retryable.
    pub fn is_non_retryable(&self) -> bool {
        matches!(self, RetryError::NonRetryable(_))
    }

    /// Check whether the attempt budget was exhausted.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, RetryError::Exhausted { .. })
    }

    /// Check whether the loop was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RetryError::Cancelled { .. })
    }

    /// Get the underlying error, consuming this error.
    pub fn into_source(self) -> Option<E> {
        match self {
            RetryError::NonRetryable(source) => Some(source),
            RetryError::Exhausted { source, .. } => Some(source),
            RetryError::Cancelled { last_error, .. } => last_error,
        }
    }

    /// Get a reference to the underlying error.
    pub fn source_ref(&self) -> Option<&E> {
        match self {
            RetryError::NonRetryable(source) => Some(source),
            RetryError::Exhausted { source, .. } => Some(source),
            RetryError::Cancelled { last_error, .. } => last_error.as_ref(),
        }
    }

    /// Map the underlying error type using a closure.
    pub fn map_err<F, E2>(self, f: F) -> RetryError<E2>
    where
        F: FnOnce(E) -> E2,
    {
        match self {
            RetryError::NonRetryable(source) => RetryError::NonRetryable(f(source)),
            RetryError::Exhausted {
                attempts,
                source,
                total_duration,
            } => RetryError::Exhausted {
                attempts,
                source: f(source),
                total_duration,
            },
            RetryError::Cancelled {
                attempts,
                last_error,
            } => RetryError::Cancelled {
                attempts,
                last_error: last_error.map(f),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    #[test]
    fn test_non_retryable_shape() {
        let err: RetryError<ApiError> =
            RetryError::non_retryable(ApiError::new(404, "NOT_FOUND", "missing"));

        assert!(err.is_non_retryable());
        assert!(!err.is_exhausted());
        assert!(!err.is_cancelled());
        assert_eq!(err.attempts(), 1);
        assert_eq!(err.source_ref().unwrap().status, 404);
    }

    #[test]
    fn test_exhausted_shape() {
        let err: RetryError<ApiError> = RetryError::exhausted(
            5,
            ApiError::new(503, "SERVICE_UNAVAILABLE", "unavailable"),
            Duration::from_secs(7),
        );

        assert!(err.is_exhausted());
        assert_eq!(err.attempts(), 5);
        assert_eq!(err.into_source().unwrap().status, 503);
    }

    #[test]
    fn test_cancelled_shape_without_error() {
        let err: RetryError<ApiError> = RetryError::cancelled(0, None);

        assert!(err.is_cancelled());
        assert_eq!(err.attempts(), 0);
        assert!(err.source_ref().is_none());
        assert!(err.into_source().is_none());
    }

    #[test]
    fn test_display_formats() {
        let exhausted: RetryError<ApiError> = RetryError::exhausted(
            3,
            ApiError::new(500, "INTERNAL_SERVER_ERROR", "boom"),
            Duration::from_millis(2500),
        );
        let text = exhausted.to_string();
        assert!(text.contains("retry exhausted"));
        assert!(text.contains("3 attempts"));
        assert!(text.contains("2.50"));
        assert!(text.contains("boom"));

        let cancelled: RetryError<ApiError> = RetryError::cancelled(2, None);
        assert_eq!(cancelled.to_string(), "retry cancelled after 2 attempts");
    }

    #[test]
    fn test_source_chain_reaches_underlying_error() {
        let err: RetryError<ApiError> = RetryError::exhausted(
            2,
            ApiError::new(500, "INTERNAL_SERVER_ERROR", "boom"),
            Duration::from_secs(1),
        );

        let source = Error::source(&err).expect("source");
        assert!(source.to_string().contains("boom"));
    }

    #[test]
    fn test_map_err() {
        let err: RetryError<ApiError> = RetryError::cancelled(
            1,
            Some(ApiError::new(429, "RATE_LIMIT_EXCEEDED", "slow down")),
        );

        let mapped: RetryError<String> = err.map_err(|api| api.code);
        match mapped {
            RetryError::Cancelled { attempts, last_error } => {
                assert_eq!(attempts, 1);
                assert_eq!(last_error.as_deref(), Some("RATE_LIMIT_EXCEEDED"));
            }
            _ => panic!("expected Cancelled variant"),
        }
    }
}
