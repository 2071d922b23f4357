//! Backoff calculation, jitter sources, and classification predicates

use std::time::Duration;

use rand::Rng;

use crate::error::ApiError;
use crate::retry::policy::RetryPolicy;

/// Fraction of the base delay used for symmetric jitter (±20%).
const JITTER_FRACTION: f64 = 0.2;

/// A source of uniform randomness for jitter.
///
/// Injectable so tests can substitute a fixed-sequence source; the production
/// implementation is [`SecureJitter`]. Implementations must be safe for
/// concurrent use.
pub trait JitterSource: Send + Sync {
    /// Return a uniformly distributed value in `[0, 1)`.
    fn unit(&self) -> f64;
}

/// Jitter backed by the thread-local CSPRNG.
///
/// A cryptographically strong generator is used so that jitter drawn by
/// independent processes stays uncorrelated and retries do not re-synchronize
/// into a thundering herd.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecureJitter;

impl JitterSource for SecureJitter {
    fn unit(&self) -> f64 {
        rand::rng().random::<f64>()
    }
}

/// Calculate the wait before the next retry attempt.
///
/// `retries_so_far` is 0 for the wait before the second attempt, 1 before the
/// third, and so on. The base delay is
/// `initial_backoff * multiplier^retries_so_far`, capped at the policy's
/// `max_backoff`. When a jitter source is supplied the capped delay is
/// perturbed by ±20% and clamped to be non-negative. Without a jitter source
/// the function is pure and deterministic.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use confluent_core::retry::{calculate_backoff, RetryPolicy};
///
/// let policy = RetryPolicy::default()
///     .with_initial_backoff(Duration::from_millis(100))
///     .with_max_backoff(Duration::from_secs(30))
///     .with_multiplier(2.0);
///
/// assert_eq!(calculate_backoff(&policy, 0, None), Duration::from_millis(100));
/// assert_eq!(calculate_backoff(&policy, 1, None), Duration::from_millis(200));
/// assert_eq!(calculate_backoff(&policy, 2, None), Duration::from_millis(400));
/// ```
pub fn calculate_backoff(
    policy: &RetryPolicy,
    retries_so_far: u32,
    jitter: Option<&dyn JitterSource>,
) -> Duration {
    let exponent = retries_so_far.min(i32::MAX as u32) as i32;
    let base = policy.initial_backoff().as_secs_f64() * policy.multiplier().powi(exponent);

    // Cap before jitter so the perturbation is relative to the effective delay.
    let capped = base.min(policy.max_backoff().as_secs_f64());

    let delay = match jitter {
        Some(source) => {
            let r = source.unit();
            capped + capped * JITTER_FRACTION * (2.0 * r - 1.0)
        }
        None => capped,
    };

    Duration::from_secs_f64(delay.max(0.0))
}

/// Capability for failure types that may carry a structured API error.
///
/// The retry engine only ever classifies through this seam: a failure that
/// returns `None` (transport fault, decode failure, anything that did not
/// come back from the API as a parsed error) is never retried. That makes
/// "unclassifiable" a first-class outcome rather than a failed downcast.
pub trait ApiFailure {
    /// The structured API error behind this failure, when there is one.
    fn api_error(&self) -> Option<&ApiError>;
}

impl ApiFailure for ApiError {
    fn api_error(&self) -> Option<&ApiError> {
        Some(self)
    }
}

/// A predicate deciding whether a structured API error is worth retrying.
///
/// The predicate is total over the error's status class; it is only consulted
/// for failures that actually carry an [`ApiError`].
pub trait RetryPredicate: Send + Sync {
    /// Determine whether the given error should be retried.
    fn should_retry(&self, error: &ApiError) -> bool;
}

/// The balanced default: retries rate limiting (429) and any 5xx fault.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPolicy;

impl RetryPredicate for DefaultPolicy {
    fn should_retry(&self, error: &ApiError) -> bool {
        error.is_rate_limited() || error.is_server_error()
    }
}

/// The widest retry surface: 429 plus every status in 500..=599, explicitly
/// including 502, 503, and 504.
#[derive(Debug, Clone, Copy, Default)]
pub struct AggressivePolicy;

impl RetryPredicate for AggressivePolicy {
    fn should_retry(&self, error: &ApiError) -> bool {
        error.status == 429 || (500..=599).contains(&error.status)
    }
}

/// Retries only failures that are near-certainly transient: 429, 503, and
/// 504. Bare 500s and 502s are excluded — an unknown server fault or a
/// misrouted gateway is more likely a persistent bug than transient load.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConservativePolicy;

impl RetryPredicate for ConservativePolicy {
    fn should_retry(&self, error: &ApiError) -> bool {
        matches!(error.status, 429 | 503 | 504)
    }
}

/// A predicate backed by a closure, for call-site-specific stances.
pub struct ClosurePredicate<F> {
    predicate: F,
}

impl<F> ClosurePredicate<F> {
    /// Create a new closure-based predicate.
    pub fn new(predicate: F) -> Self {
        Self { predicate }
    }
}

impl<F> RetryPredicate for ClosurePredicate<F>
where
    F: Fn(&ApiError) -> bool + Send + Sync,
{
    fn should_retry(&self, error: &ApiError) -> bool {
        (self.predicate)(error)
    }
}
