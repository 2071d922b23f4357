//! Retry execution engine with policy-based classification and backoff
//!
//! The engine drives an attempt loop around a caller-supplied async
//! operation: on failure it classifies the error through a pluggable
//! [`RetryPredicate`], computes an exponential-backoff delay (or honors a
//! server-supplied `Retry-After` hint on rate-limited responses), and waits
//! in a way that can be interrupted by an external cancellation token
//! without leaking the timer.
//!
//! # Features
//!
//! - Immutable [`RetryPolicy`] value shareable across concurrent invocations
//! - Classification presets: [`DefaultPolicy`], [`AggressivePolicy`],
//!   [`ConservativePolicy`], plus closure-based custom predicates
//! - Cryptographically seeded, injectable jitter (±20%)
//! - Observable attempts via the [`RetryObserver`] trait
//! - Three distinguishable terminal failures: non-retryable, exhausted,
//!   cancelled — the underlying error is always recoverable
//!
//! # Example
//!
//! ```rust,no_run
//! use confluent_core::retry::{retry_with_policy, RetryError, RetryPolicy};
//! use confluent_core::ApiError;
//!
//! async fn example() -> Result<String, RetryError<ApiError>> {
//!     let policy = RetryPolicy::default().with_max_attempts(3);
//!
//!     retry_with_policy(&policy, || async {
//!         // Your fallible API call here
//!         Ok("success".to_string())
//!     })
//!     .await
//! }
//! ```

mod error;
mod executor;
mod observer;
mod policy;
mod strategies;

pub use error::RetryError;
pub use executor::{retry_with_policy, RetryExecutor, RetryExecutorBuilder};
pub use observer::{NoOpObserver, RetryObserver, StatsObserver, TracingObserver};
pub use policy::RetryPolicy;
pub use strategies::{
    calculate_backoff, AggressivePolicy, ApiFailure, ClosurePredicate, ConservativePolicy,
    DefaultPolicy, JitterSource, RetryPredicate, SecureJitter,
};

#[cfg(test)]
mod tests;
