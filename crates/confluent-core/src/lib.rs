//! # confluent-core
//!
//! Core library for the Confluent REST client providing:
//! - Structured API error type with status-class helpers
//! - Resource type definitions (environments, clusters, topics, ACLs, ...)
//! - Retry execution engine with policy-based classification and backoff

pub mod error;
pub mod retry;
pub mod types;

pub use error::{status_code_to_error_code, ApiError};
