//! Error types for confluent-client

use confluent_core::retry::ApiFailure;
use confluent_core::ApiError;
use thiserror::Error;

use crate::schemaregistry::ValidationError;

/// Result type alias using confluent-client's error type.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Failures surfaced by client operations.
///
/// Only the `Api` variant carries a structured error from the control plane;
/// all other variants are unclassifiable to the retry engine and therefore
/// never retried.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The API answered with an error status.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The request never produced a response (connect, TLS, timeout, ...).
    #[error("http transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body did not decode into the expected shape.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The client configuration is unusable.
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),

    /// The configured base URL does not parse.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// A schema failed client-side validation before being sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ApiFailure for ClientError {
    fn api_error(&self) -> Option<&ApiError> {
        match self {
            ClientError::Api(err) => Some(err),
            _ => None,
        }
    }
}
