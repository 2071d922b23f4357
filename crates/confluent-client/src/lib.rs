//! # confluent-client
//!
//! Async REST client for Confluent Cloud control-plane APIs:
//! - Shared HTTP client with basic-auth credentials and typed error parsing
//! - Resource managers for environments, clusters, topics, ACLs, service
//!   accounts, and connectors
//! - Schema Registry manager with client-side schema validation
//!
//! Failed responses become [`confluent_core::ApiError`] values, so calls can
//! be wrapped in the retry engine from `confluent-core`:
//!
//! ```rust,no_run
//! use confluent_client::{Client, ClientConfig};
//! use confluent_client::resources::EnvironmentManager;
//! use confluent_core::retry::{RetryExecutorBuilder, RetryPolicy, TracingObserver};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::new(ClientConfig::new(
//!     "https://api.confluent.cloud",
//!     "my-key",
//!     "my-secret",
//! ))?;
//!
//! let environments = EnvironmentManager::new(client.clone());
//! let executor = RetryExecutorBuilder::new()
//!     .with_policy(RetryPolicy::default().with_max_attempts(4))
//!     .with_observer(TracingObserver::new("list-environments"))
//!     .build();
//!
//! let all = executor.execute(|| environments.list()).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod resources;
pub mod schemaregistry;

pub use client::{Client, ClientConfig, Request, Response};
pub use error::{ClientError, Result};
