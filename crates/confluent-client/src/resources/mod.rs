//! Resource managers for the control-plane APIs
//!
//! Each manager wraps the shared [`Client`](crate::Client) with the paths and
//! body shapes of one API family. Managers hold a client clone and are safe
//! to use concurrently. None of them retries on its own — wrap calls in the
//! retry engine from `confluent-core` where that is wanted.

mod acl;
mod cluster;
mod connector;
mod environment;
mod service_account;
mod topic;

pub use acl::AclManager;
pub use cluster::ClusterManager;
pub use connector::ConnectorManager;
pub use environment::EnvironmentManager;
pub use service_account::ServiceAccountManager;
pub use topic::TopicManager;

use serde::Deserialize;

/// The `{"data": [...]}` envelope most list endpoints respond with.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct DataEnvelope<T> {
    #[serde(default)]
    pub data: Vec<T>,
}

impl<T> DataEnvelope<T> {
    pub fn into_inner(self) -> Vec<T> {
        self.data
    }
}
