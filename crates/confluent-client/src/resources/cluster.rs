//! Cluster operations (cmk/v2)

use confluent_core::types::Cluster;
use reqwest::Method;
use serde_json::json;

use crate::client::{Client, Request};
use crate::error::Result;

use super::DataEnvelope;

/// Handles Kafka cluster operations via the cmk/v2 API.
pub struct ClusterManager {
    client: Client,
}

impl ClusterManager {
    /// Create a new cluster manager.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// List all Kafka clusters in an environment.
    pub async fn list(&self, environment_id: &str) -> Result<Vec<Cluster>> {
        let request = Request::new(Method::GET, "/cmk/v2/clusters")
            .with_query("environment", environment_id);
        let response = self.client.send(request).await?;
        Ok(response.json::<DataEnvelope<Cluster>>()?.into_inner())
    }

    /// Retrieve a specific cluster.
    pub async fn get(&self, cluster_id: &str) -> Result<Cluster> {
        let request = Request::new(Method::GET, format!("/cmk/v2/clusters/{cluster_id}"));
        let response = self.client.send(request).await?;
        response.json()
    }

    /// Create a new Kafka cluster.
    ///
    /// `kind` is BASIC, STANDARD, or DEDICATED; `cloud` and `region` select
    /// the provider placement. Provisioning is asynchronous — the returned
    /// cluster's status reflects that.
    pub async fn create(
        &self,
        environment_id: &str,
        name: &str,
        kind: &str,
        cloud: &str,
        region: &str,
    ) -> Result<Cluster> {
        let body = json!({
            "display_name": name,
            "spec": {
                "kafka_cluster": { "type": kind },
                "environment": { "id": environment_id },
                "network": { "cloud": cloud, "region": region },
            },
        });

        let request = Request::new(Method::POST, "/cmk/v2/clusters").with_body(body);
        let response = self.client.send(request).await?;
        response.json()
    }

    /// Update a cluster's display name.
    pub async fn update(&self, cluster_id: &str, display_name: &str) -> Result<Cluster> {
        let request = Request::new(Method::PATCH, format!("/cmk/v2/clusters/{cluster_id}"))
            .with_body(json!({ "display_name": display_name }));
        let response = self.client.send(request).await?;
        response.json()
    }

    /// Delete a Kafka cluster. Answers 409 when the cluster is not in a
    /// deletable state.
    pub async fn delete(&self, cluster_id: &str) -> Result<()> {
        let request = Request::new(Method::DELETE, format!("/cmk/v2/clusters/{cluster_id}"));
        self.client.send(request).await?;
        Ok(())
    }
}
