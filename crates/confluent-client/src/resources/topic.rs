//! Topic operations (kafka/v3)

use std::collections::HashMap;

use confluent_core::types::{Topic, TopicConfig};
use reqwest::Method;
use serde_json::{json, Value};

use crate::client::{Client, Request};
use crate::error::Result;

use super::DataEnvelope;

/// Handles topic operations via the kafka/v3 API.
pub struct TopicManager {
    client: Client,
}

impl TopicManager {
    /// Create a new topic manager.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// List all topics in a cluster.
    pub async fn list(&self, cluster_id: &str) -> Result<Vec<Topic>> {
        let request = Request::new(
            Method::GET,
            format!("/kafka/v3/clusters/{cluster_id}/topics"),
        );
        let response = self.client.send(request).await?;
        Ok(response.json::<DataEnvelope<Topic>>()?.into_inner())
    }

    /// Retrieve a specific topic.
    pub async fn get(&self, cluster_id: &str, topic_name: &str) -> Result<Topic> {
        let request = Request::new(
            Method::GET,
            format!("/kafka/v3/clusters/{cluster_id}/topics/{topic_name}"),
        );
        let response = self.client.send(request).await?;
        response.json()
    }

    /// Create a new topic. Answers 409 when the name is taken.
    pub async fn create(&self, cluster_id: &str, topic: &Topic) -> Result<()> {
        let body = json!({
            "topic_name": topic.name,
            "partitions_count": topic.partition_count,
            "replication_factor": topic.replication_factor,
            "configs": configs_to_array(&topic.config),
        });

        let request = Request::new(
            Method::POST,
            format!("/kafka/v3/clusters/{cluster_id}/topics"),
        )
        .with_body(body);
        self.client.send(request).await?;
        Ok(())
    }

    /// Delete a topic.
    pub async fn delete(&self, cluster_id: &str, topic_name: &str) -> Result<()> {
        let request = Request::new(
            Method::DELETE,
            format!("/kafka/v3/clusters/{cluster_id}/topics/{topic_name}"),
        );
        self.client.send(request).await?;
        Ok(())
    }

    /// Update topic-level configuration entries.
    pub async fn update_config(
        &self,
        cluster_id: &str,
        topic_name: &str,
        configs: &HashMap<String, String>,
    ) -> Result<()> {
        let request = Request::new(
            Method::PATCH,
            format!("/kafka/v3/clusters/{cluster_id}/topics/{topic_name}"),
        )
        .with_body(json!({ "configs": configs_to_array(configs) }));
        self.client.send(request).await?;
        Ok(())
    }

    /// Retrieve topic-level configuration entries.
    pub async fn get_config(&self, cluster_id: &str, topic_name: &str) -> Result<Vec<TopicConfig>> {
        let request = Request::new(
            Method::GET,
            format!("/kafka/v3/clusters/{cluster_id}/topics/{topic_name}/configs"),
        );
        let response = self.client.send(request).await?;
        Ok(response.json::<DataEnvelope<TopicConfig>>()?.into_inner())
    }
}

// The API wants configs as an array of {name, value} pairs.
fn configs_to_array(configs: &HashMap<String, String>) -> Vec<Value> {
    configs
        .iter()
        .map(|(name, value)| json!({ "name": name, "value": value }))
        .collect()
}
