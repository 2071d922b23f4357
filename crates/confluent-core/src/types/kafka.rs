//! Kafka cluster, topic, and ACL types

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A Kafka cluster with its configuration and status.
///
/// Clusters come in BASIC, STANDARD, or DEDICATED flavors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub provider_type: String,
    #[serde(default)]
    pub provider_region: String,
    #[serde(default)]
    pub provider_cloud: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub bootstrap_servers: String,
    /// BASIC, STANDARD, or DEDICATED.
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// A Kafka topic with its partition and replication configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub name: String,
    #[serde(default)]
    pub partition_count: i32,
    #[serde(default)]
    pub replication_factor: i16,
    /// Topic-level overrides such as `retention.ms` or `cleanup.policy`.
    #[serde(default)]
    pub config: HashMap<String, String>,
}

/// A single topic-level configuration key-value pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicConfig {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

/// An access control list entry granting or denying permissions on a Kafka
/// resource (topic, consumer group, cluster, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclBinding {
    /// `"User:12345"` or `"User:*"`.
    pub principal: String,
    pub resource_type: String,
    pub resource_name: String,
    /// LITERAL or PREFIXED.
    pub pattern_type: String,
    pub operation: String,
    /// ALLOW or DENY.
    pub permission: String,
}

/// A broker-level configuration setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokerConfig {
    pub broker_id: String,
    pub name: String,
    #[serde(default)]
    pub value: String,
}

/// Metadata about a topic partition: leader, replicas, and in-sync replicas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionInfo {
    pub topic: String,
    pub partition: i32,
    #[serde(default)]
    pub leader: i32,
    #[serde(default)]
    pub replicas: Vec<i32>,
    #[serde(default)]
    pub isr: Vec<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cluster_kind_wire_name() {
        let json = r#"{"id":"lkc-1","name":"orders","type":"BASIC"}"#;
        let cluster: Cluster = serde_json::from_str(json).unwrap();
        assert_eq!(cluster.kind, "BASIC");
        assert_eq!(cluster.id, "lkc-1");
    }

    #[test]
    fn test_topic_defaults_for_missing_fields() {
        let topic: Topic = serde_json::from_str(r#"{"name":"events"}"#).unwrap();
        assert_eq!(topic.partition_count, 0);
        assert!(topic.config.is_empty());
    }
}
