//! Data types for Confluent control-plane resources
//!
//! These are the wire shapes exchanged with the cmk/kafka/iam/org/connect API
//! families. Field names follow the APIs' snake_case JSON.

mod connect;
mod identity;
mod kafka;

pub use connect::{
    ConfigDefinition, ConfigValue, ConnectorConfigValidation, ConnectorError, ConnectorInfo,
    ConnectorPlugin, ConnectorStatus, ConnectorTask, ConnectorValidation, TaskStatus,
};
pub use identity::{ApiKey, Environment, ResourceRef, Role, RoleBinding, ServiceAccount};
pub use kafka::{AclBinding, BrokerConfig, Cluster, PartitionInfo, Topic, TopicConfig};
