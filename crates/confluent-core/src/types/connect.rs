//! Kafka Connect connector types

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A connector with its configuration and current status.
///
/// Connectors are SOURCE (producing into Kafka) or SINK (consuming from it).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorInfo {
    pub name: String,
    #[serde(default)]
    pub config: HashMap<String, String>,
    /// SOURCE or SINK.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub tasks: i32,
    #[serde(default)]
    pub status: ConnectorStatus,
    #[serde(default)]
    pub topics: Vec<String>,
}

/// Current state of a connector and its tasks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectorStatus {
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub tasks: Vec<TaskStatus>,
    #[serde(default)]
    pub errors: Vec<ConnectorError>,
}

/// Status of one connector task. A connector may run several in parallel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskStatus {
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub worker: String,
    #[serde(default)]
    pub error: String,
}

/// An error reported by a connector or one of its tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorError {
    pub message: String,
}

/// A connector plugin available in the Connect cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorPlugin {
    pub class: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub version: String,
}

/// Validation result for a connector configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorValidation {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub error_count: i32,
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default)]
    pub configs: Vec<ConnectorConfigValidation>,
}

/// Validation information for a single configuration property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorConfigValidation {
    pub definition: ConfigDefinition,
    pub value: ConfigValue,
}

/// Definition of a connector configuration property.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigDefinition {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub default_value: String,
    /// HIGH, MEDIUM, or LOW.
    #[serde(default)]
    pub importance: String,
    #[serde(default)]
    pub documentation: String,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub width: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub dependents: Vec<String>,
    #[serde(rename = "order", default)]
    pub order_in_group: i32,
}

/// A configuration value and its validation outcome.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigValue {
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub recommended_values: Vec<String>,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub visible: bool,
}

/// A task instance for a connector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorTask {
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub config: HashMap<String, String>,
    #[serde(default)]
    pub connector: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connector_status_roundtrip_from_wire() {
        let json = r#"{
            "state": "RUNNING",
            "tasks": [{"id": 0, "state": "RUNNING", "worker": "w-1", "error": ""}],
            "errors": []
        }"#;
        let status: ConnectorStatus = serde_json::from_str(json).unwrap();
        assert_eq!(status.state, "RUNNING");
        assert_eq!(status.tasks.len(), 1);
        assert_eq!(status.tasks[0].worker, "w-1");
    }

    #[test]
    fn test_config_definition_order_wire_name() {
        let json = r#"{"name":"topics","type":"LIST","required":true,"order":3}"#;
        let def: ConfigDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(def.order_in_group, 3);
        assert!(def.required);
    }
}
