//! Kafka Connect connector operations (connect/v1)

use std::collections::HashMap;

use confluent_core::types::{
    ConnectorInfo, ConnectorPlugin, ConnectorStatus, ConnectorTask, ConnectorValidation,
    TaskStatus,
};
use reqwest::Method;
use serde_json::{json, Map, Value};

use crate::client::{Client, Request};
use crate::error::{ClientError, Result};

/// Handles Kafka Connect connector operations via the connect/v1 API.
pub struct ConnectorManager {
    client: Client,
}

impl ConnectorManager {
    /// Create a new connector manager.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn base_path(&self, environment_id: &str, cluster_id: &str) -> String {
        format!("/connect/v1/environments/{environment_id}/clusters/{cluster_id}")
    }

    /// List connector names in a Connect cluster.
    pub async fn list(&self, environment_id: &str, cluster_id: &str) -> Result<Vec<String>> {
        let request = Request::new(
            Method::GET,
            format!("{}/connectors", self.base_path(environment_id, cluster_id)),
        );
        let response = self.client.send(request).await?;
        response.json()
    }

    /// Retrieve a connector with its configuration and status.
    pub async fn get(
        &self,
        environment_id: &str,
        cluster_id: &str,
        connector_name: &str,
    ) -> Result<ConnectorInfo> {
        let request = Request::new(
            Method::GET,
            format!(
                "{}/connectors/{connector_name}",
                self.base_path(environment_id, cluster_id)
            ),
        );
        let response = self.client.send(request).await?;
        response.json()
    }

    /// Create a connector. The config map must include `connector.class`
    /// and the connector-specific settings.
    pub async fn create(
        &self,
        environment_id: &str,
        cluster_id: &str,
        name: &str,
        config: &HashMap<String, String>,
    ) -> Result<ConnectorInfo> {
        let request = Request::new(
            Method::POST,
            format!("{}/connectors", self.base_path(environment_id, cluster_id)),
        )
        .with_body(json!({ "name": name, "config": config }));
        let response = self.client.send(request).await?;
        response.json()
    }

    /// Replace a connector's configuration entirely.
    pub async fn update_config(
        &self,
        environment_id: &str,
        cluster_id: &str,
        connector_name: &str,
        config: &HashMap<String, String>,
    ) -> Result<ConnectorInfo> {
        let request = Request::new(
            Method::PUT,
            format!(
                "{}/connectors/{connector_name}/config",
                self.base_path(environment_id, cluster_id)
            ),
        )
        .with_body(json!(config));
        let response = self.client.send(request).await?;
        response.json()
    }

    /// Delete a connector and stop all its tasks.
    pub async fn delete(
        &self,
        environment_id: &str,
        cluster_id: &str,
        connector_name: &str,
    ) -> Result<()> {
        let request = Request::new(
            Method::DELETE,
            format!(
                "{}/connectors/{connector_name}",
                self.base_path(environment_id, cluster_id)
            ),
        );
        self.client.send(request).await?;
        Ok(())
    }

    /// Retrieve the current status of a connector and its tasks.
    pub async fn status(
        &self,
        environment_id: &str,
        cluster_id: &str,
        connector_name: &str,
    ) -> Result<ConnectorStatus> {
        let request = Request::new(
            Method::GET,
            format!(
                "{}/connectors/{connector_name}/status",
                self.base_path(environment_id, cluster_id)
            ),
        );
        let response = self.client.send(request).await?;
        response.json()
    }

    /// Pause a connector; it stops processing but keeps its configuration.
    pub async fn pause(
        &self,
        environment_id: &str,
        cluster_id: &str,
        connector_name: &str,
    ) -> Result<()> {
        let request = Request::new(
            Method::PUT,
            format!(
                "{}/connectors/{connector_name}/pause",
                self.base_path(environment_id, cluster_id)
            ),
        );
        self.client.send(request).await?;
        Ok(())
    }

    /// Resume a paused connector from where it left off.
    pub async fn resume(
        &self,
        environment_id: &str,
        cluster_id: &str,
        connector_name: &str,
    ) -> Result<()> {
        let request = Request::new(
            Method::PUT,
            format!(
                "{}/connectors/{connector_name}/resume",
                self.base_path(environment_id, cluster_id)
            ),
        );
        self.client.send(request).await?;
        Ok(())
    }

    /// Restart a connector and its tasks, e.g. to recover from a transient
    /// failure.
    pub async fn restart(
        &self,
        environment_id: &str,
        cluster_id: &str,
        connector_name: &str,
    ) -> Result<()> {
        let request = Request::new(
            Method::POST,
            format!(
                "{}/connectors/{connector_name}/restart",
                self.base_path(environment_id, cluster_id)
            ),
        );
        self.client.send(request).await?;
        Ok(())
    }

    /// Restart a single task of a connector.
    pub async fn restart_task(
        &self,
        environment_id: &str,
        cluster_id: &str,
        connector_name: &str,
        task_id: i32,
    ) -> Result<()> {
        let request = Request::new(
            Method::POST,
            format!(
                "{}/connectors/{connector_name}/tasks/{task_id}/restart",
                self.base_path(environment_id, cluster_id)
            ),
        );
        self.client.send(request).await?;
        Ok(())
    }

    /// Retrieve a connector's configuration map.
    pub async fn get_config(
        &self,
        environment_id: &str,
        cluster_id: &str,
        connector_name: &str,
    ) -> Result<HashMap<String, String>> {
        let request = Request::new(
            Method::GET,
            format!(
                "{}/connectors/{connector_name}/config",
                self.base_path(environment_id, cluster_id)
            ),
        );
        let response = self.client.send(request).await?;
        response.json()
    }

    /// List connector plugins available in the Connect cluster.
    pub async fn list_plugins(
        &self,
        environment_id: &str,
        cluster_id: &str,
    ) -> Result<Vec<ConnectorPlugin>> {
        let request = Request::new(
            Method::GET,
            format!(
                "{}/connector-plugins",
                self.base_path(environment_id, cluster_id)
            ),
        );
        let response = self.client.send(request).await?;
        response.json()
    }

    /// Validate a connector configuration against a plugin without creating
    /// anything. `connector.class` must not appear in the config map — it is
    /// supplied through `connector_class`.
    pub async fn validate_config(
        &self,
        environment_id: &str,
        cluster_id: &str,
        connector_class: &str,
        config: &HashMap<String, String>,
    ) -> Result<ConnectorValidation> {
        if config.contains_key("connector.class") {
            return Err(ClientError::InvalidConfig(
                "connector.class belongs in the connector_class parameter, not the config map"
                    .into(),
            ));
        }

        let mut body = Map::new();
        body.insert("connector.class".to_string(), json!(connector_class));
        for (key, value) in config {
            body.insert(key.clone(), json!(value));
        }

        let request = Request::new(
            Method::PUT,
            format!(
                "{}/connector-plugins/{}/config/validate",
                self.base_path(environment_id, cluster_id),
                urlencoding::encode(connector_class),
            ),
        )
        .with_body(Value::Object(body));
        let response = self.client.send(request).await?;
        response.json()
    }

    /// List the tasks of a connector.
    pub async fn tasks(
        &self,
        environment_id: &str,
        cluster_id: &str,
        connector_name: &str,
    ) -> Result<Vec<ConnectorTask>> {
        let request = Request::new(
            Method::GET,
            format!(
                "{}/connectors/{connector_name}/tasks",
                self.base_path(environment_id, cluster_id)
            ),
        );
        let response = self.client.send(request).await?;
        response.json()
    }

    /// Retrieve the status of a single task.
    pub async fn task_status(
        &self,
        environment_id: &str,
        cluster_id: &str,
        connector_name: &str,
        task_id: i32,
    ) -> Result<TaskStatus> {
        let request = Request::new(
            Method::GET,
            format!(
                "{}/connectors/{connector_name}/tasks/{task_id}/status",
                self.base_path(environment_id, cluster_id)
            ),
        );
        let response = self.client.send(request).await?;
        response.json()
    }
}
