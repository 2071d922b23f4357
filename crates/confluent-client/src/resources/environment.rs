//! Environment operations (org/v2)

use confluent_core::types::Environment;
use reqwest::Method;
use serde_json::json;

use crate::client::{Client, Request};
use crate::error::Result;

use super::DataEnvelope;

/// Handles environment operations via the org/v2 API.
pub struct EnvironmentManager {
    client: Client,
}

impl EnvironmentManager {
    /// Create a new environment manager.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// List all environments the authenticated principal can see.
    pub async fn list(&self) -> Result<Vec<Environment>> {
        let request = Request::new(Method::GET, "/org/v2/environments");
        let response = self.client.send(request).await?;
        Ok(response.json::<DataEnvelope<Environment>>()?.into_inner())
    }

    /// Retrieve a specific environment.
    pub async fn get(&self, environment_id: &str) -> Result<Environment> {
        let request = Request::new(
            Method::GET,
            format!("/org/v2/environments/{environment_id}"),
        );
        let response = self.client.send(request).await?;
        response.json()
    }

    /// Create a new environment. `name` is optional; the display name is
    /// what shows up in the console.
    pub async fn create(&self, name: &str, display_name: &str) -> Result<Environment> {
        let mut body = json!({ "display_name": display_name });
        if !name.is_empty() {
            body["name"] = json!(name);
        }

        let request = Request::new(Method::POST, "/org/v2/environments").with_body(body);
        let response = self.client.send(request).await?;
        response.json()
    }

    /// Update an environment's display name.
    pub async fn update(&self, environment_id: &str, display_name: &str) -> Result<Environment> {
        let request = Request::new(
            Method::PATCH,
            format!("/org/v2/environments/{environment_id}"),
        )
        .with_body(json!({ "display_name": display_name }));
        let response = self.client.send(request).await?;
        response.json()
    }

    /// Delete an environment. Irreversible; all clusters and resources
    /// within it must be deleted first or the API answers 409.
    pub async fn delete(&self, environment_id: &str) -> Result<()> {
        let request = Request::new(
            Method::DELETE,
            format!("/org/v2/environments/{environment_id}"),
        );
        self.client.send(request).await?;
        Ok(())
    }
}
