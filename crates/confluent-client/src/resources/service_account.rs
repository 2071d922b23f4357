//! Service account and API key operations (iam/v2)

use confluent_core::types::{ApiKey, ServiceAccount};
use reqwest::Method;
use serde_json::json;

use crate::client::{Client, Request};
use crate::error::Result;

use super::DataEnvelope;

/// Handles service account and API key operations via the iam/v2 API.
pub struct ServiceAccountManager {
    client: Client,
}

impl ServiceAccountManager {
    /// Create a new service account manager.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// List all service accounts in the organization.
    pub async fn list(&self) -> Result<Vec<ServiceAccount>> {
        let request = Request::new(Method::GET, "/iam/v2/service-accounts");
        let response = self.client.send(request).await?;
        Ok(response
            .json::<DataEnvelope<ServiceAccount>>()?
            .into_inner())
    }

    /// Retrieve a specific service account.
    pub async fn get(&self, service_account_id: &str) -> Result<ServiceAccount> {
        let request = Request::new(
            Method::GET,
            format!("/iam/v2/service-accounts/{service_account_id}"),
        );
        let response = self.client.send(request).await?;
        response.json()
    }

    /// Create a new service account.
    pub async fn create(&self, name: &str, description: &str) -> Result<ServiceAccount> {
        let request = Request::new(Method::POST, "/iam/v2/service-accounts").with_body(json!({
            "display_name": name,
            "description": description,
        }));
        let response = self.client.send(request).await?;
        response.json()
    }

    /// Update a service account's display name and description.
    pub async fn update(
        &self,
        service_account_id: &str,
        display_name: &str,
        description: &str,
    ) -> Result<ServiceAccount> {
        let request = Request::new(
            Method::PATCH,
            format!("/iam/v2/service-accounts/{service_account_id}"),
        )
        .with_body(json!({
            "display_name": display_name,
            "description": description,
        }));
        let response = self.client.send(request).await?;
        response.json()
    }

    /// Delete a service account. Irreversible; every API key owned by the
    /// account is invalidated with it.
    pub async fn delete(&self, service_account_id: &str) -> Result<()> {
        let request = Request::new(
            Method::DELETE,
            format!("/iam/v2/service-accounts/{service_account_id}"),
        );
        self.client.send(request).await?;
        Ok(())
    }

    /// Create an API key owned by a service account.
    ///
    /// The secret is only present in this response and cannot be retrieved
    /// again — store it immediately.
    pub async fn create_api_key(
        &self,
        service_account_id: &str,
        description: &str,
    ) -> Result<ApiKey> {
        let body = json!({
            "spec": {
                "owner": { "id": service_account_id },
                "description": description,
            },
        });

        let request = Request::new(Method::POST, "/iam/v2/api-keys").with_body(body);
        let response = self.client.send(request).await?;
        response.json()
    }

    /// List API keys owned by a service account. Secrets are never included.
    pub async fn list_api_keys(&self, service_account_id: &str) -> Result<Vec<ApiKey>> {
        let request =
            Request::new(Method::GET, "/iam/v2/api-keys").with_query("owner", service_account_id);
        let response = self.client.send(request).await?;
        Ok(response.json::<DataEnvelope<ApiKey>>()?.into_inner())
    }

    /// Delete an API key, invalidating it immediately.
    pub async fn delete_api_key(&self, api_key_id: &str) -> Result<()> {
        let request = Request::new(Method::DELETE, format!("/iam/v2/api-keys/{api_key_id}"));
        self.client.send(request).await?;
        Ok(())
    }
}
