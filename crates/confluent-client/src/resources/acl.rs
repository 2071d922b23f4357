//! ACL operations (kafka/v3)

use confluent_core::types::AclBinding;
use reqwest::Method;
use serde_json::json;

use crate::client::{Client, Request};
use crate::error::Result;

use super::DataEnvelope;

/// Handles access-control-list operations via the kafka/v3 API.
pub struct AclManager {
    client: Client,
}

impl AclManager {
    /// Create a new ACL manager.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// List all ACL bindings in a cluster.
    pub async fn list(&self, cluster_id: &str) -> Result<Vec<AclBinding>> {
        let request = Request::new(Method::GET, format!("/kafka/v3/clusters/{cluster_id}/acls"));
        let response = self.client.send(request).await?;
        Ok(response.json::<DataEnvelope<AclBinding>>()?.into_inner())
    }

    /// Create an ACL binding granting or denying a permission.
    pub async fn create(&self, cluster_id: &str, acl: &AclBinding) -> Result<()> {
        let body = json!({
            "resource_type": acl.resource_type,
            "resource_name": acl.resource_name,
            "pattern_type": acl.pattern_type,
            "principal": acl.principal,
            "operation": acl.operation,
            "permission": acl.permission,
        });

        let request = Request::new(Method::POST, format!("/kafka/v3/clusters/{cluster_id}/acls"))
            .with_body(body);
        self.client.send(request).await?;
        Ok(())
    }

    /// Delete ACL bindings matching the filter. Several bindings may be
    /// removed when the filter matches more than one.
    pub async fn delete(
        &self,
        cluster_id: &str,
        principal: &str,
        operation: &str,
        resource_type: &str,
        resource_name: &str,
    ) -> Result<()> {
        let request = Request::new(
            Method::DELETE,
            format!("/kafka/v3/clusters/{cluster_id}/acls"),
        )
        .with_query("principal", principal)
        .with_query("operation", operation)
        .with_query("resource_type", resource_type)
        .with_query("resource_name", resource_name);
        self.client.send(request).await?;
        Ok(())
    }
}
