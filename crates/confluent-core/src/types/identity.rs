//! Organization and identity types (org/v2, iam/v2)

use serde::{Deserialize, Serialize};

/// An environment: a logical grouping for clusters and other resources,
/// providing isolation for multi-tenant deployments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_name: String,
}

/// A service account used for programmatic access. Service accounts own API
/// keys and are granted permissions via ACLs and role bindings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceAccount {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub resource: ResourceRef,
}

/// An API key for authenticating to the control plane.
///
/// The `secret` field is only populated in the creation response and cannot
/// be retrieved again afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKey {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub secret: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub owner_id: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub expires_at: Option<String>,
}

/// A role defining a set of permissions, e.g. OrganizationAdmin or
/// CloudClusterAdmin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// A role assignment to a principal at the organization, environment, or
/// cluster level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleBinding {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub principal_id: String,
    #[serde(default)]
    pub role_id: String,
    /// Confluent Resource Name the binding applies to.
    #[serde(default)]
    pub crn: String,
}

/// A reference to another resource, used to link entities like service
/// accounts and API keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    #[serde(default)]
    pub id: String,
    /// USER, SERVICE_ACCOUNT, ...
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_account_with_resource_ref() {
        let json = r#"{"id":"sa-1","name":"operator","description":"","resource":{"id":"sa-1","type":"SERVICE_ACCOUNT"}}"#;
        let account: ServiceAccount = serde_json::from_str(json).unwrap();
        assert_eq!(account.resource.kind, "SERVICE_ACCOUNT");
    }

    #[test]
    fn test_api_key_optional_expiry() {
        let json = r#"{"id":"key-1","secret":"s3cr3t","owner_id":"sa-1","created_at":"2026-01-01T00:00:00Z","expires_at":null}"#;
        let key: ApiKey = serde_json::from_str(json).unwrap();
        assert_eq!(key.expires_at, None);
        assert_eq!(key.secret, "s3cr3t");
    }
}
