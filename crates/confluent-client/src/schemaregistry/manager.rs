//! Schema Registry operations

use reqwest::Method;
use serde::Deserialize;
use serde_json::json;

use crate::client::{Client, Request};
use crate::error::Result;

use super::types::{
    CompatibilityLevel, Mode, RegisterRequest, RegisterResponse, Schema, SchemaType,
};
use super::validation::validate_schema;

/// High-level operations against Schema Registry, sharing the REST client.
pub struct SchemaRegistry {
    client: Client,
    base_path: String,
}

#[derive(Deserialize)]
struct CompatibilityResponse {
    is_compatible: bool,
}

#[derive(Deserialize)]
struct CompatibilityConfig {
    compatibility: CompatibilityLevel,
}

#[derive(Deserialize)]
struct ModeConfig {
    mode: Mode,
}

impl SchemaRegistry {
    /// Create a manager. An empty `base_path` falls back to
    /// `/schema-registry/v1`, the usual Confluent Cloud mount point.
    pub fn new(client: Client, base_path: impl Into<String>) -> Self {
        let mut base_path = base_path.into();
        if base_path.is_empty() {
            base_path = "/schema-registry/v1".to_string();
        }
        Self { client, base_path }
    }

    /// List all registered subjects.
    pub async fn list_subjects(&self) -> Result<Vec<String>> {
        let request = Request::new(Method::GET, format!("{}/subjects", self.base_path));
        let response = self.client.send(request).await?;
        response.json()
    }

    /// Get the latest schema registered under a subject.
    pub async fn get_latest_schema(&self, subject: &str) -> Result<Schema> {
        let request = Request::new(
            Method::GET,
            format!(
                "{}/subjects/{}/versions/latest",
                self.base_path,
                urlencoding::encode(subject)
            ),
        );
        let response = self.client.send(request).await?;
        response.json()
    }

    /// Fetch a schema by its global ID. Only the schema text comes back
    /// from this endpoint.
    pub async fn get_schema_by_id(&self, id: i32) -> Result<Schema> {
        #[derive(Deserialize)]
        struct SchemaBody {
            schema: String,
        }

        let request = Request::new(Method::GET, format!("{}/schemas/ids/{id}", self.base_path));
        let response = self.client.send(request).await?;
        let body: SchemaBody = response.json()?;

        Ok(Schema {
            id,
            subject: String::new(),
            version: 0,
            schema: body.schema,
            schema_type: None,
        })
    }

    /// Register a schema under a subject and return the assigned global ID.
    ///
    /// The schema is validated client-side first; an unset schema type
    /// defaults to AVRO, matching the registry's behavior.
    pub async fn register_schema(&self, subject: &str, payload: RegisterRequest) -> Result<i32> {
        let schema_type = payload.schema_type.unwrap_or(SchemaType::Avro);
        validate_schema(&payload.schema, schema_type)?;

        let request = Request::new(
            Method::POST,
            format!(
                "{}/subjects/{}/versions",
                self.base_path,
                urlencoding::encode(subject)
            ),
        )
        .with_body(serde_json::to_value(&payload)?);
        let response = self.client.send(request).await?;
        let registered: RegisterResponse = response.json()?;
        Ok(registered.id)
    }

    /// Check whether a schema is compatible with the latest version under a
    /// subject. Validates client-side first, like registration.
    pub async fn test_compatibility(
        &self,
        subject: &str,
        payload: RegisterRequest,
    ) -> Result<bool> {
        let schema_type = payload.schema_type.unwrap_or(SchemaType::Avro);
        validate_schema(&payload.schema, schema_type)?;

        let request = Request::new(
            Method::POST,
            format!(
                "{}/compatibility/subjects/{}/versions/latest",
                self.base_path,
                urlencoding::encode(subject)
            ),
        )
        .with_body(serde_json::to_value(&payload)?);
        let response = self.client.send(request).await?;
        let result: CompatibilityResponse = response.json()?;
        Ok(result.is_compatible)
    }

    /// List all versions registered under a subject.
    pub async fn list_versions(&self, subject: &str) -> Result<Vec<i32>> {
        let request = Request::new(
            Method::GET,
            format!(
                "{}/subjects/{}/versions",
                self.base_path,
                urlencoding::encode(subject)
            ),
        );
        let response = self.client.send(request).await?;
        response.json()
    }

    /// Fetch a specific version of a subject's schema.
    pub async fn get_schema_version(&self, subject: &str, version: i32) -> Result<Schema> {
        let request = Request::new(
            Method::GET,
            format!(
                "{}/subjects/{}/versions/{version}",
                self.base_path,
                urlencoding::encode(subject)
            ),
        );
        let response = self.client.send(request).await?;
        response.json()
    }

    /// Delete a subject. `permanent` performs a hard delete; otherwise the
    /// subject is soft-deleted and can still be referenced.
    pub async fn delete_subject(&self, subject: &str, permanent: bool) -> Result<()> {
        let mut request = Request::new(
            Method::DELETE,
            format!(
                "{}/subjects/{}",
                self.base_path,
                urlencoding::encode(subject)
            ),
        );
        if permanent {
            request = request.with_query("permanent", "true");
        }
        self.client.send(request).await?;
        Ok(())
    }

    /// Get the global compatibility level.
    pub async fn get_global_compatibility(&self) -> Result<CompatibilityLevel> {
        let request = Request::new(Method::GET, format!("{}/config", self.base_path));
        let response = self.client.send(request).await?;
        let config: CompatibilityConfig = response.json()?;
        Ok(config.compatibility)
    }

    /// Set the global compatibility level.
    pub async fn set_global_compatibility(&self, level: CompatibilityLevel) -> Result<()> {
        let request = Request::new(Method::PUT, format!("{}/config", self.base_path))
            .with_body(json!({ "compatibility": level }));
        self.client.send(request).await?;
        Ok(())
    }

    /// Get the compatibility level configured for a subject.
    pub async fn get_subject_compatibility(&self, subject: &str) -> Result<CompatibilityLevel> {
        let request = Request::new(
            Method::GET,
            format!("{}/config/{}", self.base_path, urlencoding::encode(subject)),
        );
        let response = self.client.send(request).await?;
        let config: CompatibilityConfig = response.json()?;
        Ok(config.compatibility)
    }

    /// Set the compatibility level for a subject.
    pub async fn set_subject_compatibility(
        &self,
        subject: &str,
        level: CompatibilityLevel,
    ) -> Result<()> {
        let request = Request::new(
            Method::PUT,
            format!("{}/config/{}", self.base_path, urlencoding::encode(subject)),
        )
        .with_body(json!({ "compatibility": level }));
        self.client.send(request).await?;
        Ok(())
    }

    /// Get the global mode.
    pub async fn get_global_mode(&self) -> Result<Mode> {
        let request = Request::new(Method::GET, format!("{}/mode", self.base_path));
        let response = self.client.send(request).await?;
        let config: ModeConfig = response.json()?;
        Ok(config.mode)
    }

    /// Set the global mode.
    pub async fn set_global_mode(&self, mode: Mode) -> Result<()> {
        let request = Request::new(Method::PUT, format!("{}/mode", self.base_path))
            .with_body(json!({ "mode": mode }));
        self.client.send(request).await?;
        Ok(())
    }

    /// Get the mode configured for a subject.
    pub async fn get_subject_mode(&self, subject: &str) -> Result<Mode> {
        let request = Request::new(
            Method::GET,
            format!("{}/mode/{}", self.base_path, urlencoding::encode(subject)),
        );
        let response = self.client.send(request).await?;
        let config: ModeConfig = response.json()?;
        Ok(config.mode)
    }

    /// Set the mode for a subject.
    pub async fn set_subject_mode(&self, subject: &str, mode: Mode) -> Result<()> {
        let request = Request::new(
            Method::PUT,
            format!("{}/mode/{}", self.base_path, urlencoding::encode(subject)),
        )
        .with_body(json!({ "mode": mode }));
        self.client.send(request).await?;
        Ok(())
    }
}
