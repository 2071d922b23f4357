//! Schema Registry wire types

use std::fmt;

use serde::{Deserialize, Serialize};

/// Supported schema formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SchemaType {
    /// The registry's default when a request omits the type.
    #[default]
    Avro,
    Json,
    Protobuf,
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SchemaType::Avro => "AVRO",
            SchemaType::Json => "JSON",
            SchemaType::Protobuf => "PROTOBUF",
        };
        f.write_str(name)
    }
}

/// A versioned schema stored in the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub version: i32,
    pub schema: String,
    #[serde(rename = "schemaType", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,
}

/// Request payload for registering a schema or testing compatibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub schema: String,
    #[serde(rename = "schemaType", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<SchemaReference>,
}

impl RegisterRequest {
    /// Create a request for the given schema text. The type defaults to
    /// AVRO server-side when left unset.
    pub fn new(schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            schema_type: None,
            references: Vec::new(),
        }
    }

    /// Set the schema type explicitly.
    pub fn with_schema_type(mut self, schema_type: SchemaType) -> Self {
        self.schema_type = Some(schema_type);
        self
    }

    /// Add a reference to another registered schema.
    pub fn with_reference(mut self, reference: SchemaReference) -> Self {
        self.references.push(reference);
        self
    }
}

/// Response carrying the globally assigned schema ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub id: i32,
}

/// A reference from one schema to another registered schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaReference {
    pub name: String,
    pub subject: String,
    pub version: i32,
}

/// Compatibility levels configurable globally or per subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompatibilityLevel {
    None,
    Backward,
    BackwardTransitive,
    Forward,
    ForwardTransitive,
    Full,
    FullTransitive,
}

/// Registry modes. READWRITE is the default; READONLY blocks registration;
/// IMPORT is used for replication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    #[serde(rename = "READWRITE")]
    ReadWrite,
    #[serde(rename = "READONLY")]
    ReadOnly,
    #[serde(rename = "IMPORT")]
    Import,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_type_wire_names() {
        assert_eq!(serde_json::to_string(&SchemaType::Avro).unwrap(), r#""AVRO""#);
        assert_eq!(serde_json::to_string(&SchemaType::Json).unwrap(), r#""JSON""#);
        assert_eq!(
            serde_json::to_string(&SchemaType::Protobuf).unwrap(),
            r#""PROTOBUF""#
        );
    }

    #[test]
    fn test_register_request_omits_empty_fields() {
        let request = RegisterRequest::new("{}");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json, serde_json::json!({ "schema": "{}" }));
    }

    #[test]
    fn test_register_request_serializes_camel_case_type() {
        let request = RegisterRequest::new("{}").with_schema_type(SchemaType::Json);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["schemaType"], "JSON");
    }

    #[test]
    fn test_compatibility_level_wire_names() {
        assert_eq!(
            serde_json::to_string(&CompatibilityLevel::BackwardTransitive).unwrap(),
            r#""BACKWARD_TRANSITIVE""#
        );
        let parsed: CompatibilityLevel = serde_json::from_str(r#""FULL""#).unwrap();
        assert_eq!(parsed, CompatibilityLevel::Full);
    }

    #[test]
    fn test_mode_wire_names() {
        assert_eq!(serde_json::to_string(&Mode::ReadWrite).unwrap(), r#""READWRITE""#);
        let parsed: Mode = serde_json::from_str(r#""IMPORT""#).unwrap();
        assert_eq!(parsed, Mode::Import);
    }

    #[test]
    fn test_schema_defaults_for_lookup_by_id() {
        // GET /schemas/ids/{id} only returns the schema text.
        let schema: Schema = serde_json::from_str(r#"{"schema":"\"string\""}"#).unwrap();
        assert_eq!(schema.id, 0);
        assert_eq!(schema.schema_type, None);
    }
}
