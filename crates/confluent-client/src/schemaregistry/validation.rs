//! Client-side schema syntax validation
//!
//! Registration and compatibility calls validate schemas locally first, so
//! obviously malformed schemas fail without a round trip. Validation is
//! intentionally shallow — it catches syntax and structural mistakes, not
//! full semantic correctness (the registry remains the authority).

use serde_json::Value;
use thiserror::Error;

use super::types::SchemaType;

/// A schema that failed client-side validation.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("schema cannot be empty")]
    Empty,

    #[error("invalid {kind} schema JSON: {source}")]
    MalformedJson {
        kind: SchemaType,
        #[source]
        source: serde_json::Error,
    },

    #[error("{context} schema missing required '{field}' field")]
    MissingField {
        context: &'static str,
        field: &'static str,
    },

    #[error("AVRO schema 'type' field cannot be empty")]
    EmptyType,

    #[error("AVRO schema union type cannot be empty")]
    EmptyUnion,

    #[error("AVRO schema 'type' field must be a string or array")]
    InvalidTypeField,

    #[error("JSON Schema missing typical fields ($schema, type, properties, or $ref)")]
    MissingJsonSchemaMarkers,

    #[error("protobuf schema missing expected keywords (syntax, message, service, package, or enum)")]
    MissingProtobufKeywords,
}

/// Validates schema syntax for one schema format.
pub trait SchemaValidator {
    /// Check whether the schema text is syntactically acceptable.
    fn validate(&self, schema: &str) -> Result<(), ValidationError>;
}

/// Validate a schema according to its type. Empty schemas are always
/// rejected.
pub fn validate_schema(schema: &str, schema_type: SchemaType) -> Result<(), ValidationError> {
    if schema.is_empty() {
        return Err(ValidationError::Empty);
    }

    match schema_type {
        SchemaType::Avro => AvroValidator.validate(schema),
        SchemaType::Json => JsonSchemaValidator.validate(schema),
        SchemaType::Protobuf => ProtobufValidator.validate(schema),
    }
}

/// Validates AVRO schemas: JSON well-formedness plus the structural fields
/// required for each AVRO kind (record, enum, array, map, union).
#[derive(Debug, Clone, Copy, Default)]
pub struct AvroValidator;

impl SchemaValidator for AvroValidator {
    fn validate(&self, schema: &str) -> Result<(), ValidationError> {
        let value: Value = serde_json::from_str(schema).map_err(|source| {
            ValidationError::MalformedJson {
                kind: SchemaType::Avro,
                source,
            }
        })?;

        let object = match value {
            // A bare array is a valid union schema.
            Value::Array(_) => return Ok(()),
            Value::Object(object) => object,
            _ => {
                return Err(ValidationError::MissingField {
                    context: "AVRO",
                    field: "type",
                })
            }
        };

        let type_field = object
            .get("type")
            .ok_or(ValidationError::MissingField {
                context: "AVRO",
                field: "type",
            })?;

        let type_name = match type_field {
            Value::String(name) if name.is_empty() => return Err(ValidationError::EmptyType),
            Value::String(name) => name.as_str(),
            Value::Array(variants) if variants.is_empty() => {
                return Err(ValidationError::EmptyUnion)
            }
            Value::Array(_) => return Ok(()),
            _ => return Err(ValidationError::InvalidTypeField),
        };

        let required: &[(&str, &str)] = match type_name {
            "record" => &[("name", "AVRO record"), ("fields", "AVRO record")],
            "enum" => &[("name", "AVRO enum"), ("symbols", "AVRO enum")],
            "array" => &[("items", "AVRO array")],
            "map" => &[("values", "AVRO map")],
            _ => &[],
        };
        for &(field, context) in required {
            if !object.contains_key(field) {
                return Err(ValidationError::MissingField { context, field });
            }
        }

        Ok(())
    }
}

/// Validates JSON Schemas: valid JSON carrying at least one of the typical
/// marker fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaValidator;

impl SchemaValidator for JsonSchemaValidator {
    fn validate(&self, schema: &str) -> Result<(), ValidationError> {
        let value: Value = serde_json::from_str(schema).map_err(|source| {
            ValidationError::MalformedJson {
                kind: SchemaType::Json,
                source,
            }
        })?;

        let object = value
            .as_object()
            .ok_or(ValidationError::MissingJsonSchemaMarkers)?;

        let markers = ["$schema", "type", "properties", "$ref"];
        if markers.iter().any(|marker| object.contains_key(*marker)) {
            Ok(())
        } else {
            Err(ValidationError::MissingJsonSchemaMarkers)
        }
    }
}

/// Validates Protobuf schemas by token-level keyword presence.
///
/// Deliberately permissive: it does not parse .proto syntax and will accept
/// keywords appearing in any position, but splitting on delimiters prevents
/// false positives from keywords embedded in identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProtobufValidator;

impl SchemaValidator for ProtobufValidator {
    fn validate(&self, schema: &str) -> Result<(), ValidationError> {
        const KEYWORDS: [&str; 5] = ["syntax", "message", "service", "package", "enum"];

        if KEYWORDS.iter().any(|keyword| contains_word(schema, keyword)) {
            Ok(())
        } else {
            Err(ValidationError::MissingProtobufKeywords)
        }
    }
}

// Token-level word search: split on structural delimiters, underscores, and
// dots so `message_count` or `mypackage.Thing` never match bare keywords.
fn contains_word(text: &str, word: &str) -> bool {
    if text.is_empty() || word.is_empty() {
        return false;
    }
    text.split(|c: char| {
        c.is_whitespace()
            || matches!(
                c,
                ';' | '{' | '}' | '(' | ')' | '_' | '.' | '/' | '=' | '"' | '\'' | ','
            )
    })
    .any(|token| token == word)
}
