//! Schema Registry client
//!
//! Supports the core Schema Registry surface:
//! - Subject management (list, versions, delete)
//! - Schema registration and retrieval by subject/version/ID
//! - Compatibility testing and configuration, global and per subject
//! - Mode configuration, global and per subject
//! - Client-side syntax validation for AVRO, JSON Schema, and Protobuf
//!
//! Schemas are validated before registration so syntax errors fail locally
//! instead of burning a round trip. Registry errors carry numeric error
//! codes; the helpers in [`error`](self) match on them.
//!
//! ```rust,no_run
//! use confluent_client::schemaregistry::{self, RegisterRequest, SchemaRegistry, SchemaType};
//! # async fn example(client: confluent_client::Client) -> confluent_client::Result<()> {
//! let registry = SchemaRegistry::new(client, "/schema-registry/v1");
//!
//! let id = registry
//!     .register_schema(
//!         "user-value",
//!         RegisterRequest::new(r#"{"type":"record","name":"User","fields":[]}"#)
//!             .with_schema_type(SchemaType::Avro),
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod manager;
mod types;
mod validation;

pub use error::{
    is_incompatible_schema, is_invalid_compatibility, is_invalid_mode, is_invalid_schema,
    is_invalid_subject, is_schema_not_found, is_subject_not_found, is_subject_soft_deleted,
    is_version_not_found, sr_error_code, ERROR_CODE_INCOMPATIBLE_SCHEMA,
    ERROR_CODE_INVALID_COMPATIBILITY, ERROR_CODE_INVALID_MODE, ERROR_CODE_INVALID_SCHEMA,
    ERROR_CODE_INVALID_SUBJECT, ERROR_CODE_SCHEMA_NOT_FOUND, ERROR_CODE_SUBJECT_NOT_FOUND,
    ERROR_CODE_SUBJECT_SOFT_DELETED, ERROR_CODE_VERSION_NOT_FOUND,
};
pub use manager::SchemaRegistry;
pub use types::{
    CompatibilityLevel, Mode, RegisterRequest, RegisterResponse, Schema, SchemaReference,
    SchemaType,
};
pub use validation::{
    validate_schema, AvroValidator, JsonSchemaValidator, ProtobufValidator, SchemaValidator,
    ValidationError,
};
