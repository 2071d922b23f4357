//! Schema Registry error codes and predicates
//!
//! The registry reports failures with numeric codes in the `error_code`
//! field of its JSON error bodies. These land in the `details` map of the
//! parsed [`ApiError`](confluent_core::ApiError); the helpers here extract
//! and match on them.

use serde_json::Value;

use crate::error::ClientError;

// Subject errors
pub const ERROR_CODE_SUBJECT_NOT_FOUND: i64 = 40401;
pub const ERROR_CODE_SUBJECT_SOFT_DELETED: i64 = 40404;
pub const ERROR_CODE_INVALID_SUBJECT: i64 = 42202;

// Version errors
pub const ERROR_CODE_VERSION_NOT_FOUND: i64 = 40402;

// Schema errors
pub const ERROR_CODE_SCHEMA_NOT_FOUND: i64 = 40403;
pub const ERROR_CODE_INVALID_SCHEMA: i64 = 42201;
pub const ERROR_CODE_INCOMPATIBLE_SCHEMA: i64 = 409;

// Compatibility and mode errors
pub const ERROR_CODE_INVALID_COMPATIBILITY: i64 = 42203;
pub const ERROR_CODE_INVALID_MODE: i64 = 42204;

/// Extract the Schema Registry error code from a client error, when the
/// error came from the registry and carried one.
pub fn sr_error_code(err: &ClientError) -> Option<i64> {
    match err {
        ClientError::Api(api) => api.details.get("error_code").and_then(Value::as_i64),
        _ => None,
    }
}

/// True for a subject-not-found error (40401).
pub fn is_subject_not_found(err: &ClientError) -> bool {
    sr_error_code(err) == Some(ERROR_CODE_SUBJECT_NOT_FOUND)
}

/// True for a soft-deleted subject error (40404).
pub fn is_subject_soft_deleted(err: &ClientError) -> bool {
    sr_error_code(err) == Some(ERROR_CODE_SUBJECT_SOFT_DELETED)
}

/// True for a version-not-found error (40402).
pub fn is_version_not_found(err: &ClientError) -> bool {
    sr_error_code(err) == Some(ERROR_CODE_VERSION_NOT_FOUND)
}

/// True for a schema-not-found error (40403).
pub fn is_schema_not_found(err: &ClientError) -> bool {
    sr_error_code(err) == Some(ERROR_CODE_SCHEMA_NOT_FOUND)
}

/// True for an invalid schema error (42201).
pub fn is_invalid_schema(err: &ClientError) -> bool {
    sr_error_code(err) == Some(ERROR_CODE_INVALID_SCHEMA)
}

/// True for an invalid subject error (42202).
pub fn is_invalid_subject(err: &ClientError) -> bool {
    sr_error_code(err) == Some(ERROR_CODE_INVALID_SUBJECT)
}

/// True for an incompatible schema error (409).
pub fn is_incompatible_schema(err: &ClientError) -> bool {
    sr_error_code(err) == Some(ERROR_CODE_INCOMPATIBLE_SCHEMA)
}

/// True for an invalid compatibility level error (42203).
pub fn is_invalid_compatibility(err: &ClientError) -> bool {
    sr_error_code(err) == Some(ERROR_CODE_INVALID_COMPATIBILITY)
}

/// True for an invalid mode error (42204).
pub fn is_invalid_mode(err: &ClientError) -> bool {
    sr_error_code(err) == Some(ERROR_CODE_INVALID_MODE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use confluent_core::ApiError;

    fn registry_error(code: i64) -> ClientError {
        let body = format!(r#"{{"error_code":{code},"message":"registry error"}}"#);
        ClientError::Api(ApiError::from_response(404, body.as_bytes(), None))
    }

    #[test]
    fn test_sr_error_code_extraction() {
        assert_eq!(sr_error_code(&registry_error(40401)), Some(40401));
    }

    #[test]
    fn test_sr_error_code_absent_for_non_api_errors() {
        let err = ClientError::InvalidConfig("nope".into());
        assert_eq!(sr_error_code(&err), None);
    }

    #[test]
    fn test_predicates_match_their_codes() {
        assert!(is_subject_not_found(&registry_error(40401)));
        assert!(is_version_not_found(&registry_error(40402)));
        assert!(is_schema_not_found(&registry_error(40403)));
        assert!(is_subject_soft_deleted(&registry_error(40404)));
        assert!(is_invalid_schema(&registry_error(42201)));
        assert!(is_invalid_subject(&registry_error(42202)));
        assert!(is_invalid_compatibility(&registry_error(42203)));
        assert!(is_invalid_mode(&registry_error(42204)));
        assert!(is_incompatible_schema(&registry_error(409)));

        assert!(!is_subject_not_found(&registry_error(40402)));
    }

    #[test]
    fn test_api_error_without_code_matches_nothing() {
        let err = ClientError::Api(ApiError::new(404, "NOT_FOUND", "plain 404"));
        assert_eq!(sr_error_code(&err), None);
        assert!(!is_subject_not_found(&err));
    }
}
