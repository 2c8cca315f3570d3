//! Error types for the GitLab variable provider
//!
//! Every public API returns `Result<T, Error>` where Error is defined here.
//! Errors are propagated to the host unchanged; nothing in this crate
//! retries or reclassifies a remote failure.

use thiserror::Error;

/// The main error type for the provider
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Validation Errors
    // ============================================================================
    #[error("Invalid value for '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Missing required attribute: {field}")]
    MissingAttribute { field: String },

    #[error("Attribute '{field}' must be a {expected}, got {actual}")]
    AttributeType {
        field: String,
        expected: String,
        actual: String,
    },

    // ============================================================================
    // Identifier Errors
    // ============================================================================
    #[error("Unexpected ID format ({id:?}). Expected {expected}")]
    InvalidId { id: String, expected: String },

    // ============================================================================
    // Remote Errors
    // ============================================================================
    #[error("Variable {project}/{key}, scope:{scope} Not Found")]
    VariableNotFound {
        project: String,
        key: String,
        scope: String,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Provider / State Errors
    // ============================================================================
    #[error("Unknown resource type: {resource_type}")]
    UnknownResource { resource_type: String },

    #[error("State error: {message}")]
    State { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing config field error
    pub fn missing_config_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create a validation error for an attribute
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a missing attribute error
    pub fn missing_attribute(field: impl Into<String>) -> Self {
        Self::MissingAttribute {
            field: field.into(),
        }
    }

    /// Create an attribute type mismatch error
    pub fn attribute_type(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::AttributeType {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create an identifier format error
    pub fn invalid_id(id: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::InvalidId {
            id: id.into(),
            expected: expected.into(),
        }
    }

    /// Create a not-found error for a scoped variable lookup
    pub fn variable_not_found(
        project: impl Into<String>,
        key: impl Into<String>,
        scope: impl Into<String>,
    ) -> Self {
        Self::VariableNotFound {
            project: project.into(),
            key: key.into(),
            scope: scope.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a state error
    pub fn state(message: impl Into<String>) -> Self {
        Self::State {
            message: message.into(),
        }
    }

    /// True for errors raised before any request was sent
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::Validation { .. } | Error::MissingAttribute { .. } | Error::AttributeType { .. }
        )
    }

    /// True when the variable lookup came back empty
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::VariableNotFound { .. })
            || matches!(self, Error::HttpStatus { status: 404, .. })
    }
}

/// Result type alias for the provider
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::validation("key", "bad characters");
        assert_eq!(err.to_string(), "Invalid value for 'key': bad characters");

        let err = Error::http_status(404, "Not found");
        assert_eq!(err.to_string(), "HTTP 404: Not found");
    }

    #[test]
    fn test_not_found_names_all_lookup_components() {
        let err = Error::variable_not_found("group/app", "DB_URL", "production");
        assert_eq!(
            err.to_string(),
            "Variable group/app/DB_URL, scope:production Not Found"
        );
        assert!(err.is_not_found());
    }

    #[test]
    fn test_invalid_id_display() {
        let err = Error::invalid_id("a:b:c", "project:key");
        assert_eq!(
            err.to_string(),
            "Unexpected ID format (\"a:b:c\"). Expected project:key"
        );
    }

    #[test]
    fn test_classification() {
        assert!(Error::validation("key", "x").is_validation());
        assert!(Error::missing_attribute("value").is_validation());
        assert!(Error::attribute_type("masked", "bool", "string").is_validation());
        assert!(!Error::http_status(400, "").is_validation());

        assert!(Error::http_status(404, "").is_not_found());
        assert!(!Error::http_status(500, "").is_not_found());
        assert!(!Error::config("x").is_not_found());
    }
}
