//! Common types used throughout the provider
//!
//! Shared type definitions and type aliases used across multiple modules.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Variable Type
// ============================================================================

/// Kind of CI/CD variable accepted by GitLab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableType {
    /// Exposed to jobs as a plain environment variable
    #[default]
    EnvVar,
    /// Written to a temporary file whose path is exposed to jobs
    File,
}

impl VariableType {
    /// Every kind the remote API accepts
    pub const ALL: [VariableType; 2] = [VariableType::EnvVar, VariableType::File];

    /// Wire name of this kind
    pub fn as_str(self) -> &'static str {
        match self {
            VariableType::EnvVar => "env_var",
            VariableType::File => "file",
        }
    }
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VariableType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                Error::validation(
                    "variable_type",
                    format!("{s:?} is not one of \"env_var\", \"file\""),
                )
            })
    }
}
