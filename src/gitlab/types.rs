//! GitLab project variable payloads

use crate::types::VariableType;
use serde::{Deserialize, Serialize};
use std::fmt;

const REDACTED: &str = "<sensitive>";

/// A project-level CI/CD variable as returned by the API
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectVariable {
    pub key: String,
    pub value: String,
    #[serde(default)]
    pub variable_type: VariableType,
    #[serde(default)]
    pub protected: bool,
    #[serde(default)]
    pub masked: bool,
    #[serde(default)]
    pub environment_scope: String,
}

impl ProjectVariable {
    /// Whether this record is the one addressed by `key` within `scope`
    pub fn matches(&self, key: &str, scope: &str) -> bool {
        self.key == key && self.environment_scope == scope
    }
}

impl fmt::Debug for ProjectVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectVariable")
            .field("key", &self.key)
            .field("value", &REDACTED)
            .field("variable_type", &self.variable_type)
            .field("protected", &self.protected)
            .field("masked", &self.masked)
            .field("environment_scope", &self.environment_scope)
            .finish()
    }
}

/// Body of `POST /projects/:id/variables`
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct CreateVariableOptions {
    pub key: String,
    pub value: String,
    pub variable_type: VariableType,
    pub protected: bool,
    pub masked: bool,
    pub environment_scope: String,
}

impl fmt::Debug for CreateVariableOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateVariableOptions")
            .field("key", &self.key)
            .field("value", &REDACTED)
            .field("variable_type", &self.variable_type)
            .field("protected", &self.protected)
            .field("masked", &self.masked)
            .field("environment_scope", &self.environment_scope)
            .finish()
    }
}

/// Body of `PUT /projects/:id/variables/:key`
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct UpdateVariableOptions {
    pub value: String,
    pub variable_type: VariableType,
    pub protected: bool,
    pub masked: bool,
    pub environment_scope: String,
}

impl fmt::Debug for UpdateVariableOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateVariableOptions")
            .field("value", &REDACTED)
            .field("variable_type", &self.variable_type)
            .field("protected", &self.protected)
            .field("masked", &self.masked)
            .field("environment_scope", &self.environment_scope)
            .finish()
    }
}
