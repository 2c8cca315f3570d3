//! Composite identifier of a project variable

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Separator between project and key in the string form
pub const ID_SEPARATOR: char = ':';

const EXPECTED_FORMAT: &str = "project:key";

/// Identity of a managed project variable.
///
/// Encoded as `project:key` wherever a string ID is required (state files,
/// import). The environment scope is not part of the identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariableId {
    pub project: String,
    pub key: String,
}

impl VariableId {
    /// Build an identity, rejecting parts that would not survive a round trip
    pub fn new(project: impl Into<String>, key: impl Into<String>) -> Result<Self> {
        let id = Self {
            project: project.into(),
            key: key.into(),
        };
        if id.project.is_empty()
            || id.key.is_empty()
            || id.project.contains(ID_SEPARATOR)
            || id.key.contains(ID_SEPARATOR)
        {
            return Err(Error::invalid_id(id.to_string(), EXPECTED_FORMAT));
        }
        Ok(id)
    }

    /// Parse the `project:key` form
    pub fn parse(id: &str) -> Result<Self> {
        let parts: Vec<&str> = id.split(ID_SEPARATOR).collect();
        match parts.as_slice() {
            [project, key] if !project.is_empty() && !key.is_empty() => Ok(Self {
                project: (*project).to_string(),
                key: (*key).to_string(),
            }),
            _ => Err(Error::invalid_id(id, EXPECTED_FORMAT)),
        }
    }
}

impl fmt::Display for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{ID_SEPARATOR}{}", self.project, self.key)
    }
}

impl FromStr for VariableId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
