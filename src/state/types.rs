//! State types for managed resources
//!
//! These types are serialized to JSON and persisted between runs.

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Attribute container for one resource instance.
///
/// Holds the resource ID (once the remote object exists) and the attribute
/// values keyed by schema name. Getters return the zero value of the
/// requested type when an attribute is absent or null.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceData {
    /// Opaque identifier assigned by the resource on create or import
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,

    /// Attribute values
    #[serde(default)]
    attributes: JsonObject,
}

impl ResourceData {
    /// Create an empty container
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a container from desired attribute values
    pub fn from_attributes(attributes: JsonObject) -> Self {
        Self {
            id: None,
            attributes,
        }
    }

    /// Create a container holding only an ID, as import does
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            attributes: JsonObject::new(),
        }
    }

    /// Resource ID, if assigned
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Assign the resource ID
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    /// Forget the resource ID
    pub fn clear_id(&mut self) {
        self.id = None;
    }

    /// Raw attribute value
    pub fn get(&self, name: &str) -> Option<&JsonValue> {
        self.attributes.get(name).filter(|v| !v.is_null())
    }

    /// Whether an attribute holds a non-null value
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// String attribute, `""` when unset
    pub fn get_string(&self, name: &str) -> Result<String> {
        match self.get(name) {
            None => Ok(String::new()),
            Some(JsonValue::String(s)) => Ok(s.clone()),
            Some(other) => Err(Error::attribute_type(name, "string", json_kind(other))),
        }
    }

    /// Bool attribute, `false` when unset
    pub fn get_bool(&self, name: &str) -> Result<bool> {
        match self.get(name) {
            None => Ok(false),
            Some(JsonValue::Bool(b)) => Ok(*b),
            Some(other) => Err(Error::attribute_type(name, "bool", json_kind(other))),
        }
    }

    /// Set an attribute value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<JsonValue>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Remove an attribute
    pub fn remove(&mut self, name: &str) -> Option<JsonValue> {
        self.attributes.remove(name)
    }

    /// All attribute values
    pub fn attributes(&self) -> &JsonObject {
        &self.attributes
    }
}

impl fmt::Debug for ResourceData {
    // Attribute values may be sensitive; only names are shown.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceData")
            .field("id", &self.id)
            .field("attributes", &self.attributes.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Name of a JSON value's type, for error messages
pub(crate) fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

/// One managed resource as recorded in the state file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRecord {
    /// Registered resource type name
    pub resource_type: String,

    /// Last observed attributes
    pub data: ResourceData,
}

/// Complete state file contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct State {
    /// State file format version
    #[serde(default = "default_state_version")]
    pub version: u32,

    /// Managed resources keyed by user-chosen name
    #[serde(default)]
    pub resources: BTreeMap<String, ResourceRecord>,
}

fn default_state_version() -> u32 {
    1
}

impl State {
    /// Create a new empty state
    pub fn new() -> Self {
        Self {
            version: default_state_version(),
            resources: BTreeMap::new(),
        }
    }

    /// Get a resource by name
    pub fn get(&self, name: &str) -> Option<&ResourceRecord> {
        self.resources.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_getters_return_zero_values_when_unset() {
        let data = ResourceData::new();
        assert_eq!(data.get_string("environment_scope").unwrap(), "");
        assert!(!data.get_bool("masked").unwrap());
    }

    #[test]
    fn test_null_counts_as_unset() {
        let mut data = ResourceData::new();
        data.set("environment_scope", JsonValue::Null);
        assert!(!data.contains("environment_scope"));
        assert_eq!(data.get_string("environment_scope").unwrap(), "");
    }

    #[test]
    fn test_type_mismatch_is_reported() {
        let mut data = ResourceData::new();
        data.set("environment_scope", false);

        let err = data.get_string("environment_scope").unwrap_err();
        assert!(matches!(err, Error::AttributeType { .. }));
        assert!(err.to_string().contains("got bool"));
    }

    #[test]
    fn test_set_and_get() {
        let mut data = ResourceData::new();
        data.set("key", "DB_URL");
        data.set("protected", true);

        assert_eq!(data.get_string("key").unwrap(), "DB_URL");
        assert!(data.get_bool("protected").unwrap());
    }

    #[test]
    fn test_id_lifecycle() {
        let mut data = ResourceData::with_id("group/app:DB_URL");
        assert_eq!(data.id(), Some("group/app:DB_URL"));
        assert!(data.attributes().is_empty());

        data.clear_id();
        assert_eq!(data.id(), None);
    }

    #[test]
    fn test_debug_hides_values() {
        let mut data = ResourceData::new();
        data.set("value", "hunter2");
        let debug = format!("{data:?}");
        assert!(debug.contains("value"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_state_serde() {
        let state: State = serde_json::from_value(json!({
            "resources": {
                "db_url": {
                    "resource_type": "gitlab_project_variable",
                    "data": {"id": "7:DB_URL", "attributes": {"key": "DB_URL"}}
                }
            }
        }))
        .unwrap();

        assert_eq!(state.version, 1);
        let record = state.get("db_url").unwrap();
        assert_eq!(record.data.id(), Some("7:DB_URL"));
    }
}
