//! Schema types

use crate::error::{Error, Result};
use crate::state::{json_kind, ResourceData};
use crate::types::{JsonObject, JsonValue};
use serde::Serialize;
use std::collections::BTreeMap;

/// Placeholder shown instead of sensitive attribute values
pub const SENSITIVE_PLACEHOLDER: &str = "(sensitive value)";

/// Per-attribute value check, given the attribute name and its value
pub type ValidateFn = fn(&str, &JsonValue) -> Result<()>;

/// Value type of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    String,
    Bool,
}

impl AttributeType {
    fn accepts(self, value: &JsonValue) -> bool {
        match self {
            AttributeType::String => value.is_string(),
            AttributeType::Bool => value.is_boolean(),
        }
    }
}

impl std::fmt::Display for AttributeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeType::String => write!(f, "string"),
            AttributeType::Bool => write!(f, "bool"),
        }
    }
}

/// Declaration of a single resource attribute
#[derive(Debug, Clone, Serialize)]
pub struct Attribute {
    /// Value type
    #[serde(rename = "type")]
    pub attr_type: AttributeType,

    /// Must be present in desired state
    pub required: bool,

    /// Changing the value requires destroying and recreating the resource
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub force_new: bool,

    /// Value is redacted from user-facing output
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub sensitive: bool,

    /// Value applied when the attribute is unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<JsonValue>,

    /// Human-readable description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Value check run before any remote call
    #[serde(skip)]
    pub validator: Option<ValidateFn>,
}

impl Attribute {
    fn new(attr_type: AttributeType, required: bool) -> Self {
        Self {
            attr_type,
            required,
            force_new: false,
            sensitive: false,
            default: None,
            description: None,
            validator: None,
        }
    }

    pub fn required_string() -> Self {
        Self::new(AttributeType::String, true)
    }

    pub fn optional_string() -> Self {
        Self::new(AttributeType::String, false)
    }

    pub fn optional_bool() -> Self {
        Self::new(AttributeType::Bool, false)
    }

    #[must_use]
    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    #[must_use]
    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    #[must_use]
    pub fn with_default(mut self, value: impl Into<JsonValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_validator(mut self, validator: ValidateFn) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Check a present value against the declared type and validator
    pub fn check(&self, name: &str, value: &JsonValue) -> Result<()> {
        if !self.attr_type.accepts(value) {
            return Err(Error::attribute_type(
                name,
                self.attr_type.to_string(),
                json_kind(value),
            ));
        }
        match self.validator {
            Some(validate) => validate(name, value),
            None => Ok(()),
        }
    }
}

/// Declarative schema of a resource type
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResourceSchema {
    /// Schema version, bumped when the state layout changes
    pub version: u32,

    /// Attributes keyed by name
    pub attributes: BTreeMap<String, Attribute>,
}

impl ResourceSchema {
    /// Create an empty schema at version 0
    pub fn v0() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.attributes.insert(name.into(), attribute);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    pub fn is_sensitive(&self, name: &str) -> bool {
        self.attribute(name).is_some_and(|a| a.sensitive)
    }

    /// Names of attributes whose change forces replacement
    pub fn force_new_attributes(&self) -> impl Iterator<Item = &str> {
        self.attributes
            .iter()
            .filter(|(_, a)| a.force_new)
            .map(|(name, _)| name.as_str())
    }

    /// Fill unset attributes with their declared defaults
    pub fn apply_defaults(&self, data: &mut ResourceData) {
        for (name, attribute) in &self.attributes {
            if let Some(default) = &attribute.default {
                if !data.contains(name) {
                    data.set(name.clone(), default.clone());
                }
            }
        }
    }

    /// Check desired state: unknown names, required presence, types, validators
    pub fn validate(&self, data: &ResourceData) -> Result<()> {
        for (name, value) in data.attributes() {
            if !self.attributes.contains_key(name) && !value.is_null() {
                return Err(Error::validation(
                    name.clone(),
                    "unsupported attribute for this resource type",
                ));
            }
        }

        for (name, attribute) in &self.attributes {
            match data.get(name) {
                Some(value) => attribute.check(name, value)?,
                None if attribute.required => return Err(Error::missing_attribute(name.clone())),
                None => {}
            }
        }

        Ok(())
    }

    /// Attribute values with sensitive entries replaced by a placeholder
    pub fn redact(&self, data: &ResourceData) -> JsonObject {
        data.attributes()
            .iter()
            .map(|(name, value)| {
                let shown = if self.is_sensitive(name) && !value.is_null() {
                    JsonValue::String(SENSITIVE_PLACEHOLDER.to_string())
                } else {
                    value.clone()
                };
                (name.clone(), shown)
            })
            .collect()
    }
}
