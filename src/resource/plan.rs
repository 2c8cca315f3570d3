//! Desired-versus-observed diffing
//!
//! Decides which lifecycle callback the host should invoke for a resource.
//! Unset attributes compare equal to their default, or to the zero value of
//! their type when no default is declared.

use crate::schema::{Attribute, AttributeType, ResourceSchema, SENSITIVE_PLACEHOLDER};
use crate::state::ResourceData;
use crate::types::JsonValue;
use serde::Serialize;
use std::fmt;

/// Lifecycle step chosen for a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanAction {
    NoOp,
    Create,
    Update,
    /// Delete then create, because a force-new attribute changed
    Replace,
    Delete,
}

impl fmt::Display for PlanAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PlanAction::NoOp => "no changes",
            PlanAction::Create => "create",
            PlanAction::Update => "update in-place",
            PlanAction::Replace => "replace",
            PlanAction::Delete => "destroy",
        };
        f.write_str(s)
    }
}

/// One attribute whose value differs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeChange {
    pub name: String,
    pub before: Option<JsonValue>,
    pub after: Option<JsonValue>,
    pub sensitive: bool,
    pub forces_replacement: bool,
}

/// Outcome of diffing one resource
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plan {
    pub action: PlanAction,
    pub changes: Vec<AttributeChange>,
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.action)?;
        for change in &self.changes {
            let show = |v: &Option<JsonValue>| match v {
                None => "(unset)".to_string(),
                Some(_) if change.sensitive => SENSITIVE_PLACEHOLDER.to_string(),
                Some(v) => v.to_string(),
            };
            write!(
                f,
                "  {}: {} -> {}",
                change.name,
                show(&change.before),
                show(&change.after)
            )?;
            if change.forces_replacement {
                write!(f, " (forces replacement)")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn effective(attribute: &Attribute, value: Option<&JsonValue>) -> JsonValue {
    if let Some(v) = value {
        return v.clone();
    }
    if let Some(default) = &attribute.default {
        return default.clone();
    }
    match attribute.attr_type {
        AttributeType::String => JsonValue::String(String::new()),
        AttributeType::Bool => JsonValue::Bool(false),
    }
}

/// Diff prior observed state against desired state.
///
/// `prior` is `None` when the resource is not yet managed; `desired` is
/// `None` when the resource should be destroyed.
pub fn plan(
    schema: &ResourceSchema,
    prior: Option<&ResourceData>,
    desired: Option<&ResourceData>,
) -> Plan {
    let mut changes = Vec::new();

    for (name, attribute) in &schema.attributes {
        let before = prior.and_then(|p| p.get(name));
        let after = desired.and_then(|d| d.get(name));

        let differs = match (prior, desired) {
            (Some(_), Some(_)) => effective(attribute, before) != effective(attribute, after),
            _ => before.is_some() || after.is_some(),
        };

        if differs {
            changes.push(AttributeChange {
                name: name.clone(),
                before: before.cloned(),
                after: after.cloned(),
                sensitive: attribute.sensitive,
                forces_replacement: prior.is_some() && desired.is_some() && attribute.force_new,
            });
        }
    }

    let action = match (prior, desired) {
        (None, None) => PlanAction::NoOp,
        (None, Some(_)) => PlanAction::Create,
        (Some(_), None) => PlanAction::Delete,
        (Some(_), Some(_)) if changes.iter().any(|c| c.forces_replacement) => PlanAction::Replace,
        (Some(_), Some(_)) if !changes.is_empty() => PlanAction::Update,
        (Some(_), Some(_)) => PlanAction::NoOp,
    };

    Plan { action, changes }
}
