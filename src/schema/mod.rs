//! Resource schema module
//!
//! Declarative description of a resource's attributes, consumed by the host
//! for default application, input validation, plan diffing and redaction.
//!
//! # Features
//!
//! - **Typed attributes**: String and bool attributes with required/optional flags
//! - **Force-new markers**: Attributes whose change means replacement
//! - **Sensitivity**: Values redacted from user-facing output
//! - **Validators**: Per-attribute checks run before any remote call

mod types;
mod validation;

pub use types::{Attribute, AttributeType, ResourceSchema, ValidateFn, SENSITIVE_PLACEHOLDER};
pub use validation::{validate_variable_name, validate_variable_type, MAX_VARIABLE_NAME_LEN};

#[cfg(test)]
mod tests;
