//! Attribute validators for GitLab variables

use crate::error::{Error, Result};
use crate::types::{JsonValue, VariableType};
use regex::Regex;
use std::sync::LazyLock;

/// Longest variable key GitLab accepts
pub const MAX_VARIABLE_NAME_LEN: usize = 255;

static VARIABLE_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_]+$").unwrap());

/// Validator for variable keys: only `A-Z`, `a-z`, `0-9` and `_`, at most
/// 255 characters
pub fn validate_variable_name(field: &str, value: &JsonValue) -> Result<()> {
    let name = value.as_str().unwrap_or_default();

    if name.len() > MAX_VARIABLE_NAME_LEN {
        return Err(Error::validation(
            field,
            format!("{name:?} must be <= {MAX_VARIABLE_NAME_LEN} characters"),
        ));
    }
    if !VARIABLE_NAME_REGEX.is_match(name) {
        return Err(Error::validation(
            field,
            format!("{name:?} is invalid. Only A-Z, a-z, 0-9, and _ are allowed"),
        ));
    }
    Ok(())
}

/// Validator for `variable_type`
pub fn validate_variable_type(field: &str, value: &JsonValue) -> Result<()> {
    let kind = value.as_str().unwrap_or_default();
    kind.parse::<VariableType>()
        .map(|_| ())
        .map_err(|_| {
            Error::validation(
                field,
                format!("{kind:?} is an invalid value. Valid values are \"env_var\" and \"file\""),
            )
        })
}
