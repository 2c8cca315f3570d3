//! Tests for schema declaration and validation

use super::*;
use crate::error::Error;
use crate::state::ResourceData;
use serde_json::json;
use test_case::test_case;

fn sample_schema() -> ResourceSchema {
    ResourceSchema::v0()
        .with_attribute("name", Attribute::required_string().force_new())
        .with_attribute("secret", Attribute::required_string().sensitive())
        .with_attribute("kind", Attribute::optional_string().with_default("env_var"))
        .with_attribute("enabled", Attribute::optional_bool().with_default(false))
        .with_attribute("label", Attribute::optional_string())
}

fn data(value: serde_json::Value) -> ResourceData {
    match value {
        serde_json::Value::Object(map) => ResourceData::from_attributes(map),
        _ => panic!("expected object"),
    }
}

// ============================================================================
// Variable Name Validation
// ============================================================================

#[test_case("DB_URL" ; "upper with underscore")]
#[test_case("token" ; "lowercase")]
#[test_case("_1" ; "leading underscore and digit")]
fn test_valid_variable_names(name: &str) {
    assert!(validate_variable_name("key", &json!(name)).is_ok());
}

#[test_case("" ; "empty")]
#[test_case("DB-URL" ; "dash")]
#[test_case("DB URL" ; "space")]
#[test_case("db.url" ; "dot")]
#[test_case("project:key" ; "separator")]
fn test_invalid_variable_names(name: &str) {
    let err = validate_variable_name("key", &json!(name)).unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn test_variable_name_length_limit() {
    let longest = "A".repeat(MAX_VARIABLE_NAME_LEN);
    assert!(validate_variable_name("key", &json!(longest)).is_ok());

    let too_long = "A".repeat(MAX_VARIABLE_NAME_LEN + 1);
    let err = validate_variable_name("key", &json!(too_long)).unwrap_err();
    assert!(err.to_string().contains("<= 255 characters"));
}

// ============================================================================
// Variable Type Validation
// ============================================================================

#[test_case("env_var", true)]
#[test_case("file", true)]
#[test_case("env", false)]
#[test_case("FILE", false)]
#[test_case("", false)]
fn test_variable_type_allow_list(kind: &str, ok: bool) {
    assert_eq!(validate_variable_type("variable_type", &json!(kind)).is_ok(), ok);
}

// ============================================================================
// Schema Behaviour
// ============================================================================

#[test]
fn test_apply_defaults_fills_only_unset() {
    let schema = sample_schema();
    let mut d = data(json!({"name": "a", "secret": "s", "kind": "file"}));

    schema.apply_defaults(&mut d);

    assert_eq!(d.get_string("kind").unwrap(), "file");
    assert_eq!(d.get("enabled"), Some(&json!(false)));
    assert!(!d.contains("label"));
}

#[test]
fn test_validate_missing_required() {
    let schema = sample_schema();
    let err = schema.validate(&data(json!({"name": "a"}))).unwrap_err();
    assert!(matches!(err, Error::MissingAttribute { ref field } if field == "secret"));
}

#[test]
fn test_validate_wrong_type() {
    let schema = sample_schema();
    let err = schema
        .validate(&data(json!({"name": "a", "secret": "s", "enabled": "yes"})))
        .unwrap_err();
    assert!(matches!(err, Error::AttributeType { .. }));
}

#[test]
fn test_validate_unknown_attribute() {
    let schema = sample_schema();
    let err = schema
        .validate(&data(json!({"name": "a", "secret": "s", "colour": "red"})))
        .unwrap_err();
    assert!(matches!(err, Error::Validation { ref field, .. } if field == "colour"));
}

#[test]
fn test_validate_runs_validator() {
    let schema = ResourceSchema::v0().with_attribute(
        "key",
        Attribute::required_string().with_validator(validate_variable_name),
    );
    assert!(schema.validate(&data(json!({"key": "OK_1"}))).is_ok());
    assert!(schema.validate(&data(json!({"key": "no-dash"}))).is_err());
}

#[test]
fn test_redact_hides_sensitive_values() {
    let schema = sample_schema();
    let redacted = schema.redact(&data(json!({"name": "a", "secret": "hunter2"})));

    assert_eq!(redacted["name"], json!("a"));
    assert_eq!(redacted["secret"], json!(SENSITIVE_PLACEHOLDER));
}

#[test]
fn test_force_new_attributes() {
    let schema = sample_schema();
    let names: Vec<_> = schema.force_new_attributes().collect();
    assert_eq!(names, vec!["name"]);
}

#[test]
fn test_schema_serializes_without_validators() {
    let schema = ResourceSchema::v0().with_attribute(
        "key",
        Attribute::required_string()
            .force_new()
            .with_validator(validate_variable_name),
    );

    let json = serde_json::to_value(&schema).unwrap();
    assert_eq!(
        json,
        json!({
            "version": 0,
            "attributes": {
                "key": {"type": "string", "required": true, "force_new": true}
            }
        })
    );
}
