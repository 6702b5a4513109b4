//! CLI Command Tests
//!
//! Exercises the compile and validate commands against schema and config
//! files on disk.

use std::fs;
use std::path::PathBuf;

use serde_json::{json, Value};
use tabschema::cli::{compile, validate, CliErrorCode};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn write_json(dir: &TempDir, name: &str, value: &Value) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, value.to_string()).unwrap();
    path
}

fn quiet_config(dir: &TempDir, extra: Value) -> PathBuf {
    let mut config = json!({"min_severity": "error"});
    if let (Some(base), Some(extra)) = (config.as_object_mut(), extra.as_object()) {
        for (k, v) in extra {
            base.insert(k.clone(), v.clone());
        }
    }
    write_json(dir, "tabschema.json", &config)
}

fn movies_schema() -> Value {
    json!({
        "type": "array",
        "items": {
            "type": "array",
            "items": [
                {"title": "title", "type": "string"},
                {"title": "duration", "type": "integer", "min": 0},
                {"type": ["number", "null"]}
            ]
        }
    })
}

// =============================================================================
// Compile Command
// =============================================================================

#[test]
fn test_compile_file() {
    let tmp = TempDir::new().unwrap();
    let schema = write_json(&tmp, "schema.json", &movies_schema());
    let config = quiet_config(&tmp, json!({}));

    let data = compile(Some(schema.as_path()), Some(config.as_path())).unwrap();

    assert_eq!(
        data["columns"],
        json!([
            {"title": "title", "type": "string"},
            {"title": "duration", "type": "integer", "min": 0},
            {"title": "col_2", "type": ["number", "null"]}
        ])
    );
    assert_eq!(data["problems"], json!(["col. 2 title is not set"]));
}

#[test]
fn test_compile_without_config_uses_defaults() {
    let tmp = TempDir::new().unwrap();
    let schema = write_json(&tmp, "schema.json", &movies_schema());

    let data = compile(Some(schema.as_path()), None).unwrap();
    assert_eq!(data["columns"].as_array().unwrap().len(), 3);
}

#[test]
fn test_compile_fail_on_problems() {
    let tmp = TempDir::new().unwrap();
    let schema = write_json(&tmp, "schema.json", &movies_schema());
    let config = quiet_config(&tmp, json!({"fail_on_problems": true}));

    let err = compile(Some(schema.as_path()), Some(config.as_path())).unwrap_err();
    assert_eq!(err.code(), &CliErrorCode::ProblemsFound);
}

#[test]
fn test_compile_rejects_object_wrapper() {
    let tmp = TempDir::new().unwrap();
    let schema = write_json(&tmp, "schema.json", &json!({"type": "object"}));
    let config = quiet_config(&tmp, json!({}));

    let err = compile(Some(schema.as_path()), Some(config.as_path())).unwrap_err();
    assert_eq!(err.code(), &CliErrorCode::InvalidSchema);
    assert!(err.message().starts_with("invalid tabular schema"));
}

#[test]
fn test_compile_missing_schema_file() {
    let tmp = TempDir::new().unwrap();
    let config = quiet_config(&tmp, json!({}));

    let missing = tmp.path().join("missing.json");

    let err = compile(Some(missing.as_path()), Some(config.as_path())).unwrap_err();
    assert_eq!(err.code(), &CliErrorCode::IoError);
}

#[test]
fn test_compile_malformed_schema_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("schema.json");
    fs::write(&path, "{\"type\": \"array\",").unwrap();
    let config = quiet_config(&tmp, json!({}));

    let err = compile(Some(path.as_path()), Some(config.as_path())).unwrap_err();
    assert_eq!(err.code(), &CliErrorCode::IoError);
}

// =============================================================================
// Validate Command
// =============================================================================

#[test]
fn test_validate_clean_titles() {
    let tmp = TempDir::new().unwrap();
    let schema = write_json(&tmp, "schema.json", &movies_schema());
    let config = quiet_config(&tmp, json!({}));

    let data = validate(Some(schema.as_path()), Some(config.as_path())).unwrap();
    assert_eq!(data, json!({"valid": true, "titles": ["title", "duration", "col_2"]}));
}

#[test]
fn test_validate_reports_every_violation() {
    let tmp = TempDir::new().unwrap();
    let schema = write_json(
        &tmp,
        "schema.json",
        &json!({
            "type": "array",
            "items": {"type": "array", "items": [
                {"title": "2nd", "type": "string"},
                {"title": "ok", "type": "string"},
                {"title": "ok", "type": "string"}
            ]}
        }),
    );
    let config = quiet_config(&tmp, json!({}));

    let err = validate(Some(schema.as_path()), Some(config.as_path())).unwrap_err();
    assert_eq!(err.code(), &CliErrorCode::InvalidTitles);
    assert_eq!(
        err.message(),
        "invalid tabular schema: column names have problems:\n\
         col. 0 name '2nd' is not a valid column name\n\
         col. 2 name 'ok' is not unique"
    );
}

#[test]
fn test_invalid_config_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let schema = write_json(&tmp, "schema.json", &movies_schema());
    let config = write_json(&tmp, "tabschema.json", &json!({"min_severity": "verbose"}));

    let err = validate(Some(schema.as_path()), Some(config.as_path())).unwrap_err();
    assert_eq!(err.code(), &CliErrorCode::ConfigError);
}
