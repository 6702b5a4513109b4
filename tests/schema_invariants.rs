//! Schema Invariant Tests
//!
//! Tests for the tabular schema compiler and title validator:
//! - Column count always equals the positional entry count
//! - Column order is declaration order
//! - Compiled output re-compiles to an equal column set
//! - Type unions keep the single-vs-many distinction
//! - Title violations are aggregated in column order

use serde_json::{json, Value};
use tabschema::schema::{
    base_tabular_schema, compile, validate_machine_titles, Column, Columns, CompileError,
    TypeUnion, INVALID_TABULAR_SCHEMA,
};

// =============================================================================
// Helper Functions
// =============================================================================

fn array_wrapper(cells: Value) -> Value {
    json!({
        "type": "array",
        "items": {"type": "array", "items": cells}
    })
}

fn titled(titles: &[&str]) -> Columns {
    titles.iter().map(|t| Column::new(*t, "string")).collect()
}

// =============================================================================
// Column Count Tests
// =============================================================================

/// Every positional entry yields exactly one column, defects included.
#[test]
fn test_column_count_matches_entries() {
    let cells = json!([
        {"title": "a", "type": "string"},
        "not an object",
        {},
        {"type": ["integer", "null"]},
        null,
        {"title": "f"}
    ]);
    let expected = cells.as_array().unwrap().len();

    let compiled = compile(&array_wrapper(cells)).unwrap();
    assert_eq!(compiled.columns.len(), expected);
    assert_eq!(
        compiled.columns.titles(),
        vec!["a", "col_1", "col_2", "col_3", "col_4", "f"]
    );
}

/// Problems name each defect; fatal errors never accompany them.
#[test]
fn test_problems_listed_in_column_order() {
    let compiled = compile(&array_wrapper(json!([{}, 7, {"title": "c"}]))).unwrap();
    let problems: Vec<String> = compiled.problems.iter().map(ToString::to_string).collect();

    assert_eq!(
        problems,
        vec![
            "col. 0 title is not set",
            "col, 0 type is not set, defaulting to string",
            "col. 1 schema should be an object",
            "col, 2 type is not set, defaulting to string",
        ]
    );
}

// =============================================================================
// Fatal Shape Tests
// =============================================================================

#[test]
fn test_empty_document_is_fatal() {
    let err = compile(&json!({})).unwrap_err();
    assert_eq!(err.to_string(), "invalid tabular schema: top-level 'type' field is required");
}

#[test]
fn test_items_items_not_array_is_fatal() {
    let err = compile(&json!({"type": "array", "items": {"type": "string"}})).unwrap_err();
    assert_eq!(err.to_string(), "invalid tabular schema: items.items must be an array");
}

/// Every fatal error shares the category prefix.
#[test]
fn test_fatal_errors_share_prefix() {
    let bad = [
        json!({}),
        json!({"type": "number"}),
        json!({"type": "object"}),
        json!({"type": "array"}),
        json!({"type": "array", "items": {}}),
    ];

    for schema in bad {
        let err: CompileError = compile(&schema).unwrap_err();
        assert!(err.is_invalid_tabular_schema());
        assert!(
            err.to_string().starts_with(INVALID_TABULAR_SCHEMA),
            "unexpected message: {}",
            err
        );
    }
}

// =============================================================================
// Round Trip Tests
// =============================================================================

/// Compiled columns encode to a schema fragment that re-compiles equally.
#[test]
fn test_columns_round_trip_through_schema() {
    let schema = array_wrapper(json!([
        {"title": "id", "type": "integer", "description": "row identifier"},
        {"title": "rating", "type": ["number", "null"], "max": 5, "min": 0},
        {"title": "tags", "type": "array", "items": {"type": "string"}, "uniqueItems": true}
    ]));

    let first = compile(&schema).unwrap();
    assert!(first.problems.is_empty());

    let second = compile(&first.columns.to_schema().unwrap()).unwrap();
    assert_eq!(second.columns, first.columns);
    assert!(second.problems.is_empty());
}

/// Defaulted columns round-trip with their defaults made explicit.
#[test]
fn test_defaulted_columns_round_trip_without_problems() {
    let first = compile(&array_wrapper(json!([{}, "x"]))).unwrap();
    assert_eq!(first.problems.len(), 3);

    let second = compile(&first.columns.to_schema().unwrap()).unwrap();
    assert_eq!(second.columns, first.columns);
    assert!(second.problems.is_empty());
}

/// Column JSON decodes back through serde to the same column set.
#[test]
fn test_columns_serde_round_trip() {
    let compiled = compile(&array_wrapper(json!([
        {"title": "rating", "type": ["number", "null"], "max": 5},
        {"title": "name", "type": "string", "description": "display name"}
    ])))
    .unwrap();

    let encoded = serde_json::to_value(&compiled.columns).unwrap();
    assert_eq!(
        encoded,
        json!([
            {"title": "rating", "type": ["number", "null"], "max": 5},
            {"title": "name", "type": "string", "description": "display name"}
        ])
    );

    let decoded: Columns = serde_json::from_value(encoded).unwrap();
    assert_eq!(decoded, compiled.columns);
}

#[test]
fn test_type_union_round_trip() {
    for raw in [json!("string"), json!(["number", "null"]), json!(["a", "b", "c"])] {
        let union: TypeUnion = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&union).unwrap(), raw);
    }
}

#[test]
fn test_base_schema_compiles_empty() {
    let compiled = compile(&base_tabular_schema()).unwrap();
    assert!(compiled.columns.is_empty());
    assert!(compiled.problems.is_empty());
}

// =============================================================================
// Title Validation Tests
// =============================================================================

#[test]
fn test_clean_titles_pass() {
    assert!(validate_machine_titles(&titled(&["id", "first_name", "$amount", "_n2"])).is_ok());
}

/// One bad character yields exactly one violation line.
#[test]
fn test_single_invalid_title() {
    let err = validate_machine_titles(&titled(&["id", "first-name", "age"])).unwrap_err();
    assert_eq!(err.problems(), ["col. 1 name 'first-name' is not a valid column name"]);
}

/// One duplicate yields exactly one violation line.
#[test]
fn test_single_duplicate_title() {
    let err = validate_machine_titles(&titled(&["a", "a"])).unwrap_err();
    assert!(err.to_string().ends_with("col. 1 name 'a' is not unique"));
    assert_eq!(err.problems().len(), 1);
}

/// Compilation does not enforce titles; validation does.
#[test]
fn test_compile_then_validate_defaults() {
    let compiled = compile(&array_wrapper(json!([{"type": "string"}, {"type": "string"}]))).unwrap();
    assert!(compiled.columns.validate_machine_titles().is_ok());

    let compiled = compile(&array_wrapper(json!([
        {"title": "total cost", "type": "number"},
        {"title": "total cost", "type": "number"}
    ])))
    .unwrap();
    let err = compiled.columns.validate_machine_titles().unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid tabular schema: column names have problems:\n\
         col. 0 name 'total cost' is not a valid column name\n\
         col. 1 name 'total cost' is not a valid column name\n\
         col. 1 name 'total cost' is not unique"
    );
}
