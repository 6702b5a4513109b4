//! Tabular schema compiler
//!
//! Reads an untyped JSON-Schema-shaped document and produces an ordered
//! column set. Two failure tiers apply:
//!
//! - Structural shape mismatches (wrong container types, unknown top-level
//!   type) abort with a `CompileError`.
//! - Per-column metadata gaps degrade to `Problem`s and the column keeps
//!   its defaults, so the column count always equals the positional entry
//!   count.
//!
//! Compilation is pure: no I/O, no logging, inputs are never mutated.

use serde_json::{Map, Value};

use super::errors::{CompileError, CompileResult};
use super::types::{Column, Columns, Problem, ProblemKind, TypeUnion};

/// Type assumed for a column that declares none
const DEFAULT_COLUMN_TYPE: &str = "string";

/// Output of a successful compilation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Compiled {
    pub columns: Columns,
    pub problems: Vec<Problem>,
}

impl Compiled {
    pub fn into_parts(self) -> (Columns, Vec<Problem>) {
        (self.columns, self.problems)
    }

    pub fn has_problems(&self) -> bool {
        !self.problems.is_empty()
    }
}

/// Compiles a tabular schema document into its column set.
///
/// # Errors
///
/// Returns `CompileError::InvalidSchema` when the top-level `type`,
/// `items`, or `items.items` are missing or of the wrong kind, and
/// `CompileError::Unimplemented` for object-wrapper schemas.
pub fn compile(schema: &Value) -> CompileResult<Compiled> {
    let top_type = schema
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| CompileError::invalid("top-level 'type' field is required"))?;

    match top_type {
        "array" => compile_array_wrapper(schema),
        "object" => Err(CompileError::Unimplemented),
        other => Err(CompileError::invalid(format!(
            "{} is not a valid type to describe the top level of a tabular schema",
            other
        ))),
    }
}

/// Rows are positional arrays: `items.items` lists one schema per cell.
fn compile_array_wrapper(schema: &Value) -> CompileResult<Compiled> {
    let items = schema
        .get("items")
        .and_then(Value::as_object)
        .ok_or_else(|| CompileError::invalid("top level 'items' property must be an object"))?;

    let cells = items
        .get("items")
        .and_then(Value::as_array)
        .ok_or_else(|| CompileError::invalid("items.items must be an array"))?;

    let mut compiled = Compiled {
        columns: Columns::new(),
        problems: Vec::new(),
    };

    for (index, cell) in cells.iter().enumerate() {
        let column = compile_column(index, cell, &mut compiled.problems);
        compiled.columns.push(column);
    }

    Ok(compiled)
}

/// Compiles one positional entry. Always returns a column.
fn compile_column(index: usize, cell: &Value, problems: &mut Vec<Problem>) -> Column {
    let mut column = Column::new(format!("col_{}", index), DEFAULT_COLUMN_TYPE);

    let fields = match cell.as_object() {
        Some(fields) => fields,
        None => {
            problems.push(Problem::new(index, ProblemKind::NotAnObject));
            return column;
        }
    };

    let (title_set, type_set) = apply_fields(&mut column, fields);

    if !title_set {
        problems.push(Problem::new(index, ProblemKind::TitleNotSet));
    }
    if !type_set {
        problems.push(Problem::new(index, ProblemKind::TypeNotSet));
    }

    column
}

/// Classifies each key of a column schema. Returns (title set, type set).
fn apply_fields(column: &mut Column, fields: &Map<String, Value>) -> (bool, bool) {
    let mut title_set = false;
    let mut type_set = false;

    for (key, value) in fields {
        match key.as_str() {
            "title" => {
                if let Some(title) = value.as_str() {
                    column.title = title.to_string();
                    title_set = true;
                }
            }
            "type" => {
                type_set = true;
                let declared: TypeUnion = match value {
                    Value::String(name) => TypeUnion::single(name.as_str()),
                    Value::Array(names) => names
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect(),
                    _ => TypeUnion::default(),
                };
                // declared but with no usable names: keep the default union
                if !declared.is_empty() {
                    column.col_type = declared;
                }
            }
            "description" => {
                if let Some(description) = value.as_str().filter(|d| !d.is_empty()) {
                    column.description = Some(description.to_string());
                }
            }
            _ => {
                column.validation.insert(key.clone(), value.clone());
            }
        }
    }

    (title_set, type_set)
}
